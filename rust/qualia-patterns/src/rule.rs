//! The declarative extraction-rule language and its interpreter.
//!
//! A rule describes how to get from a trigger span to the candidate
//! token(s) by walking the dependency tree:
//!
//! ```text
//! rule  ::= Walk(anchor, hops)                       yields one token
//!         | Pair { head, complement, elide_head }    yields head+complement
//!         | FirstOf([rule, ...])                     first success wins
//! anchor ::= MatchStart | MatchEnd | StartOffset(n)
//! hop    ::= Up { deps, pos } | Down { deps, pos }
//! ```
//!
//! Each hop takes the first ancestor (nearest first) or child (sentence
//! order) passing both the dependency-label and part-of-speech filters.
//! Exhausting any walk signals [`PatternNotFound`].

use qualia_nlp::{
    DepLabel, PatternNotFound, PosTag, Token, TokenSequence, ancestor_matching, child_matching,
};

use crate::trigger::TriggerSpan;

/// Which token of the trigger span a walk starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The first matched token.
    MatchStart,
    /// The last matched token.
    MatchEnd,
    /// A fixed offset from the first matched token.
    StartOffset(usize),
}

/// One step of a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hop {
    /// First ancestor with an accepted label and tag.
    Up { deps: Vec<DepLabel>, pos: Vec<PosTag> },
    /// First child with an accepted label and tag.
    Down { deps: Vec<DepLabel>, pos: Vec<PosTag> },
}

impl Hop {
    fn follow(&self, seq: &TokenSequence, from: usize) -> Result<usize, PatternNotFound> {
        match self {
            Hop::Up { deps, pos } => ancestor_matching(seq, from, deps, pos),
            Hop::Down { deps, pos } => child_matching(seq, from, deps, pos),
        }
    }
}

/// An anchored sequence of hops yielding the token reached last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRule {
    pub anchor: Anchor,
    pub hops: Vec<Hop>,
}

impl WalkRule {
    fn resolve(&self, seq: &TokenSequence, span: &TriggerSpan) -> Result<usize, PatternNotFound> {
        let mut current = match self.anchor {
            Anchor::MatchStart => span.start,
            Anchor::MatchEnd => span.end,
            Anchor::StartOffset(offset) => span.start + offset,
        };
        if current >= seq.len() {
            return Err(PatternNotFound);
        }
        for hop in &self.hops {
            current = hop.follow(seq, current)?;
        }
        Ok(current)
    }
}

/// A tree-extraction rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionRule {
    /// Yield the token reached by the walk.
    Walk(WalkRule),

    /// Yield the head token and its complement as one multi-token
    /// candidate (verb+object idioms). When the head's lower-cased surface
    /// form is listed in `elide_head`, only the complement is yielded.
    Pair {
        head: WalkRule,
        complement: Hop,
        elide_head: Vec<&'static str>,
    },

    /// Try alternatives in order; the first one that succeeds wins.
    FirstOf(Vec<ExtractionRule>),
}

impl ExtractionRule {
    /// Run the rule against a parsed sequence and a trigger span, yielding
    /// the candidate tokens.
    pub fn apply(
        &self,
        seq: &TokenSequence,
        span: &TriggerSpan,
    ) -> Result<Vec<Token>, PatternNotFound> {
        let indices = self.resolve(seq, span)?;
        indices
            .into_iter()
            .map(|index| seq.get(index).cloned().ok_or(PatternNotFound))
            .collect()
    }

    fn resolve(
        &self,
        seq: &TokenSequence,
        span: &TriggerSpan,
    ) -> Result<Vec<usize>, PatternNotFound> {
        match self {
            ExtractionRule::Walk(walk) => Ok(vec![walk.resolve(seq, span)?]),
            ExtractionRule::Pair {
                head,
                complement,
                elide_head,
            } => {
                let head_index = head.resolve(seq, span)?;
                let complement_index = complement.follow(seq, head_index)?;
                let head_surface = seq
                    .get(head_index)
                    .ok_or(PatternNotFound)?
                    .surface
                    .to_lowercase();
                if elide_head.contains(&head_surface.as_str()) {
                    Ok(vec![complement_index])
                } else {
                    Ok(vec![head_index, complement_index])
                }
            }
            ExtractionRule::FirstOf(alternatives) => {
                for alternative in alternatives {
                    if let Ok(found) = alternative.resolve(seq, span) {
                        return Ok(found);
                    }
                }
                Err(PatternNotFound)
            }
        }
    }
}
