//! The token and dependency-tree data model.
//!
//! A parsed sentence (or a whole evidence snippet — the pipeline may span
//! sentence boundaries) is a flat [`TokenSequence`]. The tree structure is
//! encoded in each token's `head` index; a root token is its own head.
//! Ancestor iteration follows head links nearest-first, child iteration
//! yields dependents in sentence order, matching how dependency parsers
//! expose their trees.

use std::fmt;

/// Universal Dependencies part-of-speech tags (UPOS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PosTag {
    /// Map a UPOS tag name to its enum value. Unknown names map to [`PosTag::X`].
    pub fn from_upos(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "ADJ" => Self::Adj,
            "ADP" => Self::Adp,
            "ADV" => Self::Adv,
            "AUX" => Self::Aux,
            "CCONJ" | "CONJ" => Self::Cconj,
            "DET" => Self::Det,
            "INTJ" => Self::Intj,
            "NOUN" => Self::Noun,
            "NUM" => Self::Num,
            "PART" => Self::Part,
            "PRON" => Self::Pron,
            "PROPN" => Self::Propn,
            "PUNCT" => Self::Punct,
            "SCONJ" => Self::Sconj,
            "SYM" => Self::Sym,
            "VERB" => Self::Verb,
            _ => Self::X,
        }
    }
}

/// Dependency relation labels.
///
/// Covers the labels the extraction rules filter on plus the common
/// remainder of the Universal Dependencies inventory. Labels outside the
/// inventory collapse into [`DepLabel::Other`]; they can still anchor a walk
/// but never satisfy a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepLabel {
    Root,
    Nsubj,
    Nsubjpass,
    Dobj,
    Iobj,
    Nmod,
    Amod,
    Advmod,
    Conj,
    Cc,
    Case,
    Cop,
    Det,
    Aux,
    Auxpass,
    Xcomp,
    Ccomp,
    Acl,
    Advcl,
    Compound,
    Mark,
    Neg,
    Punct,
    Other,
}

impl DepLabel {
    /// Map a dependency relation name to its enum value.
    ///
    /// Subtype suffixes (`nmod:of`, `acl:relcl`) are stripped. Both UD v1
    /// and v2 object names are accepted (`dobj`/`obj`).
    pub fn from_deprel(label: &str) -> Self {
        let base = label.split(':').next().unwrap_or(label);
        match base.to_ascii_lowercase().as_str() {
            "root" => Self::Root,
            "nsubj" => Self::Nsubj,
            "nsubjpass" | "nsubj_pass" => Self::Nsubjpass,
            "dobj" | "obj" => Self::Dobj,
            "iobj" => Self::Iobj,
            "nmod" | "obl" => Self::Nmod,
            "amod" => Self::Amod,
            "advmod" => Self::Advmod,
            "conj" => Self::Conj,
            "cc" => Self::Cc,
            "case" => Self::Case,
            "cop" => Self::Cop,
            "det" => Self::Det,
            "aux" => Self::Aux,
            "auxpass" | "aux_pass" => Self::Auxpass,
            "xcomp" => Self::Xcomp,
            "ccomp" => Self::Ccomp,
            "acl" => Self::Acl,
            "advcl" => Self::Advcl,
            "compound" => Self::Compound,
            "mark" => Self::Mark,
            "neg" => Self::Neg,
            "punct" => Self::Punct,
            _ => Self::Other,
        }
    }
}

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The surface form as it appeared in the text.
    pub surface: String,
    /// The lemma (dictionary form).
    pub lemma: String,
    /// Part-of-speech tag.
    pub pos: PosTag,
    /// Dependency relation to the head.
    pub dep: DepLabel,
    /// Index of the head token; a root token is its own head.
    pub head: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.surface)
    }
}

/// An annotated token sequence with dependency-tree accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(
            tokens.iter().all(|t| t.head < tokens.len()),
            "token head index out of range"
        );
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// The lower-cased, whitespace-joined surface form that trigger
    /// expressions are matched against.
    pub fn joined_lower(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.surface.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Indices of the ancestors of `index`, nearest first, ending at the
    /// root. The walk is bounded by the sequence length, so a malformed
    /// head cycle cannot loop forever.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let mut current = index;
        let mut remaining = self.tokens.len();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            let head = self.tokens.get(current)?.head;
            if head == current {
                return None;
            }
            current = head;
            Some(current)
        })
    }

    /// Indices of the direct dependents of `index`, in sentence order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(i, t)| t.head == index && *i != index)
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(surface: &str, dep: DepLabel, head: usize) -> Token {
        Token {
            surface: surface.to_string(),
            lemma: surface.to_lowercase(),
            pos: PosTag::Noun,
            dep,
            head,
        }
    }

    // "Dog is a nice animal" with "animal" as root.
    fn dog_sentence() -> TokenSequence {
        TokenSequence::new(vec![
            tok("Dog", DepLabel::Nsubj, 4),
            tok("is", DepLabel::Cop, 4),
            tok("a", DepLabel::Det, 4),
            tok("nice", DepLabel::Amod, 4),
            tok("animal", DepLabel::Root, 4),
        ])
    }

    #[test]
    fn ancestors_walk_nearest_first() {
        let seq = TokenSequence::new(vec![
            tok("a", DepLabel::Det, 1),
            tok("b", DepLabel::Nmod, 2),
            tok("c", DepLabel::Root, 2),
        ]);
        let up: Vec<_> = seq.ancestors(0).collect();
        assert_eq!(up, vec![1, 2]);
    }

    #[test]
    fn root_has_no_ancestors() {
        let seq = dog_sentence();
        assert_eq!(seq.ancestors(4).count(), 0);
    }

    #[test]
    fn children_in_sentence_order() {
        let seq = dog_sentence();
        let kids: Vec<_> = seq.children(4).collect();
        assert_eq!(kids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn joined_lower_joins_surfaces() {
        let seq = dog_sentence();
        assert_eq!(seq.joined_lower(), "dog is a nice animal");
    }

    #[test]
    fn deprel_names_resolve_across_ud_versions() {
        assert_eq!(DepLabel::from_deprel("dobj"), DepLabel::Dobj);
        assert_eq!(DepLabel::from_deprel("obj"), DepLabel::Dobj);
        assert_eq!(DepLabel::from_deprel("nmod:of"), DepLabel::Nmod);
        assert_eq!(DepLabel::from_deprel("wat"), DepLabel::Other);
    }

    #[test]
    fn upos_names_resolve() {
        assert_eq!(PosTag::from_upos("NOUN"), PosTag::Noun);
        assert_eq!(PosTag::from_upos("verb"), PosTag::Verb);
        assert_eq!(PosTag::from_upos("???"), PosTag::X);
    }
}
