//! The fixed per-role sequence catalogues.
//!
//! Each role owns a statically declared set of sequences; singular and
//! plural surface variants are separate entries. Declaration order is
//! significant: aggregation and reduction preserve it, so it is part of
//! the observable behavior.

use qualia_nlp::{DepLabel, PosTag};

use crate::rule::{Anchor, ExtractionRule, Hop, WalkRule};
use crate::sequence::{Number, SemanticSequence};

const NOUN: PosTag = PosTag::Noun;
const VERB: PosTag = PosTag::Verb;
const AUX: PosTag = PosTag::Aux;

const ROOT: DepLabel = DepLabel::Root;
const NSUBJ: DepLabel = DepLabel::Nsubj;
const DOBJ: DepLabel = DepLabel::Dobj;
const NMOD: DepLabel = DepLabel::Nmod;
const CONJ: DepLabel = DepLabel::Conj;
const XCOMP: DepLabel = DepLabel::Xcomp;
const CCOMP: DepLabel = DepLabel::Ccomp;

fn up(deps: &[DepLabel], pos: &[PosTag]) -> Hop {
    Hop::Up {
        deps: deps.to_vec(),
        pos: pos.to_vec(),
    }
}

fn down(deps: &[DepLabel], pos: &[PosTag]) -> Hop {
    Hop::Down {
        deps: deps.to_vec(),
        pos: pos.to_vec(),
    }
}

fn walk(anchor: Anchor, hops: Vec<Hop>) -> ExtractionRule {
    ExtractionRule::Walk(WalkRule { anchor, hops })
}

fn conj_ancestor() -> ExtractionRule {
    walk(Anchor::MatchEnd, vec![up(&[CONJ], &[NOUN])])
}

fn illustrated_object() -> ExtractionRule {
    // "like pizzas especially things": up to the governing verb, down to
    // its direct object.
    walk(
        Anchor::MatchEnd,
        vec![up(&[ROOT, XCOMP], &[VERB]), down(&[DOBJ], &[NOUN])],
    )
}

fn creating_verb() -> ExtractionRule {
    walk(Anchor::MatchEnd, vec![up(&[ROOT, XCOMP], &[VERB])])
}

fn completed_verb() -> ExtractionRule {
    walk(Anchor::MatchEnd, vec![up(&[ROOT, CCOMP], &[VERB])])
}

fn component_of_verb(offset: usize) -> ExtractionRule {
    walk(
        Anchor::StartOffset(offset),
        vec![down(&[NMOD, DOBJ], &[NOUN])],
    )
}

fn used_to() -> ExtractionRule {
    ExtractionRule::FirstOf(vec![
        // "used to repair bicycles" — verb plus object, eliding a bare "do".
        ExtractionRule::Pair {
            head: WalkRule {
                anchor: Anchor::MatchEnd,
                hops: vec![down(&[XCOMP], &[VERB, AUX])],
            },
            complement: down(&[DOBJ], &[NOUN]),
            elide_head: vec!["do"],
        },
        // "used to sacrifice" — intransitive complement verb.
        walk(Anchor::MatchEnd, vec![down(&[XCOMP], &[VERB])]),
        // "used to animals" — nominal complement.
        walk(Anchor::MatchEnd, vec![down(&[NMOD], &[NOUN])]),
    ])
}

fn purpose_is() -> ExtractionRule {
    ExtractionRule::FirstOf(vec![
        // "is to destroy humanity" — verb plus object.
        ExtractionRule::Pair {
            head: WalkRule {
                anchor: Anchor::MatchEnd,
                hops: vec![down(&[XCOMP], &[VERB])],
            },
            complement: down(&[DOBJ], &[NOUN]),
            elide_head: vec![],
        },
        // "is sacrifice" / "is to be destroyed" — bare complement.
        walk(Anchor::MatchEnd, vec![down(&[XCOMP], &[VERB, NOUN])]),
        // "the purpose of a tank is war" — nominal predicate above the copula.
        walk(Anchor::MatchEnd, vec![up(&[CCOMP, ROOT], &[NOUN])]),
    ])
}

/// Sequences of the formal role: taxonomic relations (what the subject is).
pub fn formal_sequences() -> Vec<SemanticSequence> {
    vec![
        SemanticSequence::new(
            "kind-of",
            Number::Singular,
            r"{word} is(\sa|) kind of",
            "a|an {word} is kind of",
            &[],
            walk(Anchor::MatchEnd, vec![up(&[NMOD, ROOT], &[NOUN])]),
        ),
        SemanticSequence::new(
            "is-a",
            Number::Singular,
            "{word} is",
            "a|an {word} is a",
            &[],
            walk(Anchor::MatchStart, vec![up(&[ROOT], &[NOUN])]),
        ),
        SemanticSequence::new(
            "and-other",
            Number::Singular,
            "{word}(,|) and other",
            "a|an {word} and other",
            &[],
            conj_ancestor(),
        ),
        SemanticSequence::new(
            "or-other",
            Number::Singular,
            "{word}(,|) or other",
            "a|an {word} or other",
            &[],
            conj_ancestor(),
        ),
        SemanticSequence::new(
            "such-as",
            Number::Plural,
            "such as {word}",
            "such as {word}",
            &["[BLANK] such as {word}"],
            walk(Anchor::MatchEnd, vec![up(&[DOBJ, NSUBJ], &[NOUN])]),
        ),
        SemanticSequence::new(
            "and-other-plural",
            Number::Plural,
            "{word}(,|) and other",
            "{word} and other",
            &[],
            conj_ancestor(),
        ),
        SemanticSequence::new(
            "or-other-plural",
            Number::Plural,
            "{word}(,|) or other",
            "{word} or other",
            &[],
            conj_ancestor(),
        ),
        SemanticSequence::new(
            "especially",
            Number::Plural,
            "especially {word}",
            "especially {word}",
            &["[BLANK] especially {word}"],
            illustrated_object(),
        ),
        SemanticSequence::new(
            "including",
            Number::Plural,
            "including {word}",
            "including {word}",
            &["[BLANK] including {word}"],
            illustrated_object(),
        ),
    ]
}

/// Sequences of the constitutive role: what the subject is made of.
pub fn constitutive_sequences() -> Vec<SemanticSequence> {
    vec![
        SemanticSequence::new(
            "made-up-of",
            Number::Singular,
            "{word} is made up of",
            "a|an {word} is made up of",
            &[],
            walk(Anchor::MatchEnd, vec![up(&[NMOD], &[NOUN])]),
        ),
        SemanticSequence::new(
            "made-of",
            Number::Singular,
            "{word} is made of",
            "a|an {word} is made of",
            &[],
            walk(Anchor::MatchEnd, vec![up(&[NMOD], &[NOUN])]),
        ),
        SemanticSequence::new(
            "comprises",
            Number::Singular,
            r"{word} comprises(\sof|)",
            "a|an {word} comprises",
            &["a|an {word} comprises", "a|an {word} comprises of"],
            component_of_verb(1),
        ),
        SemanticSequence::new(
            "consists-of",
            Number::Singular,
            r"{word} consist(\sof|)",
            "a|an {word} consists of",
            &[],
            component_of_verb(1),
        ),
        SemanticSequence::new(
            "are-made-up-of",
            Number::Plural,
            "{word} are made up of",
            "{word} are made up of",
            &[],
            walk(Anchor::MatchEnd, vec![up(&[NMOD], &[NOUN])]),
        ),
        SemanticSequence::new(
            "are-made-of",
            Number::Plural,
            "{word} are made of",
            "{word} are made of",
            &[],
            walk(Anchor::StartOffset(2), vec![down(&[NMOD], &[NOUN])]),
        ),
        SemanticSequence::new(
            "comprise",
            Number::Plural,
            "{word} comprise",
            "{word} comprise",
            &["{word} comprise"],
            component_of_verb(1),
        ),
        SemanticSequence::new(
            "consist-of",
            Number::Plural,
            r"{word} consist(\sof|)",
            "{word} consists of",
            &[],
            component_of_verb(1),
        ),
    ]
}

/// Sequences of the agentive role: how the subject comes into being.
pub fn agentive_sequences() -> Vec<SemanticSequence> {
    vec![
        SemanticSequence::new(
            "to-a-new",
            Number::Singular,
            r"to(.*?)(\sa|) new {word}",
            "to * a new {word}",
            &["to [BLANK] a new {word}", "to [BLANK] new {word}"],
            creating_verb(),
        ),
        SemanticSequence::new(
            "to-a-complete",
            Number::Singular,
            r"to(.*?)(\sa|) complete {word}",
            "to * a complete {word}",
            &["to [BLANK] a complete {word}", "to [BLANK] complete {word}"],
            creating_verb(),
        ),
        SemanticSequence::new(
            "new-has-been",
            Number::Singular,
            r"(a\s|)new {word} has been",
            "a new {word} has been *",
            &["a new {word} has been [BLANK]", "new {word} has been [BLANK]"],
            completed_verb(),
        ),
        SemanticSequence::new(
            "complete-has-been",
            Number::Singular,
            r"(a\s|)complete {word} has been",
            "a complete {word} has been *",
            &[],
            completed_verb(),
        ),
        SemanticSequence::new(
            "to-new",
            Number::Plural,
            r"to(.*?) new {word}",
            "to * new {word}",
            &["to [BLANK] new {word}"],
            creating_verb(),
        ),
        SemanticSequence::new(
            "to-complete",
            Number::Plural,
            r"to(.*?) complete {word}",
            "to * complete {word}",
            &["to [BLANK] complete {word}"],
            creating_verb(),
        ),
    ]
}

/// Sequences of the telic role: what the subject is for.
pub fn telic_sequences() -> Vec<SemanticSequence> {
    vec![
        SemanticSequence::new(
            "is-used-to",
            Number::Singular,
            r"(a\s|an\s|){word} is used",
            "a|an {word} is used to",
            &[
                "a|an {word} is used to [BLANK]",
                "a|an {word} is used to [BLANK] [BLANK]",
                "a|an {word} is used to be [BLANK]",
            ],
            used_to(),
        ),
        SemanticSequence::new(
            "purpose-of-a",
            Number::Singular,
            r"purpose of(\sa|\san|) {word} is",
            "purpose of a|an {word} is",
            &[
                "purpose of a|an {word} is to [BLANK]",
                "purpose of a|an {word} is to [BLANK] [BLANK]",
                "purpose of a|an {word} is [BLANK]",
                "purpose of a|an {word} is [BLANK] [BLANK]",
                "purpose of a|an {word} is to be [BLANK]",
                "purpose of a|an {word} is be [BLANK]",
            ],
            purpose_is(),
        ),
        SemanticSequence::new(
            "are-used-to",
            Number::Plural,
            "{word} are used",
            "{word} are used",
            &[
                "{word} are used to [BLANK]",
                "{word} are used to [BLANK] [BLANK]",
                "{word} are used to be [BLANK]",
            ],
            used_to(),
        ),
        SemanticSequence::new(
            "purpose-of",
            Number::Plural,
            "purpose of {word} is",
            "purpose of {word} is",
            &[
                "purpose of {word} is to [BLANK]",
                "purpose of {word} is to [BLANK] [BLANK]",
                "purpose of {word} is [BLANK]",
                "purpose of {word} is [BLANK] [BLANK]",
                "purpose of {word} is to be [BLANK]",
                "purpose of {word} is be [BLANK]",
            ],
            purpose_is(),
        ),
    ]
}
