//! Roles and their per-pattern working state.

use std::fmt;

use qualia_patterns::SemanticSequence;
use serde::Serialize;

use crate::element::QualiaElement;

/// The four fixed semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Formal,
    Constitutive,
    Agentive,
    Telic,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::Formal,
        RoleName::Constitutive,
        RoleName::Agentive,
        RoleName::Telic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Formal => "formal",
            RoleName::Constitutive => "constitutive",
            RoleName::Agentive => "agentive",
            RoleName::Telic => "telic",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pattern's working state within a role: the candidates it produced
/// and the evidence where its trigger matched but extraction failed.
#[derive(Debug, Clone, Serialize)]
pub struct PatternSlot {
    pub sequence: SemanticSequence,
    pub elements: Vec<QualiaElement>,
    pub unresolved: Vec<String>,
}

impl PatternSlot {
    fn new(sequence: SemanticSequence) -> Self {
        Self {
            sequence,
            elements: Vec::new(),
            unresolved: Vec::new(),
        }
    }
}

/// A role and its statically declared patterns.
///
/// Every catalogue sequence owns a slot from construction on — the
/// candidate list and the unresolved bucket exist (possibly empty) for
/// each pattern the role knows.
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    name: RoleName,
    slots: Vec<PatternSlot>,
}

impl Role {
    pub fn new(name: RoleName, sequences: Vec<SemanticSequence>) -> Self {
        Self {
            name,
            slots: sequences.into_iter().map(PatternSlot::new).collect(),
        }
    }

    pub fn name(&self) -> RoleName {
        self.name
    }

    pub fn slots(&self) -> &[PatternSlot] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [PatternSlot] {
        &mut self.slots
    }

    /// All candidates across the role's patterns, in slot order.
    pub fn elements(&self) -> impl Iterator<Item = &QualiaElement> {
        self.slots.iter().flat_map(|slot| slot.elements.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qualia_patterns::formal_sequences;

    #[test]
    fn every_sequence_gets_an_empty_slot() {
        let role = Role::new(RoleName::Formal, formal_sequences());
        assert_eq!(role.slots().len(), formal_sequences().len());
        assert!(role
            .slots()
            .iter()
            .all(|slot| slot.elements.is_empty() && slot.unresolved.is_empty()));
    }

    #[test]
    fn elements_chain_in_slot_order() {
        let mut role = Role::new(RoleName::Formal, formal_sequences());
        role.slots_mut()[1].elements.push(QualiaElement::new("animal"));
        role.slots_mut()[0].elements.push(QualiaElement::new("species"));
        let words: Vec<_> = role.elements().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["species", "animal"]);
    }
}
