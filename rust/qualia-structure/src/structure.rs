//! The working structure and the published structure.

use indexmap::IndexMap;
use serde::Serialize;

use qualia_patterns::{
    agentive_sequences, constitutive_sequences, formal_sequences, telic_sequences,
};

use crate::role::{Role, RoleName};

/// The mutable working structure of one generation run.
///
/// Owns exactly four roles with their full catalogues. Created fresh per
/// subject word, mutated in place by the active strategy, never shared
/// across subject words, and discarded after reduction.
#[derive(Debug, Clone, Serialize)]
pub struct DebugQualiaStructure {
    subject: String,
    roles: Vec<Role>,
}

impl DebugQualiaStructure {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            roles: vec![
                Role::new(RoleName::Formal, formal_sequences()),
                Role::new(RoleName::Constitutive, constitutive_sequences()),
                Role::new(RoleName::Agentive, agentive_sequences()),
                Role::new(RoleName::Telic, telic_sequences()),
            ],
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn roles_mut(&mut self) -> &mut [Role] {
        &mut self.roles
    }

    pub fn role(&self, name: RoleName) -> &Role {
        // All four roles exist from construction on.
        self.roles
            .iter()
            .find(|role| role.name() == name)
            .unwrap_or(&self.roles[0])
    }

    pub fn role_mut(&mut self, name: RoleName) -> &mut Role {
        let index = self
            .roles
            .iter()
            .position(|role| role.name() == name)
            .unwrap_or(0);
        &mut self.roles[index]
    }
}

/// The published result: subject word, creation timestamp, and per role an
/// ordered list of at most K candidate strings.
///
/// Equality is by subject word alone — two structures for the same word
/// compare equal regardless of their contents. Callers that need content
/// comparison must inspect `roles` directly.
#[derive(Debug, Clone, Serialize)]
pub struct QualiaStructure {
    pub subject: String,
    pub created_at: String,
    pub roles: IndexMap<String, Vec<String>>,
}

impl QualiaStructure {
    pub fn new(subject: impl Into<String>, created_at: impl Into<String>) -> Self {
        let mut roles = IndexMap::new();
        for name in RoleName::ALL {
            roles.insert(name.as_str().to_string(), Vec::new());
        }
        Self {
            subject: subject.into(),
            created_at: created_at.into(),
            roles,
        }
    }
}

impl PartialEq for QualiaStructure {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
    }
}

impl Eq for QualiaStructure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_structure_owns_all_four_roles() {
        let structure = DebugQualiaStructure::new("dog");
        let names: Vec<_> = structure.roles().iter().map(|r| r.name()).collect();
        assert_eq!(names, RoleName::ALL);
    }

    #[test]
    fn public_roles_keep_fixed_key_order() {
        let structure = QualiaStructure::new("dog", "01/01/2024 00:00:00");
        let keys: Vec<_> = structure.roles.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["formal", "constitutive", "agentive", "telic"]);
    }

    #[test]
    fn public_equality_is_by_subject_only() {
        let mut populated = QualiaStructure::new("dog", "01/01/2024 00:00:00");
        populated
            .roles
            .insert("formal".to_string(), vec!["animal".to_string()]);
        let empty = QualiaStructure::new("dog", "02/02/2024 12:00:00");
        assert_eq!(populated, empty);
        assert_ne!(populated, QualiaStructure::new("cat", "01/01/2024 00:00:00"));
    }

    #[test]
    fn public_structure_serializes_with_fixed_keys() {
        let structure = QualiaStructure::new("dog", "01/01/2024 00:00:00");
        let json = serde_json::to_value(&structure).unwrap();
        assert!(json.get("roles").unwrap().get("telic").is_some());
        assert_eq!(
            json.get("subject").unwrap().as_str(),
            Some("dog")
        );
    }
}
