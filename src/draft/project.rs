//! Project form state and payload assembly.

use super::TagList;
use crate::errors::DraftError;
use crate::models::NewProject;

/// The project creation form: name, organization, and a de-duplicated
/// contributor list. The creator is filled in from the session at assembly
/// time — it is not something the form edits.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub organization: String,
    pub contributors: TagList,
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn into_payload(self, creator: &str) -> Result<NewProject, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingField("name"));
        }
        Ok(NewProject {
            name: self.name.trim().to_string(),
            organization: self.organization.trim().to_string(),
            creator: creator.to_string(),
            contributors: self.contributors.into_vec(),
            issues: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_is_rejected() {
        let draft = ProjectDraft::new();
        assert!(!draft.is_complete());
        assert!(matches!(
            draft.into_payload("u1"),
            Err(DraftError::MissingField("name"))
        ));
    }

    #[test]
    fn creator_comes_from_caller() {
        let mut draft = ProjectDraft::new();
        draft.name = "alpha".to_string();
        draft.organization = "acme".to_string();
        let payload = draft.into_payload("u1").unwrap();
        assert_eq!(payload.creator, "u1");
        assert_eq!(payload.name, "alpha");
        assert!(payload.issues.is_empty());
    }

    #[test]
    fn contributors_are_deduped_in_order() {
        let mut draft = ProjectDraft::new();
        draft.name = "alpha".to_string();
        draft.contributors.add("ada");
        draft.contributors.add("grace");
        draft.contributors.add("ada");
        draft.contributors.add("  ");
        let payload = draft.into_payload("u1").unwrap();
        assert_eq!(payload.contributors, vec!["ada", "grace"]);
    }
}
