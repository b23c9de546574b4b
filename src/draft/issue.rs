//! Issue form state and payload assembly.

use chrono::{DateTime, Utc};

use super::{PatternList, TagList, split_command};
use crate::errors::DraftError;
use crate::models::NewIssue;

/// Everything the issue form collects before submission.
///
/// Title, deadline, and name are required; the CLI refuses to submit until
/// all three are present, so [`IssueDraft::into_payload`] treats a missing
/// one as a caller bug and reports it as [`DraftError::MissingField`].
#[derive(Debug, Clone, Default)]
pub struct IssueDraft {
    pub title: String,
    pub name: String,
    pub deadline: Option<DateTime<Utc>>,
    pub labels: TagList,
    /// Raw command line; split on whitespace at assembly time.
    pub command: String,
    pub materials: PatternList,
    pub products: PatternList,
}

impl IssueDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether all required fields are filled in.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.name.trim().is_empty() && self.deadline.is_some()
    }

    /// Assemble the issue-creation payload.
    ///
    /// The deadline serializes as RFC 3339 and the material/product lists as
    /// `[rule, pattern]` pairs in insertion order.
    pub fn into_payload(self, project_id: &str) -> Result<NewIssue, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingField("title"));
        }
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingField("name"));
        }
        let deadline = self.deadline.ok_or(DraftError::MissingField("deadline"))?;

        Ok(NewIssue {
            title: self.title.trim().to_string(),
            deadline: deadline.to_rfc3339(),
            labels: self.labels.into_vec(),
            payload_type: "step".to_string(),
            name: self.name.trim().to_string(),
            expected_command: split_command(&self.command),
            expected_materials: self.materials.into_entries(),
            expected_products: self.products.into_entries(),
            project_id: project_id.to_string(),
        })
    }
}
