//! Wire types for the tracker backend.
//!
//! Field names follow the backend's JSON exactly (`_id`, `asCreator`,
//! `expected_materials`, ...). The backend assigns identity — `_id` and the
//! timestamps are absent from anything the client sends.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a material/product pattern is interpreted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    Create,
    Delete,
    Modify,
    Allow,
    Require,
    Disallow,
}

/// All rule types, in the order the issue form presented them.
pub const RULE_TYPES: &[RuleType] = &[
    RuleType::Create,
    RuleType::Delete,
    RuleType::Modify,
    RuleType::Allow,
    RuleType::Require,
    RuleType::Disallow,
];

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
            Self::Modify => "MODIFY",
            Self::Allow => "ALLOW",
            Self::Require => "REQUIRE",
            Self::Disallow => "DISALLOW",
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREATE" => Ok(Self::Create),
            "DELETE" => Ok(Self::Delete),
            "MODIFY" => Ok(Self::Modify),
            "ALLOW" => Ok(Self::Allow),
            "REQUIRE" => Ok(Self::Require),
            "DISALLOW" => Ok(Self::Disallow),
            _ => Err(format!(
                "Invalid rule type '{}'. Valid values: CREATE, DELETE, MODIFY, ALLOW, REQUIRE, DISALLOW",
                s
            )),
        }
    }
}

/// An issue as returned by the backend.
///
/// The board views only need title/deadline/labels; the step fields are
/// optional so older records without them still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// ISO-8601 string as stored by the backend.
    pub deadline: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expected_command: Vec<String>,
    #[serde(default)]
    pub expected_materials: Vec<(RuleType, String)>,
    #[serde(default)]
    pub expected_products: Vec<(RuleType, String)>,
    #[serde(rename = "projectId", default)]
    pub project_id: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Issue-creation payload — a step declaration plus tracker metadata.
///
/// `expected_materials`/`expected_products` serialize as two-element
/// `[rule, pattern]` arrays in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub deadline: String,
    pub labels: Vec<String>,
    #[serde(rename = "_type")]
    pub payload_type: String,
    pub name: String,
    pub expected_command: Vec<String>,
    pub expected_materials: Vec<(RuleType, String)>,
    pub expected_products: Vec<(RuleType, String)>,
    #[serde(rename = "projectId")]
    pub project_id: String,
}

/// A project as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Project-creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub organization: String,
    pub creator: String,
    pub contributors: Vec<String>,
    pub issues: Vec<NewIssue>,
}

/// `GET /api/project/projects/:userId` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsResponse {
    #[serde(rename = "asCreator", default)]
    pub as_creator: Vec<Project>,
    #[serde(rename = "asContributor", default)]
    pub as_contributor: Vec<Project>,
}

/// A single artifact digest inside a link's materials/products map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDigest {
    pub sha256: String,
}

/// A link attestation: the submission payload pairing materials and
/// products with the command that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "_type")]
    pub payload_type: String,
    pub name: String,
    pub command: Vec<String>,
    #[serde(default)]
    pub materials: BTreeMap<String, ArtifactDigest>,
    #[serde(default)]
    pub products: BTreeMap<String, ArtifactDigest>,
}

/// `POST /api/auth/signup` body.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/signin` body.
#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Response from both auth endpoints. Success and failure share one shape:
/// `token`/`user` on success, `error` on rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub error: Option<String>,
}

/// The signed-in user. Only `_id` is load-bearing (it keys the project
/// endpoints); everything else is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A milestone group on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub date: String,
    pub deadline: String,
    #[serde(default)]
    pub tasks: Vec<MilestoneTask>,
}

/// A task card within a milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_type_serializes_screaming_case() {
        assert_eq!(
            serde_json::to_string(&RuleType::Require).unwrap(),
            "\"REQUIRE\""
        );
        assert_eq!(
            serde_json::to_string(&RuleType::Disallow).unwrap(),
            "\"DISALLOW\""
        );
    }

    #[test]
    fn rule_type_from_str_accepts_lowercase() {
        assert_eq!("require".parse::<RuleType>().unwrap(), RuleType::Require);
        assert_eq!("MODIFY".parse::<RuleType>().unwrap(), RuleType::Modify);
    }

    #[test]
    fn rule_type_from_str_rejects_unknown() {
        assert!("FORBID".parse::<RuleType>().is_err());
        assert!("".parse::<RuleType>().is_err());
    }

    #[test]
    fn rule_type_round_trips_through_as_str() {
        for rule in RULE_TYPES {
            assert_eq!(rule.as_str().parse::<RuleType>().unwrap(), *rule);
        }
    }

    #[test]
    fn new_issue_materials_serialize_as_pairs() {
        let issue = NewIssue {
            title: "Fix bug".to_string(),
            deadline: "2025-04-20T00:00:00Z".to_string(),
            labels: vec![],
            payload_type: "step".to_string(),
            name: "fetch".to_string(),
            expected_command: vec![],
            expected_materials: vec![(RuleType::Require, "*.cpp".to_string())],
            expected_products: vec![],
            project_id: "p1".to_string(),
        };
        let json: serde_json::Value = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["_type"], "step");
        assert_eq!(
            json["expected_materials"],
            serde_json::json!([["REQUIRE", "*.cpp"]])
        );
        assert_eq!(json["expected_products"], serde_json::json!([]));
        assert_eq!(json["projectId"], "p1");
    }

    #[test]
    fn issue_deserializes_without_step_fields() {
        let json = r#"{
            "_id": "i1",
            "title": "Ship it",
            "deadline": "2025-05-01T12:00:00Z",
            "labels": ["backend"]
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id.as_deref(), Some("i1"));
        assert_eq!(issue.labels, vec!["backend"]);
        assert!(issue.expected_materials.is_empty());
    }

    #[test]
    fn projects_response_uses_camel_case_keys() {
        let json = r#"{
            "asCreator": [{"name": "alpha", "organization": "org", "creator": "u1"}],
            "asContributor": []
        }"#;
        let resp: ProjectsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.as_creator.len(), 1);
        assert_eq!(resp.as_creator[0].name, "alpha");
        assert!(resp.as_contributor.is_empty());
    }

    #[test]
    fn auth_response_error_shape() {
        let resp: AuthResponse =
            serde_json::from_str(r#"{"error": "email already registered"}"#).unwrap();
        assert!(resp.token.is_none());
        assert_eq!(resp.error.as_deref(), Some("email already registered"));
    }

    #[test]
    fn user_profile_preserves_unknown_fields() {
        let json = r#"{"_id": "u1", "name": "Ada", "role": "admin"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u1");
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["role"], "admin");
    }

    #[test]
    fn link_serializes_digest_map() {
        let mut link = Link {
            payload_type: "link".to_string(),
            name: "submit".to_string(),
            command: vec!["submit".into(), "project:p1".into(), "issue:i1".into()],
            materials: BTreeMap::new(),
            products: BTreeMap::new(),
        };
        link.materials.insert(
            "a.txt".to_string(),
            ArtifactDigest {
                sha256: "h1".to_string(),
            },
        );
        let json: serde_json::Value = serde_json::to_value(&link).unwrap();
        assert_eq!(json["_type"], "link");
        assert_eq!(json["materials"]["a.txt"]["sha256"], "h1");
    }
}
