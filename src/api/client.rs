//! Typed API client: one method per backend endpoint.
//!
//! Every call is a single best-effort request — no retry, no deduplication,
//! no cancellation. Auth endpoints return success and failure in the same
//! body shape (`token`/`user` vs `error`); the project/issue/submission
//! endpoints speak plain JSON with HTTP status codes.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::errors::ApiError;
use crate::models::{
    AuthResponse, Issue, Link, Milestone, NewIssue, NewProject, Project, ProjectsResponse,
    SigninRequest, SignupRequest,
};
use crate::session::Session;

pub struct ApiClient {
    http: reqwest::Client,
    api_url: String,
    submit_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: trim_base(&config.server.api_url),
            submit_url: trim_base(&config.server.submit_url),
        }
    }

    // ── auth ─────────────────────────────────────────────────────────

    /// `POST /api/auth/signup`. Success means the account exists; the user
    /// still has to sign in to get a session.
    pub async fn signup(&self, req: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/api/auth/signup", self.api_url);
        self.post_auth(&url, req).await
    }

    /// `POST /api/auth/signin` — returns the token and user on success.
    pub async fn signin(&self, req: &SigninRequest) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/api/auth/signin", self.api_url);
        self.post_auth(&url, req).await
    }

    /// Auth endpoints put the rejection reason in the body, so decode the
    /// shared shape first and only then look at the status.
    async fn post_auth<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<AuthResponse, ApiError> {
        tracing::debug!(%url, "auth request");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        let body: AuthResponse = resp.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })?;
        if !status.is_success() {
            let message = body
                .error
                .unwrap_or_else(|| format!("request failed with status {}", status));
            return Err(ApiError::Rejected(message));
        }
        Ok(body)
    }

    // ── projects ─────────────────────────────────────────────────────

    /// `POST /api/project/project/create/:userId`
    pub async fn create_project(
        &self,
        session: &Session,
        payload: &NewProject,
    ) -> Result<Project, ApiError> {
        let url = format!(
            "{}/api/project/project/create/{}",
            self.api_url, session.user.id
        );
        self.post_json(&url, Some(&session.token), payload).await
    }

    /// `GET /api/project/projects/:userId`
    pub async fn list_projects(&self, session: &Session) -> Result<ProjectsResponse, ApiError> {
        let url = format!("{}/api/project/projects/{}", self.api_url, session.user.id);
        self.get_json(&url, Some(&session.token)).await
    }

    // ── issues ───────────────────────────────────────────────────────

    /// `POST /api/issue/project/:projectId/issue`
    pub async fn create_issue(
        &self,
        session: &Session,
        project_id: &str,
        payload: &NewIssue,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/api/issue/project/{}/issue", self.api_url, project_id);
        self.post_json(&url, Some(&session.token), payload).await
    }

    /// `GET /api/issue/project/:projectId/issues`
    pub async fn list_issues(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<Vec<Issue>, ApiError> {
        let url = format!("{}/api/issue/project/{}/issues", self.api_url, project_id);
        self.get_json(&url, Some(&session.token)).await
    }

    // ── submissions ──────────────────────────────────────────────────

    /// `GET /projects/:projectId/issues/:issueId/submission` — `None` when
    /// nothing has been submitted yet.
    pub async fn get_submission(
        &self,
        project_id: &str,
        issue_id: &str,
    ) -> Result<Option<Link>, ApiError> {
        let url = self.submission_url(project_id, issue_id);
        tracing::debug!(%url, "GET submission");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check_status(resp).await?;
        let link = resp.json().await.map_err(|source| ApiError::Decode {
            url,
            source,
        })?;
        Ok(Some(link))
    }

    /// `POST .../submission` — first submission for an issue.
    pub async fn create_submission(
        &self,
        project_id: &str,
        issue_id: &str,
        link: &Link,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.submission_url(project_id, issue_id);
        self.post_json(&url, None, link).await
    }

    /// `PUT .../submission` — replace an existing submission.
    pub async fn update_submission(
        &self,
        project_id: &str,
        issue_id: &str,
        link: &Link,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.submission_url(project_id, issue_id);
        tracing::debug!(%url, "PUT submission");
        let resp = self
            .http
            .put(&url)
            .json(link)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        let resp = check_status(resp).await?;
        resp.json()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    // ── milestones ───────────────────────────────────────────────────

    /// `GET /api/milestones`
    pub async fn list_milestones(&self) -> Result<Vec<Milestone>, ApiError> {
        let url = format!("{}/api/milestones", self.api_url);
        self.get_json(&url, None).await
    }

    // ── plumbing ─────────────────────────────────────────────────────

    fn submission_url(&self, project_id: &str, issue_id: &str) -> String {
        format!(
            "{}/projects/{}/issues/{}/submission",
            self.submit_url, project_id, issue_id
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let mut req = self.http.get(url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        let resp = check_status(resp).await?;
        resp.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "POST");
        let mut req = self.http.post(url).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        let resp = check_status(resp).await?;
        resp.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Map a non-2xx response to `ApiError::Status`, carrying whatever the body
/// said (truncated — backends sometimes return whole HTML error pages).
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.text().await {
        Ok(body) if !body.is_empty() => {
            let mut message = body;
            if message.len() > 200 {
                message.truncate(200);
            }
            message
        }
        _ => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Normalize a configured base URL: no trailing slash.
fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn client() -> ApiClient {
        let mut config = ClientConfig::default();
        config.server.api_url = "http://tracker.test:5000/".to_string();
        config.server.submit_url = "http://submit.test:3001".to_string();
        ApiClient::new(&config)
    }

    #[test]
    fn base_urls_lose_trailing_slash() {
        let client = client();
        assert_eq!(client.api_url, "http://tracker.test:5000");
        assert_eq!(
            client.submission_url("p1", "i2"),
            "http://submit.test:3001/projects/p1/issues/i2/submission"
        );
    }

    #[test]
    fn trim_base_keeps_plain_urls() {
        assert_eq!(trim_base("http://x"), "http://x");
        assert_eq!(trim_base("http://x///"), "http://x");
    }
}
