//! Local session state: the token and user returned by `signin`.
//!
//! The session is an explicit object loaded once per command and passed to
//! whatever needs it — there is no global. It lives as pretty JSON at
//! `$TEAMCTL_HOME/session.json` (default `~/.teamctl/`) and expires seven
//! days after it was saved; an expired file is treated the same as a missing
//! one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SessionError;
use crate::models::UserProfile;

/// Environment variable overriding the per-user state directory.
pub const HOME_ENV: &str = "TEAMCTL_HOME";

/// Directory under `$HOME` holding session and config files.
pub const STATE_DIR: &str = ".teamctl";

const SESSION_FILE: &str = "session.json";
const SESSION_TTL_DAYS: i64 = 7;

/// A signed-in session: opaque token plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub saved_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, user: UserProfile) -> Self {
        Self {
            token,
            user,
            saved_at: Utc::now(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.saved_at > Duration::days(SESSION_TTL_DAYS)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Reads and writes the session file.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(SESSION_FILE),
        }
    }

    /// Resolve the state directory: `$TEAMCTL_HOME` if set, otherwise
    /// `~/.teamctl`.
    pub fn from_env() -> Result<Self, SessionError> {
        Ok(Self::new(&state_dir_from_env()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a session, creating the state directory if needed.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(session).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the current session. Missing and expired files both come back as
    /// `None`; an unreadable or unparseable file is an error.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        let session: Session =
            serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        if session.is_expired() {
            tracing::debug!(path = %self.path.display(), "session file expired");
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Load the session or fail with the reason it is unusable.
    pub fn require(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            return Err(SessionError::NotLoggedIn);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        let session: Session =
            serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        if session.is_expired() {
            return Err(SessionError::Expired);
        }
        Ok(session)
    }

    /// Delete the session file. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, SessionError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(true)
    }
}

/// Resolve the per-user state directory.
pub fn state_dir_from_env() -> Result<PathBuf, SessionError> {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(STATE_DIR))
        .ok_or(SessionError::NoHomeDir)
}
