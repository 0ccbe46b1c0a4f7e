//! Session context for authenticated calls.
//!
//! The session is an explicit value handed to the client and the wizard
//! controller at construction; there is no ambient global. Lifecycle is
//! anonymous -> authenticated(token, role) -> anonymous, where the transition
//! happens outside this tool (the marketplace's login flow) and we only read
//! the result.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Account role carried by the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can create and manage listings.
    Owner,
    /// Browses and wishlists only.
    Seeker,
}

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: String,
        role: Role,
    },
}

/// On-disk shape of the session file written by the login flow.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
    #[serde(default = "default_role")]
    role: Role,
}

fn default_role() -> Role {
    Role::Owner
}

impl Session {
    pub fn authenticated(token: impl Into<String>, role: Role) -> Self {
        Session::Authenticated {
            token: token.into(),
            role,
        }
    }

    /// Bearer token, when present.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { token, .. } => Some(token),
        }
    }

    /// True when the session belongs to an owner-type account.
    pub fn is_owner(&self) -> bool {
        matches!(
            self,
            Session::Authenticated {
                role: Role::Owner,
                ..
            }
        )
    }

    /// Resolve the session from, in order: an explicit token, the
    /// `PGNEST_TOKEN` environment variable, the session file under the user
    /// config dir. Explicit tokens are assumed to be owner dashboard tokens.
    pub fn resolve(explicit_token: Option<&str>) -> Session {
        if let Some(token) = explicit_token {
            if !token.trim().is_empty() {
                return Session::authenticated(token.trim(), Role::Owner);
            }
        }
        if let Ok(token) = std::env::var("PGNEST_TOKEN") {
            if !token.trim().is_empty() {
                return Session::authenticated(token.trim(), Role::Owner);
            }
        }
        Self::default_file_path()
            .and_then(|path| Self::load_file(&path))
            .unwrap_or(Session::Anonymous)
    }

    /// Read a session file; `None` if it is missing or unreadable.
    pub fn load_file(path: &Path) -> Option<Session> {
        let contents = std::fs::read_to_string(path).ok()?;
        let file: SessionFile = serde_json::from_str(&contents).ok()?;
        if file.token.trim().is_empty() {
            return None;
        }
        Some(Session::authenticated(file.token.trim(), file.role))
    }

    /// Where the login flow drops the session file.
    pub fn default_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pgnest").join("session.json"))
    }
}
