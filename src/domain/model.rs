//! Records persisted in the ledger and the session state derived from them.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Current time as RFC 3339 UTC with millisecond precision (`2024-01-01T00:00:00.000Z`).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fresh opaque identifier for users and certificates.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A registered user as stored in the `users` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique across all users, compared case-sensitively.
    pub email: String,
    /// Hex SHA-256 of the password, no salt.
    #[serde(rename = "password")]
    pub password_digest: String,
    pub created_at: String,
}

impl User {
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public profile of the signed-in user. This is what the `user` entry holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl SessionIdentity {
    /// Rejects entries that parsed but cannot identify anyone.
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(SessionIdentity),
}

impl SessionState {
    pub fn user(&self) -> Option<&SessionIdentity> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(u) => Some(u),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// The four user-supplied certificate fields. No validation: empty strings are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateFields {
    pub learner_name: String,
    pub course_name: String,
    pub institute_name: String,
    pub completion_date: String,
}

/// An issued certificate as stored in the `certificates` entry. Immutable once issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub learner_name: String,
    pub course_name: String,
    pub institute_name: String,
    pub completion_date: String,
    #[serde(rename = "blockchainHash")]
    pub digest: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub created_at: String,
}

impl Certificate {
    pub fn fields(&self) -> CertificateFields {
        CertificateFields {
            learner_name: self.learner_name.clone(),
            course_name: self.course_name.clone(),
            institute_name: self.institute_name.clone(),
            completion_date: self.completion_date.clone(),
        }
    }

    /// Exact, case-sensitive match on either the digest or the identifier.
    pub fn matches_token(&self, token: &str) -> bool {
        self.digest == token || self.id == token
    }

    /// Case-insensitive substring match on course, learner or institute name.
    pub fn matches_search(&self, term_lower: &str) -> bool {
        self.course_name.to_lowercase().contains(term_lower)
            || self.learner_name.to_lowercase().contains(term_lower)
            || self.institute_name.to_lowercase().contains(term_lower)
    }
}
