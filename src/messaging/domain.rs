use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role-specific contact data, tagged rather than a loose record with
/// optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ContactRole {
    Broker { company: String },
    Provider { practice_name: String },
    Employer { company: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub role: ContactRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    You,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub seen: bool,
}

/// Contact-list entry: the contact plus its thread preview. A thread is
/// unread exactly when its last message has not been seen.
#[derive(Debug, Clone, Serialize)]
pub struct ContactSummary {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub role: ContactRole,
    pub last_message: Option<Message>,
    pub unread: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("no contact with id {0}")]
    ContactNotFound(String),
}
