use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::enrollment::MemberEnrollment;

/// Portal roles the backend scopes its resources by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalRole {
    Employer,
    Broker,
    Provider,
}

impl PortalRole {
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Employer => "employers",
            Self::Broker => "brokers",
            Self::Provider => "providers",
        }
    }
}

/// Headline numbers for a role dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub active_clients: u32,
    pub pending_requests: u32,
    pub unread_messages: u32,
    pub monthly_revenue_cents: u64,
}

/// Revenue figures for one reporting month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueMetrics {
    pub year: i32,
    pub month: u32,
    pub recurring_cents: u64,
    pub one_time_cents: u64,
}

/// A message as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendMessage {
    pub from: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Outbound message payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub to: String,
    pub body: String,
}

/// Partial profile update; `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Partial notification/settings update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<bool>,
}

/// A client account as shown on broker/provider rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAccount {
    pub id: String,
    pub company: String,
    pub ein: String,
    pub employees: u32,
    pub status: String,
}

/// Quote request the backend prices server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentQuoteRequest {
    pub employer_id: String,
    pub members: Vec<MemberEnrollment>,
}

/// Backend-priced quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentQuoteResponse {
    pub monthly_total: u32,
    pub employer_monthly: u32,
    pub employee_monthly: u32,
}
