//! Outbound client for the external brokerage backend. One method family per
//! resource group; every request carries the bearer token and JSON headers,
//! and a non-OK response fails with a fixed per-endpoint error.

mod client;
mod types;

pub use client::{BackendClient, BackendError, StaticTokenStore, TokenStore};
pub use types::{
    BackendMessage, ClientAccount, DashboardMetrics, EnrollmentQuoteRequest,
    EnrollmentQuoteResponse, OutboundMessage, PortalRole, ProfileUpdate, RevenueMetrics,
    SettingsUpdate,
};
