//! Service library for the DPC benefits portal: enrollment wizard workflows,
//! directory search, roster management, messaging, and the outbound client for
//! the brokerage backend.

pub mod accounts;
pub mod backend;
pub mod config;
pub mod directory;
pub mod error;
pub mod messaging;
pub mod roster;
pub mod telemetry;
pub mod workflows;
