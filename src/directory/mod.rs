//! Provider and broker directories with free-text search.

pub mod catalog;
pub mod domain;
pub mod router;
pub mod search;

pub use catalog::DirectoryCatalog;
pub use domain::{BrokerListing, ProviderListing};
pub use router::directory_router;
pub use search::{filter, Searchable};
