//! Contact list and message threads. The transport is demo-grade: replies
//! come from an [`AutoResponder`] rather than a real messaging backend.

pub mod center;
pub mod domain;
pub mod router;

pub use center::{AutoResponder, CannedResponder, MessageCenter, SilentResponder};
pub use domain::{Contact, ContactRole, ContactSummary, Message, MessagingError, Sender};
pub use router::messaging_router;
