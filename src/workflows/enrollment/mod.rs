//! Employer enrollment wizard: the step state machine, quoting, and
//! submission to the enrollment backend.

pub mod domain;
mod draft;
pub mod quote;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CoverageStructure, EligibilityExclusions, EmployeeCategory, EnrollmentPath, EnrollmentStep,
    FamilyTier, PaymentCard, WizardError,
};
pub use draft::{DraftUpdate, DraftView, EnrollmentDraft, TierContributions};
pub use quote::{quote, ContributionSchedule, MembershipTier, QuoteBreakdown, RateCard};
pub use repository::{
    DraftId, DraftRecord, DraftRepository, EnrollmentGateway, EnrollmentReceipt,
    EnrollmentRequest, GatewayError, InMemoryDraftRepository, MemberEnrollment, RepositoryError,
};
pub use router::enrollment_router;
pub use service::{EnrollmentService, EnrollmentServiceError};
