//! Startup pitch evaluation: sanitize, validate, score and narrate a questionnaire submission,
//! then attach a deep analysis once a premium payment settles.

pub mod domain;
pub mod narrative;
pub mod payments;
pub mod repository;
pub mod router;
pub mod sanitize;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    EvaluationId, FieldValue, FormData, Section, SessionMetadata, StartupType, Submission,
};
pub use narrative::{Narrator, Recommendations};
pub use payments::{
    MockPaymentGateway, PaymentError, PaymentGateway, PaymentIntent, PaymentIntentRequest,
    PaymentSettlement, PaymentStatus,
};
pub use repository::{
    EvaluationRecord, EvaluationRepository, EvaluationView, PaymentRecord, RepositoryError,
    UnlockCommit,
};
pub use router::pitch_router;
pub use sanitize::sanitize_form;
pub use scoring::{ScoreCard, ScoringEngine, Verdict, VerdictCategory};
pub use service::{
    EvaluationServiceError, PaymentConfig, PitchEvaluationService, PremiumAnalysis, PremiumPricing,
};
pub use validation::{SubmissionValidator, ValidationConfig, ValidationReport};
