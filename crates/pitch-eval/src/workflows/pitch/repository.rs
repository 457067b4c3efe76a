use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{EvaluationId, FormData, Section, StartupType};
use super::payments::PaymentStatus;
use super::scoring::Verdict;

/// Persisted evaluation. `deep_analysis` is present exactly when `premium_unlocked` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub startup_type: StartupType,
    pub form_data: FormData,
    pub total_score: f64,
    pub section_scores: BTreeMap<Section, f64>,
    pub verdict: Verdict,
    pub executive_summary: String,
    pub deep_analysis: Option<String>,
    pub premium_unlocked: bool,
    pub premium_unlocked_at: Option<DateTime<Utc>>,
    pub owner: String,
    pub csrf_token: String,
    pub created_at: DateTime<Utc>,
    pub submission_time_ms: i64,
}

impl EvaluationRecord {
    /// Caller-facing view without the raw answers or the session token.
    pub fn public_view(&self) -> EvaluationView {
        EvaluationView {
            evaluation_id: self.id.clone(),
            startup_type: self.startup_type,
            total_score: self.total_score,
            section_scores: self.section_scores.clone(),
            verdict: self.verdict.clone(),
            executive_summary: self.executive_summary.clone(),
            deep_analysis: self.deep_analysis.clone(),
            premium_unlocked: self.premium_unlocked,
            premium_unlocked_at: self.premium_unlocked_at,
            owner: self.owner.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationView {
    pub evaluation_id: EvaluationId,
    pub startup_type: StartupType,
    pub total_score: f64,
    pub section_scores: BTreeMap<Section, f64>,
    pub verdict: Verdict,
    pub executive_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_analysis: Option<String>,
    pub premium_unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_unlocked_at: Option<DateTime<Utc>>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only record of a settled payment applied to an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub evaluation_id: EvaluationId,
    pub payment_intent_id: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Everything the unlock transition writes in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockCommit {
    pub deep_analysis: String,
    pub payment: PaymentRecord,
    pub unlocked_at: DateTime<Utc>,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError>;

    /// Attach the deep analysis, flip `premium_unlocked`, and append the payment record as one
    /// conditional write. Must return [`RepositoryError::AlreadyUnlocked`] without touching the
    /// record when it is already unlocked, so concurrent callers see exactly one winner.
    fn mark_unlocked(
        &self,
        id: &EvaluationId,
        commit: UnlockCommit,
    ) -> Result<EvaluationRecord, RepositoryError>;

    fn payments_for(&self, id: &EvaluationId) -> Result<Vec<PaymentRecord>, RepositoryError>;
    fn find_payment_by_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<PaymentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("evaluation not found")]
    NotFound,
    #[error("premium analysis already unlocked")]
    AlreadyUnlocked,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
