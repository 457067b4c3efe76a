use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{field, EvaluationId, Submission};
use super::narrative::{Narrator, Recommendations};
use super::payments::{
    PaymentError, PaymentGateway, PaymentIntent, PaymentIntentRequest, PaymentStatus,
    DEFAULT_PREMIUM_AMOUNT_CENTS, DEFAULT_PREMIUM_CURRENCY,
};
use super::repository::{
    EvaluationRecord, EvaluationRepository, PaymentRecord, RepositoryError, UnlockCommit,
};
use super::sanitize::sanitize_form;
use super::scoring::{ScoreCard, ScoringEngine};
use super::validation::{SubmissionValidator, ValidationConfig, ValidationReport};

const ANONYMOUS_OWNER: &str = "anonymous";

/// Price charged for the premium deep analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumPricing {
    pub amount: i64,
    pub currency: String,
}

impl Default for PremiumPricing {
    fn default() -> Self {
        Self {
            amount: DEFAULT_PREMIUM_AMOUNT_CENTS,
            currency: DEFAULT_PREMIUM_CURRENCY.to_string(),
        }
    }
}

/// Values a browser checkout needs before creating an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfig {
    pub publishable_key: String,
    pub amount: i64,
    pub currency: String,
}

/// Result of a successful premium unlock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumAnalysis {
    pub evaluation_id: EvaluationId,
    pub deep_analysis: String,
    pub recommendations: Recommendations,
    pub unlocked_at: DateTime<Utc>,
}

/// Service sequencing sanitize, validate, score and narrate, plus the premium unlock.
pub struct PitchEvaluationService<R, G> {
    validator: Arc<SubmissionValidator>,
    scorer: ScoringEngine,
    narrator: Narrator,
    repository: Arc<R>,
    payments: Arc<G>,
    pricing: PremiumPricing,
}

impl<R, G> PitchEvaluationService<R, G>
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    pub fn new(repository: Arc<R>, payments: Arc<G>, config: ValidationConfig) -> Self {
        Self {
            validator: Arc::new(SubmissionValidator::new(config)),
            scorer: ScoringEngine::new(),
            narrator: Narrator::new(),
            repository,
            payments,
            pricing: PremiumPricing::default(),
        }
    }

    pub fn with_pricing(mut self, pricing: PremiumPricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn pricing(&self) -> &PremiumPricing {
        &self.pricing
    }

    /// Sanitize and validate without persisting anything.
    pub fn validate(&self, submission: &Submission) -> ValidationReport {
        self.validate_at(submission, Utc::now())
    }

    pub fn validate_at(&self, submission: &Submission, now: DateTime<Utc>) -> ValidationReport {
        let form = sanitize_form(&submission.form_data);
        self.validator.validate(
            &form,
            &submission.session_metadata,
            submission.startup_type,
            now,
        )
    }

    /// Score a submission and persist the evaluation with its executive summary.
    pub fn evaluate(
        &self,
        submission: Submission,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        self.evaluate_at(submission, Utc::now())
    }

    pub fn evaluate_at(
        &self,
        submission: Submission,
        now: DateTime<Utc>,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        let Submission {
            startup_type,
            form_data,
            session_metadata,
        } = submission;

        let mut form = sanitize_form(&form_data);
        let report = self
            .validator
            .validate(&form, &session_metadata, startup_type, now);
        if !report.is_valid() {
            warn!(
                startup_type = startup_type.label(),
                errors = report.validation_errors.len(),
                flags = report.anti_gaming_flags.len(),
                "submission rejected"
            );
            return Err(EvaluationServiceError::Rejected(report));
        }
        form.remove(field::HONEYPOT);

        let card = self.scorer.score(&form, startup_type);
        let executive_summary = self.narrator.executive_summary(&card, &form);

        let record = EvaluationRecord {
            id: EvaluationId::generate(),
            startup_type,
            form_data: form,
            total_score: card.total_score,
            section_scores: card.section_scores,
            verdict: card.verdict,
            executive_summary,
            deep_analysis: None,
            premium_unlocked: false,
            premium_unlocked_at: None,
            owner: session_metadata
                .user_uuid
                .filter(|owner| !owner.is_empty())
                .unwrap_or_else(|| ANONYMOUS_OWNER.to_string()),
            csrf_token: session_metadata.csrf_token.unwrap_or_default(),
            created_at: now,
            submission_time_ms: now.timestamp_millis(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            evaluation_id = %stored.id,
            total_score = stored.total_score,
            verdict = stored.verdict.category.key(),
            "evaluation created"
        );
        Ok(stored)
    }

    /// Open a payment intent for an evaluation that is still locked.
    pub fn create_payment_intent(
        &self,
        evaluation_id: &EvaluationId,
        amount: Option<i64>,
        currency: Option<String>,
    ) -> Result<PaymentIntent, EvaluationServiceError> {
        let record = self.get(evaluation_id)?;
        if record.premium_unlocked {
            warn!(evaluation_id = %evaluation_id, "intent refused; premium already unlocked");
            return Err(RepositoryError::AlreadyUnlocked.into());
        }

        let request = PaymentIntentRequest {
            evaluation_id: evaluation_id.clone(),
            amount: amount.unwrap_or(self.pricing.amount),
            currency: currency
                .map(|currency| currency.to_ascii_lowercase())
                .unwrap_or_else(|| self.pricing.currency.clone()),
        };
        let intent = self.payments.create_intent(&request)?;
        info!(
            evaluation_id = %evaluation_id,
            payment_intent_id = %intent.payment_intent_id,
            amount = intent.amount,
            "payment intent created"
        );
        Ok(intent)
    }

    /// Attach the deep analysis after a settled payment. At most once per evaluation.
    pub fn unlock_premium(
        &self,
        evaluation_id: &EvaluationId,
        payment_intent_id: &str,
    ) -> Result<PremiumAnalysis, EvaluationServiceError> {
        let settlement = self.payments.settlement(payment_intent_id)?;
        if !settlement.is_settled() {
            warn!(
                evaluation_id = %evaluation_id,
                payment_intent_id,
                "unlock refused; payment not settled"
            );
            return Err(EvaluationServiceError::PaymentNotSettled(
                payment_intent_id.to_string(),
            ));
        }
        if settlement
            .reference
            .as_ref()
            .is_some_and(|reference| reference != evaluation_id)
        {
            warn!(
                evaluation_id = %evaluation_id,
                payment_intent_id,
                "unlock refused; payment issued for another evaluation"
            );
            return Err(EvaluationServiceError::PaymentReferenceMismatch {
                payment_intent_id: payment_intent_id.to_string(),
            });
        }

        let record = self.get(evaluation_id)?;
        if record.premium_unlocked {
            warn!(evaluation_id = %evaluation_id, "unlock refused; already unlocked");
            return Err(RepositoryError::AlreadyUnlocked.into());
        }
        if let Some(existing) = self.repository.find_payment_by_intent(payment_intent_id)? {
            warn!(
                evaluation_id = %evaluation_id,
                payment_intent_id,
                "unlock refused; payment already applied"
            );
            return Err(if existing.evaluation_id == *evaluation_id {
                RepositoryError::AlreadyUnlocked
            } else {
                RepositoryError::Conflict
            }
            .into());
        }

        let now = Utc::now();
        let card = ScoreCard {
            total_score: record.total_score,
            section_scores: record.section_scores.clone(),
            verdict: record.verdict.clone(),
        };
        let deep_analysis = self.narrator.deep_analysis(
            &card,
            &record.form_data,
            record.startup_type,
            now.date_naive(),
        );

        let payment = PaymentRecord {
            id: uuid::Uuid::new_v4().to_string(),
            evaluation_id: evaluation_id.clone(),
            payment_intent_id: payment_intent_id.to_string(),
            amount: settlement.amount,
            currency: settlement.currency,
            status: PaymentStatus::Succeeded,
            created_at: now,
        };
        let updated = self.repository.mark_unlocked(
            evaluation_id,
            UnlockCommit {
                deep_analysis: deep_analysis.clone(),
                payment,
                unlocked_at: now,
            },
        )?;

        info!(
            evaluation_id = %evaluation_id,
            payment_intent_id,
            "premium analysis unlocked"
        );
        Ok(PremiumAnalysis {
            evaluation_id: updated.id,
            deep_analysis,
            recommendations: self
                .narrator
                .recommendations(record.total_score, record.startup_type),
            unlocked_at: updated.premium_unlocked_at.unwrap_or(now),
        })
    }

    /// Fetch an evaluation; callers redact it with [`EvaluationRecord::public_view`].
    pub fn get(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        let record = self
            .repository
            .fetch(evaluation_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn payments_for(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<Vec<PaymentRecord>, EvaluationServiceError> {
        Ok(self.repository.payments_for(evaluation_id)?)
    }

    pub fn payment_config(&self) -> PaymentConfig {
        PaymentConfig {
            publishable_key: self.payments.publishable_key().to_string(),
            amount: self.pricing.amount,
            currency: self.pricing.currency.clone(),
        }
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error("submission rejected: {}", .0.summary())]
    Rejected(ValidationReport),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("payment '{0}' has not settled")]
    PaymentNotSettled(String),
    #[error("payment '{payment_intent_id}' was issued for a different evaluation")]
    PaymentReferenceMismatch { payment_intent_id: String },
}
