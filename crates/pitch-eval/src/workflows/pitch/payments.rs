use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::EvaluationId;

pub const DEFAULT_PREMIUM_AMOUNT_CENTS: i64 = 999;
pub const DEFAULT_PREMIUM_CURRENCY: &str = "usd";
pub const MOCK_PUBLISHABLE_KEY: &str = "pk_test_mock_key";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    pub evaluation_id: EvaluationId,
    pub amount: i64,
    pub currency: String,
}

/// Handle returned by the provider; the client secret is handed to the browser checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

/// Provider-reported state of an intent. `reference` is the evaluation the intent was opened for,
/// when the provider echoes it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettlement {
    pub payment_intent_id: String,
    pub status: PaymentStatus,
    pub amount: i64,
    pub currency: String,
    pub reference: Option<EvaluationId>,
}

impl PaymentSettlement {
    pub fn is_settled(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }
}

/// Outbound payment provider.
pub trait PaymentGateway: Send + Sync {
    fn create_intent(&self, request: &PaymentIntentRequest) -> Result<PaymentIntent, PaymentError>;
    fn settlement(&self, payment_intent_id: &str) -> Result<PaymentSettlement, PaymentError>;
    fn publishable_key(&self) -> &str;

    fn is_settled(&self, payment_intent_id: &str) -> Result<bool, PaymentError> {
        Ok(self.settlement(payment_intent_id)?.is_settled())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),
    #[error("payment rejected: {0}")]
    Rejected(String),
    #[error("unknown payment intent '{0}'")]
    UnknownIntent(String),
}

/// Offline gateway that settles every intent it issued. Handles look like
/// `pi_mock_<first 8 chars of the evaluation id>_<unix seconds>`.
#[derive(Debug, Clone)]
pub struct MockPaymentGateway {
    publishable_key: String,
    issued: Arc<Mutex<HashMap<String, PaymentSettlement>>>,
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new(MOCK_PUBLISHABLE_KEY)
    }
}

impl MockPaymentGateway {
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            issued: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn issued(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, PaymentSettlement>>, PaymentError> {
        self.issued
            .lock()
            .map_err(|_| PaymentError::Unavailable("mock gateway state poisoned".to_string()))
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn create_intent(&self, request: &PaymentIntentRequest) -> Result<PaymentIntent, PaymentError> {
        if request.amount <= 0 {
            return Err(PaymentError::Rejected(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }

        let prefix: String = request.evaluation_id.as_str().chars().take(8).collect();
        let mut issued = self.issued()?;
        let base = format!("pi_mock_{prefix}_{}", Utc::now().timestamp());
        let mut payment_intent_id = base.clone();
        let mut attempt = 1;
        while issued.contains_key(&payment_intent_id) {
            attempt += 1;
            payment_intent_id = format!("{base}_{attempt}");
        }

        issued.insert(
            payment_intent_id.clone(),
            PaymentSettlement {
                payment_intent_id: payment_intent_id.clone(),
                status: PaymentStatus::Succeeded,
                amount: request.amount,
                currency: request.currency.clone(),
                reference: Some(request.evaluation_id.clone()),
            },
        );

        Ok(PaymentIntent {
            client_secret: format!("{payment_intent_id}_secret_mock"),
            payment_intent_id,
            amount: request.amount,
            currency: request.currency.clone(),
        })
    }

    fn settlement(&self, payment_intent_id: &str) -> Result<PaymentSettlement, PaymentError> {
        self.issued()?
            .get(payment_intent_id)
            .cloned()
            .ok_or_else(|| PaymentError::UnknownIntent(payment_intent_id.to_string()))
    }

    fn publishable_key(&self) -> &str {
        &self.publishable_key
    }
}
