use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::pitch::domain::{
    field, EvaluationId, FormData, SessionMetadata, StartupType, Submission,
};
use crate::workflows::pitch::payments::{
    PaymentError, PaymentGateway, PaymentIntent, PaymentIntentRequest, PaymentSettlement,
    PaymentStatus,
};
use crate::workflows::pitch::repository::{
    EvaluationRecord, EvaluationRepository, PaymentRecord, RepositoryError, UnlockCommit,
};
use crate::workflows::pitch::{pitch_router, PitchEvaluationService, ValidationConfig};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 15, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn session_started(ago: Duration, reference: DateTime<Utc>) -> SessionMetadata {
    SessionMetadata {
        start_time: Some((reference - ago).timestamp_millis()),
        honeypot: None,
        user_uuid: Some("founder-42".to_string()),
        csrf_token: Some("csrf-abc".to_string()),
    }
}

/// Idea-stage answers at the top of every scale.
pub(super) fn strongest_idea_form() -> FormData {
    let value_proposition = "We give mid-market freight teams a single reconciliation workspace \
        that matches carrier invoices against contracted lanes, flags accessorial overcharges \
        before payment, routes disputes to the right carrier contact, and feeds the recovered \
        savings straight into the finance close so controllers can see the margin impact each \
        week without spreadsheets or manual follow up calls.";

    FormData::new()
        .with(field::TEAM_SIZE, "2-3")
        .with(field::FOUNDER_EXPERIENCE, "industry-veterans")
        .with(field::TECHNICAL_EXPERTISE, "tech-team")
        .with(field::DOMAIN_EXPERTISE, "industry-insider")
        .with(field::COMMITMENT_LEVEL, "bootstrapped")
        .with(field::MARKET_SIZE_TAM, "over-10b")
        .with(field::MARKET_SIZE_SOM, "over-500m")
        .with(field::MARKET_GROWTH, "exploding")
        .with(field::MARKET_TIMING, "perfect-timing")
        .with(
            field::CUSTOMER_SEGMENT,
            "Mid-market logistics companies reconciling freight invoices by hand",
        )
        .with(field::PROBLEM_SEVERITY, "critical-pain")
        .with(field::PROBLEM_FREQUENCY, "daily")
        .with(field::CURRENT_SOLUTION, "poor-alternatives")
        .with(field::SOLUTION_UNIQUENESS, "paradigm-shift")
        .with(field::VALUE_PROPOSITION, value_proposition)
        .with(
            field::DEFENSIBILITY,
            vec!["network-effects", "proprietary-data", "switching-costs"],
        )
        .with(field::IP_PROTECTION, "granted-ip")
        .with(field::COMPETITIVE_TIMELINE, "very-difficult")
        .with(field::REVENUE_MODEL, "subscription")
        .with(
            field::PRICING_STRATEGY,
            "Annual platform fee per shipping location with usage tiers",
        )
        .with(field::UNIT_ECONOMICS_VISIBILITY, "proven-metrics")
        .with(field::SCALABILITY, "viral-network")
        .with(
            field::VALIDATION_TYPE,
            vec!["customer-interviews", "letters-of-intent", "paid-pilots"],
        )
        .with(field::CUSTOMER_COUNT, "500+")
}

pub(super) fn launched_form() -> FormData {
    strongest_idea_form()
        .with(field::CAC, 80.0)
        .with(field::LTV, 900.0)
        .with(field::PAYBACK_PERIOD, 6.0)
        .with(field::GROSS_MARGIN, 72.0)
        .with(field::CHURN_RATE, 3.0)
        .with(field::MRR, "50k-100k")
        .with(field::GROWTH_RATE, 12.0)
        .with(field::RUNWAY, 18.0)
        .with(field::FUNDING_AMOUNT, "2m-5m")
        .with(
            field::USE_OF_FUNDS,
            "Hire four engineers and expand carrier integrations to Canada",
        )
}

pub(super) fn idea_submission() -> Submission {
    Submission {
        startup_type: StartupType::Idea,
        form_data: strongest_idea_form(),
        session_metadata: session_started(Duration::minutes(10), Utc::now()),
    }
}

pub(super) fn launched_submission() -> Submission {
    Submission {
        startup_type: StartupType::Launched,
        form_data: launched_form(),
        session_metadata: session_started(Duration::minutes(10), Utc::now()),
    }
}

pub(super) type TestService = PitchEvaluationService<MemoryRepository, ScriptedGateway>;

pub(super) fn build_service() -> (TestService, Arc<MemoryRepository>, Arc<ScriptedGateway>) {
    let repository = Arc::new(MemoryRepository::default());
    let gateway = Arc::new(ScriptedGateway::default());
    let service =
        PitchEvaluationService::new(repository.clone(), gateway.clone(), ValidationConfig::default());
    (service, repository, gateway)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    pitch_router(Arc::new(service))
}

#[derive(Default)]
struct Store {
    evaluations: HashMap<EvaluationId, EvaluationRecord>,
    payments: Vec<PaymentRecord>,
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    store: Arc<Mutex<Store>>,
}

impl MemoryRepository {
    pub(super) fn payment_count(&self) -> usize {
        self.store.lock().expect("repository mutex poisoned").payments.len()
    }
}

impl EvaluationRepository for MemoryRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        if store.evaluations.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        store.evaluations.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store.evaluations.get(id).cloned())
    }

    fn mark_unlocked(
        &self,
        id: &EvaluationId,
        commit: UnlockCommit,
    ) -> Result<EvaluationRecord, RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        let record = store
            .evaluations
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        if record.premium_unlocked {
            return Err(RepositoryError::AlreadyUnlocked);
        }
        record.deep_analysis = Some(commit.deep_analysis);
        record.premium_unlocked = true;
        record.premium_unlocked_at = Some(commit.unlocked_at);
        let updated = record.clone();
        store.payments.push(commit.payment);
        Ok(updated)
    }

    fn payments_for(&self, id: &EvaluationId) -> Result<Vec<PaymentRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store
            .payments
            .iter()
            .filter(|payment| payment.evaluation_id == *id)
            .cloned()
            .collect())
    }

    fn find_payment_by_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<PaymentRecord>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store
            .payments
            .iter()
            .find(|payment| payment.payment_intent_id == payment_intent_id)
            .cloned())
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn mark_unlocked(
        &self,
        _id: &EvaluationId,
        _commit: UnlockCommit,
    ) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn payments_for(&self, _id: &EvaluationId) -> Result<Vec<PaymentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_payment_by_intent(
        &self,
        _payment_intent_id: &str,
    ) -> Result<Option<PaymentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Gateway whose settlements are set by the test. Intents it creates start out pending.
#[derive(Default)]
pub(super) struct ScriptedGateway {
    settlements: Mutex<HashMap<String, PaymentSettlement>>,
    offline: Mutex<bool>,
}

impl ScriptedGateway {
    pub(super) fn settle(&self, payment_intent_id: &str, reference: Option<&EvaluationId>) {
        self.set(payment_intent_id, PaymentStatus::Succeeded, reference);
    }

    pub(super) fn set(
        &self,
        payment_intent_id: &str,
        status: PaymentStatus,
        reference: Option<&EvaluationId>,
    ) {
        self.settlements.lock().expect("gateway mutex poisoned").insert(
            payment_intent_id.to_string(),
            PaymentSettlement {
                payment_intent_id: payment_intent_id.to_string(),
                status,
                amount: 999,
                currency: "usd".to_string(),
                reference: reference.cloned(),
            },
        );
    }

    pub(super) fn go_offline(&self) {
        *self.offline.lock().expect("gateway mutex poisoned") = true;
    }

    fn check_online(&self) -> Result<(), PaymentError> {
        if *self.offline.lock().expect("gateway mutex poisoned") {
            return Err(PaymentError::Unavailable("provider timeout".to_string()));
        }
        Ok(())
    }
}

impl PaymentGateway for ScriptedGateway {
    fn create_intent(&self, request: &PaymentIntentRequest) -> Result<PaymentIntent, PaymentError> {
        self.check_online()?;
        let payment_intent_id = format!("pi_test_{}", request.evaluation_id);
        self.set(
            &payment_intent_id,
            PaymentStatus::Pending,
            Some(&request.evaluation_id),
        );
        Ok(PaymentIntent {
            client_secret: format!("{payment_intent_id}_secret"),
            payment_intent_id,
            amount: request.amount,
            currency: request.currency.clone(),
        })
    }

    fn settlement(&self, payment_intent_id: &str) -> Result<PaymentSettlement, PaymentError> {
        self.check_online()?;
        self.settlements
            .lock()
            .expect("gateway mutex poisoned")
            .get(payment_intent_id)
            .cloned()
            .ok_or_else(|| PaymentError::UnknownIntent(payment_intent_id.to_string()))
    }

    fn publishable_key(&self) -> &str {
        "pk_test_scripted"
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
