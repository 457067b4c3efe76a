use metrics_exporter_prometheus::PrometheusHandle;
use pitch_eval::config::AppConfig;
use pitch_eval::workflows::pitch::{
    EvaluationId, EvaluationRecord, EvaluationRepository, MockPaymentGateway, PaymentRecord,
    PitchEvaluationService, RepositoryError, UnlockCommit, ValidationConfig,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

pub(crate) type ApiService = PitchEvaluationService<InMemoryEvaluationRepository, MockPaymentGateway>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Store {
    evaluations: HashMap<EvaluationId, EvaluationRecord>,
    payments: Vec<PaymentRecord>,
}

/// Process-local store. The unlock check and both writes happen under one lock.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEvaluationRepository {
    store: Arc<Mutex<Store>>,
}

impl EvaluationRepository for InMemoryEvaluationRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.store.lock().expect("repository mutex poisoned");
        if guard.evaluations.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.evaluations.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.store.lock().expect("repository mutex poisoned");
        Ok(guard.evaluations.get(id).cloned())
    }

    fn mark_unlocked(
        &self,
        id: &EvaluationId,
        commit: UnlockCommit,
    ) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.store.lock().expect("repository mutex poisoned");
        let store = &mut *guard;
        let record = store
            .evaluations
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        if record.premium_unlocked {
            return Err(RepositoryError::AlreadyUnlocked);
        }
        if store
            .payments
            .iter()
            .any(|payment| payment.payment_intent_id == commit.payment.payment_intent_id)
        {
            return Err(RepositoryError::Conflict);
        }
        record.deep_analysis = Some(commit.deep_analysis);
        record.premium_unlocked = true;
        record.premium_unlocked_at = Some(commit.unlocked_at);
        let updated = record.clone();
        store.payments.push(commit.payment);
        Ok(updated)
    }

    fn payments_for(&self, id: &EvaluationId) -> Result<Vec<PaymentRecord>, RepositoryError> {
        let guard = self.store.lock().expect("repository mutex poisoned");
        Ok(guard
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
        let guard = self.store.lock().expect("repository mutex poisoned");
        Ok(guard
            .payments
            .iter()
            .find(|payment| payment.payment_intent_id == payment_intent_id)
            .cloned())
    }
}

pub(crate) fn build_service(config: &AppConfig, validation: ValidationConfig) -> ApiService {
    PitchEvaluationService::new(
        Arc::new(InMemoryEvaluationRepository::default()),
        Arc::new(MockPaymentGateway::new(
            config.payments.publishable_key.clone(),
        )),
        validation,
    )
    .with_pricing(config.payments.pricing())
}
