use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use pitch_eval::workflows::pitch::{
    pitch_router, EvaluationRepository, PaymentGateway, PitchEvaluationService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_pitch_routes<R, G>(service: Arc<PitchEvaluationService<R, G>>) -> axum::Router
where
    R: EvaluationRepository + 'static,
    G: PaymentGateway + 'static,
{
    pitch_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryEvaluationRepository;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pitch_eval::workflows::pitch::{MockPaymentGateway, ValidationConfig};
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(PitchEvaluationService::new(
            Arc::new(InMemoryEvaluationRepository::default()),
            Arc::new(MockPaymentGateway::default()),
            ValidationConfig::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_pitch_routes(service).layer(Extension(state))
    }

    async fn status_of(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn probes_report_health_and_readiness() {
        assert_eq!(status_of(app(true), "/health").await, StatusCode::OK);
        assert_eq!(status_of(app(true), "/ready").await, StatusCode::OK);
        assert_eq!(
            status_of(app(false), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_of(app(true), "/metrics").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn pitch_routes_are_mounted() {
        assert_eq!(
            status_of(app(true), "/api/v1/payments/config").await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(app(true), "/api/v1/pitch/evaluations/unknown").await,
            StatusCode::NOT_FOUND
        );
    }
}
