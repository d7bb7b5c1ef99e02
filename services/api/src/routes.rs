use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use cots_selector::selection::{selector_router, CatalogProvider, RecommendationService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_selector_routes<C>(service: Arc<RecommendationService<C>>) -> axum::Router
where
    C: CatalogProvider + 'static,
{
    selector_router(service)
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
    use axum::body::Body;
    use axum::http::Request;
    use cots_selector::config::SelectorConfig;
    use cots_selector::selection::StaticCatalog;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let service = Arc::new(RecommendationService::new(
            Arc::new(StaticCatalog::reference()),
            &SelectorConfig::default(),
        ));
        (with_selector_routes(service).layer(Extension(state)), readiness)
    }

    async fn get(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body readable");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let (router, _) = app(false);
        let (status, body) = get(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_flips_after_bind() {
        let (router, readiness) = app(false);
        let (status, body) = get(router.clone(), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        readiness.store(true, Ordering::Release);
        let (status, body) = get(router, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn selector_endpoints_are_mounted() {
        let (router, _) = app(true);
        let (status, body) = get(router, "/api/components?component_type=motor").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["components"][0]["manufacturer"], "Siemens");
    }
}
