use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::error;

use super::catalog::{CatalogProvider, CatalogQuery};
use super::domain::{ComponentCategory, RequirementSet};
use super::export::{self, BomRequest, ExportDocument, SpecSheetRequest};
use super::service::{RecommendationService, SelectionError};
use crate::error::AppError;

const RECOMMEND_FAILURE: &str = "Failed to process request";
const SPECS_FAILURE: &str = "Failed to generate specs";
const BOM_FAILURE: &str = "Failed to generate BOM";

/// Router builder exposing the selector endpoints.
pub fn selector_router<C>(service: Arc<RecommendationService<C>>) -> Router
where
    C: CatalogProvider + 'static,
{
    Router::new()
        .route("/api/select-parts", post(recommend_handler::<C>))
        .route("/api/download-specs", post(specs_handler::<C>))
        .route("/api/download-datasheet", post(datasheet_handler::<C>))
        .route("/api/download-bom", post(bom_handler::<C>))
        .route("/api/components", get(components_handler::<C>))
        .with_state(service)
}

fn failure(message: &str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

/// Splits `{componentType, ...fields}` into the tag and the requirement set.
fn split_request(mut body: Map<String, Value>) -> (Option<String>, RequirementSet) {
    let component_type = match body.remove("componentType") {
        None | Some(Value::Null) => None,
        Some(Value::String(tag)) => Some(tag),
        Some(other) => Some(other.to_string()),
    };
    let fields: BTreeMap<String, Value> = body.into_iter().collect();
    (component_type, RequirementSet::from(fields))
}

pub(crate) async fn recommend_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    body: Bytes,
) -> Response
where
    C: CatalogProvider + 'static,
{
    let parsed: Map<String, Value> = match serde_json::from_slice(&body) {
        Ok(map) => map,
        Err(err) => {
            error!(error = %err, "unreadable recommendation request");
            return failure(RECOMMEND_FAILURE);
        }
    };
    let (component_type, requirements) = split_request(parsed);

    match service.recommend(component_type.as_deref(), &requirements) {
        Ok(set) => {
            let mut payload = json!({
                "recommendations": set.recommendations,
                "totalResults": set.total_results,
                "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            });
            if let Some(message) = set.message {
                payload["message"] = Value::String(message);
            }
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(SelectionError::InvalidCategory(reason)) => {
            let payload = json!({ "error": reason.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            error!(error = %other, "recommendation failed");
            failure(RECOMMEND_FAILURE)
        }
    }
}

fn attachment(document: ExportDocument, failure_message: &str) -> Response {
    let content_type = HeaderValue::from_str(document.content_type.as_ref());
    let disposition = HeaderValue::from_str(&document.content_disposition());
    match (content_type, disposition) {
        (Ok(content_type), Ok(disposition)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            document.body,
        )
            .into_response(),
        _ => {
            error!(filename = %document.filename, "export headers rejected");
            failure(failure_message)
        }
    }
}

pub(crate) async fn specs_handler<C>(
    State(_service): State<Arc<RecommendationService<C>>>,
    body: Bytes,
) -> Response
where
    C: CatalogProvider + 'static,
{
    let request: SpecSheetRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "unreadable spec sheet request");
            return failure(SPECS_FAILURE);
        }
    };

    match export::specs_document(&request, Utc::now()) {
        Ok(document) => attachment(document, SPECS_FAILURE),
        Err(err) => {
            error!(error = %err, "spec sheet export failed");
            failure(SPECS_FAILURE)
        }
    }
}

pub(crate) async fn datasheet_handler<C>(
    State(_service): State<Arc<RecommendationService<C>>>,
    body: Bytes,
) -> Response
where
    C: CatalogProvider + 'static,
{
    match serde_json::from_slice::<SpecSheetRequest>(&body) {
        Ok(request) => attachment(export::datasheet_document(&request, Utc::now()), SPECS_FAILURE),
        Err(err) => {
            error!(error = %err, "unreadable datasheet request");
            failure(SPECS_FAILURE)
        }
    }
}

pub(crate) async fn bom_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    body: Bytes,
) -> Response
where
    C: CatalogProvider + 'static,
{
    let request: BomRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "unreadable BOM request");
            return failure(BOM_FAILURE);
        }
    };

    match export::bom_document(&request, service.default_project_name(), Utc::now()) {
        Ok(document) => attachment(document, BOM_FAILURE),
        Err(err) => {
            error!(error = %err, "BOM export failed");
            failure(BOM_FAILURE)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ComponentListParams {
    component_type: Option<String>,
    manufacturer: Option<String>,
    search: Option<String>,
}

impl ComponentListParams {
    fn into_query(self) -> Result<CatalogQuery, SelectionError> {
        let category = match self.component_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(tag) => Some(tag.parse::<ComponentCategory>()?),
        };
        Ok(CatalogQuery {
            category,
            manufacturer: self.manufacturer.filter(|value| !value.trim().is_empty()),
            search: self.search.filter(|value| !value.trim().is_empty()),
        })
    }
}

pub(crate) async fn components_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    Query(params): Query<ComponentListParams>,
) -> Response
where
    C: CatalogProvider + 'static,
{
    let listing = params
        .into_query()
        .and_then(|query| service.catalog(&query));

    match listing {
        Ok(components) => {
            let payload = json!({
                "total": components.len(),
                "components": components,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            if !err.is_invalid_input() {
                error!(error = %err, "catalog listing failed");
            }
            AppError::from(err).into_response()
        }
    }
}
