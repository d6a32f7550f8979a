//! Status catalog and transition API handlers.
//!
//! These endpoints are read-only views over the workflow engine and never
//! touch the database.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use atelier_core::{ClientStatus, InternalStatus, StatusDisplayInfo, WorkflowEngine};

use crate::error::AppError;
use crate::state::AppState;

/// Build the status router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/statuses", get(list_statuses))
        .route("/api/statuses/action-required", get(action_required))
        .route("/api/statuses/category/{category}", get(by_category))
        .route("/api/statuses/{status}", get(show_status))
        .route("/api/statuses/{status}/next", get(next_statuses))
        .route("/api/transitions/check", get(check_transition))
}

/// An internal status with its display info and client-facing status.
#[derive(Debug, Serialize)]
pub struct InternalStatusView {
    pub status: InternalStatus,
    #[serde(flatten)]
    pub info: StatusDisplayInfo,
    pub client_status: ClientStatus,
}

impl InternalStatusView {
    /// Build a view, or `None` if the engine has no display info for `status`.
    #[must_use]
    pub fn new(engine: &WorkflowEngine, status: InternalStatus) -> Option<Self> {
        engine.internal_info(status).map(|info| Self {
            status,
            info: *info,
            client_status: engine.client_status(status),
        })
    }

    fn list(
        engine: &WorkflowEngine,
        statuses: impl IntoIterator<Item = InternalStatus>,
    ) -> Vec<Self> {
        statuses
            .into_iter()
            .filter_map(|status| Self::new(engine, status))
            .collect()
    }
}

/// A client status with its display info.
#[derive(Debug, Serialize)]
pub struct ClientStatusView {
    pub status: ClientStatus,
    #[serde(flatten)]
    pub info: StatusDisplayInfo,
}

/// Full catalog response.
#[derive(Debug, Serialize)]
pub struct StatusCatalogResponse {
    pub internal: Vec<InternalStatusView>,
    pub client: Vec<ClientStatusView>,
}

/// Single status lookup response.
///
/// `client_status` is only present when the slug names an internal status.
#[derive(Debug, Serialize)]
pub struct StatusDetailResponse {
    pub status: String,
    pub is_internal: bool,
    #[serde(flatten)]
    pub info: StatusDisplayInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_status: Option<ClientStatus>,
}

/// Query for a transition check.
#[derive(Debug, Deserialize)]
pub struct TransitionCheckQuery {
    pub from: String,
    pub to: String,
}

/// Transition check response.
#[derive(Debug, Serialize)]
pub struct TransitionCheckResponse {
    pub from: String,
    pub to: String,
    pub valid: bool,
}

/// List every internal and client status.
pub async fn list_statuses(State(state): State<AppState>) -> Json<StatusCatalogResponse> {
    let engine = state.engine();

    let internal = InternalStatusView::list(engine, engine.all_internal_statuses().iter().copied());
    let client = engine
        .all_client_statuses()
        .iter()
        .filter_map(|&status| {
            engine
                .client_info(status)
                .map(|info| ClientStatusView { status, info: *info })
        })
        .collect();

    Json(StatusCatalogResponse { internal, client })
}

/// Internal statuses that need staff action.
pub async fn action_required(State(state): State<AppState>) -> Json<Vec<InternalStatusView>> {
    let engine = state.engine();
    Json(InternalStatusView::list(
        engine,
        engine.action_required_statuses(),
    ))
}

/// Internal statuses of one phase. Unknown phases yield an empty list.
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<InternalStatusView>> {
    let engine = state.engine();
    Json(InternalStatusView::list(
        engine,
        engine.statuses_by_category(&category),
    ))
}

/// Look up one status, internal first, then client.
///
/// # Errors
///
/// Returns `NotFound` for a slug in neither catalog.
pub async fn show_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<StatusDetailResponse>, AppError> {
    let engine = state.engine();
    let info = engine
        .display_info(&status, true)
        .copied()
        .ok_or_else(|| AppError::NotFound(format!("status {status}")))?;
    let internal = InternalStatus::from_slug(&status);

    Ok(Json(StatusDetailResponse {
        is_internal: internal.is_some(),
        client_status: internal.map(|s| engine.client_status(s)),
        status,
        info,
    }))
}

/// Statuses reachable from `status`, sorted for display.
///
/// Unknown and terminal statuses yield an empty list.
pub async fn next_statuses(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Json<Vec<InternalStatusView>> {
    let engine = state.engine();
    Json(InternalStatusView::list(
        engine,
        engine.next_possible_statuses(&status),
    ))
}

/// Check a single transition.
pub async fn check_transition(
    State(state): State<AppState>,
    Query(query): Query<TransitionCheckQuery>,
) -> Json<TransitionCheckResponse> {
    let valid = state.engine().is_valid_transition(&query.from, &query.to);
    Json(TransitionCheckResponse {
        from: query.from,
        to: query.to,
        valid,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        // Never connects: status routes don't query the database.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/atelier_test")
            .unwrap();
        router().with_state(AppState::new(pool).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn slugs(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|v| v["status"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_statuses() {
        let (status, body) = get_json("/api/statuses").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["internal"].as_array().unwrap().len(), 39);
        assert_eq!(body["client"].as_array().unwrap().len(), 12);
        assert_eq!(body["internal"][0]["status"], "pending");
        assert_eq!(body["internal"][0]["client_status"], "pending-review");
    }

    #[tokio::test]
    async fn test_show_status() {
        let (status, body) = get_json("/api/statuses/casting").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_internal"], true);
        assert_eq!(body["category"], "production");
        assert_eq!(body["client_status"], "in-production");

        let (status, body) = get_json("/api/statuses/awaiting-your-input").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_internal"], false);
        assert!(body.get("client_status").is_none());
    }

    #[tokio::test]
    async fn test_show_unknown_status() {
        let (status, _) = get_json("/api/statuses/melted").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_next_statuses() {
        let (status, body) = get_json("/api/statuses/pending/next").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            slugs(&body),
            vec![
                "awaiting-client-info",
                "in-consultation",
                "reviewing-request",
                "sketching",
                "preparing-quote",
                "cancelled",
                "on-hold",
            ]
        );

        let (_, body) = get_json("/api/statuses/completed/next").await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_by_category() {
        let (_, body) = get_json("/api/statuses/category/payment").await;
        assert_eq!(
            slugs(&body),
            vec![
                "deposit-invoice-sent",
                "deposit-received",
                "final-invoice-sent",
                "payment-received",
            ]
        );

        let (status, body) = get_json("/api/statuses/category/nonsense").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_action_required() {
        let (_, body) = get_json("/api/statuses/action-required").await;
        let slugs = slugs(&body);
        assert!(slugs.contains(&"pending"));
        assert!(!slugs.contains(&"quote-sent"));
        assert!(body.as_array().unwrap().iter().all(|v| v["requires_action"] == true));
    }

    #[tokio::test]
    async fn test_check_transition() {
        let (_, body) = get_json("/api/transitions/check?from=quality-check&to=polishing").await;
        assert_eq!(body["valid"], true);

        let (_, body) = get_json("/api/transitions/check?from=pending&to=completed").await;
        assert_eq!(body["valid"], false);
    }
}
