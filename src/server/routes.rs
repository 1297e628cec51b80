use axum::{
    extract::{Path, Query, State},
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use crate::server::AppState;
use crate::service::ExploreService;
use crate::{Error, Liker, LikerPage};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct PutDecisionRequest {
    pub actor_user_id: String,
    pub recipient_user_id: String,
    pub liked_recipient: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PutDecisionResponse {
    pub mutual_likes: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub pagination_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListLikedYouResponse {
    pub likers: Vec<Liker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_pagination_token: Option<String>,
}

impl From<LikerPage> for ListLikedYouResponse {
    fn from(page: LikerPage) -> Self {
        Self {
            likers: page.likers,
            next_pagination_token: page.next_token.map(|t| t.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountLikedYouResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error() -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: "internal error".to_string() }))
}

/// Bad requests echo the reason; storage failures stay opaque to clients
fn api_error(err: Error) -> ApiError {
    if err.is_invalid_argument() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: err.to_string() }));
    }
    tracing::error!("Request failed: {}", err);
    internal_error()
}

/// Run a service call on the blocking pool
async fn run_blocking<T, F>(state: &Arc<AppState>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&ExploreService) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state.service))
        .await
        .map_err(|e| {
            tracing::error!("Blocking task failed: {}", e);
            internal_error()
        })?
        .map_err(api_error)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn put_decision(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PutDecisionRequest>,
) -> Result<Json<PutDecisionResponse>, ApiError> {
    let mutual = run_blocking(&state, move |svc| {
        svc.put_decision(&req.actor_user_id, &req.recipient_user_id, req.liked_recipient)
    })
    .await?;

    Ok(Json(PutDecisionResponse { mutual_likes: mutual }))
}

pub async fn list_liked_you(
    State(state): State<Arc<AppState>>,
    Path(recipient_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListLikedYouResponse>, ApiError> {
    let page = run_blocking(&state, move |svc| {
        svc.list_liked_you(&recipient_id, params.pagination_token.as_deref())
    })
    .await?;

    Ok(Json(page.into()))
}

pub async fn list_new_liked_you(
    State(state): State<Arc<AppState>>,
    Path(recipient_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListLikedYouResponse>, ApiError> {
    let page = run_blocking(&state, move |svc| {
        svc.list_new_liked_you(&recipient_id, params.pagination_token.as_deref())
    })
    .await?;

    Ok(Json(page.into()))
}

pub async fn count_liked_you(
    State(state): State<Arc<AppState>>,
    Path(recipient_id): Path<String>,
) -> Result<Json<CountLikedYouResponse>, ApiError> {
    let count = run_blocking(&state, move |svc| svc.count_liked_you(&recipient_id)).await?;
    Ok(Json(CountLikedYouResponse { count }))
}
