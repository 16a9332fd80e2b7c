//! HTTP API endpoints.
//!
//! Thin adapters: each handler forwards to one [`AppState`] operation and
//! echoes its result as JSON. Failures become `{error}` bodies.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::{GameError, GameResult};
use crate::protocol::*;
use crate::state::AppState;

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = match &self {
            GameError::Validation(_)
            | GameError::Phase { .. }
            | GameError::Index { .. }
            | GameError::AlreadyDrawn { .. }
            | GameError::EmptyPool => StatusCode::BAD_REQUEST,
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::Store(e) => {
                tracing::error!("Store failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let error = self.to_string();
        let assignment = match self {
            GameError::AlreadyDrawn { assignment, .. } => Some(assignment),
            _ => None,
        };
        (status, Json(ErrorBody { error, assignment })).into_response()
    }
}

impl From<JsonRejection> for GameError {
    fn from(rejection: JsonRejection) -> Self {
        GameError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for GameError {
    fn from(rejection: QueryRejection) -> Self {
        GameError::Validation(rejection.body_text())
    }
}

/// JSON body extractor whose failures (malformed JSON, wrong field types,
/// unknown item kinds, missing body) answer with a 400 `{error}` body
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(GameError))]
pub struct ApiJson<T>(pub T);

/// Query extractor with the same error shape as [`ApiJson`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(GameError))]
pub struct ApiQuery<T>(pub T);

type ApiResult<T> = GameResult<Json<T>>;

/// GET /api/state
pub async fn get_state(State(state): State<Arc<AppState>>) -> ApiResult<StateView> {
    state.get_state().await.map(Json)
}

/// GET /api/current-items
pub async fn current_items(State(state): State<Arc<AppState>>) -> ApiResult<CurrentItemsView> {
    state.current_items().await.map(Json)
}

/// POST /api/add-item
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<AddItemRequest>,
) -> ApiResult<ItemsView> {
    state.add_item(&req.content, req.kind).await.map(Json)
}

/// POST /api/update-item
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UpdateItemRequest>,
) -> ApiResult<ItemsView> {
    state
        .update_item(req.index, &req.content, req.kind)
        .await
        .map(Json)
}

/// POST /api/delete-item
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<DeleteItemRequest>,
) -> ApiResult<ItemsView> {
    state.delete_item(req.index, req.kind).await.map(Json)
}

/// POST /api/confirm
pub async fn confirm(State(state): State<Arc<AppState>>) -> ApiResult<StateView> {
    state.confirm().await.map(Json)
}

/// POST /api/confirm-shuffle
pub async fn confirm_shuffle(State(state): State<Arc<AppState>>) -> ApiResult<StateView> {
    state.confirm_shuffle().await.map(Json)
}

/// POST /api/draw
pub async fn draw(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<DrawRequest>,
) -> ApiResult<AssignmentView> {
    state.draw(&req.player_name).await.map(Json)
}

/// POST /api/redraw
pub async fn redraw(State(state): State<Arc<AppState>>) -> ApiResult<StateView> {
    state.redraw().await.map(Json)
}

/// GET /api/punishment-summary
pub async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<Summary> {
    state.summary().await.map(Json)
}

/// GET /api/my-punishment?name=
pub async fn my_assignment(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MyAssignmentQuery>,
) -> ApiResult<AssignmentView> {
    state.my_assignment(&query.name).await.map(Json)
}

/// POST /api/reset
pub async fn reset(State(state): State<Arc<AppState>>) -> ApiResult<StateView> {
    state.reset().await.map(Json)
}

/// All game routes, nested under `/api`
pub fn router() -> Router<Arc<AppState>> {
    let api = Router::new()
        .route("/state", get(get_state))
        .route("/current-items", get(current_items))
        .route("/add-item", post(add_item))
        .route("/update-item", post(update_item))
        .route("/delete-item", post(delete_item))
        .route("/confirm", post(confirm))
        .route("/confirm-shuffle", post(confirm_shuffle))
        .route("/draw", post(draw))
        .route("/redraw", post(redraw))
        .route("/punishment-summary", get(summary))
        .route("/my-punishment", get(my_assignment))
        .route("/reset", post(reset));

    Router::new().nest("/api", api)
}
