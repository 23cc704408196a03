//! Route definitions for pairwise and cycle requests.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{cycle_requests, swap_requests};
use crate::state::AppState;

/// Routes mounted at `/swap-requests`.
///
/// ```text
/// GET    /         -> list (own first, is_own flag)
/// POST   /         -> create
/// POST   /update   -> update_by_body ({request_id, ...fields})
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(swap_requests::list).post(swap_requests::create))
        .route("/update", post(swap_requests::update_by_body))
        .route(
            "/{id}",
            put(swap_requests::update).delete(swap_requests::delete),
        )
}

/// Routes mounted at `/cycle-requests`, same shape as `/swap-requests`.
pub fn cycle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(cycle_requests::list).post(cycle_requests::create))
        .route("/update", post(cycle_requests::update_by_body))
        .route(
            "/{id}",
            put(cycle_requests::update).delete(cycle_requests::delete),
        )
}
