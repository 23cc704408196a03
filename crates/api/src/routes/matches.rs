//! Route definitions for match views and interest actions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::matches;
use crate::state::AppState;

/// Routes mounted at `/matches`.
///
/// ```text
/// GET  /                   -> list_matches
/// POST /express-interest   -> express_interest   {other_user_id}
/// POST /withdraw-interest  -> withdraw_interest  {other_user_id}
/// POST /accept-interest    -> accept_interest    {other_user_id}
/// POST /remove-match       -> remove_match       {other_user_id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(matches::list_matches))
        .route("/express-interest", post(matches::express_interest))
        .route("/withdraw-interest", post(matches::withdraw_interest))
        .route("/accept-interest", post(matches::accept_interest))
        .route("/remove-match", post(matches::remove_match))
}

/// Routes mounted at `/cycle-matches`.
pub fn cycle_router() -> Router<AppState> {
    Router::new().route("/", get(matches::list_cycle_matches))
}
