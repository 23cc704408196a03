pub mod auth;
pub mod health;
pub mod matches;
pub mod swap_requests;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /user/me                             current user
///
/// /swap-requests                       list, create
/// /swap-requests/update                update by body
/// /swap-requests/{id}                  update, delete
///
/// /cycle-requests                      list, create
/// /cycle-requests/update               update by body
/// /cycle-requests/{id}                 update, delete
///
/// /matches                             pairwise match list
/// /matches/express-interest            express (POST)
/// /matches/withdraw-interest           withdraw (POST)
/// /matches/accept-interest             accept (POST)
/// /matches/remove-match                remove confirmed match (POST)
///
/// /cycle-matches                       direct swaps and three-way chains
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/swap-requests", swap_requests::router())
        .nest("/cycle-requests", swap_requests::cycle_router())
        .nest("/matches", matches::router())
        .nest("/cycle-matches", matches::cycle_router())
}
