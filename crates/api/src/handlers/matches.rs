//! Handlers for `/matches` (pairwise) and `/cycle-matches`.

use axum::extract::State;
use axum::Json;
use roomswap_core::cycle::CycleMatch;
use roomswap_core::error::CoreError;
use roomswap_core::matching::MatchView;
use roomswap_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::AppJson;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Body shared by every interest action.
#[derive(Debug, Deserialize)]
pub struct OtherUserBody {
    pub other_user_id: Option<DbId>,
}

impl OtherUserBody {
    fn other(&self) -> Result<DbId, CoreError> {
        self.other_user_id
            .ok_or_else(|| CoreError::Validation("other_user_id is required".to_string()))
    }
}

/// GET /api/v1/matches
pub async fn list_matches(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<MatchView>>>> {
    let data = state.engine().matches_for(auth_user.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/matches/express-interest
pub async fn express_interest(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(body): AppJson<OtherUserBody>,
) -> AppResult<Json<MessageResponse>> {
    let other = body.other()?;
    let inserted = state
        .engine()
        .express_interest(auth_user.user_id, other)
        .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        other_user_id = other,
        inserted,
        "Interest expressed"
    );
    Ok(Json(MessageResponse::text("Interest expressed successfully!")))
}

/// POST /api/v1/matches/withdraw-interest
pub async fn withdraw_interest(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(body): AppJson<OtherUserBody>,
) -> AppResult<Json<MessageResponse>> {
    let other = body.other()?;
    let removed = state
        .engine()
        .withdraw_interest(auth_user.user_id, other)
        .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        other_user_id = other,
        removed,
        "Interest withdrawn"
    );
    Ok(Json(MessageResponse::text("Interest withdrawn successfully!")))
}

/// POST /api/v1/matches/accept-interest
pub async fn accept_interest(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(body): AppJson<OtherUserBody>,
) -> AppResult<Json<MessageResponse>> {
    let other = body.other()?;
    let pair = state
        .engine()
        .accept_interest(auth_user.user_id, other)
        .await?;

    tracing::info!(
        user_a = pair.user_a,
        user_b = pair.user_b,
        "Swap confirmed"
    );
    Ok(Json(MessageResponse::text(
        "Interest accepted! You now have a confirmed match.",
    )))
}

/// POST /api/v1/matches/remove-match
pub async fn remove_match(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(body): AppJson<OtherUserBody>,
) -> AppResult<Json<MessageResponse>> {
    let other = body.other()?;
    state
        .engine()
        .remove_match(auth_user.user_id, other)
        .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        other_user_id = other,
        "Confirmed match removed"
    );
    Ok(Json(MessageResponse::text("Match removed successfully!")))
}

/// GET /api/v1/cycle-matches
pub async fn list_cycle_matches(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CycleMatch>>>> {
    let data = state.engine().cycle_matches_for(auth_user.user_id).await?;
    Ok(Json(DataResponse { data }))
}
