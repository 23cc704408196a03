//! Handlers for the `/swap-requests` resource (pairwise requests).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomswap_core::swap_request::SwapRequestInput;
use roomswap_core::error::CoreError;
use roomswap_core::types::DbId;
use roomswap_db::models::swap_request::{SwapRequest, SwapRequestListing};
use roomswap_db::repositories::SwapRequestRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::AppJson;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for create and update. Every field is optional on the wire; which
/// ones are required is decided by the validator, not the JSON extractor.
#[derive(Debug, Default, Deserialize)]
pub struct SwapRequestBody {
    pub current_apartment: Option<String>,
    pub current_room: Option<String>,
    pub first_choice: Option<String>,
    pub second_choice: Option<String>,
    pub third_choice: Option<String>,
}

impl SwapRequestBody {
    fn as_input(&self) -> SwapRequestInput<'_> {
        SwapRequestInput {
            current_apartment: self.current_apartment.as_deref(),
            current_room: self.current_room.as_deref(),
            first_choice: self.first_choice.as_deref(),
            second_choice: self.second_choice.as_deref(),
            third_choice: self.third_choice.as_deref(),
        }
    }
}

/// Body for `POST /swap-requests/update`, which carries the id inline.
#[derive(Debug, Deserialize)]
pub struct UpdateSwapRequestBody {
    pub request_id: Option<DbId>,
    #[serde(flatten)]
    pub fields: SwapRequestBody,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/swap-requests
///
/// Every active request, the caller's own first and flagged `is_own`.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SwapRequestListing>>>> {
    let data = SwapRequestRepo::list_for_viewer(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/swap-requests
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(body): AppJson<SwapRequestBody>,
) -> AppResult<(StatusCode, Json<MessageResponse<SwapRequest>>)> {
    let request = state
        .engine()
        .create_swap_request(auth_user.user_id, &body.as_input())
        .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        request_id = request.id,
        "Swap request created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_data(
            "Swap request created successfully!",
            request,
        )),
    ))
}

/// PUT /api/v1/swap-requests/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<SwapRequestBody>,
) -> AppResult<Json<MessageResponse<SwapRequest>>> {
    apply_update(&state, &auth_user, id, &body).await
}

/// POST /api/v1/swap-requests/update
pub async fn update_by_body(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(body): AppJson<UpdateSwapRequestBody>,
) -> AppResult<Json<MessageResponse<SwapRequest>>> {
    let request_id = body
        .request_id
        .ok_or_else(|| CoreError::Validation("request_id is required".to_string()))?;
    apply_update(&state, &auth_user, request_id, &body.fields).await
}

/// DELETE /api/v1/swap-requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state
        .engine()
        .delete_swap_request(auth_user.user_id, id)
        .await?;

    tracing::info!(user_id = auth_user.user_id, request_id = id, "Swap request deleted");
    Ok(Json(MessageResponse::text(
        "Swap request deleted successfully!",
    )))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn apply_update(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
    body: &SwapRequestBody,
) -> AppResult<Json<MessageResponse<SwapRequest>>> {
    let updated = state
        .engine()
        .update_swap_request(auth_user.user_id, id, &body.as_input())
        .await?;

    let message = if updated.changed {
        tracing::info!(user_id = auth_user.user_id, request_id = id, "Swap request updated");
        "Swap request updated successfully!"
    } else {
        "No changes applied"
    };
    Ok(Json(MessageResponse::with_data(message, updated.row)))
}
