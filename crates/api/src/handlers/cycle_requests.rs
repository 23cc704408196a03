//! Handlers for the `/cycle-requests` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomswap_core::swap_request::CycleRequestInput;
use roomswap_core::error::CoreError;
use roomswap_core::types::DbId;
use roomswap_db::models::cycle_request::{CycleRequest, CycleRequestListing};
use roomswap_db::repositories::CycleRequestRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::AppJson;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CycleRequestBody {
    pub current_apartment: Option<String>,
    pub current_room: Option<String>,
    pub desired_choice: Option<String>,
}

impl CycleRequestBody {
    fn as_input(&self) -> CycleRequestInput<'_> {
        CycleRequestInput {
            current_apartment: self.current_apartment.as_deref(),
            current_room: self.current_room.as_deref(),
            desired_choice: self.desired_choice.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCycleRequestBody {
    pub request_id: Option<DbId>,
    #[serde(flatten)]
    pub fields: CycleRequestBody,
}

/// GET /api/v1/cycle-requests
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CycleRequestListing>>>> {
    let data = CycleRequestRepo::list_for_viewer(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/cycle-requests
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(body): AppJson<CycleRequestBody>,
) -> AppResult<(StatusCode, Json<MessageResponse<CycleRequest>>)> {
    let request = state
        .engine()
        .create_cycle_request(auth_user.user_id, &body.as_input())
        .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        request_id = request.id,
        "Cycle swap request created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_data(
            "Cycle swap request created successfully!",
            request,
        )),
    ))
}

/// PUT /api/v1/cycle-requests/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<CycleRequestBody>,
) -> AppResult<Json<MessageResponse<CycleRequest>>> {
    apply_update(&state, &auth_user, id, &body).await
}

/// POST /api/v1/cycle-requests/update
pub async fn update_by_body(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(body): AppJson<UpdateCycleRequestBody>,
) -> AppResult<Json<MessageResponse<CycleRequest>>> {
    let request_id = body
        .request_id
        .ok_or_else(|| CoreError::Validation("request_id is required".to_string()))?;
    apply_update(&state, &auth_user, request_id, &body.fields).await
}

/// DELETE /api/v1/cycle-requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state
        .engine()
        .delete_cycle_request(auth_user.user_id, id)
        .await?;

    tracing::info!(user_id = auth_user.user_id, request_id = id, "Cycle swap request deleted");
    Ok(Json(MessageResponse::text(
        "Cycle swap request deleted successfully",
    )))
}

async fn apply_update(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
    body: &CycleRequestBody,
) -> AppResult<Json<MessageResponse<CycleRequest>>> {
    let updated = state
        .engine()
        .update_cycle_request(auth_user.user_id, id, &body.as_input())
        .await?;

    let message = if updated.changed {
        tracing::info!(user_id = auth_user.user_id, request_id = id, "Cycle swap request updated");
        "Cycle swap request updated successfully!"
    } else {
        "No changes applied"
    };
    Ok(Json(MessageResponse::with_data(message, updated.row)))
}
