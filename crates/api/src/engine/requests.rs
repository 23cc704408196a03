//! Request Store operations for both request kinds.

use roomswap_core::error::CoreError;
use roomswap_core::ledger::ConfirmedPair;
use roomswap_core::lifecycle::{authorize, SwapAction};
use roomswap_core::swap_request::{
    validate_cycle_request, validate_swap_request, CycleRequestInput, SwapRequestInput,
};
use roomswap_core::types::DbId;
use roomswap_db::models::cycle_request::CycleRequest;
use roomswap_db::models::swap_request::SwapRequest;
use roomswap_db::repositories::{
    ConfirmedMatchRepo, CycleRequestRepo, InterestRepo, SwapRequestRepo,
};
use roomswap_db::DbTx;

use super::{load_state, lock_users, SwapEngine, Updated};
use crate::error::AppResult;

impl SwapEngine {
    // -----------------------------------------------------------------------
    // Pairwise requests
    // -----------------------------------------------------------------------

    /// Create the caller's pairwise request.
    pub async fn create_swap_request(
        &self,
        user_id: DbId,
        input: &SwapRequestInput<'_>,
    ) -> AppResult<SwapRequest> {
        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[user_id]).await?;

        let state = load_state(&mut tx, user_id).await?;
        authorize(state, SwapAction::CreateRequest, &self.policy)?;

        let fields = validate_swap_request(input)?;
        let row = SwapRequestRepo::create_tx(&mut tx, user_id, &fields).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Apply a partial update to one of the caller's pairwise requests.
    pub async fn update_swap_request(
        &self,
        user_id: DbId,
        request_id: DbId,
        patch: &SwapRequestInput<'_>,
    ) -> AppResult<Updated<SwapRequest>> {
        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[user_id]).await?;

        let current = owned_swap_request(&mut tx, user_id, request_id).await?;
        let state = load_state(&mut tx, user_id).await?;
        authorize(state, SwapAction::EditRequest { request_id }, &self.policy)?;

        let fields = current.fields();
        let next = fields.patched(patch)?;
        if next == fields {
            return Ok(Updated {
                row: current,
                changed: false,
            });
        }

        let row = SwapRequestRepo::update_tx(&mut tx, request_id, &next).await?;
        tx.commit().await?;
        Ok(Updated { row, changed: true })
    }

    /// Delete one of the caller's pairwise requests.
    ///
    /// Every interest edge touching the caller goes with it. If the caller
    /// was confirmed (only reachable with locking disabled) the match is
    /// dissolved as well.
    pub async fn delete_swap_request(&self, user_id: DbId, request_id: DbId) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[user_id]).await?;

        owned_swap_request(&mut tx, user_id, request_id).await?;
        let state = load_state(&mut tx, user_id).await?;
        authorize(state, SwapAction::DeleteRequest { request_id }, &self.policy)?;

        SwapRequestRepo::delete_tx(&mut tx, request_id).await?;
        let edges = InterestRepo::delete_all_for_user_tx(&mut tx, user_id).await?;

        // The pair cannot change under us: creating or dissolving a match
        // involving `user_id` requires the lock we hold.
        if let Some(partner) = state.partner() {
            ConfirmedMatchRepo::delete_tx(&mut tx, ConfirmedPair::new(user_id, partner)).await?;
            tracing::info!(user_id, partner, "Confirmed match dissolved by request deletion");
        }

        tx.commit().await?;
        tracing::debug!(user_id, request_id, edges, "Removed interest edges with request");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Cycle requests
    // -----------------------------------------------------------------------

    /// Create the caller's cycle request. Pairwise match state does not
    /// constrain cycle requests.
    pub async fn create_cycle_request(
        &self,
        user_id: DbId,
        input: &CycleRequestInput<'_>,
    ) -> AppResult<CycleRequest> {
        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[user_id]).await?;

        if CycleRequestRepo::find_by_user_tx(&mut tx, user_id).await?.is_some() {
            return Err(CoreError::Conflict(
                "You already have a cycle swap request. Please delete your existing request first or update it."
                    .to_string(),
            )
            .into());
        }

        let fields = validate_cycle_request(input)?;
        let row = CycleRequestRepo::create_tx(&mut tx, user_id, &fields).await?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn update_cycle_request(
        &self,
        user_id: DbId,
        request_id: DbId,
        patch: &CycleRequestInput<'_>,
    ) -> AppResult<Updated<CycleRequest>> {
        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[user_id]).await?;

        let current = owned_cycle_request(&mut tx, user_id, request_id).await?;
        let fields = current.fields();
        let next = fields.patched(patch)?;
        if next == fields {
            return Ok(Updated {
                row: current,
                changed: false,
            });
        }

        let row = CycleRequestRepo::update_tx(&mut tx, request_id, &next).await?;
        tx.commit().await?;
        Ok(Updated { row, changed: true })
    }

    pub async fn delete_cycle_request(&self, user_id: DbId, request_id: DbId) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[user_id]).await?;

        owned_cycle_request(&mut tx, user_id, request_id).await?;
        CycleRequestRepo::delete_tx(&mut tx, request_id).await?;
        tx.commit().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve `request_id` to a request owned by `user_id`. Someone else's
/// request is reported exactly like a missing one.
async fn owned_swap_request(
    tx: &mut DbTx<'_>,
    user_id: DbId,
    request_id: DbId,
) -> AppResult<SwapRequest> {
    SwapRequestRepo::find_by_id_tx(tx, request_id)
        .await?
        .filter(|r| r.user_id == user_id)
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "SwapRequest",
                id: request_id,
            }
            .into()
        })
}

async fn owned_cycle_request(
    tx: &mut DbTx<'_>,
    user_id: DbId,
    request_id: DbId,
) -> AppResult<CycleRequest> {
    CycleRequestRepo::find_by_id_tx(tx, request_id)
        .await?
        .filter(|r| r.user_id == user_id)
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "CycleSwapRequest",
                id: request_id,
            }
            .into()
        })
}
