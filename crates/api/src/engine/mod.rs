//! Swap engine.
//!
//! Every state-changing operation opens one transaction, locks the rows of
//! the users it touches (ascending id, via [`UserRepo::lock_for_update`]),
//! re-reads their state, asks [`roomswap_core::lifecycle::authorize`], and
//! only then mutates. Reads recompute match views from the stored requests
//! and the interest ledger.
//!
//! - [`requests`] -- pairwise and cycle request create/update/delete.
//! - [`interest`] -- express, withdraw, accept, remove match.
//! - [`views`] -- pairwise and cycle match lists.

pub mod interest;
pub mod requests;
pub mod views;

use roomswap_core::error::CoreError;
use roomswap_core::lifecycle::{SwapPolicy, SwapState};
use roomswap_core::types::DbId;
use roomswap_db::repositories::{ConfirmedMatchRepo, SwapRequestRepo, UserRepo};
use roomswap_db::{DbPool, DbTx};

use crate::error::AppResult;

/// Entry point for swap operations. Cheap to construct per request.
#[derive(Clone)]
pub struct SwapEngine {
    pool: DbPool,
    policy: SwapPolicy,
}

/// Result of a partial update.
#[derive(Debug)]
pub struct Updated<T> {
    pub row: T,
    /// `false` when the patch matched the stored values and nothing was written.
    pub changed: bool,
}

impl SwapEngine {
    pub fn new(pool: DbPool, policy: SwapPolicy) -> Self {
        Self { pool, policy }
    }
}

/// Lock `ids` and fail with `NotFound` for any that do not exist.
async fn lock_users(tx: &mut DbTx<'_>, ids: &[DbId]) -> AppResult<()> {
    let locked = UserRepo::lock_for_update(tx, ids).await?;
    if let Some(&missing) = ids.iter().find(|id| !locked.contains(id)) {
        return Err(CoreError::NotFound {
            entity: "User",
            id: missing,
        }
        .into());
    }
    Ok(())
}

/// Current pairwise state of `user_id`. Call with the user's row locked.
async fn load_state(tx: &mut DbTx<'_>, user_id: DbId) -> AppResult<SwapState> {
    let has_request = SwapRequestRepo::find_by_user_tx(tx, user_id).await?.is_some();
    let partner = ConfirmedMatchRepo::find_for_user_tx(tx, user_id)
        .await?
        .and_then(|m| m.pair().partner_of(user_id));
    Ok(SwapState::from_parts(has_request, partner))
}
