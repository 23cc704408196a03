//! Interest Ledger operations: the pairwise path from interest to a
//! confirmed match and back.

use roomswap_core::error::CoreError;
use roomswap_core::ledger::{ConfirmedPair, InterestEdge};
use roomswap_core::lifecycle::{authorize, SwapAction};
use roomswap_core::types::DbId;
use roomswap_db::repositories::{ConfirmedMatchRepo, InterestRepo, SwapRequestRepo};

use super::{load_state, lock_users, SwapEngine};
use crate::error::AppResult;

impl SwapEngine {
    /// Record that `from` wants to move into `to`'s apartment.
    ///
    /// Idempotent. Returns `true` when a new edge was written.
    pub async fn express_interest(&self, from: DbId, to: DbId) -> AppResult<bool> {
        let edge = InterestEdge::new(from, to)?;

        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[from, to]).await?;

        let state = load_state(&mut tx, from).await?;
        authorize(state, SwapAction::ExpressInterest, &self.policy)?;

        if SwapRequestRepo::find_by_user_tx(&mut tx, to).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "SwapRequest",
                id: to,
            }
            .into());
        }

        if self.policy.lock_on_confirmed_match {
            let target = load_state(&mut tx, to).await?;
            if target.partner().is_some_and(|p| p != from) {
                return Err(CoreError::Conflict(
                    "This user already has a confirmed match".to_string(),
                )
                .into());
            }
        }

        let inserted = InterestRepo::insert_tx(&mut tx, edge).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    /// Remove `from`'s interest in `to`. A missing edge is not an error.
    ///
    /// Returns `true` when an edge was removed.
    pub async fn withdraw_interest(&self, from: DbId, to: DbId) -> AppResult<bool> {
        let edge = InterestEdge::new(from, to)?;

        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[from]).await?;

        let state = load_state(&mut tx, from).await?;
        authorize(state, SwapAction::WithdrawInterest, &self.policy)?;

        let removed = InterestRepo::delete_tx(&mut tx, edge).await?;
        tx.commit().await?;
        Ok(removed)
    }

    /// `accepter` accepts the interest `requester` expressed in them.
    ///
    /// Confirms the pair and clears the edges between them. Of two
    /// concurrent accepts that would put one user into two matches, the
    /// second to acquire the locks sees the first's match and fails with
    /// `Conflict`.
    pub async fn accept_interest(
        &self,
        accepter: DbId,
        requester: DbId,
    ) -> AppResult<ConfirmedPair> {
        let edge = InterestEdge::new(requester, accepter)?;

        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[accepter, requester]).await?;

        let state = load_state(&mut tx, accepter).await?;
        authorize(state, SwapAction::AcceptInterest, &self.policy)?;

        if !InterestRepo::exists_tx(&mut tx, edge).await? {
            return Err(CoreError::InvalidState(
                "This user has not expressed interest in your request".to_string(),
            )
            .into());
        }

        if load_state(&mut tx, requester).await?.partner().is_some() {
            return Err(CoreError::Conflict(
                "This user already has a confirmed match".to_string(),
            )
            .into());
        }

        let pair = ConfirmedMatchRepo::create_tx(&mut tx, ConfirmedPair::new(accepter, requester))
            .await?
            .pair();
        InterestRepo::delete_between_tx(&mut tx, accepter, requester).await?;
        tx.commit().await?;
        Ok(pair)
    }

    /// Dissolve the caller's confirmed match with `other`. Requests stay.
    pub async fn remove_match(&self, user_id: DbId, other: DbId) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        lock_users(&mut tx, &[user_id, other]).await?;

        let state = load_state(&mut tx, user_id).await?;
        authorize(state, SwapAction::RemoveMatch { other }, &self.policy)?;

        ConfirmedMatchRepo::delete_tx(&mut tx, ConfirmedPair::new(user_id, other)).await?;
        tx.commit().await?;
        Ok(())
    }
}
