//! Match views, recomputed on every read.

use roomswap_core::cycle::{compute_cycle_matches, CycleEntry, CycleMatch};
use roomswap_core::ledger::{InterestEdge, LedgerSnapshot};
use roomswap_core::matching::{compute_matches, MatchView, PairwiseEntry};
use roomswap_core::types::DbId;
use roomswap_db::repositories::{
    ConfirmedMatchRepo, CycleRequestRepo, InterestRepo, SwapRequestRepo,
};

use super::SwapEngine;
use crate::error::AppResult;

impl SwapEngine {
    /// The viewer's pairwise match list.
    ///
    /// The request pool, the viewer's edges and the confirmed pairs are
    /// read in one repeatable-read transaction so they agree with each
    /// other. No rows are locked.
    pub async fn matches_for(&self, viewer_id: DbId) -> AppResult<Vec<MatchView>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let entries: Vec<PairwiseEntry> = SwapRequestRepo::list_pool_tx(&mut tx)
            .await?
            .into_iter()
            .map(PairwiseEntry::from)
            .collect();
        let edges = InterestRepo::list_for_user_tx(&mut tx, viewer_id).await?;
        let confirmed = ConfirmedMatchRepo::list_all_tx(&mut tx).await?;
        tx.commit().await?;

        let ledger = LedgerSnapshot::new(
            edges.iter().map(InterestEdge::from),
            confirmed.iter().map(|m| m.pair()),
        );
        Ok(compute_matches(viewer_id, &entries, &ledger, &self.policy))
    }

    /// The viewer's direct swaps and three-way chains.
    pub async fn cycle_matches_for(&self, viewer_id: DbId) -> AppResult<Vec<CycleMatch>> {
        let entries: Vec<CycleEntry> = CycleRequestRepo::list_pool(&self.pool)
            .await?
            .into_iter()
            .map(CycleEntry::from)
            .collect();
        Ok(compute_cycle_matches(viewer_id, &entries, &self.policy))
    }
}
