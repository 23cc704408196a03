//! Confirmed pairwise match model.

use roomswap_core::ledger::ConfirmedPair;
use roomswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `confirmed_matches` table. `user_a_id < user_b_id`.
#[derive(Debug, Clone, FromRow)]
pub struct ConfirmedMatch {
    pub id: DbId,
    pub user_a_id: DbId,
    pub user_b_id: DbId,
    pub created_at: Timestamp,
}

impl ConfirmedMatch {
    pub fn pair(&self) -> ConfirmedPair {
        ConfirmedPair::new(self.user_a_id, self.user_b_id)
    }
}
