//! Interest edge model.

use roomswap_core::ledger::InterestEdge;
use roomswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `interest_edges` table.
#[derive(Debug, Clone, FromRow)]
pub struct InterestEdgeRow {
    pub id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: DbId,
    pub created_at: Timestamp,
}

impl From<&InterestEdgeRow> for InterestEdge {
    fn from(row: &InterestEdgeRow) -> Self {
        // The table CHECK already rules out self-edges.
        InterestEdge {
            from_user: row.from_user_id,
            to_user: row.to_user_id,
        }
    }
}
