//! Repository for the `confirmed_matches` table.

use roomswap_core::ledger::ConfirmedPair;
use roomswap_core::types::DbId;

use crate::models::confirmed_match::ConfirmedMatch;
use crate::DbTx;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_a_id, user_b_id, created_at";

/// Accepted pairwise swaps.
///
/// The table only guarantees that a pair is stored once. "At most one
/// confirmed match per user" holds because every writer locks both users
/// and checks [`ConfirmedMatchRepo::find_for_user_tx`] first.
pub struct ConfirmedMatchRepo;

impl ConfirmedMatchRepo {
    /// The confirmed match `user_id` belongs to, if any.
    pub async fn find_for_user_tx(
        tx: &mut DbTx<'_>,
        user_id: DbId,
    ) -> Result<Option<ConfirmedMatch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM confirmed_matches
             WHERE user_a_id = $1 OR user_b_id = $1
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, ConfirmedMatch>(&query)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn create_tx(
        tx: &mut DbTx<'_>,
        pair: ConfirmedPair,
    ) -> Result<ConfirmedMatch, sqlx::Error> {
        let query = format!(
            "INSERT INTO confirmed_matches (user_a_id, user_b_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConfirmedMatch>(&query)
            .bind(pair.user_a)
            .bind(pair.user_b)
            .fetch_one(&mut **tx)
            .await
    }

    /// Dissolve a confirmed pair. Returns `true` if it existed.
    pub async fn delete_tx(tx: &mut DbTx<'_>, pair: ConfirmedPair) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM confirmed_matches WHERE user_a_id = $1 AND user_b_id = $2")
                .bind(pair.user_a)
                .bind(pair.user_b)
                .execute(&mut **tx)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_all_tx(tx: &mut DbTx<'_>) -> Result<Vec<ConfirmedMatch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM confirmed_matches ORDER BY id");
        sqlx::query_as::<_, ConfirmedMatch>(&query)
            .fetch_all(&mut **tx)
            .await
    }
}
