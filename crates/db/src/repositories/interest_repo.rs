//! Repository for the `interest_edges` table.

use roomswap_core::ledger::InterestEdge;
use roomswap_core::types::DbId;

use crate::models::interest::InterestEdgeRow;
use crate::DbTx;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, from_user_id, to_user_id, created_at";

/// Directional interest edges. Every method runs inside the caller's
/// transaction, after the involved users have been locked.
pub struct InterestRepo;

impl InterestRepo {
    /// Record an edge (idempotent). Returns `true` if a new row was inserted.
    pub async fn insert_tx(tx: &mut DbTx<'_>, edge: InterestEdge) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO interest_edges (from_user_id, to_user_id) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(edge.from_user)
        .bind(edge.to_user)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists_tx(tx: &mut DbTx<'_>, edge: InterestEdge) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM interest_edges WHERE from_user_id = $1 AND to_user_id = $2
             )",
        )
        .bind(edge.from_user)
        .bind(edge.to_user)
        .fetch_one(&mut **tx)
        .await?;
        Ok(row.0)
    }

    /// Remove one directional edge. Returns `true` if it existed.
    pub async fn delete_tx(tx: &mut DbTx<'_>, edge: InterestEdge) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM interest_edges WHERE from_user_id = $1 AND to_user_id = $2")
                .bind(edge.from_user)
                .bind(edge.to_user)
                .execute(&mut **tx)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove the edges between two users in both directions.
    pub async fn delete_between_tx(
        tx: &mut DbTx<'_>,
        user_x: DbId,
        user_y: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM interest_edges
             WHERE (from_user_id = $1 AND to_user_id = $2)
                OR (from_user_id = $2 AND to_user_id = $1)",
        )
        .bind(user_x)
        .bind(user_y)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    /// Remove every edge that starts or ends at `user_id`.
    pub async fn delete_all_for_user_tx(
        tx: &mut DbTx<'_>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM interest_edges WHERE from_user_id = $1 OR to_user_id = $1")
                .bind(user_id)
                .execute(&mut **tx)
                .await?;
        Ok(result.rows_affected())
    }

    /// Every edge that starts or ends at `user_id`.
    pub async fn list_for_user_tx(
        tx: &mut DbTx<'_>,
        user_id: DbId,
    ) -> Result<Vec<InterestEdgeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM interest_edges
             WHERE from_user_id = $1 OR to_user_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, InterestEdgeRow>(&query)
            .bind(user_id)
            .fetch_all(&mut **tx)
            .await
    }
}
