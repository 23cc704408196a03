//! Repository for the `swap_requests` table.

use roomswap_core::swap_request::SwapRequestFields;
use roomswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::swap_request::{SwapPoolRow, SwapRequest, SwapRequestListing};
use crate::DbTx;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, current_apartment, current_room, \
                        first_choice, second_choice, third_choice, created_at, updated_at";

/// Provides CRUD operations for pairwise swap requests.
pub struct SwapRequestRepo;

impl SwapRequestRepo {
    /// Every active request with its owner's name, the viewer's own first,
    /// then newest first.
    pub async fn list_for_viewer(
        pool: &PgPool,
        viewer_id: DbId,
    ) -> Result<Vec<SwapRequestListing>, sqlx::Error> {
        sqlx::query_as::<_, SwapRequestListing>(
            "SELECT r.id, r.user_id, u.name AS user_name,
                    r.current_apartment, r.current_room,
                    r.first_choice, r.second_choice, r.third_choice,
                    (r.user_id = $1) AS is_own, r.created_at, r.updated_at
             FROM swap_requests r
             JOIN users u ON u.id = r.user_id
             ORDER BY is_own DESC, r.created_at DESC, r.id DESC",
        )
        .bind(viewer_id)
        .fetch_all(pool)
        .await
    }

    /// Find a request by id within an open transaction.
    pub async fn find_by_id_tx(
        tx: &mut DbTx<'_>,
        id: DbId,
    ) -> Result<Option<SwapRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swap_requests WHERE id = $1");
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find a user's active request within an open transaction.
    pub async fn find_by_user_tx(
        tx: &mut DbTx<'_>,
        user_id: DbId,
    ) -> Result<Option<SwapRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swap_requests WHERE user_id = $1");
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a request for `user_id`.
    ///
    /// A second request for the same user fails with a unique violation on
    /// `uq_swap_requests_user_id`.
    pub async fn create_tx(
        tx: &mut DbTx<'_>,
        user_id: DbId,
        fields: &SwapRequestFields,
    ) -> Result<SwapRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO swap_requests
                (user_id, current_apartment, current_room,
                 first_choice, second_choice, third_choice)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(user_id)
            .bind(&fields.current_apartment)
            .bind(&fields.current_room)
            .bind(&fields.preferences.first_choice)
            .bind(&fields.preferences.second_choice)
            .bind(&fields.preferences.third_choice)
            .fetch_one(&mut **tx)
            .await
    }

    /// Overwrite every field of a request with an already-patched field set.
    pub async fn update_tx(
        tx: &mut DbTx<'_>,
        id: DbId,
        fields: &SwapRequestFields,
    ) -> Result<SwapRequest, sqlx::Error> {
        let query = format!(
            "UPDATE swap_requests SET
                current_apartment = $2,
                current_room = $3,
                first_choice = $4,
                second_choice = $5,
                third_choice = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(id)
            .bind(&fields.current_apartment)
            .bind(&fields.current_room)
            .bind(&fields.preferences.first_choice)
            .bind(&fields.preferences.second_choice)
            .bind(&fields.preferences.third_choice)
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete a request by id. Returns `true` if a row was removed.
    pub async fn delete_tx(tx: &mut DbTx<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM swap_requests WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every active request joined with its owner, ordered by user id.
    pub async fn list_pool_tx(tx: &mut DbTx<'_>) -> Result<Vec<SwapPoolRow>, sqlx::Error> {
        sqlx::query_as::<_, SwapPoolRow>(
            "SELECT r.user_id, u.name AS user_name, u.email AS user_email,
                    r.current_apartment, r.current_room,
                    r.first_choice, r.second_choice, r.third_choice
             FROM swap_requests r
             JOIN users u ON u.id = r.user_id
             ORDER BY r.user_id",
        )
        .fetch_all(&mut **tx)
        .await
    }
}
