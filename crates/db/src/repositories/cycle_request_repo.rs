//! Repository for the `cycle_swap_requests` table.

use roomswap_core::swap_request::CycleRequestFields;
use roomswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::cycle_request::{CyclePoolRow, CycleRequest, CycleRequestListing};
use crate::DbTx;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, current_apartment, current_room, desired_choice, \
                        created_at, updated_at";

/// Provides CRUD operations for cycle swap requests.
pub struct CycleRequestRepo;

impl CycleRequestRepo {
    /// Every active cycle request, the viewer's own first, then newest first.
    pub async fn list_for_viewer(
        pool: &PgPool,
        viewer_id: DbId,
    ) -> Result<Vec<CycleRequestListing>, sqlx::Error> {
        sqlx::query_as::<_, CycleRequestListing>(
            "SELECT r.id, r.user_id, u.name AS user_name,
                    r.current_apartment, r.current_room, r.desired_choice,
                    (r.user_id = $1) AS is_own, r.created_at, r.updated_at
             FROM cycle_swap_requests r
             JOIN users u ON u.id = r.user_id
             ORDER BY is_own DESC, r.created_at DESC, r.id DESC",
        )
        .bind(viewer_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id_tx(
        tx: &mut DbTx<'_>,
        id: DbId,
    ) -> Result<Option<CycleRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cycle_swap_requests WHERE id = $1");
        sqlx::query_as::<_, CycleRequest>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn find_by_user_tx(
        tx: &mut DbTx<'_>,
        user_id: DbId,
    ) -> Result<Option<CycleRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cycle_swap_requests WHERE user_id = $1");
        sqlx::query_as::<_, CycleRequest>(&query)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a cycle request for `user_id`.
    pub async fn create_tx(
        tx: &mut DbTx<'_>,
        user_id: DbId,
        fields: &CycleRequestFields,
    ) -> Result<CycleRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO cycle_swap_requests
                (user_id, current_apartment, current_room, desired_choice)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CycleRequest>(&query)
            .bind(user_id)
            .bind(&fields.current_apartment)
            .bind(&fields.current_room)
            .bind(&fields.desired_choice)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn update_tx(
        tx: &mut DbTx<'_>,
        id: DbId,
        fields: &CycleRequestFields,
    ) -> Result<CycleRequest, sqlx::Error> {
        let query = format!(
            "UPDATE cycle_swap_requests SET
                current_apartment = $2,
                current_room = $3,
                desired_choice = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CycleRequest>(&query)
            .bind(id)
            .bind(&fields.current_apartment)
            .bind(&fields.current_room)
            .bind(&fields.desired_choice)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn delete_tx(tx: &mut DbTx<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cycle_swap_requests WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every active cycle request joined with its owner, ordered by user id.
    pub async fn list_pool(pool: &PgPool) -> Result<Vec<CyclePoolRow>, sqlx::Error> {
        sqlx::query_as::<_, CyclePoolRow>(
            "SELECT r.user_id, u.name AS user_name, u.email AS user_email,
                    r.current_apartment, r.current_room, r.desired_choice
             FROM cycle_swap_requests r
             JOIN users u ON u.id = r.user_id
             ORDER BY r.user_id",
        )
        .fetch_all(pool)
        .await
    }
}
