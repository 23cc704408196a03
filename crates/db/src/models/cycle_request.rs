//! Cycle swap request model.

use roomswap_core::cycle::CycleEntry;
use roomswap_core::swap_request::CycleRequestFields;
use roomswap_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cycle_swap_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CycleRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub current_apartment: String,
    pub current_room: String,
    pub desired_choice: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CycleRequest {
    pub fn fields(&self) -> CycleRequestFields {
        CycleRequestFields {
            current_apartment: self.current_apartment.clone(),
            current_room: self.current_room.clone(),
            desired_choice: self.desired_choice.clone(),
        }
    }
}

/// A cycle request as shown in the shared listing, flagged for the viewer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CycleRequestListing {
    pub id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub current_apartment: String,
    pub current_room: String,
    pub desired_choice: String,
    pub is_own: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An active cycle request joined with its owner's name and email.
#[derive(Debug, Clone, FromRow)]
pub struct CyclePoolRow {
    pub user_id: DbId,
    pub user_name: String,
    pub user_email: String,
    pub current_apartment: String,
    pub current_room: String,
    pub desired_choice: String,
}

impl From<CyclePoolRow> for CycleEntry {
    fn from(row: CyclePoolRow) -> Self {
        CycleEntry {
            user_id: row.user_id,
            user_name: row.user_name,
            user_email: row.user_email,
            current_apartment: row.current_apartment,
            current_room: row.current_room,
            desired_choice: row.desired_choice,
        }
    }
}
