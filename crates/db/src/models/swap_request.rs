//! Pairwise swap request model.

use roomswap_core::matching::PairwiseEntry;
use roomswap_core::swap_request::{Preferences, SwapRequestFields};
use roomswap_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `swap_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SwapRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub current_apartment: String,
    pub current_room: String,
    pub first_choice: String,
    pub second_choice: Option<String>,
    pub third_choice: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SwapRequest {
    /// The validated field set this row was written from.
    pub fn fields(&self) -> SwapRequestFields {
        SwapRequestFields {
            current_apartment: self.current_apartment.clone(),
            current_room: self.current_room.clone(),
            preferences: Preferences {
                first_choice: self.first_choice.clone(),
                second_choice: self.second_choice.clone(),
                third_choice: self.third_choice.clone(),
            },
        }
    }
}

/// A request as shown in the shared listing, flagged for the viewer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SwapRequestListing {
    pub id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub current_apartment: String,
    pub current_room: String,
    pub first_choice: String,
    pub second_choice: Option<String>,
    pub third_choice: Option<String>,
    pub is_own: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Match pool rows
// ---------------------------------------------------------------------------

/// An active swap request joined with its owner's name and email.
#[derive(Debug, Clone, FromRow)]
pub struct SwapPoolRow {
    pub user_id: DbId,
    pub user_name: String,
    pub user_email: String,
    pub current_apartment: String,
    pub current_room: String,
    pub first_choice: String,
    pub second_choice: Option<String>,
    pub third_choice: Option<String>,
}

impl From<SwapPoolRow> for PairwiseEntry {
    fn from(row: SwapPoolRow) -> Self {
        PairwiseEntry {
            user_id: row.user_id,
            user_name: row.user_name,
            user_email: row.user_email,
            current_apartment: row.current_apartment,
            current_room: row.current_room,
            preferences: Preferences {
                first_choice: row.first_choice,
                second_choice: row.second_choice,
                third_choice: row.third_choice,
            },
        }
    }
}
