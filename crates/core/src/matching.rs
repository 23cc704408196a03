//! Pairwise match engine.
//!
//! Match views are never stored. They are recomputed on every read from the
//! active swap requests and the interest ledger, so there is no cached
//! table to drift out of sync with the edges.

use std::collections::HashSet;

use serde::Serialize;

use crate::ledger::LedgerSnapshot;
use crate::lifecycle::SwapPolicy;
use crate::swap_request::Preferences;
use crate::types::DbId;

/// One user's active pairwise request joined with their account details.
#[derive(Debug, Clone)]
pub struct PairwiseEntry {
    pub user_id: DbId,
    pub user_name: String,
    pub user_email: String,
    pub current_apartment: String,
    pub current_room: String,
    pub preferences: Preferences,
}

/// Where a pair stands from the viewer's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Compatible on apartments, nobody has acted yet.
    Potential,
    /// The viewer expressed interest and is waiting.
    OutgoingPending,
    /// The other user expressed interest in the viewer.
    IncomingPending,
    /// Both expressed interest, neither accepted yet.
    MutualInterest,
    Confirmed,
}

/// A single row of the viewer's match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchView {
    pub other_user_id: DbId,
    pub other_user_name: String,
    pub other_current_apartment: String,
    pub other_current_room: String,
    pub other_first_choice: String,
    pub other_second_choice: Option<String>,
    pub other_third_choice: Option<String>,
    /// Rank of the other user's apartment in the viewer's choices.
    pub my_preference_level: Option<u8>,
    /// Rank of the viewer's apartment in the other user's choices.
    pub they_want_my_level: Option<u8>,
    pub i_expressed_interest: bool,
    pub they_expressed_interest: bool,
    pub mutually_confirmed: bool,
    pub status: MatchStatus,
    /// Withheld (`None`) until the pair is confirmed.
    pub other_user_email_display: Option<String>,
}

impl MatchView {
    fn best_rank(&self) -> u8 {
        match (self.my_preference_level, self.they_want_my_level) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => u8::MAX,
        }
    }
}

/// Candidate predicate: either side lists the other's current apartment.
///
/// Reciprocity is not needed to surface a pair, only to confirm it.
pub fn is_candidate(a: &PairwiseEntry, b: &PairwiseEntry) -> bool {
    a.preferences.contains(&b.current_apartment) || b.preferences.contains(&a.current_apartment)
}

/// Compute the viewer's match list.
///
/// Returns an empty list when the viewer has no active request. Each
/// other user appears at most once, and never the viewer themself.
/// Confirmed pairs come first, then pairs ordered by their best rank.
pub fn compute_matches(
    viewer_id: DbId,
    entries: &[PairwiseEntry],
    ledger: &LedgerSnapshot,
    policy: &SwapPolicy,
) -> Vec<MatchView> {
    let Some(me) = entries.iter().find(|e| e.user_id == viewer_id) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut views = Vec::new();

    for other in entries {
        if other.user_id == viewer_id || !seen.insert(other.user_id) {
            continue;
        }

        let mutually_confirmed = ledger.are_matched(viewer_id, other.user_id);

        // Users locked into someone else's match drop out of the pool.
        if !mutually_confirmed
            && policy.lock_on_confirmed_match
            && ledger.is_confirmed(other.user_id)
        {
            continue;
        }

        let i_expressed_interest = ledger.has_interest(viewer_id, other.user_id);
        let they_expressed_interest = ledger.has_interest(other.user_id, viewer_id);

        if !mutually_confirmed
            && !i_expressed_interest
            && !they_expressed_interest
            && !is_candidate(me, other)
        {
            continue;
        }

        let status = match (mutually_confirmed, i_expressed_interest, they_expressed_interest) {
            (true, _, _) => MatchStatus::Confirmed,
            (false, true, true) => MatchStatus::MutualInterest,
            (false, true, false) => MatchStatus::OutgoingPending,
            (false, false, true) => MatchStatus::IncomingPending,
            (false, false, false) => MatchStatus::Potential,
        };

        views.push(MatchView {
            other_user_id: other.user_id,
            other_user_name: other.user_name.clone(),
            other_current_apartment: other.current_apartment.clone(),
            other_current_room: other.current_room.clone(),
            other_first_choice: other.preferences.first_choice.clone(),
            other_second_choice: other.preferences.second_choice.clone(),
            other_third_choice: other.preferences.third_choice.clone(),
            my_preference_level: me.preferences.rank_of(&other.current_apartment),
            they_want_my_level: other.preferences.rank_of(&me.current_apartment),
            i_expressed_interest,
            they_expressed_interest,
            mutually_confirmed,
            status,
            other_user_email_display: mutually_confirmed.then(|| other.user_email.clone()),
        });
    }

    views.sort_by_key(|v| (!v.mutually_confirmed, v.best_rank(), v.other_user_id));
    views
}
