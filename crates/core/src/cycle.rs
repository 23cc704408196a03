//! Cycle-mode match discovery.
//!
//! Each cycle request names exactly one desired apartment, which makes the
//! "wants" relation a functional graph over requests. From the viewer we
//! look for 2-cycles (direct swaps) and 3-cycles (three-way chains).

use serde::Serialize;

use crate::lifecycle::SwapPolicy;
use crate::swap_request::same_apartment;
use crate::types::DbId;

/// One user's active cycle request joined with their account details.
#[derive(Debug, Clone)]
pub struct CycleEntry {
    pub user_id: DbId,
    pub user_name: String,
    pub user_email: String,
    pub current_apartment: String,
    pub current_room: String,
    pub desired_choice: String,
}

impl CycleEntry {
    /// Whether this user wants to move into `other`'s apartment.
    pub fn wants(&self, other: &CycleEntry) -> bool {
        same_apartment(&self.desired_choice, &other.current_apartment)
    }
}

/// A discovered cycle involving the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "match_type", rename_all = "snake_case")]
pub enum CycleMatch {
    /// Viewer and the other user want each other's apartment.
    DirectSwap {
        other_user_id: DbId,
        other_user_name: String,
        other_current_apartment: String,
        other_current_room: String,
        other_user_email_display: Option<String>,
    },
    /// Viewer wants "other", other wants "third", third wants the viewer.
    ThreeWayChain {
        other_user_id: DbId,
        other_user_name: String,
        other_current_apartment: String,
        other_current_room: String,
        other_user_email_display: Option<String>,
        third_user_id: DbId,
        third_user_name: String,
        third_current_apartment: String,
        third_current_room: String,
        third_user_email_display: Option<String>,
    },
}

/// Compute every direct swap and three-way chain that includes the viewer.
///
/// Direct swaps are listed first. A triple is only reported as a chain when
/// none of its three pairs already forms a direct swap on its own, and no
/// user appears twice. Returns an empty list when the viewer has no active
/// cycle request.
pub fn compute_cycle_matches(
    viewer_id: DbId,
    entries: &[CycleEntry],
    policy: &SwapPolicy,
) -> Vec<CycleMatch> {
    let Some(me) = entries.iter().find(|e| e.user_id == viewer_id) else {
        return Vec::new();
    };

    let contact = |entry: &CycleEntry| {
        policy
            .disclose_cycle_contacts
            .then(|| entry.user_email.clone())
    };

    let others: Vec<&CycleEntry> = unique_others(viewer_id, entries);

    let mut direct = Vec::new();
    let mut chains = Vec::new();

    for &b in &others {
        if !me.wants(b) {
            continue;
        }

        if b.wants(me) {
            direct.push(CycleMatch::DirectSwap {
                other_user_id: b.user_id,
                other_user_name: b.user_name.clone(),
                other_current_apartment: b.current_apartment.clone(),
                other_current_room: b.current_room.clone(),
                other_user_email_display: contact(b),
            });
            // A 2-cycle with B rules out any chain through B.
            continue;
        }

        for &c in &others {
            if c.user_id == b.user_id || !b.wants(c) || !c.wants(me) {
                continue;
            }
            if c.wants(b) || me.wants(c) {
                continue;
            }

            chains.push(CycleMatch::ThreeWayChain {
                other_user_id: b.user_id,
                other_user_name: b.user_name.clone(),
                other_current_apartment: b.current_apartment.clone(),
                other_current_room: b.current_room.clone(),
                other_user_email_display: contact(b),
                third_user_id: c.user_id,
                third_user_name: c.user_name.clone(),
                third_current_apartment: c.current_apartment.clone(),
                third_current_room: c.current_room.clone(),
                third_user_email_display: contact(c),
            });
        }
    }

    direct.extend(chains);
    direct
}

fn unique_others(viewer_id: DbId, entries: &[CycleEntry]) -> Vec<&CycleEntry> {
    let mut seen = std::collections::HashSet::new();
    entries
        .iter()
        .filter(|e| e.user_id != viewer_id && seen.insert(e.user_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const DISCLOSE: SwapPolicy = SwapPolicy {
        lock_on_confirmed_match: true,
        disclose_cycle_contacts: true,
    };
    const WITHHOLD: SwapPolicy = SwapPolicy {
        lock_on_confirmed_match: true,
        disclose_cycle_contacts: false,
    };

    /// Ids of the other participants, in rotation order from the viewer.
    fn participants(m: &CycleMatch) -> Vec<DbId> {
        match m {
            CycleMatch::DirectSwap { other_user_id, .. } => vec![*other_user_id],
            CycleMatch::ThreeWayChain {
                other_user_id,
                third_user_id,
                ..
            } => vec![*other_user_id, *third_user_id],
        }
    }

    fn entry(user_id: DbId, current: &str, desired: &str) -> CycleEntry {
        CycleEntry {
            user_id,
            user_name: format!("user{user_id}"),
            user_email: format!("user{user_id}@example.edu"),
            current_apartment: current.to_string(),
            current_room: String::new(),
            desired_choice: desired.to_string(),
        }
    }

    #[test]
    fn test_no_request_no_matches() {
        let entries = vec![entry(2, "B", "A")];
        assert!(compute_cycle_matches(1, &entries, &DISCLOSE).is_empty());
    }

    #[test]
    fn test_two_cycle_is_direct_swap_not_chain() {
        let entries = vec![entry(1, "A", "B"), entry(2, "B", "A")];
        let matches = compute_cycle_matches(1, &entries, &DISCLOSE);
        assert_eq!(matches.len(), 1);
        assert_matches!(&matches[0], CycleMatch::DirectSwap { other_user_id: 2, .. });
    }

    #[test]
    fn test_three_cycle_names_both_participants() {
        let entries = vec![entry(1, "A", "B"), entry(2, "B", "C"), entry(3, "C", "A")];
        let matches = compute_cycle_matches(1, &entries, &DISCLOSE);
        assert_eq!(matches.len(), 1);
        assert_eq!(participants(&matches[0]), vec![2, 3]);
        match &matches[0] {
            CycleMatch::ThreeWayChain {
                other_current_apartment,
                third_current_apartment,
                third_user_email_display,
                ..
            } => {
                assert_eq!(other_current_apartment, "B");
                assert_eq!(third_current_apartment, "C");
                assert_eq!(third_user_email_display.as_deref(), Some("user3@example.edu"));
            }
            other => panic!("expected chain, got {other:?}"),
        }
    }

    #[test]
    fn test_every_participant_sees_the_chain() {
        let entries = vec![entry(1, "A", "B"), entry(2, "B", "C"), entry(3, "C", "A")];
        let for_two = compute_cycle_matches(2, &entries, &DISCLOSE);
        let for_three = compute_cycle_matches(3, &entries, &DISCLOSE);
        assert_eq!(participants(&for_two[0]), vec![3, 1]);
        assert_eq!(participants(&for_three[0]), vec![1, 2]);
    }

    #[test]
    fn test_all_chains_returned() {
        // Two different B/C pairs close the loop back to user 1.
        let entries = vec![
            entry(1, "A", "B"),
            entry(2, "B", "C"),
            entry(3, "C", "A"),
            entry(4, "B", "C"),
            entry(5, "C", "A"),
        ];
        let matches = compute_cycle_matches(1, &entries, &DISCLOSE);
        let mut triples: Vec<Vec<DbId>> = matches.iter().map(participants).collect();
        triples.sort();
        assert_eq!(
            triples,
            vec![vec![2, 3], vec![2, 5], vec![4, 3], vec![4, 5]]
        );
    }

    #[test]
    fn test_chain_with_shorter_subcycle_excluded() {
        // Users 1 and 3 live in the same apartment (different rooms), so
        // 1 -> 2 -> 3 -> 1 closes, but 1 and 2 already swap directly.
        let entries = vec![
            entry(1, "A", "B"),
            entry(2, "B", "A"),
            entry(3, "A", "A"),
        ];
        let matches = compute_cycle_matches(1, &entries, &DISCLOSE);
        assert_eq!(matches.len(), 1);
        assert_matches!(&matches[0], CycleMatch::DirectSwap { other_user_id: 2, .. });
    }

    #[test]
    fn test_direct_swap_listed_before_chains() {
        let entries = vec![
            entry(1, "A", "B"),
            entry(2, "B", "A"),
            entry(4, "B", "C"),
            entry(5, "C", "A"),
        ];
        let matches = compute_cycle_matches(1, &entries, &DISCLOSE);
        assert_eq!(matches.len(), 2);
        assert_matches!(&matches[0], CycleMatch::DirectSwap { .. });
        assert_matches!(&matches[1], CycleMatch::ThreeWayChain { .. });
    }

    #[test]
    fn test_contacts_withheld_by_policy() {
        let entries = vec![entry(1, "A", "B"), entry(2, "B", "A")];
        let matches = compute_cycle_matches(1, &entries, &WITHHOLD);
        match &matches[0] {
            CycleMatch::DirectSwap {
                other_user_email_display,
                ..
            } => assert_eq!(*other_user_email_display, None),
            other => panic!("expected direct swap, got {other:?}"),
        }
    }

    #[test]
    fn test_match_type_tag_serialization() {
        let entries = vec![entry(1, "A", "B"), entry(2, "B", "A")];
        let json = serde_json::to_value(&compute_cycle_matches(1, &entries, &DISCLOSE)).unwrap();
        assert_eq!(json[0]["match_type"], "direct_swap");
        assert_eq!(json[0]["other_user_id"], 2);
    }
}
