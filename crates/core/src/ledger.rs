//! Interest ledger: directional interest edges and confirmed pairs.
//!
//! The database stores edges and confirmed matches as rows; the match
//! engine and lifecycle checks work against an in-memory
//! [`LedgerSnapshot`] built from those rows.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// "`from_user` wants to move into `to_user`'s current apartment."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterestEdge {
    pub from_user: DbId,
    pub to_user: DbId,
}

impl InterestEdge {
    /// Build an edge, rejecting self-interest.
    pub fn new(from_user: DbId, to_user: DbId) -> Result<Self, CoreError> {
        if from_user == to_user {
            return Err(CoreError::Validation(
                "Cannot express interest in your own request".to_string(),
            ));
        }
        Ok(Self { from_user, to_user })
    }
}

/// Unordered confirmed pair, normalized so that `user_a < user_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmedPair {
    pub user_a: DbId,
    pub user_b: DbId,
}

impl ConfirmedPair {
    pub fn new(x: DbId, y: DbId) -> Self {
        if x <= y {
            Self {
                user_a: x,
                user_b: y,
            }
        } else {
            Self {
                user_a: y,
                user_b: x,
            }
        }
    }

    /// The member of the pair that is not `user`, if `user` is a member.
    pub fn partner_of(&self, user: DbId) -> Option<DbId> {
        if self.user_a == user {
            Some(self.user_b)
        } else if self.user_b == user {
            Some(self.user_a)
        } else {
            None
        }
    }
}

/// Read-only view over interest edges and confirmed matches.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    edges: HashSet<InterestEdge>,
    partners: HashMap<DbId, DbId>,
}

impl LedgerSnapshot {
    pub fn new(
        edges: impl IntoIterator<Item = InterestEdge>,
        matches: impl IntoIterator<Item = ConfirmedPair>,
    ) -> Self {
        let mut partners = HashMap::new();
        for pair in matches {
            partners.insert(pair.user_a, pair.user_b);
            partners.insert(pair.user_b, pair.user_a);
        }
        Self {
            edges: edges.into_iter().collect(),
            partners,
        }
    }

    pub fn has_interest(&self, from_user: DbId, to_user: DbId) -> bool {
        self.edges.contains(&InterestEdge { from_user, to_user })
    }

    /// The user `user` is confirmed with, if any.
    pub fn partner_of(&self, user: DbId) -> Option<DbId> {
        self.partners.get(&user).copied()
    }

    pub fn is_confirmed(&self, user: DbId) -> bool {
        self.partners.contains_key(&user)
    }

    pub fn are_matched(&self, x: DbId, y: DbId) -> bool {
        self.partner_of(x) == Some(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_edge_rejected() {
        assert!(InterestEdge::new(7, 7).is_err());
        assert!(InterestEdge::new(7, 8).is_ok());
    }

    #[test]
    fn test_confirmed_pair_is_normalized() {
        let pair = ConfirmedPair::new(9, 3);
        assert_eq!(pair.user_a, 3);
        assert_eq!(pair.user_b, 9);
        assert_eq!(pair, ConfirmedPair::new(3, 9));
        assert_eq!(pair.partner_of(9), Some(3));
        assert_eq!(pair.partner_of(4), None);
    }

    #[test]
    fn test_snapshot_edges_are_directional() {
        let edge = InterestEdge::new(1, 2).unwrap();
        let ledger = LedgerSnapshot::new([edge], []);
        assert!(ledger.has_interest(1, 2));
        assert!(!ledger.has_interest(2, 1));
    }

    #[test]
    fn test_snapshot_partners_both_ways() {
        let ledger = LedgerSnapshot::new([], [ConfirmedPair::new(5, 4)]);
        assert_eq!(ledger.partner_of(4), Some(5));
        assert_eq!(ledger.partner_of(5), Some(4));
        assert!(ledger.are_matched(5, 4));
        assert!(!ledger.is_confirmed(6));
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let edge = InterestEdge::new(1, 2).unwrap();
        let once = LedgerSnapshot::new([edge], []);
        let twice = LedgerSnapshot::new([edge, edge], []);
        assert_eq!(once.edges, twice.edges);
    }
}
