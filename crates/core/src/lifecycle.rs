//! Per-user swap state machine and the policy switches that shape it.
//!
//! ```text
//! NoRequest --create--> HasRequest --accept--> Confirmed
//!     ^                     |  ^                   |
//!     +-------delete--------+  +----remove match---+
//! ```
//!
//! [`authorize`] only answers "may this user do this now?". Loading the
//! state and applying the mutation is the caller's job, inside one
//! transaction.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Product behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPolicy {
    /// Freeze a user's request and interest actions while they hold a
    /// confirmed match.
    pub lock_on_confirmed_match: bool,
    /// Show contact details on every discovered cycle match without a
    /// confirmation step.
    pub disclose_cycle_contacts: bool,
}

impl Default for SwapPolicy {
    fn default() -> Self {
        Self {
            lock_on_confirmed_match: true,
            disclose_cycle_contacts: true,
        }
    }
}

/// Where a user currently stands in the pairwise flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SwapState {
    NoRequest,
    HasRequest,
    Confirmed { partner: DbId },
}

impl SwapState {
    pub fn from_parts(has_request: bool, partner: Option<DbId>) -> Self {
        match (has_request, partner) {
            (_, Some(partner)) => SwapState::Confirmed { partner },
            (true, None) => SwapState::HasRequest,
            (false, None) => SwapState::NoRequest,
        }
    }

    pub fn partner(&self) -> Option<DbId> {
        match self {
            SwapState::Confirmed { partner } => Some(*partner),
            _ => None,
        }
    }
}

/// Actions a user can attempt against their own pairwise state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    CreateRequest,
    EditRequest { request_id: DbId },
    DeleteRequest { request_id: DbId },
    ExpressInterest,
    WithdrawInterest,
    AcceptInterest,
    RemoveMatch { other: DbId },
}

impl SwapAction {
    fn locked_message(self) -> &'static str {
        match self {
            SwapAction::CreateRequest => {
                "You cannot create a new request while you have a confirmed match"
            }
            SwapAction::EditRequest { .. } => {
                "You cannot edit your request while you have a confirmed match"
            }
            SwapAction::DeleteRequest { .. } => {
                "You cannot delete your request while you have a confirmed match"
            }
            SwapAction::ExpressInterest => {
                "You cannot express interest in other swaps while you have a confirmed match"
            }
            SwapAction::WithdrawInterest => {
                "You cannot withdraw interest while you have a confirmed match"
            }
            SwapAction::AcceptInterest | SwapAction::RemoveMatch { .. } => {
                "Action not allowed while you have a confirmed match"
            }
        }
    }
}

/// Decide whether `action` is allowed for a user in `state`.
///
/// Request ownership is checked by the caller before this; an id that does
/// not belong to the caller never reaches here.
pub fn authorize(
    state: SwapState,
    action: SwapAction,
    policy: &SwapPolicy,
) -> Result<(), CoreError> {
    use SwapAction::*;

    let confirmed = matches!(state, SwapState::Confirmed { .. });

    if confirmed
        && policy.lock_on_confirmed_match
        && matches!(
            action,
            CreateRequest
                | EditRequest { .. }
                | DeleteRequest { .. }
                | ExpressInterest
                | WithdrawInterest
        )
    {
        return Err(CoreError::Forbidden(action.locked_message().to_string()));
    }

    match (action, state) {
        (CreateRequest, SwapState::NoRequest) => Ok(()),
        (CreateRequest, _) => Err(CoreError::Conflict(
            "You already have a swap request. Please delete your existing request first or update it."
                .to_string(),
        )),

        (EditRequest { request_id } | DeleteRequest { request_id }, SwapState::NoRequest) => {
            Err(CoreError::NotFound {
                entity: "SwapRequest",
                id: request_id,
            })
        }
        (EditRequest { .. } | DeleteRequest { .. }, _) => Ok(()),

        (ExpressInterest, SwapState::NoRequest) => Err(CoreError::InvalidState(
            "Create a swap request before expressing interest".to_string(),
        )),
        (ExpressInterest, _) => Ok(()),

        (WithdrawInterest, _) => Ok(()),

        (AcceptInterest, SwapState::NoRequest) => Err(CoreError::InvalidState(
            "Create a swap request before accepting interest".to_string(),
        )),
        (AcceptInterest, SwapState::Confirmed { .. }) => Err(CoreError::Conflict(
            "You already have a confirmed match".to_string(),
        )),
        (AcceptInterest, SwapState::HasRequest) => Ok(()),

        (RemoveMatch { other }, SwapState::Confirmed { partner }) if partner == other => Ok(()),
        (RemoveMatch { other }, _) => Err(CoreError::MatchNotFound {
            other_user_id: other,
        }),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const LOCK: SwapPolicy = SwapPolicy {
        lock_on_confirmed_match: true,
        disclose_cycle_contacts: true,
    };
    const OPEN: SwapPolicy = SwapPolicy {
        lock_on_confirmed_match: false,
        disclose_cycle_contacts: true,
    };
    const CONFIRMED: SwapState = SwapState::Confirmed { partner: 2 };

    #[test]
    fn test_from_parts() {
        assert_eq!(SwapState::from_parts(false, None), SwapState::NoRequest);
        assert_eq!(SwapState::from_parts(true, None), SwapState::HasRequest);
        assert_eq!(SwapState::from_parts(true, Some(4)), SwapState::Confirmed { partner: 4 });
        assert_eq!(SwapState::from_parts(true, Some(4)).partner(), Some(4));
    }

    #[test]
    fn test_default_policy_locks() {
        assert_eq!(SwapPolicy::default(), LOCK);
    }

    #[test]
    fn test_create_only_from_no_request() {
        assert!(authorize(SwapState::NoRequest, SwapAction::CreateRequest, &LOCK).is_ok());
        assert_matches!(
            authorize(SwapState::HasRequest, SwapAction::CreateRequest, &LOCK),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn test_create_while_confirmed_depends_on_policy() {
        assert_matches!(
            authorize(CONFIRMED, SwapAction::CreateRequest, &LOCK),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            authorize(CONFIRMED, SwapAction::CreateRequest, &OPEN),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn test_edit_and_delete_locked_while_confirmed() {
        for action in [
            SwapAction::EditRequest { request_id: 9 },
            SwapAction::DeleteRequest { request_id: 9 },
        ] {
            assert_matches!(authorize(CONFIRMED, action, &LOCK), Err(CoreError::Forbidden(_)));
            assert!(authorize(CONFIRMED, action, &OPEN).is_ok());
            assert!(authorize(SwapState::HasRequest, action, &LOCK).is_ok());
        }
    }

    #[test]
    fn test_edit_without_request_is_not_found() {
        assert_matches!(
            authorize(SwapState::NoRequest, SwapAction::EditRequest { request_id: 9 }, &LOCK),
            Err(CoreError::NotFound { entity: "SwapRequest", id: 9 })
        );
    }

    #[test]
    fn test_interest_actions_locked_while_confirmed() {
        for action in [SwapAction::ExpressInterest, SwapAction::WithdrawInterest] {
            assert_matches!(authorize(CONFIRMED, action, &LOCK), Err(CoreError::Forbidden(_)));
            assert!(authorize(CONFIRMED, action, &OPEN).is_ok());
        }
    }

    #[test]
    fn test_express_requires_request_but_withdraw_does_not() {
        assert_matches!(
            authorize(SwapState::NoRequest, SwapAction::ExpressInterest, &LOCK),
            Err(CoreError::InvalidState(_))
        );
        assert!(authorize(SwapState::NoRequest, SwapAction::WithdrawInterest, &LOCK).is_ok());
    }

    #[test]
    fn test_second_confirmation_is_conflict_under_both_policies() {
        for policy in [LOCK, OPEN] {
            assert_matches!(
                authorize(CONFIRMED, SwapAction::AcceptInterest, &policy),
                Err(CoreError::Conflict(_))
            );
        }
        assert!(authorize(SwapState::HasRequest, SwapAction::AcceptInterest, &LOCK).is_ok());
    }

    #[test]
    fn test_remove_match_needs_confirmation_with_that_user() {
        assert!(authorize(CONFIRMED, SwapAction::RemoveMatch { other: 2 }, &LOCK).is_ok());
        assert_matches!(
            authorize(CONFIRMED, SwapAction::RemoveMatch { other: 3 }, &LOCK),
            Err(CoreError::MatchNotFound { other_user_id: 3 })
        );
        assert_matches!(
            authorize(SwapState::HasRequest, SwapAction::RemoveMatch { other: 2 }, &OPEN),
            Err(CoreError::MatchNotFound { .. })
        );
    }
}
