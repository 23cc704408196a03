//! Housing request field rules shared by the pairwise and cycle flavours.
//!
//! A pairwise request carries up to three ranked destination apartments;
//! a cycle request carries exactly one. Both are validated here so the
//! repository layer only ever persists normalized values.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length (in characters) of any apartment or room descriptor.
pub const MAX_FIELD_LEN: usize = 100;

/// Number of ranked choices a pairwise request can carry.
pub const MAX_CHOICES: usize = 3;

/// Returns `true` when two apartment descriptors name the same place.
///
/// Descriptors are free text typed by users, so comparison ignores
/// surrounding whitespace and ASCII case.
pub fn same_apartment(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}

// ---------------------------------------------------------------------------
// Ranked preferences
// ---------------------------------------------------------------------------

/// Ranked list of desired apartments. Rank 1 is the most wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub first_choice: String,
    pub second_choice: Option<String>,
    pub third_choice: Option<String>,
}

impl Preferences {
    /// Choices in rank order; unset ranks are `None`.
    pub fn ranked(&self) -> [Option<&str>; MAX_CHOICES] {
        [
            Some(self.first_choice.as_str()),
            self.second_choice.as_deref(),
            self.third_choice.as_deref(),
        ]
    }

    /// 1-based rank of `apartment` in this list, if present.
    pub fn rank_of(&self, apartment: &str) -> Option<u8> {
        self.ranked()
            .iter()
            .zip(1u8..)
            .find_map(|(choice, rank)| match choice {
                Some(c) if same_apartment(c, apartment) => Some(rank),
                _ => None,
            })
    }

    pub fn contains(&self, apartment: &str) -> bool {
        self.rank_of(apartment).is_some()
    }
}

// ---------------------------------------------------------------------------
// Validated field sets
// ---------------------------------------------------------------------------

/// Validated contents of a pairwise swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequestFields {
    pub current_apartment: String,
    pub current_room: String,
    pub preferences: Preferences,
}

/// Validated contents of a cycle swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleRequestFields {
    pub current_apartment: String,
    pub current_room: String,
    pub desired_choice: String,
}

/// Raw, possibly partial input for a pairwise request.
///
/// Used for both creation (where missing required fields are errors) and
/// patches (where `None` means "leave unchanged").
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapRequestInput<'a> {
    pub current_apartment: Option<&'a str>,
    pub current_room: Option<&'a str>,
    pub first_choice: Option<&'a str>,
    pub second_choice: Option<&'a str>,
    pub third_choice: Option<&'a str>,
}

impl SwapRequestInput<'_> {
    fn is_empty(&self) -> bool {
        self.current_apartment.is_none()
            && self.current_room.is_none()
            && self.first_choice.is_none()
            && self.second_choice.is_none()
            && self.third_choice.is_none()
    }
}

/// Raw, possibly partial input for a cycle request.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleRequestInput<'a> {
    pub current_apartment: Option<&'a str>,
    pub current_room: Option<&'a str>,
    pub desired_choice: Option<&'a str>,
}

impl CycleRequestInput<'_> {
    fn is_empty(&self) -> bool {
        self.current_apartment.is_none()
            && self.current_room.is_none()
            && self.desired_choice.is_none()
    }
}

/// Validate the input for a brand new pairwise request.
///
/// `current_apartment` and `first_choice` are required; lower ranks are
/// optional but must not repeat a higher one.
pub fn validate_swap_request(input: &SwapRequestInput<'_>) -> Result<SwapRequestFields, CoreError> {
    let fields = SwapRequestFields {
        current_apartment: required("current_apartment", input.current_apartment)?,
        current_room: optional("current_room", input.current_room)?.unwrap_or_default(),
        preferences: Preferences {
            first_choice: required("first_choice", input.first_choice)?,
            second_choice: optional("second_choice", input.second_choice)?,
            third_choice: optional("third_choice", input.third_choice)?,
        },
    };
    check_preferences(&fields.preferences)?;
    Ok(fields)
}

impl SwapRequestFields {
    /// Apply a partial update and re-validate the result.
    ///
    /// An empty string for `second_choice` or `third_choice` clears that
    /// rank. A patch with no fields at all is rejected.
    pub fn patched(&self, patch: &SwapRequestInput<'_>) -> Result<Self, CoreError> {
        if patch.is_empty() {
            return Err(CoreError::Validation(
                "No updatable fields provided".to_string(),
            ));
        }

        let mut next = self.clone();
        if patch.current_apartment.is_some() {
            next.current_apartment = required("current_apartment", patch.current_apartment)?;
        }
        if patch.current_room.is_some() {
            next.current_room = optional("current_room", patch.current_room)?.unwrap_or_default();
        }
        if patch.first_choice.is_some() {
            next.preferences.first_choice = required("first_choice", patch.first_choice)?;
        }
        if patch.second_choice.is_some() {
            next.preferences.second_choice = optional("second_choice", patch.second_choice)?;
        }
        if patch.third_choice.is_some() {
            next.preferences.third_choice = optional("third_choice", patch.third_choice)?;
        }

        check_preferences(&next.preferences)?;
        Ok(next)
    }
}

/// Validate the input for a brand new cycle request.
pub fn validate_cycle_request(
    input: &CycleRequestInput<'_>,
) -> Result<CycleRequestFields, CoreError> {
    let fields = CycleRequestFields {
        current_apartment: required("current_apartment", input.current_apartment)?,
        current_room: optional("current_room", input.current_room)?.unwrap_or_default(),
        desired_choice: required("desired_choice", input.desired_choice)?,
    };
    check_cycle_target(&fields)?;
    Ok(fields)
}

impl CycleRequestFields {
    /// Apply a partial update and re-validate the result.
    pub fn patched(&self, patch: &CycleRequestInput<'_>) -> Result<Self, CoreError> {
        if patch.is_empty() {
            return Err(CoreError::Validation(
                "No updatable fields provided".to_string(),
            ));
        }

        let mut next = self.clone();
        if patch.current_apartment.is_some() {
            next.current_apartment = required("current_apartment", patch.current_apartment)?;
        }
        if patch.current_room.is_some() {
            next.current_room = optional("current_room", patch.current_room)?.unwrap_or_default();
        }
        if patch.desired_choice.is_some() {
            next.desired_choice = required("desired_choice", patch.desired_choice)?;
        }

        check_cycle_target(&next)?;
        Ok(next)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn optional(name: &str, value: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_FIELD_LEN {
        return Err(CoreError::Validation(format!(
            "{name} must be at most {MAX_FIELD_LEN} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

fn required(name: &str, value: Option<&str>) -> Result<String, CoreError> {
    optional(name, value)?.ok_or_else(|| CoreError::Validation(format!("{name} is required")))
}

fn check_preferences(prefs: &Preferences) -> Result<(), CoreError> {
    if prefs.second_choice.is_none() && prefs.third_choice.is_some() {
        return Err(CoreError::Validation(
            "third_choice requires a second_choice".to_string(),
        ));
    }

    let ranked = prefs.ranked();
    for (i, a) in ranked.iter().enumerate() {
        for b in &ranked[i + 1..] {
            if let (Some(a), Some(b)) = (a, b) {
                if same_apartment(a, b) {
                    return Err(CoreError::Validation(format!(
                        "Preference '{a}' is listed more than once"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn check_cycle_target(fields: &CycleRequestFields) -> Result<(), CoreError> {
    if same_apartment(&fields.current_apartment, &fields.desired_choice) {
        return Err(CoreError::Validation(
            "desired_choice must differ from current_apartment".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn full_input() -> SwapRequestInput<'static> {
        SwapRequestInput {
            current_apartment: Some("Apt 101"),
            current_room: Some("B"),
            first_choice: Some("Apt 202"),
            second_choice: Some("Apt 303"),
            third_choice: Some("Apt 404"),
        }
    }

    #[test]
    fn test_same_apartment_ignores_case_and_whitespace() {
        assert!(same_apartment("Apt 101", "  apt 101 "));
        assert!(!same_apartment("Apt 101", "Apt 102"));
        assert!(!same_apartment("", ""));
    }

    #[test]
    fn test_rank_of_returns_one_based_position() {
        let prefs = validate_swap_request(&full_input()).unwrap().preferences;
        assert_eq!(prefs.rank_of("apt 202"), Some(1));
        assert_eq!(prefs.rank_of("Apt 303"), Some(2));
        assert_eq!(prefs.rank_of("Apt 404"), Some(3));
        assert_eq!(prefs.rank_of("Apt 999"), None);
    }

    #[test]
    fn test_valid_request_is_trimmed() {
        let input = SwapRequestInput {
            current_apartment: Some("  Apt 101 "),
            current_room: None,
            first_choice: Some(" Apt 202"),
            second_choice: Some("   "),
            third_choice: None,
        };
        let fields = validate_swap_request(&input).unwrap();
        assert_eq!(fields.current_apartment, "Apt 101");
        assert_eq!(fields.current_room, "");
        assert_eq!(fields.preferences.first_choice, "Apt 202");
        assert_eq!(fields.preferences.second_choice, None);
    }

    #[test]
    fn test_missing_current_apartment_rejected() {
        let input = SwapRequestInput {
            current_apartment: None,
            ..full_input()
        };
        let err = validate_swap_request(&input).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("current_apartment"));
    }

    #[test]
    fn test_missing_first_choice_rejected() {
        let input = SwapRequestInput {
            first_choice: Some(""),
            ..full_input()
        };
        assert_matches!(
            validate_swap_request(&input),
            Err(CoreError::Validation(msg)) if msg.contains("first_choice")
        );
    }

    #[test]
    fn test_duplicate_choices_rejected() {
        let input = SwapRequestInput {
            third_choice: Some("APT 202"),
            ..full_input()
        };
        assert_matches!(
            validate_swap_request(&input),
            Err(CoreError::Validation(msg)) if msg.contains("more than once")
        );
    }

    #[test]
    fn test_third_without_second_rejected() {
        let input = SwapRequestInput {
            second_choice: None,
            ..full_input()
        };
        assert!(validate_swap_request(&input).is_err());
    }

    #[test]
    fn test_overlong_field_rejected() {
        let long = "x".repeat(MAX_FIELD_LEN + 1);
        let input = SwapRequestInput {
            current_room: Some(&long),
            ..full_input()
        };
        assert!(validate_swap_request(&input).is_err());
    }

    #[test]
    fn test_patch_changes_only_given_fields() {
        let fields = validate_swap_request(&full_input()).unwrap();
        let patch = SwapRequestInput {
            first_choice: Some("Apt 505"),
            third_choice: Some(""),
            ..Default::default()
        };
        let next = fields.patched(&patch).unwrap();
        assert_eq!(next.current_apartment, "Apt 101");
        assert_eq!(next.preferences.first_choice, "Apt 505");
        assert_eq!(next.preferences.second_choice.as_deref(), Some("Apt 303"));
        assert_eq!(next.preferences.third_choice, None);
    }

    #[test]
    fn test_empty_patch_rejected() {
        let fields = validate_swap_request(&full_input()).unwrap();
        assert_matches!(
            fields.patched(&SwapRequestInput::default()),
            Err(CoreError::Validation(msg)) if msg == "No updatable fields provided"
        );
    }

    #[test]
    fn test_cycle_request_requires_desired_choice() {
        let input = CycleRequestInput {
            current_apartment: Some("Apt 101"),
            current_room: None,
            desired_choice: None,
        };
        assert!(validate_cycle_request(&input).is_err());
    }

    #[test]
    fn test_cycle_request_cannot_target_own_apartment() {
        let input = CycleRequestInput {
            current_apartment: Some("Apt 101"),
            current_room: Some("A"),
            desired_choice: Some("apt 101"),
        };
        assert_matches!(
            validate_cycle_request(&input),
            Err(CoreError::Validation(msg)) if msg.contains("must differ")
        );
    }

    #[test]
    fn test_cycle_patch_revalidates() {
        let fields = validate_cycle_request(&CycleRequestInput {
            current_apartment: Some("Apt 101"),
            current_room: None,
            desired_choice: Some("Apt 202"),
        })
        .unwrap();

        let moved = fields
            .patched(&CycleRequestInput {
                desired_choice: Some("Apt 303"),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(moved.desired_choice, "Apt 303");

        let clash = fields.patched(&CycleRequestInput {
            current_apartment: Some("Apt 202"),
            ..Default::default()
        });
        assert!(clash.is_err());
    }
}
