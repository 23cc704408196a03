//! Account registration rules.

use crate::error::CoreError;

/// Maximum length of a display name.
pub const MAX_NAME_LEN: usize = 80;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Normalized registration fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub name: String,
}

/// Lower-case and trim an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Validate registration input.
///
/// When `allowed_domain` is set, only addresses ending in
/// `@<allowed_domain>` are accepted.
pub fn validate_registration(
    email: &str,
    name: &str,
    allowed_domain: Option<&str>,
) -> Result<Registration, CoreError> {
    let email = normalize_email(email);
    let name = name.trim();

    if email.is_empty() || name.is_empty() {
        return Err(CoreError::Validation("All fields are required".to_string()));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(CoreError::Validation("Email address is too long".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(CoreError::Validation("Invalid email address".to_string()));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(CoreError::Validation("Invalid email address".to_string()));
    }

    if let Some(allowed) = allowed_domain {
        if !domain.eq_ignore_ascii_case(allowed.trim()) {
            return Err(CoreError::Validation(format!(
                "Please use an @{allowed} email address"
            )));
        }
    }

    Ok(Registration {
        email,
        name: name.to_string(),
    })
}
