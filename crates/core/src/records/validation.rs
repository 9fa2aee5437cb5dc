use super::error::{ValidationError, ValidationErrors};
use super::types::{User, Walk};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 60;

/// Validates a user before creation or update.
///
/// Collects every failing field instead of stopping at the first one.
pub fn validate_user(user: &User) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if user.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    } else if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&user.name.chars().count()) {
        errors.push(ValidationError::NameLength);
    }

    if user.email.trim().is_empty() {
        errors.push(ValidationError::EmptyEmail);
    } else if !is_valid_email(&user.email) {
        errors.push(ValidationError::InvalidEmail);
    }

    errors.into_result()
}

/// Validates a walk before creation or update.
pub fn validate_walk(walk: &Walk) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if walk.user_id.trim().is_empty() {
        errors.push(ValidationError::MissingUserId);
    }

    if let Some(distance) = walk.distance_meters {
        if distance.is_nan() || distance < 0.0 {
            errors.push(ValidationError::NegativeDistance);
        }
    }

    errors.into_result()
}

/// `local@domain`, both parts non-empty, a single `@`, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
