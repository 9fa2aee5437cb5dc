use std::fmt;

use thiserror::Error;

/// A single rejected field of an incoming user or walk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,
    #[error("Name must be between 2 and 60 characters")]
    NameLength,
    #[error("Email is required")]
    EmptyEmail,
    #[error("Email must be a valid address")]
    InvalidEmail,
    #[error("User ID is required")]
    MissingUserId,
    #[error("Distance must be zero or positive")]
    NegativeDistance,
}

impl ValidationError {
    /// The API field name the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName | ValidationError::NameLength => "name",
            ValidationError::EmptyEmail | ValidationError::InvalidEmail => "email",
            ValidationError::MissingUserId => "userId",
            ValidationError::NegativeDistance => "distanceMeters",
        }
    }
}

/// Every validation failure found in one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed")?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{}: {error}", error.field())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
