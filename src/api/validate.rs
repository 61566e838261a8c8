use std::collections::HashMap;

use crate::error::ApiError;

/// Field-level checks run by `ValidatedJson` after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// Collects per-field failures and turns them into one 400 response
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "is required");
        }
    }

    /// Character count within `min..=max`; empty values report as required
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len == 0 {
            self.add(field, "is required");
        } else if len < min || len > max {
            self.add(field, format!("must be between {} and {} characters", min, max));
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "is required");
        } else if !is_email(value) {
            self.add(field, "must be a valid email address");
        }
    }

    pub fn positive(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.add(field, "must be a positive id");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Validation failed", Some(self.errors)))
        }
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
