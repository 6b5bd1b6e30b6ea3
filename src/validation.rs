//! Per-field validation results. They convert into `validator`'s error types so they serialize
//! the same way server side validation errors do.

use std::{borrow::Cow, collections::BTreeMap};

use validator::{ValidationError, ValidationErrors};

use crate::form::Field;

/// A single failed rule: a validator-style code and the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub code: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub const fn new(code: &'static str, message: &'static str) -> Self {
        Self { code, message }
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        let mut validation_error = ValidationError::new(error.code);
        validation_error.message = Some(Cow::Borrowed(error.message));
        validation_error
    }
}

/// The errors of a form, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport(BTreeMap<Field, FieldError>);

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|error| error.message)
    }

    pub fn code(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|error| error.code)
    }

    /// Invalid fields, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub(crate) fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn to_validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (field, error) in &self.0 {
            errors.add(field.as_str(), (*error).into());
        }
        errors
    }
}
