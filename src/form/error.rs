use std::fmt;

use crate::field::ParseNumberError;

/// A field whose text could not be collected as a number.
#[derive(Debug, Clone)]
pub struct FieldValueError {
    pub field: String,
    pub source: ParseNumberError,
}

impl fmt::Display for FieldValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.source)
    }
}

impl std::error::Error for FieldValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
