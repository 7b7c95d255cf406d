// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Conflict,
    DependencyUnavailable,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::Conflict => "conflict",
            Self::DependencyUnavailable => "dependency_unavailable",
            Self::Internal => "internal",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape error on a single input field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldError {
    Empty(&'static str),
    TooLong(&'static str, usize),
    Negative(&'static str),
}

impl FieldError {
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Empty(name) | Self::TooLong(name, _) | Self::Negative(name) => name,
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::Negative(name) => write!(f, "{name} cannot be negative"),
        }
    }
}

impl std::error::Error for FieldError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgencyError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl AgencyError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::new(ErrorKind::NotFound, format!("{entity} not found"))
            .with_detail("id", &id.to_string())
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    #[must_use]
    pub fn dependency_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DependencyUnavailable, message)
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Display for AgencyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AgencyError {}

impl From<FieldError> for AgencyError {
    fn from(value: FieldError) -> Self {
        Self::invalid_input(value.to_string()).with_detail("field", value.field())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_id_detail() {
        let err = AgencyError::not_found("spy cat", 42);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "spy cat not found");
        assert_eq!(err.details.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn field_error_maps_to_invalid_input() {
        let err = AgencyError::from(FieldError::TooLong("name", 255));
        assert!(err.is(ErrorKind::InvalidInput));
        assert_eq!(err.message, "name exceeds max length 255");
        assert_eq!(err.details.get("field").map(String::as_str), Some("name"));
    }

    #[test]
    fn display_prefixes_kind() {
        let err = AgencyError::conflict("mission already assigned");
        assert_eq!(err.to_string(), "conflict: mission already assigned");
    }
}
