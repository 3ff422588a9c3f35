//! Form errors

use super::path::FieldPath;
use thiserror::Error;

/// Errors from addressing fields in a form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The path does not name a declared field (or repeated group)
    #[error("no field declared at path `{0}`")]
    PathNotFound(FieldPath),
    /// The text could not be parsed as a field path
    #[error("invalid field path `{0}`")]
    InvalidPath(String),
}

/// Per-field validation failures, in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<(FieldPath, String)>);

impl ValidationErrors {
    pub(crate) fn push(&mut self, path: FieldPath, message: String) {
        self.0.push((path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.0.iter().any(|(p, _)| p == path)
    }

    /// Message reported for `path`, if it failed
    pub fn message(&self, path: &FieldPath) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, message)| message.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.0.iter().map(|(path, _)| path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.0.iter().map(|(path, message)| (path, message.as_str()))
    }
}
