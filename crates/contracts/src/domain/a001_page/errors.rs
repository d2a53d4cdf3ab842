//! Page editor errors
//!
//! - `PageError`: structural errors (bad index, unknown field type, wrong
//!   protocol state). The operation is refused and the draft is unchanged.
//! - `ValidationErrors`: recoverable, addressed by `FieldPath`, block only
//!   the page save.
//! - `PersistenceError`: what the save collaborators report back.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field_path::FieldPath;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Field index {index} is out of range (page has {len} fields)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Option index {option_index} is out of range for field {field_index} ({len} options)")]
    OptionIndexOutOfRange {
        field_index: usize,
        option_index: usize,
        len: usize,
    },

    #[error("Invalid field type: {0}")]
    InvalidFieldType(String),

    #[error("Invalid data type: {0}")]
    InvalidDataType(String),

    #[error("Field {0} is not a select field")]
    NotASelectField(usize),

    #[error("Invalid field path: {0}")]
    InvalidFieldPath(String),

    #[error("Identifier is locked, begin editing first")]
    IdentifierLocked,

    #[error("Identifier cannot be empty")]
    EmptyIdentifier,

    #[error("A save for this page is already in flight")]
    SaveInFlight,
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    Required,
    NoOptions,
    NotAnOption,
    DuplicateIdentifier,
    InvalidFormat,
    Taken,
    /// Code the backend sent that the editor has no name for
    Other(String),
}

impl ValidationCode {
    pub fn as_str(&self) -> &str {
        match self {
            ValidationCode::Required => "required",
            ValidationCode::NoOptions => "no_options",
            ValidationCode::NotAnOption => "not_an_option",
            ValidationCode::DuplicateIdentifier => "duplicate_identifier",
            ValidationCode::InvalidFormat => "invalid_format",
            ValidationCode::Taken => "taken",
            ValidationCode::Other(code) => code,
        }
    }

    /// Human readable message for the editor
    pub fn message(&self) -> &str {
        match self {
            ValidationCode::Required => "This field is required",
            ValidationCode::NoOptions => "Add at least one option",
            ValidationCode::NotAnOption => "Value is not one of the options",
            ValidationCode::DuplicateIdentifier => "Identifier is already used on this page",
            ValidationCode::InvalidFormat => "Only lowercase letters, digits, '-' and '_' are allowed",
            ValidationCode::Taken => "Identifier is already taken",
            ValidationCode::Other(code) => code,
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ValidationCode {
    fn from(s: &str) -> Self {
        match s {
            "required" => ValidationCode::Required,
            "no_options" => ValidationCode::NoOptions,
            "not_an_option" => ValidationCode::NotAnOption,
            "duplicate_identifier" => ValidationCode::DuplicateIdentifier,
            "invalid_format" => ValidationCode::InvalidFormat,
            "taken" => ValidationCode::Taken,
            other => ValidationCode::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: FieldPath,
    pub code: ValidationCode,
}

impl ValidationError {
    pub fn new(path: FieldPath, code: ValidationCode) -> Self {
        Self { path, code }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.code)
    }
}

/// Ordered set of validation errors for one page draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
    /// Errors whose key could not be parsed as a `FieldPath`
    unaddressed: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: FieldPath, code: ValidationCode) {
        self.errors.push(ValidationError::new(path, code));
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.unaddressed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.unaddressed.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn unaddressed(&self) -> &BTreeMap<String, String> {
        &self.unaddressed
    }

    /// First error recorded for a path
    pub fn get(&self, path: FieldPath) -> Option<&ValidationCode> {
        self.errors.iter().find(|e| e.path == path).map(|e| &e.code)
    }

    pub fn for_field(&self, index: usize) -> impl Iterator<Item = &ValidationError> {
        self.errors
            .iter()
            .filter(move |e| e.path.field_index() == Some(index))
    }

    pub fn has_field_errors(&self, index: usize) -> bool {
        self.for_field(index).next().is_some()
    }

    /// Replace everything known about one field with a fresh result
    pub fn replace_field(&mut self, index: usize, fresh: Vec<ValidationError>) {
        self.errors.retain(|e| e.path.field_index() != Some(index));
        self.errors.extend(fresh);
    }

    /// Replace page-level (`name`, `identifier`) errors
    pub fn replace_page_level(&mut self, fresh: Vec<ValidationError>) {
        self.errors.retain(|e| e.path.field_index().is_some());
        self.errors.extend(fresh);
    }

    pub fn clear_path(&mut self, path: FieldPath) {
        self.errors.retain(|e| e.path != path);
    }

    pub fn clear_code(&mut self, code: &ValidationCode) {
        self.errors.retain(|e| &e.code != code);
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
        self.unaddressed.extend(other.unaddressed);
    }

    /// Drop errors of a removed field and re-address the ones behind it
    pub fn on_field_removed(&mut self, removed: usize) {
        self.errors = std::mem::take(&mut self.errors)
            .into_iter()
            .filter_map(|e| {
                e.path
                    .after_field_removed(removed)
                    .map(|path| ValidationError::new(path, e.code))
            })
            .collect();
    }

    /// Wire form: path string → code string
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.unaddressed.clone();
        for e in &self.errors {
            map.entry(e.path.to_string())
                .or_insert_with(|| e.code.as_str().to_string());
        }
        map
    }

    /// Build from the backend's path-keyed error map
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut out = Self::new();
        for (key, code) in map {
            match FieldPath::from_str(key) {
                Ok(path) => out.push(path, ValidationCode::from(code.as_str())),
                Err(_) => {
                    out.unaddressed.insert(key.clone(), code.clone());
                }
            }
        }
        out
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .to_map()
            .into_iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

// ============================================================================
// Submit / persistence
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Page has validation errors: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Structural(#[from] PageError),
}

/// Error body returned by the backend on 422
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveErrorResponse {
    pub errors: BTreeMap<String, String>,
}

impl From<&ValidationErrors> for SaveErrorResponse {
    fn from(errors: &ValidationErrors) -> Self {
        Self {
            errors: errors.to_map(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Save rejected: {0}")]
    Rejected(ValidationErrors),

    #[error("Transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_round_trip_keeps_unknown_keys() {
        let mut map = BTreeMap::new();
        map.insert("page_fields.0.identifier".to_string(), "required".to_string());
        map.insert("identifier".to_string(), "taken".to_string());
        map.insert("_global".to_string(), "storage unavailable".to_string());

        let errors = ValidationErrors::from_map(&map);
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.get(FieldPath::FieldIdentifier(0)),
            Some(&ValidationCode::Required)
        );
        assert_eq!(errors.get(FieldPath::PageIdentifier), Some(&ValidationCode::Taken));
        assert_eq!(
            errors.unaddressed().get("_global").map(String::as_str),
            Some("storage unavailable")
        );
        assert_eq!(errors.to_map(), map);
    }

    #[test]
    fn test_on_field_removed_shifts_paths() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldPath::FieldName(0), ValidationCode::Required);
        errors.push(FieldPath::FieldName(1), ValidationCode::Required);
        errors.push(FieldPath::OptionValue(2, 0), ValidationCode::Required);
        errors.push(FieldPath::PageName, ValidationCode::Required);

        errors.on_field_removed(1);

        let paths: Vec<FieldPath> = errors.iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            vec![
                FieldPath::FieldName(0),
                FieldPath::OptionValue(1, 0),
                FieldPath::PageName
            ]
        );
    }

    #[test]
    fn test_unknown_code_is_kept_verbatim() {
        let code = ValidationCode::from("too_long");
        assert_eq!(code, ValidationCode::Other("too_long".into()));
        assert_eq!(code.as_str(), "too_long");
    }
}
