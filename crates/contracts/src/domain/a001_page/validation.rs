//! Validation rules for a page draft
//!
//! Editing never validates content as it is typed; these rules run when a
//! field changes type and when the page is submitted (and again on the
//! backend before it writes).

use std::collections::HashSet;

use super::errors::{ValidationCode, ValidationError, ValidationErrors};
use super::field::{FieldVariant, PageField};
use super::field_path::FieldPath;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Rules for a single field, addressed at `index`
pub fn validate_field(index: usize, field: &PageField) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_blank(&field.name) {
        errors.push(ValidationError::new(FieldPath::FieldName(index), ValidationCode::Required));
    }
    if is_blank(&field.identifier) {
        errors.push(ValidationError::new(
            FieldPath::FieldIdentifier(index),
            ValidationCode::Required,
        ));
    }

    if let FieldVariant::Select { content, options } = &field.variant {
        if options.is_empty() {
            errors.push(ValidationError::new(
                FieldPath::FieldContent(index),
                ValidationCode::NoOptions,
            ));
        }
        for (j, option) in options.iter().enumerate() {
            if is_blank(&option.label) {
                errors.push(ValidationError::new(
                    FieldPath::OptionLabel(index, j),
                    ValidationCode::Required,
                ));
            }
            if is_blank(&option.value) {
                errors.push(ValidationError::new(
                    FieldPath::OptionValue(index, j),
                    ValidationCode::Required,
                ));
            }
        }
        if !content.is_empty() && !options.is_empty() && !options.contains_value(content) {
            errors.push(ValidationError::new(
                FieldPath::FieldContent(index),
                ValidationCode::NotAnOption,
            ));
        }
    }

    errors
}

/// Page-level rules (`name`)
pub fn validate_page_level(name: &str) -> Vec<ValidationError> {
    if is_blank(name) {
        vec![ValidationError::new(FieldPath::PageName, ValidationCode::Required)]
    } else {
        Vec::new()
    }
}

/// Field identifiers must be unique within the page; later duplicates are flagged
pub fn duplicate_identifiers(fields: &[PageField]) -> Vec<ValidationError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut errors = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let identifier = field.identifier.trim();
        if identifier.is_empty() {
            continue;
        }
        if !seen.insert(identifier) {
            errors.push(ValidationError::new(
                FieldPath::FieldIdentifier(i),
                ValidationCode::DuplicateIdentifier,
            ));
        }
    }
    errors
}

/// Every rule for the whole page
pub fn validate_page(name: &str, fields: &[PageField]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.extend(validate_page_level(name));
    for (i, field) in fields.iter().enumerate() {
        errors.extend(validate_field(i, field));
    }
    errors.extend(duplicate_identifiers(fields));
    errors
}

/// URL-safe slug: lowercase ASCII letters, digits, `-` and `_`
pub fn is_slug(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
