//! Dotted/indexed addresses of page values.
//!
//! The backend keys validation errors by these strings and the editor maps
//! them back onto fields, so `Display` and `FromStr` must stay exact inverses:
//!
//! ```text
//! name
//! identifier
//! page_fields.<i>.name
//! page_fields.<i>.identifier
//! page_fields.<i>.field_type
//! page_fields.<i>.field_content
//! page_fields.<i>.field_data.select_field_options.<j>.label
//! page_fields.<i>.field_data.select_field_options.<j>.value
//! ```

use std::fmt;
use std::str::FromStr;

use super::errors::PageError;

const PAGE_FIELDS: &str = "page_fields";
const FIELD_DATA: &str = "field_data";
const SELECT_FIELD_OPTIONS: &str = "select_field_options";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    PageName,
    PageIdentifier,
    FieldName(usize),
    FieldIdentifier(usize),
    FieldType(usize),
    FieldContent(usize),
    OptionLabel(usize, usize),
    OptionValue(usize, usize),
}

impl FieldPath {
    /// Index of the page field this path points into, `None` for page-level paths.
    pub fn field_index(&self) -> Option<usize> {
        match *self {
            FieldPath::PageName | FieldPath::PageIdentifier => None,
            FieldPath::FieldName(i)
            | FieldPath::FieldIdentifier(i)
            | FieldPath::FieldType(i)
            | FieldPath::FieldContent(i)
            | FieldPath::OptionLabel(i, _)
            | FieldPath::OptionValue(i, _) => Some(i),
        }
    }

    /// Same path re-addressed after the field at `removed` left the sequence.
    ///
    /// Returns `None` when the path belonged to the removed field.
    pub fn after_field_removed(self, removed: usize) -> Option<Self> {
        let shift = |i: usize| -> Option<usize> {
            match i.cmp(&removed) {
                std::cmp::Ordering::Less => Some(i),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(i - 1),
            }
        };
        Some(match self {
            FieldPath::PageName | FieldPath::PageIdentifier => self,
            FieldPath::FieldName(i) => FieldPath::FieldName(shift(i)?),
            FieldPath::FieldIdentifier(i) => FieldPath::FieldIdentifier(shift(i)?),
            FieldPath::FieldType(i) => FieldPath::FieldType(shift(i)?),
            FieldPath::FieldContent(i) => FieldPath::FieldContent(shift(i)?),
            FieldPath::OptionLabel(i, j) => FieldPath::OptionLabel(shift(i)?, j),
            FieldPath::OptionValue(i, j) => FieldPath::OptionValue(shift(i)?, j),
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::PageName => write!(f, "name"),
            FieldPath::PageIdentifier => write!(f, "identifier"),
            FieldPath::FieldName(i) => write!(f, "{PAGE_FIELDS}.{i}.name"),
            FieldPath::FieldIdentifier(i) => write!(f, "{PAGE_FIELDS}.{i}.identifier"),
            FieldPath::FieldType(i) => write!(f, "{PAGE_FIELDS}.{i}.field_type"),
            FieldPath::FieldContent(i) => write!(f, "{PAGE_FIELDS}.{i}.field_content"),
            FieldPath::OptionLabel(i, j) => {
                write!(f, "{PAGE_FIELDS}.{i}.{FIELD_DATA}.{SELECT_FIELD_OPTIONS}.{j}.label")
            }
            FieldPath::OptionValue(i, j) => {
                write!(f, "{PAGE_FIELDS}.{i}.{FIELD_DATA}.{SELECT_FIELD_OPTIONS}.{j}.value")
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PageError::InvalidFieldPath(s.to_string());
        let index = |part: &str| part.parse::<usize>().map_err(|_| invalid());

        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            ["name"] => Ok(FieldPath::PageName),
            ["identifier"] => Ok(FieldPath::PageIdentifier),
            [PAGE_FIELDS, i, attr] => {
                let i = index(*i)?;
                match *attr {
                    "name" => Ok(FieldPath::FieldName(i)),
                    "identifier" => Ok(FieldPath::FieldIdentifier(i)),
                    "field_type" => Ok(FieldPath::FieldType(i)),
                    "field_content" => Ok(FieldPath::FieldContent(i)),
                    _ => Err(invalid()),
                }
            }
            [PAGE_FIELDS, i, FIELD_DATA, SELECT_FIELD_OPTIONS, j, attr] => {
                let (i, j) = (index(*i)?, index(*j)?);
                match *attr {
                    "label" => Ok(FieldPath::OptionLabel(i, j)),
                    "value" => Ok(FieldPath::OptionValue(i, j)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_paths_render_exactly() {
        assert_eq!(
            FieldPath::OptionLabel(2, 0).to_string(),
            "page_fields.2.field_data.select_field_options.0.label"
        );
        assert_eq!(
            FieldPath::OptionValue(0, 11).to_string(),
            "page_fields.0.field_data.select_field_options.11.value"
        );
        assert_eq!(FieldPath::FieldIdentifier(3).to_string(), "page_fields.3.identifier");
    }

    #[test]
    fn test_parse_backend_keys() {
        assert_eq!(
            "page_fields.4.field_content".parse::<FieldPath>().unwrap(),
            FieldPath::FieldContent(4)
        );
        assert_eq!("identifier".parse::<FieldPath>().unwrap(), FieldPath::PageIdentifier);
        assert_eq!(
            "page_fields.1.field_data.select_field_options.2.value"
                .parse::<FieldPath>()
                .unwrap(),
            FieldPath::OptionValue(1, 2)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "page_fields",
            "page_fields.x.name",
            "page_fields.0.colour",
            "page_fields.0.field_data.select_field_options.0.title",
            "page_fields.-1.name",
        ] {
            assert!(
                matches!(bad.parse::<FieldPath>(), Err(PageError::InvalidFieldPath(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_after_field_removed() {
        assert_eq!(FieldPath::FieldName(0).after_field_removed(1), Some(FieldPath::FieldName(0)));
        assert_eq!(FieldPath::FieldName(1).after_field_removed(1), None);
        assert_eq!(
            FieldPath::OptionLabel(3, 1).after_field_removed(1),
            Some(FieldPath::OptionLabel(2, 1))
        );
        assert_eq!(FieldPath::PageName.after_field_removed(0), Some(FieldPath::PageName));
    }
}
