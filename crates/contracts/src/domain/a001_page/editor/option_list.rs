//! Positional list of select options
//!
//! Options have no identity of their own: labels and values are editable and
//! may repeat, so every operation addresses an option by its index.

use serde::{Deserialize, Serialize};

/// One `{label, value}` entry of a select field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionList(Vec<FieldOption>);

impl OptionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldOption> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FieldOption> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FieldOption> {
        self.0.get_mut(index)
    }

    /// Append an empty option, returns its index
    pub fn push_empty(&mut self) -> usize {
        self.0.push(FieldOption::default());
        self.0.len() - 1
    }

    pub fn push(&mut self, option: FieldOption) {
        self.0.push(option);
    }

    /// Remove the option at `index`, later options move down by one
    pub fn remove(&mut self, index: usize) -> Option<FieldOption> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    /// Index of the first option carrying `value`.
    ///
    /// Values are not unique; when several options share a value the first
    /// one is treated as the selected one.
    pub fn position_of_value(&self, value: &str) -> Option<usize> {
        self.0.iter().position(|o| o.value == value)
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.position_of_value(value).is_some()
    }

    /// Whether the option list lets the editor show "add" on this row.
    ///
    /// Only the last row offers "add"; every other row offers "remove".
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.0.len()
    }
}

impl From<Vec<FieldOption>> for OptionList {
    fn from(options: Vec<FieldOption>) -> Self {
        Self(options)
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a FieldOption;
    type IntoIter = std::slice::Iter<'a, FieldOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes_no() -> OptionList {
        OptionList::from(vec![FieldOption::new("Yes", "yes"), FieldOption::new("No", "no")])
    }

    #[test]
    fn test_remove_shifts_later_options() {
        let mut list = yes_no();
        list.push(FieldOption::new("Maybe", "maybe"));

        let removed = list.remove(0).unwrap();
        assert_eq!(removed, FieldOption::new("Yes", "yes"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().value, "no");
        assert_eq!(list.get(1).unwrap().value, "maybe");
    }

    #[test]
    fn test_remove_out_of_range_leaves_list() {
        let mut list = yes_no();
        assert!(list.remove(2).is_none());
        assert_eq!(list, yes_no());
    }

    #[test]
    fn test_first_matching_value_wins() {
        let list = OptionList::from(vec![
            FieldOption::new("First", "dup"),
            FieldOption::new("Second", "dup"),
        ]);
        assert_eq!(list.position_of_value("dup"), Some(0));
        assert_eq!(list.position_of_value("missing"), None);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&yes_no()).unwrap();
        assert_eq!(
            json,
            r#"[{"label":"Yes","value":"yes"},{"label":"No","value":"no"}]"#
        );
    }

    #[test]
    fn test_only_last_row_is_last() {
        let list = yes_no();
        assert!(!list.is_last(0));
        assert!(list.is_last(1));
        assert!(!OptionList::new().is_last(0));
    }
}
