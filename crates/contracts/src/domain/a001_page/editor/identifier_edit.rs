//! Lock/unlock protocol for the page identifier.
//!
//! The identifier is saved through its own request, independent of the page
//! save, so the input has its own edit/save/cancel lifecycle.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdentifierEdit {
    #[default]
    Locked,
    Unlocked { input: String },
}

impl IdentifierEdit {
    pub fn is_locked(&self) -> bool {
        matches!(self, IdentifierEdit::Locked)
    }

    /// Text currently typed in the unlocked input
    pub fn input(&self) -> Option<&str> {
        match self {
            IdentifierEdit::Unlocked { input } => Some(input),
            IdentifierEdit::Locked => None,
        }
    }

    /// Unlock with the saved identifier as the starting text.
    ///
    /// Does nothing when already unlocked, so typed text survives a second click.
    pub fn begin_edit(&mut self, current: &str) {
        if self.is_locked() {
            *self = IdentifierEdit::Unlocked {
                input: current.to_string(),
            };
        }
    }

    /// Returns `false` when locked (the input is disabled)
    pub fn set_input(&mut self, text: String) -> bool {
        match self {
            IdentifierEdit::Unlocked { input } => {
                *input = text;
                true
            }
            IdentifierEdit::Locked => false,
        }
    }

    /// Lock again and hand back the typed text for saving
    pub fn take_for_save(&mut self) -> Option<String> {
        match std::mem::take(self) {
            IdentifierEdit::Unlocked { input } => Some(input),
            IdentifierEdit::Locked => None,
        }
    }

    /// Lock again, dropping whatever was typed
    pub fn cancel(&mut self) {
        *self = IdentifierEdit::Locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_rejects_input() {
        let mut edit = IdentifierEdit::default();
        assert!(edit.is_locked());
        assert!(!edit.set_input("x".into()));
        assert_eq!(edit.take_for_save(), None);
    }

    #[test]
    fn test_edit_then_save_locks() {
        let mut edit = IdentifierEdit::default();
        edit.begin_edit("about");
        assert_eq!(edit.input(), Some("about"));
        assert!(edit.set_input("about-us".into()));
        assert_eq!(edit.take_for_save().as_deref(), Some("about-us"));
        assert!(edit.is_locked());
    }

    #[test]
    fn test_begin_edit_twice_keeps_typed_text() {
        let mut edit = IdentifierEdit::default();
        edit.begin_edit("about");
        edit.set_input("draft".into());
        edit.begin_edit("about");
        assert_eq!(edit.input(), Some("draft"));
    }

    #[test]
    fn test_cancel_discards_text() {
        let mut edit = IdentifierEdit::default();
        edit.begin_edit("about");
        edit.set_input("typo".into());
        edit.cancel();
        assert!(edit.is_locked());
        assert_eq!(edit.input(), None);
    }
}
