//! Which page field has its configuration panel open.
//!
//! The session holds no field data: every edit is written into the draft as
//! it happens, so switching focus between fields loses nothing.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldConfigSession {
    #[default]
    Closed,
    Open(usize),
}

impl FieldConfigSession {
    pub fn open(&mut self, index: usize) {
        *self = FieldConfigSession::Open(index);
    }

    pub fn close(&mut self) {
        *self = FieldConfigSession::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FieldConfigSession::Open(_))
    }

    pub fn focused(&self) -> Option<usize> {
        match self {
            FieldConfigSession::Open(index) => Some(*index),
            FieldConfigSession::Closed => None,
        }
    }

    /// A new field was appended at `index`; it takes the focus
    pub fn on_field_added(&mut self, index: usize) {
        self.open(index);
    }

    /// The field at `removed` is gone and `remaining` fields are left.
    ///
    /// Removing the focused field moves focus to the first field (or closes
    /// the session when nothing is left). Removing a field in front of the
    /// focused one shifts the focus down so it stays on the same field.
    pub fn on_field_removed(&mut self, removed: usize, remaining: usize) {
        let FieldConfigSession::Open(focused) = *self else {
            return;
        };
        *self = if focused == removed {
            if remaining > 0 {
                FieldConfigSession::Open(0)
            } else {
                FieldConfigSession::Closed
            }
        } else if focused > removed {
            FieldConfigSession::Open(focused - 1)
        } else {
            FieldConfigSession::Open(focused)
        };
    }
}
