//! Editable draft of one page.
//!
//! `PageDraftStore` is the only place page fields are mutated. Every
//! operation either succeeds or returns a `PageError` with the draft left as
//! it was. The configuration session and the identifier protocol are kept
//! next to the draft and updated by the same operations, so a focused index
//! always points at an existing field.

use log::{debug, warn};

use super::config_session::FieldConfigSession;
use super::gateway::PageGateway;
use super::identifier_edit::IdentifierEdit;
use super::option_list::{FieldOption, OptionList};
use crate::domain::a001_page::aggregate::{Page, PageDto, PutPageIdentifierDto};
use crate::domain::a001_page::errors::{
    PageError, PersistenceError, SubmitError, ValidationCode, ValidationErrors,
};
use crate::domain::a001_page::field::{FieldType, PageDataType, PageField};
use crate::domain::a001_page::field_path::FieldPath;
use crate::domain::a001_page::validation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDraftStore {
    page: Page,
    session: FieldConfigSession,
    identifier_edit: IdentifierEdit,
    errors: ValidationErrors,
    save_in_flight: bool,
    /// Identifier to restore if an optimistic identifier save is rejected.
    /// `Some` while an identifier save is in flight.
    identifier_rollback: Option<String>,
}

impl PageDraftStore {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            session: FieldConfigSession::Closed,
            identifier_edit: IdentifierEdit::Locked,
            errors: ValidationErrors::new(),
            save_in_flight: false,
            identifier_rollback: None,
        }
    }

    /// Replace the draft with a freshly loaded page and reset all UI state
    pub fn load(&mut self, page: Page) {
        debug!("page draft: loaded {} ({} fields)", page.id.0, page.page_fields.len());
        *self = Self::new(page);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn fields(&self) -> &[PageField] {
        &self.page.page_fields
    }

    pub fn len(&self) -> usize {
        self.page.page_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page.page_fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Result<&PageField, PageError> {
        let len = self.len();
        self.page
            .page_fields
            .get(index)
            .ok_or(PageError::IndexOutOfRange { index, len })
    }

    pub fn session(&self) -> FieldConfigSession {
        self.session
    }

    /// Field whose configuration panel is open
    pub fn focused_field(&self) -> Option<(usize, &PageField)> {
        let index = self.session.focused()?;
        self.page.page_fields.get(index).map(|f| (index, f))
    }

    pub fn identifier_edit(&self) -> &IdentifierEdit {
        &self.identifier_edit
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    pub fn is_saving_identifier(&self) -> bool {
        self.identifier_rollback.is_some()
    }

    pub fn to_dto(&self) -> PageDto {
        self.page.to_dto()
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut PageField, PageError> {
        let len = self.len();
        self.page
            .page_fields
            .get_mut(index)
            .ok_or(PageError::IndexOutOfRange { index, len })
    }

    fn options_mut(&mut self, field_index: usize) -> Result<&mut OptionList, PageError> {
        self.field_mut(field_index)?
            .variant
            .options_mut()
            .ok_or(PageError::NotASelectField(field_index))
    }

    // ========================================================================
    // Configuration session
    // ========================================================================

    pub fn open_field(&mut self, index: usize) -> Result<(), PageError> {
        self.field(index)?;
        self.session.open(index);
        Ok(())
    }

    /// Finish configuring the focused field
    pub fn close_field(&mut self) {
        self.session.close();
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// Append a blank TEXT field and focus it.
    ///
    /// The field always goes to the end; `after_index` is the position the
    /// caller expects the new field at and is only used for logging.
    pub fn add_field(&mut self, after_index: usize) -> usize {
        self.page.page_fields.push(PageField::blank());
        let index = self.len() - 1;
        if after_index != index {
            debug!("page draft: add_field asked for {after_index}, appended at {index}");
        }
        self.session.on_field_added(index);
        debug!("page draft: field {index} added");
        index
    }

    /// Remove the field at `index`; later fields move down by one
    pub fn remove_field(&mut self, index: usize) -> Result<PageField, PageError> {
        self.field(index)?;
        let removed = self.page.page_fields.remove(index);
        self.session.on_field_removed(index, self.len());
        self.errors.on_field_removed(index);
        self.refresh_duplicate_identifiers();
        debug!(
            "page draft: field {index} ({}) removed, {} left",
            removed.identifier,
            self.len()
        );
        Ok(removed)
    }

    /// Change the field's type and reset its content.
    ///
    /// Content and options are dropped even when `field_type` equals the
    /// current type.
    pub fn set_field_variant(
        &mut self,
        index: usize,
        field_type: FieldType,
        data_type: PageDataType,
    ) -> Result<(), PageError> {
        let field = self.field_mut(index)?;
        if field.field_type() == field_type && !field.content().is_empty() {
            warn!("page draft: field {index} re-selected {field_type}, content discarded");
        }
        field.reset_variant(field_type, data_type);
        debug!("page draft: field {index} is now {field_type}");
        self.validate_field(index)?;
        Ok(())
    }

    pub fn set_field_content(&mut self, index: usize, value: String) -> Result<(), PageError> {
        self.field_mut(index)?.variant.set_content(value);
        Ok(())
    }

    pub fn set_field_name(&mut self, index: usize, value: String) -> Result<(), PageError> {
        self.field_mut(index)?.name = value;
        Ok(())
    }

    pub fn set_field_identifier(&mut self, index: usize, value: String) -> Result<(), PageError> {
        self.field_mut(index)?.identifier = value;
        Ok(())
    }

    pub fn set_page_name(&mut self, name: String) {
        self.page.name = name;
    }

    // ========================================================================
    // Select options
    // ========================================================================

    /// Append an empty option to a select field, returns its index
    pub fn add_option(&mut self, field_index: usize) -> Result<usize, PageError> {
        let option_index = self.options_mut(field_index)?.push_empty();
        debug!("page draft: field {field_index} option {option_index} added");
        Ok(option_index)
    }

    /// Remove one option; later options move down by one.
    ///
    /// Removing down to zero options is allowed, the page just will not
    /// pass validation until one is added again.
    pub fn remove_option(
        &mut self,
        field_index: usize,
        option_index: usize,
    ) -> Result<FieldOption, PageError> {
        let options = self.options_mut(field_index)?;
        let len = options.len();
        let removed = options
            .remove(option_index)
            .ok_or(PageError::OptionIndexOutOfRange {
                field_index,
                option_index,
                len,
            })?;
        // option paths behind the removed one changed
        if self.errors.has_field_errors(field_index) {
            self.validate_field(field_index)?;
        }
        debug!("page draft: field {field_index} option {option_index} removed");
        Ok(removed)
    }

    pub fn set_option_label(
        &mut self,
        field_index: usize,
        option_index: usize,
        text: String,
    ) -> Result<(), PageError> {
        self.option_mut(field_index, option_index)?.label = text;
        Ok(())
    }

    pub fn set_option_value(
        &mut self,
        field_index: usize,
        option_index: usize,
        text: String,
    ) -> Result<(), PageError> {
        self.option_mut(field_index, option_index)?.value = text;
        Ok(())
    }

    fn option_mut(
        &mut self,
        field_index: usize,
        option_index: usize,
    ) -> Result<&mut FieldOption, PageError> {
        let options = self.options_mut(field_index)?;
        let len = options.len();
        options
            .get_mut(option_index)
            .ok_or(PageError::OptionIndexOutOfRange {
                field_index,
                option_index,
                len,
            })
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Re-run the rules of one field, returns `true` when it is valid
    pub fn validate_field(&mut self, index: usize) -> Result<bool, PageError> {
        let fresh = validation::validate_field(index, self.field(index)?);
        self.errors.replace_field(index, fresh);
        self.refresh_duplicate_identifiers();
        Ok(!self.errors.has_field_errors(index))
    }

    /// Duplicate flags depend on every field; recompute them page-wide
    fn refresh_duplicate_identifiers(&mut self) {
        self.errors.clear_code(&ValidationCode::DuplicateIdentifier);
        self.errors
            .extend(validation::duplicate_identifiers(&self.page.page_fields));
    }

    /// Re-run every rule and keep the result
    pub fn validate(&mut self) -> &ValidationErrors {
        self.errors = validation::validate_page(&self.page.name, &self.page.page_fields);
        &self.errors
    }

    // ========================================================================
    // Page save
    // ========================================================================

    /// Validate the draft and hand it to the gateway.
    ///
    /// Only one save may be in flight; the next `submit` is refused until
    /// `finish_save` reports the outcome.
    pub fn submit<G: PageGateway + ?Sized>(&mut self, gateway: &G) -> Result<(), SubmitError> {
        if self.save_in_flight {
            warn!("page draft: submit refused, save already in flight");
            return Err(PageError::SaveInFlight.into());
        }
        let errors = self.validate();
        if !errors.is_empty() {
            debug!("page draft: submit blocked by {} validation errors", errors.len());
            return Err(SubmitError::Invalid(errors.clone()));
        }

        self.save_in_flight = true;
        gateway.save_page(self.page.id, &self.to_dto());
        debug!("page draft: save of {} sent", self.page.id.0);
        Ok(())
    }

    /// Outcome of the page save. The draft itself is never changed here.
    pub fn finish_save(
        &mut self,
        result: Result<(), PersistenceError>,
    ) -> Result<(), PersistenceError> {
        self.save_in_flight = false;
        match &result {
            Ok(()) => {
                self.errors = ValidationErrors::new();
                debug!("page draft: save of {} confirmed", self.page.id.0);
            }
            Err(PersistenceError::Rejected(errors)) => {
                warn!("page draft: save rejected: {errors}");
                self.errors = errors.clone();
            }
            Err(PersistenceError::Transport(e)) => {
                warn!("page draft: save failed: {e}");
            }
        }
        result
    }

    // ========================================================================
    // Identifier protocol
    // ========================================================================

    pub fn begin_identifier_edit(&mut self) {
        self.identifier_edit.begin_edit(&self.page.identifier);
    }

    pub fn set_identifier_input(&mut self, text: String) -> Result<(), PageError> {
        if self.identifier_edit.set_input(text) {
            Ok(())
        } else {
            Err(PageError::IdentifierLocked)
        }
    }

    /// Lock the identifier, apply it to the draft and send it to the gateway.
    ///
    /// An empty input is refused and the identifier stays unlocked. Only one
    /// identifier save may be in flight; the next one is refused with
    /// `SaveInFlight` until `finish_identifier_save` reports the outcome.
    pub fn save_identifier<G: PageGateway + ?Sized>(
        &mut self,
        gateway: &G,
    ) -> Result<(), PageError> {
        if self.identifier_rollback.is_some() {
            warn!("page draft: identifier save refused, previous one in flight");
            return Err(PageError::SaveInFlight);
        }
        let identifier = self
            .identifier_edit
            .input()
            .ok_or(PageError::IdentifierLocked)?
            .trim()
            .to_string();
        if identifier.is_empty() {
            warn!("page draft: empty identifier refused");
            return Err(PageError::EmptyIdentifier);
        }

        self.identifier_edit.take_for_save();
        let previous = std::mem::replace(&mut self.page.identifier, identifier.clone());
        self.identifier_rollback = Some(previous);
        self.errors.clear_path(FieldPath::PageIdentifier);

        gateway.save_identifier(self.page.id, &PutPageIdentifierDto { identifier });
        Ok(())
    }

    /// Lock the identifier and drop the typed text
    pub fn cancel_identifier_edit(&mut self) {
        self.identifier_edit.cancel();
    }

    /// Outcome of the identifier save; a failure restores the previous identifier
    pub fn finish_identifier_save(
        &mut self,
        result: Result<(), PersistenceError>,
    ) -> Result<(), PersistenceError> {
        let rollback = self.identifier_rollback.take();
        if let Err(e) = &result {
            if let Some(previous) = rollback {
                warn!(
                    "page draft: identifier {} rejected, restored {previous}",
                    self.page.identifier
                );
                self.page.identifier = previous;
            }
            if let PersistenceError::Rejected(errors) = e {
                self.errors.merge(errors.clone());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_page::aggregate::PageId;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingGateway {
        pages: RefCell<Vec<PageDto>>,
        identifiers: RefCell<Vec<String>>,
    }

    impl PageGateway for RecordingGateway {
        fn save_page(&self, _page_id: PageId, page: &PageDto) {
            self.pages.borrow_mut().push(page.clone());
        }

        fn save_identifier(&self, _page_id: PageId, payload: &PutPageIdentifierDto) {
            self.identifiers.borrow_mut().push(payload.identifier.clone());
        }
    }

    fn store_with(fields: Vec<PageField>) -> PageDraftStore {
        PageDraftStore::new(Page::new_for_insert("Home".into(), "home".into(), fields))
    }

    fn text(name: &str, identifier: &str) -> PageField {
        PageField::with_type(name.into(), identifier.into(), FieldType::Text)
    }

    #[test]
    fn test_add_field_appends_and_focuses() {
        let mut store = store_with(vec![text("Title", "title")]);
        let index = store.add_field(1);
        assert_eq!(index, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.session(), FieldConfigSession::Open(1));
        let field = store.field(1).unwrap();
        assert_eq!(field.field_type(), FieldType::Text);
        assert_eq!(field.content(), "");
        assert_eq!(field.name, "");
    }

    #[test]
    fn test_add_field_ignores_position_hint() {
        let mut store = store_with(vec![text("A", "a"), text("B", "b")]);
        assert_eq!(store.add_field(0), 2);
        assert_eq!(store.field(0).unwrap().identifier, "a");
    }

    #[test]
    fn test_add_remove_keeps_indices_contiguous() {
        let mut store = store_with(vec![]);
        let mut expected = 0usize;
        for step in 0..20 {
            if step % 3 == 2 {
                store.remove_field(step % store.len()).unwrap();
                expected -= 1;
            } else {
                store.add_field(store.len());
                expected += 1;
            }
            assert_eq!(store.len(), expected);
            if let Some(focused) = store.session().focused() {
                assert!(focused < store.len());
            }
        }
    }

    #[test]
    fn test_remove_field_out_of_range() {
        let mut store = store_with(vec![text("A", "a")]);
        assert_eq!(
            store.remove_field(1),
            Err(PageError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_focused_field_moves_focus_to_first() {
        let mut store = store_with(vec![text("A", "a"), text("B", "b"), text("C", "c")]);
        store.open_field(2).unwrap();
        store.remove_field(2).unwrap();
        assert_eq!(store.session(), FieldConfigSession::Open(0));

        store.remove_field(0).unwrap();
        store.remove_field(0).unwrap();
        assert_eq!(store.session(), FieldConfigSession::Closed);
    }

    #[test]
    fn test_open_field_checks_range() {
        let mut store = store_with(vec![]);
        assert!(store.open_field(0).is_err());
        assert_eq!(store.session(), FieldConfigSession::Closed);
    }

    #[test]
    fn test_variant_switch_round_trip_yields_empty_options() {
        let mut store = store_with(vec![text("Answer", "answer")]);
        store
            .set_field_variant(0, FieldType::Select, PageDataType::Text)
            .unwrap();
        store.add_option(0).unwrap();
        store.set_option_label(0, 0, "Yes".into()).unwrap();

        store
            .set_field_variant(0, FieldType::Text, PageDataType::Text)
            .unwrap();
        assert_eq!(store.field(0).unwrap().options(), None);
        store
            .set_field_variant(0, FieldType::Select, PageDataType::Text)
            .unwrap();
        assert_eq!(store.field(0).unwrap().options(), Some(&OptionList::new()));
    }

    #[test]
    fn test_same_variant_still_resets_content() {
        let mut store = store_with(vec![text("Title", "title")]);
        store.set_field_content(0, "Welcome".into()).unwrap();
        store
            .set_field_variant(0, FieldType::Text, PageDataType::Text)
            .unwrap();
        assert_eq!(store.field(0).unwrap().content(), "");
    }

    #[test]
    fn test_variant_switch_revalidates_only_that_field() {
        let mut store = store_with(vec![PageField::blank(), text("Body", "body")]);
        store
            .set_field_variant(1, FieldType::Select, PageDataType::Text)
            .unwrap();
        assert_eq!(
            store.errors().get(FieldPath::FieldContent(1)),
            Some(&ValidationCode::NoOptions)
        );
        assert!(!store.errors().has_field_errors(0));
    }

    #[test]
    fn test_option_ops_need_select_field() {
        let mut store = store_with(vec![text("Title", "title")]);
        assert_eq!(store.add_option(0), Err(PageError::NotASelectField(0)));
        assert_eq!(store.add_option(4), Err(PageError::IndexOutOfRange { index: 4, len: 1 }));
    }

    #[test]
    fn test_remove_option_then_add_does_not_restore_it() {
        let mut store = store_with(vec![text("Answer", "answer")]);
        store
            .set_field_variant(0, FieldType::Select, PageDataType::Text)
            .unwrap();
        store.add_option(0).unwrap();
        store.set_option_label(0, 0, "Yes".into()).unwrap();
        store.set_option_value(0, 0, "yes".into()).unwrap();

        let removed = store.remove_option(0, 0).unwrap();
        assert_eq!(removed, FieldOption::new("Yes", "yes"));
        assert_eq!(store.add_option(0).unwrap(), 0);
        assert_eq!(
            store.field(0).unwrap().options().unwrap().get(0),
            Some(&FieldOption::default())
        );
    }

    #[test]
    fn test_remove_option_out_of_range() {
        let mut store = store_with(vec![text("Answer", "answer")]);
        store
            .set_field_variant(0, FieldType::Select, PageDataType::Text)
            .unwrap();
        assert_eq!(
            store.remove_option(0, 0),
            Err(PageError::OptionIndexOutOfRange {
                field_index: 0,
                option_index: 0,
                len: 0
            })
        );
    }

    #[test]
    fn test_submit_valid_draft_calls_gateway_once() {
        let gateway = RecordingGateway::default();
        let mut store = store_with(vec![text("Title", "title")]);
        store.submit(&gateway).unwrap();
        assert!(store.is_saving());
        assert_eq!(
            store.submit(&gateway),
            Err(SubmitError::Structural(PageError::SaveInFlight))
        );
        assert_eq!(gateway.pages.borrow().len(), 1);

        store.finish_save(Ok(())).unwrap();
        assert!(!store.is_saving());
        store.submit(&gateway).unwrap();
        assert_eq!(gateway.pages.borrow().len(), 2);
    }

    #[test]
    fn test_submit_select_without_options_is_rejected_locally() {
        let gateway = RecordingGateway::default();
        let mut store = store_with(vec![text("Answer", "answer")]);
        store
            .set_field_variant(0, FieldType::Select, PageDataType::Text)
            .unwrap();

        match store.submit(&gateway) {
            Err(SubmitError::Invalid(errors)) => {
                assert_eq!(
                    errors.get(FieldPath::FieldContent(0)),
                    Some(&ValidationCode::NoOptions)
                );
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
        assert!(gateway.pages.borrow().is_empty());
        assert!(!store.is_saving());
    }

    #[test]
    fn test_rejected_save_keeps_draft() {
        let gateway = RecordingGateway::default();
        let mut store = store_with(vec![text("Title", "title")]);
        store.submit(&gateway).unwrap();
        let before = store.page().clone();

        let mut server = ValidationErrors::new();
        server.push(FieldPath::FieldIdentifier(0), ValidationCode::Taken);
        let result = store.finish_save(Err(PersistenceError::Rejected(server)));

        assert!(result.is_err());
        assert_eq!(store.page(), &before);
        assert_eq!(
            store.errors().get(FieldPath::FieldIdentifier(0)),
            Some(&ValidationCode::Taken)
        );
    }

    #[test]
    fn test_identifier_save_is_optimistic() {
        let gateway = RecordingGateway::default();
        let mut store = store_with(vec![]);
        assert_eq!(
            store.set_identifier_input("x".into()),
            Err(PageError::IdentifierLocked)
        );

        store.begin_identifier_edit();
        store.set_identifier_input(" landing ".into()).unwrap();
        store.save_identifier(&gateway).unwrap();

        assert_eq!(store.page().identifier, "landing");
        assert!(store.identifier_edit().is_locked());
        assert_eq!(gateway.identifiers.borrow().as_slice(), ["landing".to_string()]);
        assert!(gateway.pages.borrow().is_empty());
    }

    #[test]
    fn test_identifier_rejection_restores_previous() {
        let gateway = RecordingGateway::default();
        let mut store = store_with(vec![]);
        store.begin_identifier_edit();
        store.set_identifier_input("taken".into()).unwrap();
        store.save_identifier(&gateway).unwrap();

        let mut server = ValidationErrors::new();
        server.push(FieldPath::PageIdentifier, ValidationCode::Taken);
        let _ = store.finish_identifier_save(Err(PersistenceError::Rejected(server)));

        assert_eq!(store.page().identifier, "home");
        assert_eq!(
            store.errors().get(FieldPath::PageIdentifier),
            Some(&ValidationCode::Taken)
        );
    }

    #[test]
    fn test_second_identifier_save_waits_for_the_first() {
        let gateway = RecordingGateway::default();
        let mut store = store_with(vec![]);
        store.begin_identifier_edit();
        store.set_identifier_input("aaa".into()).unwrap();
        store.save_identifier(&gateway).unwrap();
        assert!(store.is_saving_identifier());

        store.begin_identifier_edit();
        store.set_identifier_input("bbb".into()).unwrap();
        assert_eq!(store.save_identifier(&gateway), Err(PageError::SaveInFlight));
        assert!(!store.identifier_edit().is_locked());
        assert_eq!(store.page().identifier, "aaa");
        assert_eq!(gateway.identifiers.borrow().as_slice(), ["aaa".to_string()]);

        store.finish_identifier_save(Ok(())).unwrap();
        assert!(!store.is_saving_identifier());

        store.save_identifier(&gateway).unwrap();
        let mut server = ValidationErrors::new();
        server.push(FieldPath::PageIdentifier, ValidationCode::Taken);
        let _ = store.finish_identifier_save(Err(PersistenceError::Rejected(server)));

        // the confirmed "aaa" comes back, not the original "home"
        assert_eq!(store.page().identifier, "aaa");
    }

    #[test]
    fn test_empty_identifier_stays_unlocked() {
        let gateway = RecordingGateway::default();
        let mut store = store_with(vec![]);
        store.begin_identifier_edit();
        store.set_identifier_input("   ".into()).unwrap();
        assert_eq!(store.save_identifier(&gateway), Err(PageError::EmptyIdentifier));
        assert!(!store.identifier_edit().is_locked());
        assert_eq!(store.page().identifier, "home");
        assert!(gateway.identifiers.borrow().is_empty());
    }

    #[test]
    fn test_cancel_identifier_reverts_input() {
        let mut store = store_with(vec![]);
        store.begin_identifier_edit();
        store.set_identifier_input("draft".into()).unwrap();
        store.cancel_identifier_edit();
        assert!(store.identifier_edit().is_locked());
        assert_eq!(store.page().identifier, "home");

        store.begin_identifier_edit();
        assert_eq!(store.identifier_edit().input(), Some("home"));
    }

    #[test]
    fn test_remove_field_recomputes_duplicate_identifiers() {
        let mut store = store_with(vec![
            text("A", "title"),
            text("B", "body"),
            text("C", "title"),
        ]);
        store.validate();
        assert_eq!(
            store.errors().get(FieldPath::FieldIdentifier(2)),
            Some(&ValidationCode::DuplicateIdentifier)
        );

        store.remove_field(0).unwrap();
        assert!(store.errors().is_empty());
    }

    #[test]
    fn test_validate_field_recomputes_duplicate_identifiers() {
        let mut store = store_with(vec![text("A", "title"), text("B", "title")]);
        store.validate();
        assert!(store.errors().has_field_errors(1));

        store.set_field_identifier(0, "intro".into()).unwrap();
        assert!(store.validate_field(0).unwrap());
        assert!(store.errors().is_empty());

        store.set_field_identifier(1, "intro".into()).unwrap();
        assert!(!store.validate_field(1).unwrap());
        assert_eq!(
            store.errors().get(FieldPath::FieldIdentifier(1)),
            Some(&ValidationCode::DuplicateIdentifier)
        );
    }

    #[test]
    fn test_load_resets_session_and_errors() {
        let mut store = store_with(vec![PageField::blank()]);
        store.open_field(0).unwrap();
        store.validate();
        store.begin_identifier_edit();

        store.load(Page::new_for_insert("Other".into(), "other".into(), vec![]));
        assert_eq!(store.session(), FieldConfigSession::Closed);
        assert!(store.errors().is_empty());
        assert!(store.identifier_edit().is_locked());
    }
}
