//! End-to-end editing session over the page draft store

use std::cell::RefCell;

use contracts::domain::a001_page::editor::{FieldConfigSession, FieldOption, PageDraftStore, PageGateway};
use contracts::domain::a001_page::{
    FieldPath, FieldType, Page, PageDataType, PageDto, PageField, PageId, PersistenceError,
    PutPageIdentifierDto, SubmitError, ValidationCode,
};

#[derive(Default)]
struct RecordingGateway {
    pages: RefCell<Vec<PageDto>>,
    identifiers: RefCell<Vec<PutPageIdentifierDto>>,
}

impl PageGateway for RecordingGateway {
    fn save_page(&self, _page_id: PageId, page: &PageDto) {
        self.pages.borrow_mut().push(page.clone());
    }

    fn save_identifier(&self, _page_id: PageId, payload: &PutPageIdentifierDto) {
        self.identifiers.borrow_mut().push(payload.clone());
    }
}

fn title_page() -> Page {
    Page::new_for_insert(
        "Landing".into(),
        "landing".into(),
        vec![PageField::with_type("Title".into(), "title".into(), FieldType::Text)],
    )
}

#[test]
fn test_configure_select_field_then_remove_first_field() {
    let mut store = PageDraftStore::new(title_page());

    let new_index = store.add_field(store.len());
    assert_eq!(store.len(), 2);
    assert_eq!(new_index, 1);
    assert_eq!(store.session(), FieldConfigSession::Open(1));
    assert_eq!(store.field(1).unwrap().field_type(), FieldType::Text);
    assert_eq!(store.field(1).unwrap().content(), "");

    store
        .set_field_variant(1, FieldType::Select, PageDataType::Text)
        .unwrap();
    assert!(store.field(1).unwrap().options().unwrap().is_empty());

    store.add_option(1).unwrap();
    store.add_option(1).unwrap();
    let options = store.field(1).unwrap().options().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options.get(0), Some(&FieldOption::default()));
    assert_eq!(options.get(1), Some(&FieldOption::default()));

    store.set_option_label(1, 0, "Yes".into()).unwrap();
    store.set_option_value(1, 0, "yes".into()).unwrap();
    assert_eq!(
        store.field(1).unwrap().options().unwrap().get(0),
        Some(&FieldOption::new("Yes", "yes"))
    );

    let removed = store.remove_field(0).unwrap();
    assert_eq!(removed.identifier, "title");
    assert_eq!(store.len(), 1);
    assert_eq!(store.field(0).unwrap().field_type(), FieldType::Select);
    assert_eq!(store.session(), FieldConfigSession::Open(0));
}

#[test]
fn test_full_edit_and_save_cycle() {
    let gateway = RecordingGateway::default();
    let mut store = PageDraftStore::new(title_page());

    let i = store.add_field(store.len());
    store.set_field_name(i, "Show banner".into()).unwrap();
    store.set_field_identifier(i, "show_banner".into()).unwrap();
    store
        .set_field_variant(i, FieldType::Select, PageDataType::Text)
        .unwrap();

    // No options yet: addressed at the field's content, nothing is sent
    match store.submit(&gateway) {
        Err(SubmitError::Invalid(errors)) => {
            assert_eq!(errors.get(FieldPath::FieldContent(i)), Some(&ValidationCode::NoOptions));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(gateway.pages.borrow().is_empty());

    let o = store.add_option(i).unwrap();
    store.set_option_label(i, o, "Yes".into()).unwrap();
    store.set_option_value(i, o, "yes".into()).unwrap();
    store.set_field_content(i, "yes".into()).unwrap();
    store.close_field();

    store.submit(&gateway).unwrap();
    let sent = gateway.pages.borrow();
    assert_eq!(sent.len(), 1);
    let json = serde_json::to_value(&sent[0]).unwrap();
    assert_eq!(json["page_fields"][1]["field_type"], "SELECT");
    assert_eq!(
        json["page_fields"][1]["field_data"]["select_field_options"][0]["value"],
        "yes"
    );
    drop(sent);

    store.finish_save(Ok(())).unwrap();
    assert!(store.errors().is_empty());
}

#[test]
fn test_identifier_protocol_is_independent_of_page_save() {
    let gateway = RecordingGateway::default();
    let mut store = PageDraftStore::new(title_page());

    store.begin_identifier_edit();
    store.set_identifier_input("landing-2025".into()).unwrap();
    store.save_identifier(&gateway).unwrap();

    assert_eq!(gateway.identifiers.borrow().len(), 1);
    assert_eq!(gateway.identifiers.borrow()[0].identifier, "landing-2025");
    assert!(gateway.pages.borrow().is_empty());
    assert_eq!(store.page().identifier, "landing-2025");

    let _ = store.finish_identifier_save(Err(PersistenceError::Transport("offline".into())));
    assert_eq!(store.page().identifier, "landing");
}

#[test]
fn test_loaded_page_json_feeds_the_store() {
    let raw = serde_json::json!({
        "id": "6f1c1d5e-8a7b-4f43-9d54-2c2f3a1b0e11",
        "name": "Contact",
        "identifier": "contact",
        "page_fields": [
            {"name": "Intro", "identifier": "intro", "data_type": "TEXT",
             "field_type": "TEXT_EDITOR", "field_content": "# Hello"},
            {"name": "Topic", "identifier": "topic", "data_type": "TEXT",
             "field_type": "SELECT", "field_content": "sales",
             "field_data": {"select_field_options": [
                 {"label": "Sales", "value": "sales"},
                 {"label": "Support", "value": "support"}
             ]}}
        ]
    });
    let page: Page = serde_json::from_value(raw).unwrap();
    let store = PageDraftStore::new(page);

    assert_eq!(store.len(), 2);
    assert_eq!(store.field(0).unwrap().field_type(), FieldType::TextEditor);
    assert_eq!(store.field(1).unwrap().selected_option().unwrap().label, "Sales");
    assert_eq!(store.session(), FieldConfigSession::Closed);
}
