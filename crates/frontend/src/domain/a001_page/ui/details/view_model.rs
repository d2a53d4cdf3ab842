use super::model;
use contracts::domain::a001_page::editor::{PageDraftStore, PageGateway};
use contracts::domain::a001_page::{
    FieldPath, FieldType, Page, PageDataType, PageDto, PageError, PageId, PersistenceError,
    PutPageIdentifierDto, SubmitError,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// `PageGateway` поверх HTTP: запрос уходит в фоне, результат
/// возвращается в хранилище через `finish_save` / `finish_identifier_save`
#[derive(Clone, Copy)]
pub struct HttpPageGateway {
    store: RwSignal<PageDraftStore>,
    error: RwSignal<Option<String>>,
    success: RwSignal<Option<String>>,
}

impl HttpPageGateway {
    fn report(&self, result: Option<Result<(), PersistenceError>>, ok_message: &str) {
        match result {
            Some(Ok(())) => self.success.set(Some(ok_message.to_string())),
            Some(Err(PersistenceError::Rejected(_))) => self
                .error
                .set(Some("Сервер отклонил изменения, исправьте отмеченные поля".to_string())),
            Some(Err(PersistenceError::Transport(e))) => {
                self.error.set(Some(format!("Ошибка сохранения: {}", e)))
            }
            None => {}
        }
    }
}

impl PageGateway for HttpPageGateway {
    fn save_page(&self, page_id: PageId, page: &PageDto) {
        let gateway = *self;
        let dto = page.clone();
        spawn_local(async move {
            let result = model::save_page(page_id, dto).await;
            let outcome = gateway.store.try_update(|s| s.finish_save(result));
            gateway.report(outcome, "Страница сохранена");
        });
    }

    fn save_identifier(&self, page_id: PageId, payload: &PutPageIdentifierDto) {
        let gateway = *self;
        let dto = payload.clone();
        spawn_local(async move {
            let result = model::save_identifier(page_id, dto).await;
            let outcome = gateway
                .store
                .try_update(|s| s.finish_identifier_save(result));
            gateway.report(outcome, "Идентификатор сохранён");
        });
    }
}

/// ViewModel редактора страницы
#[derive(Clone, Copy)]
pub struct PageEditVm {
    pub store: RwSignal<PageDraftStore>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl Default for PageEditVm {
    fn default() -> Self {
        Self::new()
    }
}

impl PageEditVm {
    pub fn new() -> Self {
        let empty = Page::new_for_insert(String::new(), String::new(), Vec::new());
        Self {
            store: RwSignal::new(PageDraftStore::new(empty)),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        }
    }

    fn gateway(&self) -> HttpPageGateway {
        HttpPageGateway {
            store: self.store,
            error: self.error,
            success: self.success,
        }
    }

    /// Run a store operation; a structural error goes to the error signal
    fn apply<T>(
        &self,
        op: impl FnOnce(&mut PageDraftStore) -> Result<T, PageError>,
    ) -> Option<T> {
        match self.store.try_update(op)? {
            Ok(value) => Some(value),
            Err(e) => {
                self.error.set(Some(e.to_string()));
                None
            }
        }
    }

    /// Load page from server
    pub fn load(&self, id: String) {
        let vm = *self;
        vm.loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match model::fetch_by_id(id).await {
                Ok(page) => vm.store.update(|s| s.load(page)),
                Err(e) => vm.error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
            vm.loading.set(false);
        });
    }

    // ------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------

    pub fn add_field(&self, after_index: usize) {
        self.store.update(|s| {
            s.add_field(after_index);
        });
    }

    pub fn remove_field(&self, index: usize) {
        self.apply(|s| s.remove_field(index));
    }

    pub fn open_field(&self, index: usize) {
        self.apply(|s| s.open_field(index));
    }

    /// "Готово" в модальном окне: проверить поле и закрыть
    pub fn finish_field(&self) {
        self.apply(|s| {
            if let Some(index) = s.session().focused() {
                s.validate_field(index)?;
            }
            s.close_field();
            Ok(())
        });
    }

    pub fn set_field_type(&self, index: usize, value: &str) {
        self.apply(|s| {
            let field_type: FieldType = value.parse()?;
            s.set_field_variant(index, field_type, PageDataType::Text)
        });
    }

    pub fn set_field_content(&self, index: usize, value: String) {
        self.apply(|s| s.set_field_content(index, value));
    }

    pub fn set_field_name(&self, index: usize, value: String) {
        self.apply(|s| s.set_field_name(index, value));
    }

    pub fn set_field_identifier(&self, index: usize, value: String) {
        self.apply(|s| s.set_field_identifier(index, value));
    }

    pub fn set_page_name(&self, value: String) {
        self.store.update(|s| s.set_page_name(value));
    }

    // ------------------------------------------------------------------
    // Select options
    // ------------------------------------------------------------------

    pub fn add_option(&self, field_index: usize) {
        self.apply(|s| s.add_option(field_index));
    }

    pub fn remove_option(&self, field_index: usize, option_index: usize) {
        self.apply(|s| s.remove_option(field_index, option_index));
    }

    pub fn set_option_label(&self, field_index: usize, option_index: usize, value: String) {
        self.apply(|s| s.set_option_label(field_index, option_index, value));
    }

    pub fn set_option_value(&self, field_index: usize, option_index: usize, value: String) {
        self.apply(|s| s.set_option_value(field_index, option_index, value));
    }

    // ------------------------------------------------------------------
    // Save
    // ------------------------------------------------------------------

    pub fn save_command(&self) {
        self.error.set(None);
        self.success.set(None);
        let gateway = self.gateway();
        match self.store.try_update(|s| s.submit(&gateway)) {
            Some(Err(SubmitError::Invalid(errors))) => self.error.set(Some(format!(
                "Страница не сохранена: ошибок {}",
                errors.len()
            ))),
            Some(Err(SubmitError::Structural(e))) => self.error.set(Some(e.to_string())),
            _ => {}
        }
    }

    pub fn begin_identifier_edit(&self) {
        self.store.update(|s| s.begin_identifier_edit());
    }

    pub fn set_identifier_input(&self, value: String) {
        self.apply(|s| s.set_identifier_input(value));
    }

    pub fn save_identifier(&self) {
        self.error.set(None);
        self.success.set(None);
        let gateway = self.gateway();
        self.apply(|s| s.save_identifier(&gateway));
    }

    pub fn cancel_identifier_edit(&self) {
        self.store.update(|s| s.cancel_identifier_edit());
    }

    // ------------------------------------------------------------------
    // Read helpers
    // ------------------------------------------------------------------

    /// Сообщение об ошибке для пути поля
    pub fn error_for(&self, path: FieldPath) -> Option<String> {
        self.store
            .with(|s| s.errors().get(path).map(|code| code.message().to_string()))
    }

    /// Ошибки бэкенда, которые не привязаны к полю
    pub fn general_errors(&self) -> Vec<String> {
        self.store.with(|s| {
            s.errors()
                .unaddressed()
                .iter()
                .map(|(key, code)| format!("{}: {}", key, code))
                .collect()
        })
    }
}
