use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ValidationErrors;
use super::field::PageField;
use super::validation;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(pub Uuid);

impl PageId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for PageId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PageId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Страница: имя, URL-идентификатор и упорядоченный список полей
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    /// URL slug, уникален в системе (проверяется на backend)
    pub identifier: String,
    /// Порядок полей значим: в нём они отображаются и хранятся
    #[serde(default)]
    pub page_fields: Vec<PageField>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Page {
    /// Создать новую страницу для вставки в БД
    pub fn new_for_insert(name: String, identifier: String, page_fields: Vec<PageField>) -> Self {
        Self {
            id: PageId::new_v4(),
            name,
            identifier,
            page_fields,
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Обновить данные из DTO.
    ///
    /// Идентификатор страницы здесь не меняется: для него есть отдельная
    /// операция `PUT /api/page/:id/identifier`.
    pub fn update(&mut self, dto: &PageDto) {
        self.name = dto.name.clone();
        self.page_fields = dto.page_fields.clone();
    }

    /// Валидация данных, возвращает все ошибки сразу
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = validation::validate_page(&self.name, &self.page_fields);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.metadata.touch();
        self.metadata.increment_version();
    }

    pub fn to_dto(&self) -> PageDto {
        PageDto {
            id: Some(self.to_string_id()),
            name: self.name.clone(),
            identifier: self.identifier.clone(),
            page_fields: self.page_fields.clone(),
        }
    }

    pub fn to_list_item(&self) -> PageListItem {
        PageListItem {
            id: self.to_string_id(),
            name: self.name.clone(),
            identifier: self.identifier.clone(),
            field_count: self.page_fields.len(),
            updated_at: self.metadata.updated_at,
        }
    }
}

impl AggregateRoot for Page {
    type Id = PageId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.identifier
    }

    fn description(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "page"
    }

    fn element_name() -> &'static str {
        "Страница"
    }

    fn list_name() -> &'static str {
        "Страницы"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/сохранения страницы (весь черновик)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PageDto {
    pub id: Option<String>,
    pub name: String,
    pub identifier: String,
    #[serde(default)]
    pub page_fields: Vec<PageField>,
}

/// DTO для смены идентификатора страницы
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PutPageIdentifierDto {
    pub identifier: String,
}

/// Строка списка страниц
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageListItem {
    pub id: String,
    pub name: String,
    pub identifier: String,
    pub field_count: usize,
    pub updated_at: DateTime<Utc>,
}
