use super::repository;
use contracts::domain::a001_page::validation::is_slug;
use contracts::domain::a001_page::{
    FieldPath, FieldType, Page, PageDto, PageField, PutPageIdentifierDto, ValidationCode,
    ValidationErrors,
};
use contracts::domain::a001_page::editor::FieldOption;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Page not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Правила для идентификатора страницы: обязателен, slug, уникален
async fn check_identifier(
    db: &DatabaseConnection,
    identifier: &str,
    own_id: Option<Uuid>,
) -> Result<Option<ValidationCode>, ServiceError> {
    if identifier.is_empty() {
        return Ok(Some(ValidationCode::Required));
    }
    if !is_slug(identifier) {
        return Ok(Some(ValidationCode::InvalidFormat));
    }
    let taken = repository::get_by_identifier(db, identifier)
        .await?
        .is_some_and(|other| Some(other.id.value()) != own_id);
    Ok(taken.then_some(ValidationCode::Taken))
}

/// Ошибка записи: нарушение UNIQUE означает, что идентификатор заняли
/// между проверкой и записью
fn write_error(err: anyhow::Error) -> ServiceError {
    let unique = matches!(
        err.downcast_ref::<DbErr>().and_then(DbErr::sql_err),
        Some(SqlErr::UniqueConstraintViolation(_))
    );
    if !unique {
        return ServiceError::Storage(err);
    }
    tracing::warn!("Page identifier taken concurrently: {}", err);
    let mut errors = ValidationErrors::new();
    errors.push(FieldPath::PageIdentifier, ValidationCode::Taken);
    ServiceError::Validation(errors)
}

/// Создание новой страницы
pub async fn create(db: &DatabaseConnection, dto: PageDto) -> Result<Uuid, ServiceError> {
    let identifier = dto.identifier.trim().to_string();
    let mut aggregate = Page::new_for_insert(dto.name, identifier, dto.page_fields);

    // Валидация
    let mut errors = aggregate.validate().err().unwrap_or_default();
    if let Some(code) = check_identifier(db, &aggregate.identifier, None).await? {
        errors.push(FieldPath::PageIdentifier, code);
    }
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    aggregate.before_write();
    let id = repository::insert(db, &aggregate).await.map_err(write_error)?;
    tracing::info!("Created page {} ({})", id, aggregate.identifier);
    Ok(id)
}

/// Сохранение черновика: имя и поля (идентификатор меняется отдельно)
pub async fn update(db: &DatabaseConnection, id: Uuid, dto: PageDto) -> Result<(), ServiceError> {
    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();
    repository::update(db, &aggregate).await?;
    tracing::info!(
        "Saved page {} with {} fields (version {})",
        id,
        aggregate.page_fields.len(),
        aggregate.metadata.version
    );
    Ok(())
}

/// Смена идентификатора страницы
pub async fn update_identifier(
    db: &DatabaseConnection,
    id: Uuid,
    dto: PutPageIdentifierDto,
) -> Result<(), ServiceError> {
    let aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let identifier = dto.identifier.trim();
    if let Some(code) = check_identifier(db, identifier, Some(id)).await? {
        let mut errors = ValidationErrors::new();
        errors.push(FieldPath::PageIdentifier, code);
        return Err(ServiceError::Validation(errors));
    }

    if identifier == aggregate.identifier {
        return Ok(());
    }

    repository::update_identifier(db, id, identifier)
        .await
        .map_err(write_error)?;
    tracing::info!(
        "Page {} identifier changed: {} -> {}",
        id,
        aggregate.identifier,
        identifier
    );
    Ok(())
}

/// Получение страницы по ID
pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Page>> {
    repository::get_by_id(db, id).await
}

/// Получение списка всех страниц
pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Page>> {
    repository::list_all(db).await
}

/// Вставка тестовых данных
pub async fn insert_test_data(db: &DatabaseConnection) -> anyhow::Result<()> {
    let mut colour = PageField::with_type("Colour".into(), "colour".into(), FieldType::Select);
    if let Some(options) = colour.variant.options_mut() {
        options.push(FieldOption::new("Red", "red"));
        options.push(FieldOption::new("Green", "green"));
    }
    colour.variant.set_content("red".into());

    let mut title = PageField::with_type("Title".into(), "title".into(), FieldType::Text);
    title.variant.set_content("Welcome".into());

    let data = vec![
        PageDto {
            id: None,
            name: "Home".into(),
            identifier: "home".into(),
            page_fields: vec![
                title,
                PageField::with_type("Body".into(), "body".into(), FieldType::TextEditor),
            ],
        },
        PageDto {
            id: None,
            name: "Contacts".into(),
            identifier: "contacts".into(),
            page_fields: vec![
                PageField::with_type("Address".into(), "address".into(), FieldType::Textarea),
                colour,
            ],
        },
    ];

    for dto in data {
        if repository::get_by_identifier(db, &dto.identifier).await?.is_some() {
            continue;
        }
        create(db, dto).await.map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    Ok(())
}
