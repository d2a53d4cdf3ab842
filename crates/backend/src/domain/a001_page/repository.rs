use chrono::Utc;
use contracts::domain::a001_page::{Page, PageField, PageId};
use contracts::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_page")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub identifier: String,
    /// JSON массив полей в формате `PageFieldDto`
    pub page_fields: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Page {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id)
            .map_err(|e| anyhow::anyhow!("Bad page id {}: {}", m.id, e))?;
        let page_fields: Vec<PageField> = serde_json::from_str(&m.page_fields)
            .map_err(|e| anyhow::anyhow!("Bad page_fields for page {}: {}", m.id, e))?;

        Ok(Page {
            id: PageId(uuid),
            name: m.name,
            identifier: m.identifier,
            page_fields,
            metadata,
        })
    }
}

fn to_active(aggregate: &Page) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        name: Set(aggregate.name.clone()),
        identifier: Set(aggregate.identifier.clone()),
        page_fields: Set(serde_json::to_string(&aggregate.page_fields)?),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    })
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Page>> {
    let mut items = Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(Page::try_from)
        .collect::<anyhow::Result<Vec<Page>>>()?;
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Page>> {
    Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(Page::try_from)
        .transpose()
}

pub async fn get_by_identifier(
    db: &DatabaseConnection,
    identifier: &str,
) -> anyhow::Result<Option<Page>> {
    Entity::find()
        .filter(Column::Identifier.eq(identifier))
        .one(db)
        .await?
        .map(Page::try_from)
        .transpose()
}

pub async fn insert(db: &DatabaseConnection, aggregate: &Page) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    to_active(aggregate)?.insert(db).await?;
    Ok(uuid)
}

/// Записать имя и поля страницы.
///
/// Идентификатор не пишется: у него своя операция, и сохранение страницы
/// не должно затирать его. Версия увеличивается в самой БД.
pub async fn update(db: &DatabaseConnection, aggregate: &Page) -> anyhow::Result<()> {
    let id = aggregate.id.value().to_string();
    let mut active = to_active(aggregate)?;
    active.id = NotSet;
    active.identifier = NotSet;
    active.created_at = NotSet;
    active.version = NotSet;

    let result = Entity::update_many()
        .set(active)
        .col_expr(Column::Version, Expr::col(Column::Version).add(1))
        .filter(Column::Id.eq(id.clone()))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        anyhow::bail!("Page {} not found", id);
    }
    Ok(())
}

/// Сменить только идентификатор (остальные колонки не трогаем)
pub async fn update_identifier(
    db: &DatabaseConnection,
    id: Uuid,
    identifier: &str,
) -> anyhow::Result<()> {
    let result = Entity::update_many()
        .col_expr(Column::Identifier, Expr::value(identifier.to_string()))
        .col_expr(Column::UpdatedAt, Expr::value(Some(Utc::now())))
        .col_expr(Column::Version, Expr::col(Column::Version).add(1))
        .filter(Column::Id.eq(id.to_string()))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        anyhow::bail!("Page {} not found", id);
    }
    Ok(())
}
