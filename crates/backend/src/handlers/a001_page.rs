use axum::{extract::Path, http::StatusCode, response::IntoResponse, response::Response, Json};
use contracts::domain::a001_page::{
    PageDto, PageListItem, PutPageIdentifierDto, SaveErrorResponse,
};
use serde_json::json;

use crate::domain::a001_page;
use crate::domain::a001_page::service::ServiceError;
use crate::shared::data::db::get_connection;

fn parse_id(id: &str) -> Result<uuid::Uuid, Response> {
    uuid::Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST.into_response())
}

/// ServiceError → HTTP ответ
fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound => StatusCode::NOT_FOUND.into_response(),
        ServiceError::Validation(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SaveErrorResponse::from(&errors)),
        )
            .into_response(),
        ServiceError::Storage(e) => {
            tracing::error!("Page storage error: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /api/page
pub async fn list_all() -> Result<Json<Vec<PageListItem>>, StatusCode> {
    match a001_page::service::list_all(get_connection()).await {
        Ok(v) => Ok(Json(v.iter().map(|p| p.to_list_item()).collect())),
        Err(e) => {
            tracing::error!("Failed to list pages: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/page/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a001_page::Page>, Response> {
    let uuid = parse_id(&id)?;
    match a001_page::service::get_by_id(get_connection(), uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND.into_response()),
        Err(e) => Err(error_response(ServiceError::Storage(e))),
    }
}

/// POST /api/page
pub async fn create(Json(dto): Json<PageDto>) -> Result<Json<serde_json::Value>, Response> {
    match a001_page::service::create(get_connection(), dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => Err(error_response(e)),
    }
}

/// PUT /api/page/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<PageDto>,
) -> Result<Json<serde_json::Value>, Response> {
    let uuid = parse_id(&id)?;
    match a001_page::service::update(get_connection(), uuid, dto).await {
        Ok(()) => Ok(Json(json!({}))),
        Err(e) => Err(error_response(e)),
    }
}

/// PUT /api/page/:id/identifier
pub async fn update_identifier(
    Path(id): Path<String>,
    Json(dto): Json<PutPageIdentifierDto>,
) -> Result<Json<serde_json::Value>, Response> {
    let uuid = parse_id(&id)?;
    match a001_page::service::update_identifier(get_connection(), uuid, dto).await {
        Ok(()) => Ok(Json(json!({}))),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /api/page/testdata
pub async fn insert_test_data() -> StatusCode {
    match a001_page::service::insert_test_data(get_connection()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to insert test pages: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_page::{FieldPath, ValidationCode, ValidationErrors};

    #[test]
    fn test_bad_uuid_is_bad_request() {
        let response = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            error_response(ServiceError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(ServiceError::Storage(anyhow::anyhow!("disk full"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let mut errors = ValidationErrors::new();
        errors.push(FieldPath::FieldIdentifier(0), ValidationCode::Required);
        assert_eq!(
            error_response(ServiceError::Validation(errors)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_validation_body_is_keyed_by_path() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldPath::OptionValue(1, 0), ValidationCode::Required);
        errors.push(FieldPath::PageIdentifier, ValidationCode::Taken);

        let response = error_response(ServiceError::Validation(errors));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: SaveErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body.errors
                .get("page_fields.1.field_data.select_field_options.0.value")
                .map(String::as_str),
            Some("required")
        );
        assert_eq!(body.errors.get("identifier").map(String::as_str), Some("taken"));
    }
}
