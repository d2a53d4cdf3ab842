use crate::shared::api_utils::api_url;
use contracts::domain::a001_page::{
    Page, PageDto, PageId, PersistenceError, PutPageIdentifierDto, SaveErrorResponse,
    ValidationErrors,
};
use gloo_net::http::Response;

pub async fn fetch_by_id(id: String) -> Result<Page, String> {
    let url = api_url(&format!("/api/page/{}", id));
    let response = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if response.status() == 404 {
        return Err("Страница не найдена".to_string());
    }
    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<Page>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// PUT /api/page/:id
pub async fn save_page(id: PageId, dto: PageDto) -> Result<(), PersistenceError> {
    let url = api_url(&format!("/api/page/{}", id.value()));
    let response = gloo_net::http::Request::put(&url)
        .json(&dto)
        .map_err(|e| PersistenceError::Transport(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| PersistenceError::Transport(format!("Request failed: {}", e)))?;

    into_save_result(response).await
}

/// PUT /api/page/:id/identifier
pub async fn save_identifier(
    id: PageId,
    dto: PutPageIdentifierDto,
) -> Result<(), PersistenceError> {
    let url = api_url(&format!("/api/page/{}/identifier", id.value()));
    let response = gloo_net::http::Request::put(&url)
        .json(&dto)
        .map_err(|e| PersistenceError::Transport(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| PersistenceError::Transport(format!("Request failed: {}", e)))?;

    into_save_result(response).await
}

/// 2xx → Ok, 422 → ошибки по путям полей, остальное → транспортная ошибка
async fn into_save_result(response: Response) -> Result<(), PersistenceError> {
    if response.ok() {
        return Ok(());
    }
    if response.status() == 422 {
        let body: SaveErrorResponse = response.json().await.map_err(|e| {
            PersistenceError::Transport(format!("Failed to parse error response: {}", e))
        })?;
        return Err(PersistenceError::Rejected(ValidationErrors::from_map(
            &body.errors,
        )));
    }
    Err(PersistenceError::Transport(format!(
        "HTTP error: {}",
        response.status()
    )))
}
