use crate::domain::a001_page::aggregate::{PageDto, PageId, PutPageIdentifierDto};

/// Persistence collaborators of the page editor.
///
/// Both calls are fire-and-forget from the editor's point of view: the
/// implementation reports the outcome later through
/// `PageDraftStore::finish_save` / `PageDraftStore::finish_identifier_save`.
pub trait PageGateway {
    /// Save the whole draft (name, identifier, fields)
    fn save_page(&self, page_id: PageId, page: &PageDto);

    /// Save only the page identifier
    fn save_identifier(&self, page_id: PageId, payload: &PutPageIdentifierDto);
}
