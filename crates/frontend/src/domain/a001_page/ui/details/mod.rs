//! Page editor UI Module
//!
//! MVVM:
//! - model.rs: API functions (fetch, save page, save identifier)
//! - view_model.rs: ViewModel around `PageDraftStore`, HTTP gateway
//! - view.rs: Leptos components (pure UI)

mod model;
mod view;
mod view_model;

pub use view::PageEdit;
pub use view_model::PageEditVm;
