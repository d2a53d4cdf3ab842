//! Page editor core
//!
//! - `draft_store`: the single owner of the page draft and all mutations
//! - `option_list`: positional option list of select fields
//! - `config_session`: which field's configuration panel is open
//! - `identifier_edit`: lock/unlock protocol for the page identifier
//! - `gateway`: persistence collaborators invoked by the store

pub mod config_session;
pub mod draft_store;
pub mod gateway;
pub mod identifier_edit;
pub mod option_list;

pub use config_session::FieldConfigSession;
pub use draft_store::PageDraftStore;
pub use gateway::PageGateway;
pub use identifier_edit::IdentifierEdit;
pub use option_list::{FieldOption, OptionList};
