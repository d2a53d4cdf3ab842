pub mod aggregate;
pub mod editor;
pub mod errors;
pub mod field;
pub mod field_path;
pub mod validation;

pub use aggregate::{Page, PageDto, PageId, PageListItem, PutPageIdentifierDto};
pub use errors::{
    PageError, PersistenceError, SaveErrorResponse, SubmitError, ValidationCode, ValidationError,
    ValidationErrors,
};
pub use field::{FieldType, FieldVariant, PageDataType, PageField, PageFieldDto, SelectFieldData};
pub use field_path::FieldPath;
