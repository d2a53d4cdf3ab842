//! Page fields
//!
//! A page field is one of a closed set of variants. Only `Select` carries an
//! option list, so "select has options, the others do not" holds by
//! construction. On the wire the field is flat (`field_type`,
//! `field_content`, optional `field_data`), see [`PageFieldDto`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::editor::option_list::{FieldOption, OptionList};
use super::errors::PageError;

// ============================================================================
// Field type / data type
// ============================================================================

/// Тип отображения поля
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    TextEditor,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::TextEditor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Textarea => "TEXTAREA",
            FieldType::Select => "SELECT",
            FieldType::TextEditor => "TEXT_EDITOR",
        }
    }

    /// Подпись для выбора типа в редакторе
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text field",
            FieldType::Textarea => "Textarea field",
            FieldType::Select => "Select field",
            FieldType::TextEditor => "Text editor field",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PageError::InvalidFieldType(s.to_string()))
    }
}

/// Тип данных поля, независим от способа отображения
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageDataType {
    #[default]
    Text,
}

impl PageDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageDataType::Text => "TEXT",
        }
    }
}

impl FromStr for PageDataType {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(PageDataType::Text),
            other => Err(PageError::InvalidDataType(other.to_string())),
        }
    }
}

// ============================================================================
// Variant
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldVariant {
    Text { content: String },
    Textarea { content: String },
    Select { content: String, options: OptionList },
    TextEditor { content: String },
}

impl FieldVariant {
    /// Default content for a freshly chosen type: empty text, and an empty
    /// option list for `Select`.
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => FieldVariant::Text {
                content: String::new(),
            },
            FieldType::Textarea => FieldVariant::Textarea {
                content: String::new(),
            },
            FieldType::Select => FieldVariant::Select {
                content: String::new(),
                options: OptionList::new(),
            },
            FieldType::TextEditor => FieldVariant::TextEditor {
                content: String::new(),
            },
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldVariant::Text { .. } => FieldType::Text,
            FieldVariant::Textarea { .. } => FieldType::Textarea,
            FieldVariant::Select { .. } => FieldType::Select,
            FieldVariant::TextEditor { .. } => FieldType::TextEditor,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            FieldVariant::Text { content }
            | FieldVariant::Textarea { content }
            | FieldVariant::Select { content, .. }
            | FieldVariant::TextEditor { content } => content,
        }
    }

    pub fn set_content(&mut self, value: String) {
        match self {
            FieldVariant::Text { content }
            | FieldVariant::Textarea { content }
            | FieldVariant::Select { content, .. }
            | FieldVariant::TextEditor { content } => *content = value,
        }
    }

    pub fn options(&self) -> Option<&OptionList> {
        match self {
            FieldVariant::Select { options, .. } => Some(options),
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut OptionList> {
        match self {
            FieldVariant::Select { options, .. } => Some(options),
            _ => None,
        }
    }
}

// ============================================================================
// PageField
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageFieldDto", into = "PageFieldDto")]
pub struct PageField {
    pub name: String,
    pub identifier: String,
    pub data_type: PageDataType,
    pub variant: FieldVariant,
}

impl PageField {
    /// Blank TEXT field, as created by "add field"
    pub fn blank() -> Self {
        Self::with_type(String::new(), String::new(), FieldType::Text)
    }

    pub fn with_type(name: String, identifier: String, field_type: FieldType) -> Self {
        Self {
            name,
            identifier,
            data_type: PageDataType::Text,
            variant: FieldVariant::default_for(field_type),
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.variant.field_type()
    }

    pub fn content(&self) -> &str {
        self.variant.content()
    }

    pub fn options(&self) -> Option<&OptionList> {
        self.variant.options()
    }

    /// Option currently chosen in a select field.
    ///
    /// With duplicate values the first matching option wins.
    pub fn selected_option(&self) -> Option<&FieldOption> {
        let options = self.variant.options()?;
        let content = self.variant.content();
        if content.is_empty() {
            return None;
        }
        options
            .position_of_value(content)
            .and_then(|i| options.get(i))
    }

    /// Replace type and data type; previous content and options are dropped.
    pub fn reset_variant(&mut self, field_type: FieldType, data_type: PageDataType) {
        self.variant = FieldVariant::default_for(field_type);
        self.data_type = data_type;
    }
}

// ============================================================================
// Wire DTO
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectFieldData {
    #[serde(default)]
    pub select_field_options: OptionList,
}

/// Flat JSON shape of a page field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFieldDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub identifier: String,
    pub data_type: String,
    pub field_type: String,
    #[serde(default)]
    pub field_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_data: Option<SelectFieldData>,
}

impl TryFrom<PageFieldDto> for PageField {
    type Error = PageError;

    fn try_from(dto: PageFieldDto) -> Result<Self, Self::Error> {
        let field_type: FieldType = dto.field_type.parse()?;
        let data_type: PageDataType = dto.data_type.parse()?;
        let content = dto.field_content;

        let variant = match field_type {
            FieldType::Text => FieldVariant::Text { content },
            FieldType::Textarea => FieldVariant::Textarea { content },
            FieldType::TextEditor => FieldVariant::TextEditor { content },
            FieldType::Select => FieldVariant::Select {
                content,
                options: dto
                    .field_data
                    .map(|d| d.select_field_options)
                    .unwrap_or_default(),
            },
        };

        Ok(PageField {
            name: dto.name,
            identifier: dto.identifier,
            data_type,
            variant,
        })
    }
}

impl From<PageField> for PageFieldDto {
    fn from(field: PageField) -> Self {
        let field_type = field.field_type().as_str().to_string();
        let (field_content, field_data) = match field.variant {
            FieldVariant::Select { content, options } => (
                content,
                Some(SelectFieldData {
                    select_field_options: options,
                }),
            ),
            FieldVariant::Text { content }
            | FieldVariant::Textarea { content }
            | FieldVariant::TextEditor { content } => (content, None),
        };

        PageFieldDto {
            name: field.name,
            identifier: field.identifier,
            data_type: field.data_type.as_str().to_string(),
            field_type,
            field_content,
            field_data,
        }
    }
}
