//! Element type tags for type-restricted lists
//!
//! | Tag | Accepted names | Cast target |
//! |-----|----------------|-------------|
//! | Any | `any`, `*` | n/a |
//! | Boolean | `boolean`, `bool` | yes |
//! | Integer | `integer`, `int` | yes |
//! | Double | `double`, `float` | yes |
//! | String | `string` | yes |
//! | Array | `array` | no |
//! | Object | `object` | no |
//! | Resource | `resource` | no |

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Runtime type tag of a list element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ElementType {
    /// Unrestricted
    #[default]
    Any,
    /// `Value::Bool`
    Boolean,
    /// `Value::Int`
    Integer,
    /// `Value::Float`
    Double,
    /// `Value::String`
    String,
    /// `Value::Array`
    Array,
    /// `Value::Object`
    Object,
    /// `Value::Resource`
    Resource,
}

impl ElementType {
    /// All element types (for iteration)
    pub const ALL: [ElementType; 8] = [
        ElementType::Any,
        ElementType::Boolean,
        ElementType::Integer,
        ElementType::Double,
        ElementType::String,
        ElementType::Array,
        ElementType::Object,
        ElementType::Resource,
    ];

    /// Canonical name
    pub const fn name(&self) -> &'static str {
        match self {
            ElementType::Any => "any",
            ElementType::Boolean => "boolean",
            ElementType::Integer => "integer",
            ElementType::Double => "double",
            ElementType::String => "string",
            ElementType::Array => "array",
            ElementType::Object => "object",
            ElementType::Resource => "resource",
        }
    }

    /// Parse a canonical name or alias
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "any" | "*" => Some(ElementType::Any),
            "boolean" | "bool" => Some(ElementType::Boolean),
            "integer" | "int" => Some(ElementType::Integer),
            "double" | "float" => Some(ElementType::Double),
            "string" => Some(ElementType::String),
            "array" => Some(ElementType::Array),
            "object" => Some(ElementType::Object),
            "resource" => Some(ElementType::Resource),
            _ => None,
        }
    }

    /// Whether a list of this type accepts every value
    pub const fn is_unrestricted(&self) -> bool {
        matches!(self, ElementType::Any)
    }

    /// Whether mismatched values may be coerced into this type
    ///
    /// Composite types are never cast targets.
    pub const fn is_castable_target(&self) -> bool {
        matches!(
            self,
            ElementType::Boolean | ElementType::Integer | ElementType::Double | ElementType::String
        )
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::from_name(s).ok_or_else(|| Error::InvalidType(s.to_string()))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
