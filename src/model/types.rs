use crate::error::{NetworkError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Label emitted for a node whose category cannot be resolved.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Structural,
    Process,
    Relationship,
    Resilience,
}

impl Category {
    /// All categories in legend order.
    pub const ALL: [Category; 4] = [
        Category::Structural,
        Category::Process,
        Category::Relationship,
        Category::Resilience,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Structural => "Structural",
            Category::Process => "Process",
            Category::Relationship => "Relationship",
            Category::Resilience => "Resilience",
        }
    }

    /// Display color as an RGB triple (matplotlib's named colors).
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Category::Structural => (0x00, 0x00, 0xFF),
            Category::Process => (0x00, 0x80, 0x00),
            Category::Relationship => (0xFF, 0x00, 0x00),
            Category::Resilience => (0x80, 0x00, 0x80),
        }
    }

    pub fn color_name(self) -> &'static str {
        match self {
            Category::Structural => "blue",
            Category::Process => "green",
            Category::Relationship => "red",
            Category::Resilience => "purple",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "structural" => Ok(Category::Structural),
            "process" => Ok(Category::Process),
            "relationship" => Ok(Category::Relationship),
            "resilience" => Ok(Category::Resilience),
            _ => Err(NetworkError::InvalidCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}
