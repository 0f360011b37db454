//! Catalog Level

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rung of the catalog hierarchy: Brand → Category → Series → Product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Brand,
    Category,
    Series,
    Product,
}

impl Level {
    /// All levels, root first
    pub const ALL: [Level; 4] = [Level::Brand, Level::Category, Level::Series, Level::Product];

    /// The level directly above this one (`None` for the brand root)
    pub fn parent(&self) -> Option<Level> {
        match self {
            Level::Brand => None,
            Level::Category => Some(Level::Brand),
            Level::Series => Some(Level::Category),
            Level::Product => Some(Level::Series),
        }
    }

    /// Lowercase name, e.g. "series"
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Brand => "brand",
            Level::Category => "category",
            Level::Series => "series",
            Level::Product => "product",
        }
    }

    /// Capitalized name used at the start of a sentence, e.g. "Series"
    pub fn title(&self) -> &'static str {
        match self {
            Level::Brand => "Brand",
            Level::Category => "Category",
            Level::Series => "Series",
            Level::Product => "Product",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = crate::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand" => Ok(Level::Brand),
            "category" => Ok(Level::Category),
            "series" => Ok(Level::Series),
            "product" => Ok(Level::Product),
            other => Err(crate::error::AppError::with_message(
                crate::error::ErrorCode::InvalidLevel,
                format!("Invalid level '{other}'. Must be one of: brand, category, series, product"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_chain() {
        assert_eq!(Level::Product.parent(), Some(Level::Series));
        assert_eq!(Level::Series.parent(), Some(Level::Category));
        assert_eq!(Level::Category.parent(), Some(Level::Brand));
        assert_eq!(Level::Brand.parent(), None);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("series".parse::<Level>().unwrap(), Level::Series);
        assert!("model".parse::<Level>().is_err());
        assert_eq!(Level::Category.to_string(), "category");
        assert_eq!(Level::Category.title(), "Category");
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Level::Brand).unwrap(), "\"brand\"");
        let level: Level = serde_json::from_str("\"product\"").unwrap();
        assert_eq!(level, Level::Product);
    }
}
