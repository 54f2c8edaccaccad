//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`Source`] - Marketplace a product was collected from
//! - [`SortDirection`] - Ascending or descending result order
//! - [`SortKey`] - Product field the result set is ordered by
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace a product listing originates from.
///
/// Declaration order is the canonical order of sources and is used as the
/// tie-break when sorting products.
///
/// # Examples
///
/// ```
/// use product_composite::domain::value_objects::enums::Source;
///
/// assert_eq!(Source::Tiki.to_string(), "TIKI");
/// assert_eq!("lazada".parse::<Source>().unwrap(), Source::Lazada);
/// assert!(Source::Tiki < Source::Shopee);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Source {
    /// tiki.vn
    Tiki = 0,
    /// shopee.vn
    Shopee = 1,
    /// lazada.vn
    Lazada = 2,
}

impl Source {
    /// All known sources in canonical order.
    pub const ALL: [Source; 3] = [Source::Tiki, Source::Shopee, Source::Lazada];

    /// Returns the lowercase identifier used in configuration keys.
    #[inline]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Tiki => "tiki",
            Self::Shopee => "shopee",
            Self::Lazada => "lazada",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tiki => write!(f, "TIKI"),
            Self::Shopee => write!(f, "SHOPEE"),
            Self::Lazada => write!(f, "LAZADA"),
        }
    }
}

impl FromStr for Source {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TIKI" => Ok(Self::Tiki),
            "SHOPEE" => Ok(Self::Shopee),
            "LAZADA" => Ok(Self::Lazada),
            _ => Err(ParseEnumError::InvalidValue("Source", s.to_string())),
        }
    }
}

/// Direction in which the aggregated result set is ordered.
///
/// # Examples
///
/// ```
/// use product_composite::domain::value_objects::enums::SortDirection;
///
/// assert_eq!(SortDirection::default(), SortDirection::Asc);
/// assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
/// assert_eq!(SortDirection::Asc.reversed(), SortDirection::Desc);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc = 0,
    /// Largest first.
    Desc = 1,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Returns true if this is ascending order.
    #[inline]
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ASC" | "ASCENDING" => Ok(Self::Asc),
            "DESC" | "DESCENDING" => Ok(Self::Desc),
            _ => Err(ParseEnumError::InvalidValue("SortDirection", s.to_string())),
        }
    }
}

/// Product field that defines the order of the result set.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Order by price.
    #[default]
    Price,
    /// Order by product name, case-insensitively.
    Name,
    /// Order by discount rate.
    DiscountRate,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price => write!(f, "price"),
            Self::Name => write!(f, "name"),
            Self::DiscountRate => write!(f, "discount_rate"),
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "name" => Ok(Self::Name),
            "discount_rate" | "discountrate" | "discount" => Ok(Self::DiscountRate),
            _ => Err(ParseEnumError::InvalidValue("SortKey", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod source {
        use super::*;

        #[test]
        fn display_uppercase() {
            assert_eq!(Source::Tiki.to_string(), "TIKI");
            assert_eq!(Source::Shopee.to_string(), "SHOPEE");
            assert_eq!(Source::Lazada.to_string(), "LAZADA");
        }

        #[test]
        fn from_str_case_insensitive() {
            assert_eq!("tiki".parse::<Source>().unwrap(), Source::Tiki);
            assert_eq!("Shopee".parse::<Source>().unwrap(), Source::Shopee);
            assert!("amazon".parse::<Source>().is_err());
        }

        #[test]
        fn canonical_order() {
            let mut shuffled = vec![Source::Lazada, Source::Tiki, Source::Shopee];
            shuffled.sort();
            assert_eq!(shuffled, Source::ALL.to_vec());
        }

        #[test]
        fn serializes_uppercase() {
            let json = serde_json::to_string(&Source::Shopee).unwrap();
            assert_eq!(json, "\"SHOPEE\"");
            let back: Source = serde_json::from_str(&json).unwrap();
            assert_eq!(back, Source::Shopee);
        }
    }

    mod sort_direction {
        use super::*;

        #[test]
        fn default_is_ascending() {
            assert!(SortDirection::default().is_ascending());
        }

        #[test]
        fn from_str_works() {
            assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
            assert_eq!(" desc ".parse::<SortDirection>().unwrap(), SortDirection::Desc);
            assert!("sideways".parse::<SortDirection>().is_err());
        }

        #[test]
        fn reversed() {
            assert_eq!(SortDirection::Desc.reversed(), SortDirection::Asc);
        }
    }

    mod sort_key {
        use super::*;

        #[test]
        fn from_str_accepts_aliases() {
            assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
            assert_eq!("NAME".parse::<SortKey>().unwrap(), SortKey::Name);
            assert_eq!("discount".parse::<SortKey>().unwrap(), SortKey::DiscountRate);
        }

        #[test]
        fn deserializes_snake_case() {
            let key: SortKey = serde_json::from_str("\"discount_rate\"").unwrap();
            assert_eq!(key, SortKey::DiscountRate);
        }
    }

    #[test]
    fn parse_error_display() {
        let err = "x".parse::<Source>().unwrap_err();
        assert_eq!(err.to_string(), "invalid Source value: 'x'");
    }
}
