//! Type-safe enumerations for catalogue metadata.
//!
//! The catalogue stores these concepts as loosely formatted strings. Parsing is
//! lenient where the catalogue is known to be inconsistent (supplier type falls
//! back to "not involved"), strict where a caller asked for a specific value
//! (filters supplied on the command line or in a query string).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// How a supplier participates in an interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SupplierType {
    /// Supplier is the sender.
    Send,
    /// Supplier is the receiver.
    Receive,
    /// Supplier sends and receives.
    Both,
    /// Supplier is not a party to the exchange.
    #[default]
    NotInvolved,
}

impl SupplierType {
    /// Returns the catalogue encoding (e.g. `supplier_send`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierType::Send => "supplier_send",
            SupplierType::Receive => "supplier_receive",
            SupplierType::Both => "supplier_both",
            SupplierType::NotInvolved => "none",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SupplierType::Send => "Supplier Send",
            SupplierType::Receive => "Supplier Receive",
            SupplierType::Both => "Supplier Send & Receive",
            SupplierType::NotInvolved => "Supplier Not Involved",
        }
    }
}

impl fmt::Display for SupplierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SupplierType {
    type Err = ModelError;

    /// Accepts the catalogue encoding and the short forms (`send`, `receive`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let short = normalized
            .strip_prefix("supplier_")
            .unwrap_or(normalized.as_str());
        match short {
            "send" => Ok(SupplierType::Send),
            "receive" => Ok(SupplierType::Receive),
            "both" => Ok(SupplierType::Both),
            "none" => Ok(SupplierType::NotInvolved),
            _ => Err(ModelError::UnknownSupplierType(s.to_string())),
        }
    }
}

impl From<String> for SupplierType {
    /// Unrecognised catalogue values degrade to [`SupplierType::NotInvolved`].
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<SupplierType> for String {
    fn from(value: SupplierType) -> Self {
        value.as_str().to_string()
    }
}

/// Requirement level of a data item (Mandatory / Optional / Conditional).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cmo {
    /// Must be populated.
    Mandatory,
    /// May be populated.
    Optional,
    /// Required only when a rule applies.
    Conditional,
}

impl Cmo {
    /// Returns the single-letter code used in the catalogue.
    pub fn as_code(&self) -> &'static str {
        match self {
            Cmo::Mandatory => "M",
            Cmo::Optional => "O",
            Cmo::Conditional => "C",
        }
    }

    /// Returns the full name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cmo::Mandatory => "Mandatory",
            Cmo::Optional => "Optional",
            Cmo::Conditional => "Conditional",
        }
    }

    /// Returns true if a value must be supplied.
    pub fn is_required(&self) -> bool {
        matches!(self, Cmo::Mandatory)
    }
}

impl fmt::Display for Cmo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Cmo {
    type Err = ModelError;

    /// Handles both single-letter codes and full names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MANDATORY" => Ok(Cmo::Mandatory),
            "O" | "OPTIONAL" => Ok(Cmo::Optional),
            "C" | "CONDITIONAL" => Ok(Cmo::Conditional),
            _ => Err(ModelError::UnknownCmo(s.to_string())),
        }
    }
}

/// Categorical filter over [`SupplierType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// No filtering.
    #[default]
    All,
    /// Restrict to one supplier type.
    Supplier(SupplierType),
}

impl CategoryFilter {
    /// Returns the query-string encoding (`all` or the supplier type encoding).
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Supplier(supplier) => supplier.as_str(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        trimmed
            .parse::<SupplierType>()
            .map(CategoryFilter::Supplier)
            .map_err(|_| ModelError::UnknownFilter(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_type_from_str() {
        assert_eq!(
            "supplier_send".parse::<SupplierType>().unwrap(),
            SupplierType::Send
        );
        assert_eq!("Receive".parse::<SupplierType>().unwrap(), SupplierType::Receive);
        assert_eq!(
            "supplier-both".parse::<SupplierType>().unwrap(),
            SupplierType::Both
        );
        assert_eq!(
            "none".parse::<SupplierType>().unwrap(),
            SupplierType::NotInvolved
        );
        assert!("sideways".parse::<SupplierType>().is_err());
    }

    #[test]
    fn test_unknown_supplier_type_degrades() {
        assert_eq!(
            SupplierType::from("sideways".to_string()),
            SupplierType::NotInvolved
        );
    }

    #[test]
    fn test_cmo_from_str() {
        assert_eq!("M".parse::<Cmo>().unwrap(), Cmo::Mandatory);
        assert_eq!("optional".parse::<Cmo>().unwrap(), Cmo::Optional);
        assert_eq!(" c ".parse::<Cmo>().unwrap(), Cmo::Conditional);
        assert_eq!(
            "X".parse::<Cmo>(),
            Err(ModelError::UnknownCmo("X".to_string()))
        );
        assert!(Cmo::Mandatory.is_required());
        assert!(!Cmo::Conditional.is_required());
    }

    #[test]
    fn test_category_filter_from_str() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "send".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Supplier(SupplierType::Send)
        );
        assert_eq!(
            CategoryFilter::Supplier(SupplierType::Both).as_str(),
            "supplier_both"
        );
        assert!("everything".parse::<CategoryFilter>().is_err());
    }
}
