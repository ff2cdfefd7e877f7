//! Core domain types for supplystat
//!
//! Strongly-typed wrappers for the identifiers that appear in the source
//! tables, so that a SKU name can never be passed where a supplier name is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongly-typed SKU name wrapper
///
/// # Examples
/// ```
/// use supplystat_core::types::SkuName;
///
/// let sku = SkuName::new("Slim Fit Jeans");
/// assert_eq!(sku.as_str(), "Slim Fit Jeans");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkuName(String);

impl SkuName {
    /// Create a new SkuName from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkuName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SkuName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SkuName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Strongly-typed supplier name wrapper
///
/// # Examples
/// ```
/// use supplystat_core::types::SupplierName;
///
/// let supplier = SupplierName::new("Denim Works");
/// assert_eq!(supplier.to_string(), "Denim Works");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SupplierName(String);

impl SupplierName {
    /// Create a new SupplierName from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SupplierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SupplierName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SupplierName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SupplierName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Display identity of a SKU
///
/// A SKU ID is 1-based and identical on every row carrying the same SKU
/// name. It is not a relational key: the same ID repeats once per supplier
/// that ships the SKU. Its only job is to give each SKU a stable slot in a
/// fixed, ordered palette no matter which subset is currently visible.
///
/// # Examples
/// ```
/// use supplystat_core::types::SkuId;
///
/// let id = SkuId::new(3);
/// assert_eq!(id.palette_slot(9), 2);
/// assert_eq!(SkuId::new(10).palette_slot(9), 0);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SkuId(u32);

impl SkuId {
    /// Create a new SkuId
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Index into a palette of `len` entries
    ///
    /// IDs past the end of the palette wrap around. An empty palette always
    /// yields slot 0, and so does the invalid id 0.
    pub fn palette_slot(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.0.saturating_sub(1) as usize) % len
    }
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
