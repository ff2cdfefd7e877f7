//! Selection model
//!
//! A [`Selection`] is the pair of filters chosen in the two multi-select
//! controls: one over SKU names, one over supplier names. Each axis is a
//! [`Filter`], which keeps "no filter" and "filter to nothing" apart:
//!
//! - [`Filter::Unfiltered`] keeps every row;
//! - [`Filter::Only`] keeps rows whose name is in the set, so an empty set
//!   keeps no rows at all.
//!
//! [`Selection::scope`] folds the two axes into a [`SelectionScope`], the
//! four-way tagged union the aggregators match on.
//!
//! # Examples
//!
//! ```
//! use supplystat_core::selection::{Selection, SelectionScope};
//!
//! let selection = Selection::new().with_suppliers(["Denim Works"]);
//! assert!(matches!(selection.scope(), SelectionScope::SuppliersOnly(_)));
//!
//! // An explicitly empty SKU set is still a SKU filter.
//! let nothing = Selection::new().with_skus(Vec::<String>::new());
//! assert!(matches!(nothing.scope(), SelectionScope::SkusOnly(set) if set.is_empty()));
//! ```

use crate::dataset::SkuLineItem;
use crate::types::{SkuName, SupplierName};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Filter over one selection axis
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T: Ord> {
    /// No filter on this axis
    #[default]
    Unfiltered,
    /// Keep only values in the set; an empty set keeps nothing
    Only(BTreeSet<T>),
}

impl<T: Ord> Filter<T> {
    /// Build a filter that keeps exactly the given values
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<T>,
    {
        Self::Only(values.into_iter().map(Into::into).collect())
    }

    /// Whether this axis narrows the view
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    /// Check if a value passes the filter
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Only(set) => set.contains(value),
        }
    }

    /// The filter set, if any
    pub fn as_set(&self) -> Option<&BTreeSet<T>> {
        match self {
            Self::Unfiltered => None,
            Self::Only(set) => Some(set),
        }
    }
}

impl<T: Ord> From<Option<BTreeSet<T>>> for Filter<T> {
    fn from(value: Option<BTreeSet<T>>) -> Self {
        match value {
            Some(set) => Self::Only(set),
            None => Self::Unfiltered,
        }
    }
}

impl<T: Ord> From<Option<Vec<T>>> for Filter<T> {
    fn from(value: Option<Vec<T>>) -> Self {
        Self::from(value.map(|values| values.into_iter().collect::<BTreeSet<T>>()))
    }
}

// `null` <-> Unfiltered, `[...]` <-> Only. An empty array stays an empty set.
impl<T: Ord + Serialize> Serialize for Filter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.as_set().serialize(serializer)
    }
}

impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for Filter<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<BTreeSet<T>>::deserialize(deserializer).map(Self::from)
    }
}

/// The current drill-down: SKU filter and supplier filter
///
/// Missing keys deserialize as [`Filter::Unfiltered`]; unknown keys are
/// rejected so a misspelt axis cannot silently select everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selection {
    /// Filter on `SKU Name`
    #[serde(default)]
    pub skus: Filter<SkuName>,
    /// Filter on `Supplier Name`
    #[serde(default)]
    pub suppliers: Filter<SupplierName>,
}

impl Selection {
    /// Create a selection with no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given SKU names
    pub fn with_skus<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SkuName>,
    {
        self.skus = Filter::only(names);
        self
    }

    /// Restrict to the given supplier names
    pub fn with_suppliers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SupplierName>,
    {
        self.suppliers = Filter::only(names);
        self
    }

    /// Classify the selection into one of the four aggregation branches
    pub fn scope(&self) -> SelectionScope<'_> {
        match (&self.skus, &self.suppliers) {
            (Filter::Unfiltered, Filter::Unfiltered) => SelectionScope::Everything,
            (Filter::Only(skus), Filter::Unfiltered) => SelectionScope::SkusOnly(skus),
            (Filter::Unfiltered, Filter::Only(suppliers)) => {
                SelectionScope::SuppliersOnly(suppliers)
            }
            (Filter::Only(skus), Filter::Only(suppliers)) => {
                SelectionScope::Both { skus, suppliers }
            }
        }
    }
}

/// Which axes of a [`Selection`] are active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionScope<'a> {
    /// Neither axis is filtered
    Everything,
    /// Only the SKU axis is filtered
    SkusOnly(&'a BTreeSet<SkuName>),
    /// Only the supplier axis is filtered
    SuppliersOnly(&'a BTreeSet<SupplierName>),
    /// Both axes are filtered
    Both {
        skus: &'a BTreeSet<SkuName>,
        suppliers: &'a BTreeSet<SupplierName>,
    },
}

impl SelectionScope<'_> {
    /// Whether a SKU filter is in effect
    pub fn has_sku_filter(&self) -> bool {
        matches!(self, Self::SkusOnly(_) | Self::Both { .. })
    }

    /// Check if a line item falls inside this scope
    pub fn matches(&self, item: &SkuLineItem) -> bool {
        match self {
            Self::Everything => true,
            Self::SkusOnly(skus) => skus.contains(&item.sku_name),
            Self::SuppliersOnly(suppliers) => suppliers.contains(&item.supplier_name),
            Self::Both { skus, suppliers } => {
                skus.contains(&item.sku_name) && suppliers.contains(&item.supplier_name)
            }
        }
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Everything => "everything",
            Self::SkusOnly(_) => "skus-only",
            Self::SuppliersOnly(_) => "suppliers-only",
            Self::Both { .. } => "skus-and-suppliers",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::line_item;

    #[test]
    fn test_unfiltered_matches_everything() {
        let filter: Filter<SkuName> = Filter::Unfiltered;
        assert!(!filter.is_active());
        assert!(filter.matches(&SkuName::new("anything")));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let filter: Filter<SkuName> = Filter::only(Vec::<String>::new());
        assert!(filter.is_active());
        assert!(!filter.matches(&SkuName::new("Widget")));
    }

    #[test]
    fn test_from_option_keeps_empty_distinct_from_none() {
        let none: Filter<SupplierName> = Option::<Vec<SupplierName>>::None.into();
        let empty: Filter<SupplierName> = Some(Vec::<SupplierName>::new()).into();
        assert_eq!(none, Filter::Unfiltered);
        assert_eq!(empty, Filter::Only(BTreeSet::new()));
    }

    #[test]
    fn test_scope_branches() {
        assert_eq!(Selection::new().scope(), SelectionScope::Everything);
        assert!(matches!(
            Selection::new().with_skus(["Widget"]).scope(),
            SelectionScope::SkusOnly(_)
        ));
        assert!(matches!(
            Selection::new().with_suppliers(["S1"]).scope(),
            SelectionScope::SuppliersOnly(_)
        ));
        assert!(matches!(
            Selection::new()
                .with_skus(["Widget"])
                .with_suppliers(["S1"])
                .scope(),
            SelectionScope::Both { .. }
        ));
    }

    #[test]
    fn test_empty_sku_set_with_no_supplier_filter_is_skus_only() {
        let selection = Selection::new().with_skus(Vec::<String>::new());
        let scope = selection.scope();
        assert!(matches!(scope, SelectionScope::SkusOnly(set) if set.is_empty()));
        assert!(scope.has_sku_filter());
    }

    #[test]
    fn test_scope_matches_line_items() {
        let widget_s1 = line_item(1, "Widget", "S1", 10.0, 40.0);
        let gadget_s2 = line_item(2, "Gadget", "S2", 5.0, 25.0);

        let selection = Selection::new()
            .with_skus(["Widget", "Gadget"])
            .with_suppliers(["S1"]);
        let scope = selection.scope();
        assert!(scope.matches(&widget_s1));
        assert!(!scope.matches(&gadget_s2));
    }

    #[test]
    fn test_selection_json_null_vs_empty() {
        let selection: Selection =
            serde_json::from_str(r#"{"skus": [], "suppliers": null}"#).unwrap();
        assert_eq!(selection.skus, Filter::Only(BTreeSet::new()));
        assert_eq!(selection.suppliers, Filter::Unfiltered);

        let missing: Selection = serde_json::from_str("{}").unwrap();
        assert_eq!(missing, Selection::new());

        let json = serde_json::to_value(Selection::new().with_suppliers(["S1"])).unwrap();
        assert_eq!(json, serde_json::json!({"skus": null, "suppliers": ["S1"]}));
    }

    #[test]
    fn test_selection_rejects_unknown_axis() {
        let result = serde_json::from_str::<Selection>(r#"{"sku": ["Widget"]}"#);
        assert!(result.is_err());
    }
}
