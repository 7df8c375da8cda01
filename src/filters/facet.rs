//! Facet membership filter.

use super::Filter;
use crate::catalog::{CatalogItem, Facet};
use std::collections::BTreeSet;

/// Passes records whose facet value is any of the selected values.
pub struct FacetFilter {
    facet: Facet,
    values: BTreeSet<String>,
}

impl FacetFilter {
    /// Creates a filter for one facet. An empty selection matches everything.
    pub fn new<I, S>(facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { facet, values: values.into_iter().map(Into::into).collect() }
    }

    /// Returns the facet this filter constrains.
    pub fn facet(&self) -> Facet {
        self.facet
    }
}

impl Filter for FacetFilter {
    fn matches(&self, record: &dyn CatalogItem) -> bool {
        if self.values.is_empty() {
            return true;
        }

        record.facet_value(self.facet).is_some_and(|value| self.values.contains(&value))
    }

    fn description(&self) -> String {
        let values: Vec<&str> = self.values.iter().map(String::as_str).collect();
        format!("{}: {}", self.facet.label(), values.join(" | "))
    }
}
