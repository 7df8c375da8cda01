//! Browse state: filter selections, sort key and page position.
//!
//! All state values are immutable; transitions return a new value. Any change
//! to the filters or the page size sends the view back to page 1.

use super::facet::Facet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Page size used by the listing pages.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Search term plus per-facet selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub selections: BTreeMap<Facet, BTreeSet<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected values for a facet; empty when the facet is unconstrained.
    pub fn selected(&self, facet: Facet) -> impl Iterator<Item = &String> {
        self.selections.get(&facet).into_iter().flatten()
    }

    /// Returns true when neither a search term nor any selection is active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.selections.values().all(BTreeSet::is_empty)
    }
}

/// Ordering applied to the filtered records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Upstream fetch order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Newest,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "featured" => Ok(SortKey::Featured),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "newest" => Ok(SortKey::Newest),
            _ => Err(format!(
                "Unknown sort: {}. Use: featured, price-low, price-high, newest",
                s
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Featured => write!(f, "featured"),
            SortKey::PriceLow => write!(f, "price-low"),
            SortKey::PriceHigh => write!(f, "price-high"),
            SortKey::Newest => write!(f, "newest"),
        }
    }
}

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page: page.max(1), page_size: page_size.max(1) }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Full state of a listing view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseState {
    pub filters: FilterState,
    pub sort: SortKey,
    pub page: PageState,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the search term.
    pub fn with_search(&self, term: impl Into<String>) -> Self {
        let mut next = self.first_page();
        next.filters.search = term.into();
        next
    }

    /// Replaces the selection set of one facet. An empty set clears the facet.
    pub fn with_selection<I, S>(&self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.first_page();
        let values: BTreeSet<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| !v.trim().is_empty())
            .collect();

        if values.is_empty() {
            next.filters.selections.remove(&facet);
        } else {
            next.filters.selections.insert(facet, values);
        }
        next
    }

    /// Adds the value to the facet's selection, or removes it if already selected.
    pub fn toggle_value(&self, facet: Facet, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut values: BTreeSet<String> = self.filters.selected(facet).cloned().collect();
        if !values.remove(&value) {
            values.insert(value);
        }
        self.with_selection(facet, values)
    }

    /// Drops the search term and all facet selections.
    pub fn clear_filters(&self) -> Self {
        let mut next = self.first_page();
        next.filters = FilterState::default();
        next
    }

    /// Changes the sort key; the current page is kept.
    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self { sort, ..self.clone() }
    }

    /// Moves to a page. Values below 1 become 1; the upper bound is applied at pagination.
    pub fn with_page(&self, page: usize) -> Self {
        let mut next = self.clone();
        next.page.page = page.max(1);
        next
    }

    /// Changes the page size and returns to the first page.
    pub fn with_page_size(&self, page_size: usize) -> Self {
        let mut next = self.clone();
        next.page = PageState::new(1, page_size);
        next
    }

    fn first_page(&self) -> Self {
        self.with_page(1)
    }
}
