//! Record filtering system with composable filters.

pub mod facet;
pub mod search;
pub mod vehicle;

use crate::catalog::{CatalogItem, Facet, FilterState};
use crate::garage::SavedVehicle;

pub use facet::FacetFilter;
pub use search::SearchFilter;
pub use vehicle::SavedVehicleFilter;

/// Trait for filtering catalog records.
pub trait Filter: Send + Sync {
    /// Returns true if the record passes the filter.
    fn matches(&self, record: &dyn CatalogItem) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a record passes all filters.
    pub fn matches(&self, record: &dyn CatalogItem) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Returns the records that pass, in input order, without copying them.
    pub fn apply<'a, R: CatalogItem>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from browse state.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a free-text search filter.
    pub fn search(mut self, term: &str) -> Self {
        let filter = SearchFilter::new(term);
        if !filter.is_empty() {
            self.chain.add(filter);
        }
        self
    }

    /// Adds a facet filter for the selected values.
    pub fn facet<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.chain.add(FacetFilter::new(facet, values));
        }
        self
    }

    /// Adds the search term and every active facet selection.
    pub fn filter_state(self, state: &FilterState) -> Self {
        let builder = self.search(&state.search);
        Facet::all()
            .iter()
            .fold(builder, |builder, facet| builder.facet(*facet, state.selected(*facet).cloned()))
    }

    /// Adds the saved-vehicle compatibility filter.
    pub fn saved_vehicles(mut self, vehicles: &[SavedVehicle]) -> Self {
        if !vehicles.is_empty() {
            self.chain.add(SavedVehicleFilter::new(vehicles));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
