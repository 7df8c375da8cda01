//! The filter → sort → paginate pipeline that turns raw records into a visible page.
//!
//! Every function here is pure: inputs are borrowed, results are new lists of
//! references into the caller's records, and nothing is cached between calls.

use super::models::CatalogItem;
use super::state::{BrowseState, FilterState, SortKey};
use crate::filters::{FilterChain, FilterChainBuilder};
use crate::garage::SavedVehicle;
use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

/// Result of the record fetch collaborator.
#[derive(Debug, Clone)]
pub struct FetchState<R> {
    pub data: Option<Vec<R>>,
    pub is_loading: bool,
    pub is_error: bool,
}

impl<R> FetchState<R> {
    /// Fetch in flight; no data yet.
    pub fn loading() -> Self {
        Self { data: None, is_loading: true, is_error: false }
    }

    /// Fetch failed; any data is discarded.
    pub fn failed() -> Self {
        Self { data: None, is_loading: false, is_error: true }
    }

    /// Fetch completed with records.
    pub fn ready(records: Vec<R>) -> Self {
        Self { data: Some(records), is_loading: false, is_error: false }
    }

    /// Records fetched so far; absent data reads as an empty list.
    pub fn records(&self) -> &[R] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// A page of a slice along with the clamped position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlice<'s, T> {
    pub items: &'s [T],
    pub page: usize,
    pub total_pages: usize,
}

/// The visible page of a listing.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "R: Serialize")]
pub struct PageView<'a, R> {
    pub items: Vec<&'a R>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// What a listing view should render.
#[derive(Debug, Clone)]
pub enum BrowseOutcome<'a, R> {
    /// Records are still being fetched.
    Loading,
    /// The fetch failed; nothing is rendered from stale data.
    Unavailable,
    /// Filtering left nothing; the active filters are listed so they can be reset.
    NotFound { active_filters: Vec<String> },
    Page(PageView<'a, R>),
}

/// Builds the filter chain for a filter state and the saved vehicles.
pub fn filter_chain(filters: &FilterState, vehicles: &[SavedVehicle]) -> FilterChain {
    FilterChainBuilder::new().filter_state(filters).saved_vehicles(vehicles).build()
}

/// Returns the records passing the search term, every facet selection and the saved vehicles.
pub fn apply_filters<'a, R: CatalogItem>(
    records: &'a [R],
    filters: &FilterState,
    vehicles: &[SavedVehicle],
) -> Vec<&'a R> {
    filter_chain(filters, vehicles).apply(records)
}

/// Returns a sorted copy of the filtered records. Equal keys keep their input order.
pub fn apply_sort<'a, R: CatalogItem>(records: &[&'a R], sort: SortKey) -> Vec<&'a R> {
    let mut sorted = records.to_vec();

    match sort {
        SortKey::Featured => {}
        SortKey::PriceLow => {
            sorted.sort_by(|a, b| a.effective_price().total_cmp(&b.effective_price()))
        }
        SortKey::PriceHigh => {
            sorted.sort_by(|a, b| b.effective_price().total_cmp(&a.effective_price()))
        }
        SortKey::Newest => sorted.sort_by_key(|r| Reverse(r.year().unwrap_or(0))),
    }

    sorted
}

/// Slices out one page, clamping the page number into `[1, total_pages]`.
///
/// `total_pages` is at least 1 even for an empty list. A zero page size is treated as 1.
pub fn paginate<T>(records: &[T], page: usize, page_size: usize) -> PageSlice<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = records.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(records.len());
    let end = (start + page_size).min(records.len());

    PageSlice { items: &records[start..end], page, total_pages }
}

/// Runs the full pipeline over already-fetched records.
pub fn compute_visible_page<'a, R: CatalogItem>(
    records: &'a [R],
    state: &BrowseState,
    vehicles: &[SavedVehicle],
) -> PageView<'a, R> {
    let filtered = apply_filters(records, &state.filters, vehicles);
    let sorted = apply_sort(&filtered, state.sort);
    let slice = paginate(&sorted, state.page.page, state.page.page_size);

    debug!(
        "{} records, {} after filtering, page {}/{}",
        records.len(),
        sorted.len(),
        slice.page,
        slice.total_pages
    );

    PageView {
        items: slice.items.to_vec(),
        page: slice.page,
        page_size: state.page.page_size.max(1),
        total_pages: slice.total_pages,
        total_matches: sorted.len(),
    }
}

/// Decides what a listing view shows for the current fetch result and state.
pub fn browse<'a, R: CatalogItem>(
    fetch: &'a FetchState<R>,
    state: &BrowseState,
    vehicles: &[SavedVehicle],
) -> BrowseOutcome<'a, R> {
    if fetch.is_loading {
        return BrowseOutcome::Loading;
    }
    if fetch.is_error {
        return BrowseOutcome::Unavailable;
    }

    let view = compute_visible_page(fetch.records(), state, vehicles);
    if view.total_matches == 0 {
        let active_filters = filter_chain(&state.filters, vehicles).descriptions();
        return BrowseOutcome::NotFound { active_filters };
    }

    BrowseOutcome::Page(view)
}
