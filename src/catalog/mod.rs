//! Catalog records, facets, and the filter/sort/paginate pipeline.

pub mod facet;
pub mod models;
pub mod pipeline;
pub mod state;

pub use facet::{compute_facet_options, Facet};
pub use models::{CatalogItem, Measure, Named, ProductKind, RecordCore, Tire, Titled, Wheel};
pub use pipeline::{
    apply_filters, apply_sort, browse, compute_visible_page, paginate, BrowseOutcome, FetchState,
    PageSlice, PageView,
};
pub use state::{BrowseState, FilterState, PageState, SortKey, DEFAULT_PAGE_SIZE};
