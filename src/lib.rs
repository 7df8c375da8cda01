//! tread-catalog - Tire and wheel catalog browser
//!
//! Loads storefront listings from an API or local JSON exports and narrows them
//! with search, facet selections and saved vehicles, then sorts and pages the result.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod garage;
pub mod source;

pub use catalog::{BrowseOutcome, BrowseState, CatalogItem, Facet, ProductKind, SortKey};
pub use catalog::{Tire, Wheel};
pub use config::Config;
pub use garage::{Garage, SavedVehicle};
