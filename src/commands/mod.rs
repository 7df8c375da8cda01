//! CLI command implementations.

pub mod browse;
pub mod facets;
pub mod garage;

pub use browse::BrowseCommand;
pub use facets::FacetsCommand;
pub use garage::GarageCommand;
