//! Browse command: one page of a filtered, sorted listing.

use crate::catalog::{browse, BrowseOutcome, BrowseState, CatalogItem, FetchState, ProductKind};
use crate::catalog::{Tire, Wheel};
use crate::config::Config;
use crate::format::Formatter;
use crate::garage::{Garage, SavedVehicle};
use crate::source::{load, open_source, CatalogSource};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Renders a listing page for the given browse state.
pub struct BrowseCommand {
    config: Config,
    state: BrowseState,
    use_garage: bool,
}

impl BrowseCommand {
    /// Creates a new browse command. Saved vehicles are applied by default.
    pub fn new(config: Config, state: BrowseState) -> Self {
        Self { config, state, use_garage: true }
    }

    /// Enables or disables the saved-vehicle filter.
    pub fn use_garage(mut self, enabled: bool) -> Self {
        self.use_garage = enabled;
        self
    }

    /// Executes against the configured source and returns formatted output.
    pub async fn execute(&self, kind: ProductKind) -> Result<String> {
        let source = open_source(&self.config)?;
        self.execute_with_source(source.as_ref(), kind).await
    }

    /// Executes with a provided source (for testing).
    pub async fn execute_with_source<S>(&self, source: &S, kind: ProductKind) -> Result<String>
    where
        S: CatalogSource + ?Sized,
    {
        let vehicles = self.saved_vehicles()?;
        if !vehicles.is_empty() {
            debug!("Applying {} saved vehicles", vehicles.len());
        }

        let output = match kind {
            ProductKind::Tires => self.render::<Tire, S>(source, kind, &vehicles).await,
            ProductKind::Wheels => self.render::<Wheel, S>(source, kind, &vehicles).await,
        };
        Ok(output)
    }

    async fn render<R, S>(&self, source: &S, kind: ProductKind, vehicles: &[SavedVehicle]) -> String
    where
        R: CatalogItem + Serialize + DeserializeOwned,
        S: CatalogSource + ?Sized,
    {
        let fetch: FetchState<R> = load(source, kind).await;
        let outcome = browse(&fetch, &self.state, vehicles);

        match &outcome {
            BrowseOutcome::Page(view) => info!(
                "Showing page {}/{} of {} matching {}",
                view.page, view.total_pages, view.total_matches, kind
            ),
            BrowseOutcome::NotFound { .. } => info!("No {} match the current filters", kind),
            _ => {}
        }

        Formatter::new(self.config.format).format_outcome(&outcome)
    }

    fn saved_vehicles(&self) -> Result<Vec<SavedVehicle>> {
        if !self.use_garage {
            return Ok(Vec::new());
        }

        let Some(path) = self.config.garage_path() else {
            return Ok(Vec::new());
        };

        let garage = Garage::open(&path)
            .with_context(|| format!("Failed to load saved vehicles from {}", path.display()))?;
        Ok(garage.vehicles().to_vec())
    }
}
