//! Facets command: the option lists offered for each filter.

use crate::catalog::{compute_facet_options, CatalogItem, Facet, FetchState, ProductKind};
use crate::catalog::{Tire, Wheel};
use crate::config::Config;
use crate::format::Formatter;
use crate::source::{load, open_source, CatalogSource};
use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use tracing::info;

/// Lists distinct facet values over the full, unfiltered listing.
pub struct FacetsCommand {
    config: Config,
}

impl FacetsCommand {
    /// Creates a new facets command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes against the configured source. `None` lists every facet.
    pub async fn execute(&self, kind: ProductKind, facet: Option<Facet>) -> Result<String> {
        let source = open_source(&self.config)?;
        self.execute_with_source(source.as_ref(), kind, facet).await
    }

    /// Executes with a provided source (for testing).
    pub async fn execute_with_source<S>(
        &self,
        source: &S,
        kind: ProductKind,
        facet: Option<Facet>,
    ) -> Result<String>
    where
        S: CatalogSource + ?Sized,
    {
        let facets: Vec<Facet> = match facet {
            Some(facet) => vec![facet],
            None => Facet::all().to_vec(),
        };

        let options = match kind {
            ProductKind::Tires => Self::collect::<Tire, S>(source, kind, &facets).await?,
            ProductKind::Wheels => Self::collect::<Wheel, S>(source, kind, &facets).await?,
        };

        Ok(Formatter::new(self.config.format).format_facets(&options))
    }

    async fn collect<R, S>(
        source: &S,
        kind: ProductKind,
        facets: &[Facet],
    ) -> Result<Vec<(Facet, Vec<String>)>>
    where
        R: CatalogItem + DeserializeOwned,
        S: CatalogSource + ?Sized,
    {
        let fetch: FetchState<R> = load(source, kind).await;
        if fetch.is_error {
            bail!("Catalog is unavailable: could not load {} from {}", kind, source.describe());
        }

        let records = fetch.records();
        info!("Computing facet options over {} {}", records.len(), kind);

        Ok(facets.iter().map(|&facet| (facet, compute_facet_options(records, facet))).collect())
    }
}
