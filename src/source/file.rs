//! File source reading listing exports from a local directory.

use super::CatalogSource;
use crate::catalog::ProductKind;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads `<dir>/tires.json` and `<dir>/wheels.json`.
pub struct FileCatalogSource {
    dir: PathBuf,
}

impl FileCatalogSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    fn listing_path(&self, kind: ProductKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.path()))
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self, kind: ProductKind) -> Result<String> {
        let path = self.listing_path(kind);
        debug!("Reading {}", path.display());

        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read listing file: {}", path.display()))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
