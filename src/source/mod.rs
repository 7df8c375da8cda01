//! Catalog record sources: the storefront API or local JSON exports.

pub mod file;
pub mod http;

use crate::catalog::{FetchState, ProductKind};
use crate::config::Config;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;

/// Trait for fetching raw listing payloads - enables mocking for tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the raw JSON body of the listing for `kind`.
    async fn fetch(&self, kind: ProductKind) -> Result<String>;

    /// Describes where records come from, for logging.
    fn describe(&self) -> String;
}

/// Picks the source configured for this run: the API when set, else the data directory.
pub fn open_source(config: &Config) -> Result<Box<dyn CatalogSource>> {
    if let Some(url) = &config.api_url {
        return Ok(Box::new(HttpCatalogSource::new(url, config.timeout_secs)?));
    }

    if let Some(dir) = &config.data_dir {
        return Ok(Box::new(FileCatalogSource::new(dir)));
    }

    bail!("No catalog source configured. Set api_url or data_dir (or TREAD_API_URL / TREAD_DATA_DIR).")
}

/// Parses a listing body: a bare array, or an object whose `data` holds the array.
///
/// A missing or null `data` reads as an empty list.
pub fn parse_records<R: DeserializeOwned>(body: &str) -> Result<Vec<R>> {
    let value: Value = serde_json::from_str(body).context("Listing body is not valid JSON")?;

    let list = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("data") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(data) => data,
        },
        Value::Null => return Ok(Vec::new()),
        other => bail!("Unexpected listing payload: {}", json_kind(&other)),
    };

    serde_json::from_value(list).context("Failed to parse catalog records")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fetches and parses a listing. Failures are logged and reported through `is_error`.
pub async fn load<R, S>(source: &S, kind: ProductKind) -> FetchState<R>
where
    R: DeserializeOwned,
    S: CatalogSource + ?Sized,
{
    debug!("Loading {} from {}", kind, source.describe());

    let result = match source.fetch(kind).await {
        Ok(body) => parse_records(&body),
        Err(err) => Err(err),
    };

    match result {
        Ok(records) => {
            debug!("Loaded {} {}", records.len(), kind);
            FetchState::ready(records)
        }
        Err(err) => {
            warn!("Failed to load {} from {}: {:#}", kind, source.describe(), err);
            FetchState::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, Tire, Wheel};

    struct StaticSource {
        body: Option<String>,
    }

    #[async_trait]
    impl CatalogSource for StaticSource {
        async fn fetch(&self, _kind: ProductKind) -> Result<String> {
            match &self.body {
                Some(body) => Ok(body.clone()),
                None => bail!("connection refused"),
            }
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[test]
    fn test_parse_bare_array() {
        let records: Vec<Tire> =
            parse_records(r#"[{"id": 1, "name": "Alpha"}, {"id": 2, "name": "Beta"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name(), Some("Beta"));
    }

    #[test]
    fn test_parse_envelope() {
        let records: Vec<Wheel> =
            parse_records(r#"{"data": [{"id": "w1", "boltPattern": "5x120"}], "total": 1}"#)
                .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bolt_pattern.as_deref(), Some("5x120"));
    }

    #[test]
    fn test_parse_tolerates_string_numbers() {
        let records: Vec<Tire> = parse_records(
            r#"[{"id": 1, "width": {"value": 205}, "price": 90},
                {"id": 2, "width": {"value": "225"}, "price": "110.00"}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].facet_value(crate::catalog::Facet::Width).as_deref(), Some("225"));
        assert_eq!(records[1].price(), Some(110.0));
    }

    #[test]
    fn test_parse_missing_data_is_empty() {
        let records: Vec<Tire> = parse_records(r#"{"message": "ok"}"#).unwrap();
        assert!(records.is_empty());

        let records: Vec<Tire> = parse_records(r#"{"data": null}"#).unwrap();
        assert!(records.is_empty());

        let records: Vec<Tire> = parse_records("null").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_records::<Tire>("<html>").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));

        let err = parse_records::<Tire>("\"hello\"").unwrap_err();
        assert!(err.to_string().contains("Unexpected listing payload: string"));

        let err = parse_records::<Tire>(r#"[{"name": "no id"}]"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog records"));
    }

    #[test]
    fn test_open_source_requires_configuration() {
        let err = open_source(&Config::new()).err().unwrap();
        assert!(err.to_string().contains("No catalog source configured"));
    }

    #[test]
    fn test_open_source_prefers_api() {
        let config = Config {
            api_url: Some("http://localhost:9".to_string()),
            data_dir: Some("/tmp".into()),
            ..Config::new()
        };
        let source = open_source(&config).unwrap();
        assert!(source.describe().starts_with("http://localhost:9"));

        let config = Config { data_dir: Some("/tmp/catalog".into()), ..Config::new() };
        let source = open_source(&config).unwrap();
        assert!(source.describe().contains("/tmp/catalog"));
    }

    #[tokio::test]
    async fn test_load_ready() {
        let source = StaticSource { body: Some(r#"[{"id": 1}]"#.to_string()) };
        let state: FetchState<Tire> = load(&source, ProductKind::Tires).await;

        assert!(!state.is_loading);
        assert!(!state.is_error);
        assert_eq!(state.records().len(), 1);
    }

    #[tokio::test]
    async fn test_load_fetch_failure() {
        let source = StaticSource { body: None };
        let state: FetchState<Tire> = load(&source, ProductKind::Tires).await;

        assert!(state.is_error);
        assert!(state.data.is_none());
    }

    #[tokio::test]
    async fn test_load_parse_failure() {
        let source = StaticSource { body: Some("not json".to_string()) };
        let state: FetchState<Wheel> = load(&source, ProductKind::Wheels).await;

        assert!(state.is_error);
        assert!(state.records().is_empty());
    }
}
