//! Output formatting for catalog pages, facet options and saved vehicles (table, JSON, markdown, CSV).

use crate::catalog::{BrowseOutcome, CatalogItem, Facet, PageView};
use crate::config::OutputFormat;
use crate::garage::SavedVehicle;
use serde::Serialize;
use serde_json::json;

/// Formats catalog output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the result of a browse request.
    pub fn format_outcome<R>(&self, outcome: &BrowseOutcome<'_, R>) -> String
    where
        R: CatalogItem + Serialize,
    {
        match outcome {
            BrowseOutcome::Loading => self.status("loading", "Loading catalog..."),
            BrowseOutcome::Unavailable => self.status(
                "unavailable",
                "Catalog is unavailable right now. Please try again later.",
            ),
            BrowseOutcome::NotFound { active_filters } => self.not_found(active_filters),
            BrowseOutcome::Page(view) => self.page(view),
        }
    }

    /// Formats a list of records without pagination details.
    pub fn format_records<R>(&self, records: &[&R]) -> String
    where
        R: CatalogItem + Serialize,
    {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    /// Formats facet option lists.
    pub fn format_facets(&self, facets: &[(Facet, Vec<String>)]) -> String {
        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = facets
                    .iter()
                    .map(|(facet, options)| (facet.to_string(), json!(options)))
                    .collect();
                serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Csv => {
                let mut lines = vec!["facet,value".to_string()];
                for (facet, options) in facets {
                    for option in options {
                        lines.push(format!("{},{}", facet, Self::csv_escape(option)));
                    }
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = Vec::new();
                for (facet, options) in facets {
                    lines.push(format!("### {}", facet.label()));
                    lines.push(String::new());
                    if options.is_empty() {
                        lines.push("*No options*".to_string());
                    }
                    for option in options {
                        lines.push(format!("- {}", option));
                    }
                    lines.push(String::new());
                }
                lines.join("\n").trim_end().to_string()
            }
            OutputFormat::Table => {
                let label_width = 14;
                facets
                    .iter()
                    .map(|(facet, options)| {
                        let values =
                            if options.is_empty() { "-".to_string() } else { options.join(", ") };
                        format!("{:<label_width$}{}", facet.label(), values)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }

    /// Formats the saved vehicles with their positions.
    pub fn format_vehicles(&self, vehicles: &[SavedVehicle]) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(vehicles).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => {
                let mut lines = vec!["index,year,make,model,trim".to_string()];
                for (index, v) in vehicles.iter().enumerate() {
                    lines.push(format!(
                        "{},{},{},{},{}",
                        index,
                        Self::csv_opt(&v.year),
                        Self::csv_opt(&v.make),
                        Self::csv_opt(&v.model),
                        Self::csv_opt(&v.trim)
                    ));
                }
                lines.join("\n")
            }
            _ if vehicles.is_empty() => "No saved vehicles.".to_string(),
            OutputFormat::Markdown => vehicles
                .iter()
                .enumerate()
                .map(|(index, v)| format!("{}. {}", index, v))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Table => vehicles
                .iter()
                .enumerate()
                .map(|(index, v)| format!("[{}] {}", index, v))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn status(&self, state: &str, message: &str) -> String {
        match self.format {
            OutputFormat::Json => json!({ "status": state }).to_string(),
            _ => message.to_string(),
        }
    }

    fn not_found(&self, active_filters: &[String]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&json!({
                "status": "not_found",
                "active_filters": active_filters,
            }))
            .unwrap_or_else(|_| "{}".to_string()),
            OutputFormat::Csv => self.csv_header(),
            _ => {
                let mut lines = vec!["No products found.".to_string()];
                if !active_filters.is_empty() {
                    lines.push(String::new());
                    lines.push("Active filters:".to_string());
                    for filter in active_filters {
                        lines.push(format!("  - {}", filter));
                    }
                    lines.push(String::new());
                    lines.push("Clear filters to see all products.".to_string());
                }
                lines.join("\n")
            }
        }
    }

    fn page<R>(&self, view: &PageView<'_, R>) -> String
    where
        R: CatalogItem + Serialize,
    {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Csv => self.csv_records(&view.items),
            OutputFormat::Table => format!(
                "{}\n\n{}",
                self.table_records(&view.items),
                Self::page_footer(view)
            ),
            OutputFormat::Markdown => format!(
                "{}\n\n*{}*",
                self.markdown_records(&view.items),
                Self::page_footer(view)
            ),
        }
    }

    fn page_footer<R>(view: &PageView<'_, R>) -> String {
        let noun = if view.total_matches == 1 { "match" } else { "matches" };
        format!(
            "Page {} of {} ({} {})",
            view.page, view.total_pages, view.total_matches, noun
        )
    }

    fn price_label(record: &dyn CatalogItem) -> String {
        match (record.discount_price(), record.price()) {
            (Some(sale), _) => format!("{:.2}", sale),
            (None, Some(price)) => format!("{:.2}", price),
            (None, None) => "N/A".to_string(),
        }
    }

    fn truncate(text: &str, width: usize) -> String {
        if text.chars().count() > width {
            let kept: String = text.chars().take(width.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            text.to_string()
        }
    }

    // Table formatting

    fn table_records<R: CatalogItem>(&self, records: &[&R]) -> String {
        let id_width = 10;
        let price_width = 10;
        let year_width = 6;
        let brand_width = 14;
        let size_width = 20;
        let name_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:<price_width$}  {:<year_width$}  {:<brand_width$}  {:<size_width$}  {}",
            "ID", "Price", "Year", "Brand", "Size", "Name"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<year_width$}  {:-<brand_width$}  {:-<size_width$}  {:-<name_width$}",
            "", "", "", "", "", ""
        ));

        for record in records {
            let year = record.year().map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
            let brand = record.facet_value(Facet::Brand).unwrap_or_else(|| "-".to_string());
            let size = match (record.size_label(), record.details()) {
                (Some(size), Some(details)) => format!("{} {}", size, details),
                (Some(size), None) => size,
                (None, Some(details)) => details,
                (None, None) => "-".to_string(),
            };

            lines.push(format!(
                "{:<id_width$}  {:>price_width$}  {:<year_width$}  {:<brand_width$}  {:<size_width$}  {}",
                Self::truncate(record.id(), id_width),
                Self::price_label(*record),
                year,
                Self::truncate(&brand, brand_width),
                Self::truncate(&size, size_width),
                Self::truncate(record.name().unwrap_or_default(), name_width)
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_records<R: CatalogItem>(&self, records: &[&R]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Name | Brand | Size | Year | Price |".to_string());
        lines.push("|----|------|-------|------|------|-------|".to_string());

        for record in records {
            let price = match (record.discount_price(), record.price()) {
                (Some(sale), Some(price)) if sale < price => {
                    format!("{:.2} ~~{:.2}~~", sale, price)
                }
                _ => Self::price_label(*record),
            };

            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                record.id(),
                Self::truncate(record.name().unwrap_or_default(), 40),
                record.facet_value(Facet::Brand).unwrap_or_default(),
                record.size_label().unwrap_or_default(),
                record.year().map(|y| y.to_string()).unwrap_or_default(),
                price
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,name,brand,make,model,trim,category,driving_type,year,width,ratio,diameter,price,discount_price,details"
            .to_string()
    }

    fn csv_records<R: CatalogItem>(&self, records: &[&R]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for record in records {
            let mut fields = vec![
                Self::csv_escape(record.id()),
                Self::csv_escape(record.name().unwrap_or_default()),
            ];

            for facet in Facet::all() {
                fields.push(Self::csv_opt(&record.facet_value(*facet)));
            }

            fields.push(record.price().map(|p| p.to_string()).unwrap_or_default());
            fields.push(record.discount_price().map(|p| p.to_string()).unwrap_or_default());
            fields.push(Self::csv_opt(&record.details()));

            lines.push(fields.join(","));
        }

        lines.join("\n")
    }

    fn csv_opt(value: &Option<String>) -> String {
        value.as_deref().map(Self::csv_escape).unwrap_or_default()
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
