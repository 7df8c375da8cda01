//! Facets: the independently selectable filter dimensions of a listing.

use super::models::CatalogItem;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One filter dimension of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facet {
    Brand,
    Make,
    Model,
    Trim,
    Category,
    DrivingType,
    Year,
    Width,
    Ratio,
    Diameter,
}

impl Facet {
    /// Returns all facets in display order.
    pub fn all() -> &'static [Facet] {
        &[
            Facet::Brand,
            Facet::Make,
            Facet::Model,
            Facet::Trim,
            Facet::Category,
            Facet::DrivingType,
            Facet::Year,
            Facet::Width,
            Facet::Ratio,
            Facet::Diameter,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Facet::Brand => "Brand",
            Facet::Make => "Make",
            Facet::Model => "Model",
            Facet::Trim => "Trim",
            Facet::Category => "Category",
            Facet::DrivingType => "Driving type",
            Facet::Year => "Year",
            Facet::Width => "Width",
            Facet::Ratio => "Ratio",
            Facet::Diameter => "Diameter",
        }
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "brand" => Ok(Facet::Brand),
            "make" => Ok(Facet::Make),
            "model" => Ok(Facet::Model),
            "trim" => Ok(Facet::Trim),
            "category" => Ok(Facet::Category),
            "driving-type" | "drivingtype" => Ok(Facet::DrivingType),
            "year" => Ok(Facet::Year),
            "width" => Ok(Facet::Width),
            "ratio" => Ok(Facet::Ratio),
            "diameter" => Ok(Facet::Diameter),
            _ => Err(format!(
                "Unknown facet: {}. Use: brand, make, model, trim, category, driving-type, year, width, ratio, diameter",
                s
            )),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Brand => "brand",
            Facet::Make => "make",
            Facet::Model => "model",
            Facet::Trim => "trim",
            Facet::Category => "category",
            Facet::DrivingType => "driving-type",
            Facet::Year => "year",
            Facet::Width => "width",
            Facet::Ratio => "ratio",
            Facet::Diameter => "diameter",
        };
        f.write_str(name)
    }
}

/// Distinct values offered for a facet, derived from the unfiltered record list.
///
/// Values are deduplicated and sorted ascending lexically, except `year`
/// which is newest first. Records without a value for the facet contribute nothing.
pub fn compute_facet_options<R: CatalogItem>(records: &[R], facet: Facet) -> Vec<String> {
    let distinct: BTreeSet<String> = records.iter().filter_map(|r| r.facet_value(facet)).collect();
    let mut options: Vec<String> = distinct.into_iter().collect();

    if facet == Facet::Year {
        options.sort_by_key(|year| Reverse(year.parse::<u32>().unwrap_or(0)));
    }

    options
}
