//! Data models for catalog records (tires and wheels) and their lookup references.

use super::facet::Facet;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lookup reference identified by a `name` label (brand, make, model, trim, category).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: Option<String>,
}

impl Named {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()) }
    }

    fn label(&self) -> Option<String> {
        self.name.clone()
    }
}

/// Lookup reference identified by a `title` label (driving type).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Titled {
    #[serde(default)]
    pub title: Option<String>,
}

impl Titled {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()) }
    }

    fn label(&self) -> Option<String> {
        self.title.clone()
    }
}

/// Lookup reference wrapping a number (width, ratio, diameter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    #[serde(default, deserialize_with = "lenient_number")]
    pub value: Option<f64>,
}

impl Measure {
    pub fn new(value: f64) -> Self {
        Self { value: Some(value) }
    }

    fn label(&self) -> Option<String> {
        self.value.map(|v| v.to_string())
    }
}

/// Fields shared by every catalog record, whatever the product kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCore {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<Named>,
    #[serde(default)]
    pub make: Option<Named>,
    #[serde(default)]
    pub model: Option<Named>,
    #[serde(default)]
    pub trim: Option<Named>,
    #[serde(default)]
    pub category: Option<Named>,
    #[serde(default)]
    pub driving_type: Option<Titled>,
    #[serde(default)]
    pub width: Option<Measure>,
    #[serde(default)]
    pub ratio: Option<Measure>,
    #[serde(default)]
    pub diameter: Option<Measure>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub discount_price: Option<f64>,
}

impl RecordCore {
    /// Creates a bare record with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: Some(name.into()), ..Self::default() }
    }

    /// Returns the display value of a facet, or `None` when the reference is absent or blank.
    pub fn facet_value(&self, facet: Facet) -> Option<String> {
        let value = match facet {
            Facet::Brand => self.brand.as_ref().and_then(Named::label),
            Facet::Make => self.make.as_ref().and_then(Named::label),
            Facet::Model => self.model.as_ref().and_then(Named::label),
            Facet::Trim => self.trim.as_ref().and_then(Named::label),
            Facet::Category => self.category.as_ref().and_then(Named::label),
            Facet::DrivingType => self.driving_type.as_ref().and_then(Titled::label),
            Facet::Year => self.year.map(|y| y.to_string()),
            Facet::Width => self.width.as_ref().and_then(Measure::label),
            Facet::Ratio => self.ratio.as_ref().and_then(Measure::label),
            Facet::Diameter => self.diameter.as_ref().and_then(Measure::label),
        };

        value.filter(|v| !v.trim().is_empty())
    }
}

/// Common interface over tire and wheel records used by filters, sorting and output.
pub trait CatalogItem {
    /// Returns the shared record fields.
    fn core(&self) -> &RecordCore;

    /// Kind-specific details (load index, bolt pattern, ...) for display.
    fn details(&self) -> Option<String>;

    fn id(&self) -> &str {
        &self.core().id
    }

    fn name(&self) -> Option<&str> {
        self.core().name.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.core().description.as_deref()
    }

    fn facet_value(&self, facet: Facet) -> Option<String> {
        self.core().facet_value(facet)
    }

    fn price(&self) -> Option<f64> {
        self.core().price
    }

    fn discount_price(&self) -> Option<f64> {
        self.core().discount_price
    }

    fn year(&self) -> Option<u32> {
        self.core().year
    }

    /// Price used for ordering: the discounted price when set, else the list price, else 0.
    fn effective_price(&self) -> f64 {
        self.discount_price().or(self.price()).unwrap_or(0.0)
    }

    /// Size label such as `225/45R17` for tires or `17x8` for wheels.
    fn size_label(&self) -> Option<String> {
        let width = self.facet_value(Facet::Width);
        let ratio = self.facet_value(Facet::Ratio);
        let diameter = self.facet_value(Facet::Diameter);

        match (width, ratio, diameter) {
            (Some(w), Some(r), Some(d)) => Some(format!("{}/{}R{}", w, r, d)),
            (Some(w), None, Some(d)) => Some(format!("{}x{}", d, w)),
            (None, None, Some(d)) => Some(format!("R{}", d)),
            _ => None,
        }
    }
}

/// A tire listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tire {
    #[serde(flatten)]
    pub core: RecordCore,
    #[serde(default)]
    pub load_index: Option<u32>,
    #[serde(default)]
    pub speed_rating: Option<String>,
}

impl Tire {
    pub fn new(core: RecordCore) -> Self {
        Self { core, ..Self::default() }
    }
}

impl CatalogItem for Tire {
    fn core(&self) -> &RecordCore {
        &self.core
    }

    fn details(&self) -> Option<String> {
        match (self.load_index, self.speed_rating.as_deref()) {
            (Some(load), Some(speed)) => Some(format!("{}{}", load, speed)),
            (Some(load), None) => Some(load.to_string()),
            (None, Some(speed)) => Some(speed.to_string()),
            (None, None) => None,
        }
    }
}

/// A wheel listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wheel {
    #[serde(flatten)]
    pub core: RecordCore,
    #[serde(default)]
    pub bolt_pattern: Option<String>,
    #[serde(default)]
    pub offset: Option<i32>,
}

impl Wheel {
    pub fn new(core: RecordCore) -> Self {
        Self { core, ..Self::default() }
    }
}

impl CatalogItem for Wheel {
    fn core(&self) -> &RecordCore {
        &self.core
    }

    fn details(&self) -> Option<String> {
        match (self.bolt_pattern.as_deref(), self.offset) {
            (Some(pattern), Some(offset)) => Some(format!("{} ET{}", pattern, offset)),
            (Some(pattern), None) => Some(pattern.to_string()),
            (None, Some(offset)) => Some(format!("ET{}", offset)),
            (None, None) => None,
        }
    }
}

/// Which listing a catalog request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Tires,
    Wheels,
}

impl ProductKind {
    /// Path segment of the listing endpoint and stem of the local data file.
    pub fn path(&self) -> &'static str {
        match self {
            ProductKind::Tires => "tires",
            ProductKind::Wheels => "wheels",
        }
    }
}

impl FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tires" | "tire" | "tyres" | "tyre" => Ok(ProductKind::Tires),
            "wheels" | "wheel" | "rims" => Ok(ProductKind::Wheels),
            _ => Err(format!("Unknown product kind: {}. Use: tires, wheels", s)),
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts numeric or string identifiers.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Number(n) => n.to_string(),
        RawScalar::Text(s) => s,
        RawScalar::Other(_) => String::new(),
    })
}

/// Accepts a number or a numeric string; anything else is "no year".
fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Number(n)) if n.is_finite() && n >= 0.0 => Some(n as u32),
        Some(RawScalar::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a number or a numeric string such as `"225"`; anything else is absent.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Number(n)) => Some(n),
        Some(RawScalar::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}
