//! Soft compatibility filter against the user's saved vehicles.

use super::Filter;
use crate::catalog::{CatalogItem, Facet};
use crate::garage::SavedVehicle;

/// Passes records compatible with at least one saved vehicle.
///
/// Only the vehicle model is compared. A saved vehicle without a model
/// accepts every record, and an empty garage disables the filter.
pub struct SavedVehicleFilter {
    models: Vec<Option<String>>,
}

impl SavedVehicleFilter {
    /// Creates a filter from the saved vehicles.
    pub fn new(vehicles: &[SavedVehicle]) -> Self {
        let models = vehicles
            .iter()
            .map(|v| v.model.clone().filter(|m| !m.is_empty()))
            .collect();
        Self { models }
    }
}

impl Filter for SavedVehicleFilter {
    fn matches(&self, record: &dyn CatalogItem) -> bool {
        if self.models.is_empty() {
            return true;
        }

        let record_model = record.facet_value(Facet::Model);
        self.models.iter().any(|model| match model {
            None => true,
            Some(model) => record_model.as_deref() == Some(model.as_str()),
        })
    }

    fn description(&self) -> String {
        let models: Vec<&str> =
            self.models.iter().map(|m| m.as_deref().unwrap_or("any model")).collect();
        format!("Fits saved vehicle: {}", models.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Named, RecordCore, Tire};

    fn make_tire(model: Option<&str>) -> Tire {
        Tire::new(RecordCore { model: model.map(Named::new), ..RecordCore::new("t", "Tire") })
    }

    fn vehicle(model: Option<&str>) -> SavedVehicle {
        SavedVehicle {
            make: Some("Toyota".to_string()),
            model: model.map(String::from),
            year: Some("2020".to_string()),
            trim: None,
        }
    }

    #[test]
    fn test_no_vehicles_matches_all() {
        let filter = SavedVehicleFilter::new(&[]);
        assert!(filter.matches(&make_tire(Some("Camry"))));
        assert!(filter.matches(&make_tire(None)));
    }

    #[test]
    fn test_model_must_match() {
        let filter = SavedVehicleFilter::new(&[vehicle(Some("Camry"))]);
        assert!(filter.matches(&make_tire(Some("Camry"))));
        assert!(!filter.matches(&make_tire(Some("Corolla"))));
        assert!(!filter.matches(&make_tire(None)));
    }

    #[test]
    fn test_any_vehicle_may_match() {
        let filter = SavedVehicleFilter::new(&[vehicle(Some("Camry")), vehicle(Some("Tacoma"))]);
        assert!(filter.matches(&make_tire(Some("Camry"))));
        assert!(filter.matches(&make_tire(Some("Tacoma"))));
        assert!(!filter.matches(&make_tire(Some("RAV4"))));
    }

    #[test]
    fn test_vehicle_without_model_accepts_everything() {
        let filter = SavedVehicleFilter::new(&[vehicle(Some("Camry")), vehicle(Some(""))]);
        assert!(filter.matches(&make_tire(Some("Corolla"))));
        assert!(filter.matches(&make_tire(None)));

        let filter = SavedVehicleFilter::new(&[vehicle(None)]);
        assert!(filter.matches(&make_tire(Some("Anything"))));
    }

    #[test]
    fn test_model_compared_as_stored() {
        let filter = SavedVehicleFilter::new(&[vehicle(Some(" Camry"))]);
        assert!(!filter.matches(&make_tire(Some("Camry"))));
        assert!(filter.matches(&make_tire(Some(" Camry"))));

        let filter = SavedVehicleFilter::new(&[vehicle(Some("camry"))]);
        assert!(!filter.matches(&make_tire(Some("Camry"))));
    }

    #[test]
    fn test_make_year_and_trim_are_ignored() {
        let mut saved = vehicle(Some("Camry"));
        saved.make = Some("Honda".to_string());
        saved.year = Some("1999".to_string());
        saved.trim = Some("XLE".to_string());

        let filter = SavedVehicleFilter::new(&[saved]);
        assert!(filter.matches(&make_tire(Some("Camry"))));
    }

    #[test]
    fn test_description() {
        let filter = SavedVehicleFilter::new(&[vehicle(Some("Camry")), vehicle(None)]);
        assert_eq!(filter.description(), "Fits saved vehicle: Camry | any model");
    }
}
