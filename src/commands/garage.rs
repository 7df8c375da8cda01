//! Garage command: manage saved vehicles.

use crate::config::Config;
use crate::format::Formatter;
use crate::garage::{Garage, GarageError, SavedVehicle};
use anyhow::{bail, Context, Result};
use tracing::info;

/// Lists and edits the saved vehicle file.
pub struct GarageCommand {
    garage: Garage,
    formatter: Formatter,
}

impl GarageCommand {
    /// Opens the garage configured for this run.
    pub fn open(config: &Config) -> Result<Self> {
        let path = config
            .garage_path()
            .context("Could not determine where to keep saved vehicles; set garage_path")?;

        let garage = Garage::open(&path)?;
        Ok(Self { garage, formatter: Formatter::new(config.format) })
    }

    pub fn list(&self) -> String {
        self.formatter.format_vehicles(self.garage.vehicles())
    }

    /// Saves a vehicle. At least one field must be set.
    pub fn add(&mut self, vehicle: SavedVehicle) -> Result<String> {
        if vehicle.is_blank() {
            bail!("Vehicle needs at least one of --make, --model, --year or --trim");
        }

        let label = vehicle.to_string();
        let index = self.commit(|garage| Ok(garage.add(vehicle)))?;

        info!("Saved vehicle {} to {}", label, self.garage.path().display());
        Ok(format!("Saved [{}] {}", index, label))
    }

    pub fn remove(&mut self, index: usize) -> Result<String> {
        let removed = self.commit(|garage| garage.remove(index))?;
        Ok(format!("Removed {}", removed))
    }

    pub fn clear(&mut self) -> Result<String> {
        let count = self.commit(|garage| {
            let count = garage.vehicles().len();
            garage.clear();
            Ok(count)
        })?;
        Ok(format!("Removed {} saved vehicle(s)", count))
    }

    /// Applies an edit to a copy of the garage and keeps it only once it is on disk.
    fn commit<T>(
        &mut self,
        edit: impl FnOnce(&mut Garage) -> Result<T, GarageError>,
    ) -> Result<T> {
        let mut next = self.garage.clone();
        let output = edit(&mut next)?;
        next.save()?;
        self.garage = next;
        Ok(output)
    }
}
