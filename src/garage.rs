//! Saved vehicle profiles ("garage") persisted as JSON on disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// A vehicle description saved by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedVehicle {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub trim: Option<String>,
}

impl SavedVehicle {
    /// Returns true when no field carries a value.
    pub fn is_blank(&self) -> bool {
        [&self.make, &self.model, &self.year, &self.trim]
            .iter()
            .all(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

impl fmt::Display for SavedVehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.year, &self.make, &self.model, &self.trim]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|v| !v.trim().is_empty())
            .collect();

        if parts.is_empty() {
            write!(f, "(any vehicle)")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

/// Errors raised while reading or updating the garage.
#[derive(Debug, Error)]
pub enum GarageError {
    #[error("failed to access garage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("garage file {path} is not valid: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no saved vehicle at position {0}")]
    NoSuchVehicle(usize),
}

/// Durable list of saved vehicles.
#[derive(Debug, Clone)]
pub struct Garage {
    path: PathBuf,
    vehicles: Vec<SavedVehicle>,
}

impl Garage {
    /// Default garage location under the user's data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("tread-catalog").join("garage.json"))
    }

    /// Opens the garage at `path`. A missing file is an empty garage.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GarageError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("No garage at {}, starting empty", path.display());
            return Ok(Self { path, vehicles: Vec::new() });
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|source| GarageError::Io { path: path.clone(), source })?;

        let vehicles = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content)
                .map_err(|source| GarageError::Corrupt { path: path.clone(), source })?
        };

        debug!("Loaded garage from {}", path.display());
        Ok(Self { path, vehicles })
    }

    /// Returns the file backing this garage.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved vehicles in insertion order.
    pub fn vehicles(&self) -> &[SavedVehicle] {
        &self.vehicles
    }

    /// Appends a vehicle and returns its position.
    pub fn add(&mut self, vehicle: SavedVehicle) -> usize {
        self.vehicles.push(vehicle);
        self.vehicles.len() - 1
    }

    /// Removes the vehicle at `index`.
    pub fn remove(&mut self, index: usize) -> Result<SavedVehicle, GarageError> {
        if index >= self.vehicles.len() {
            return Err(GarageError::NoSuchVehicle(index));
        }
        Ok(self.vehicles.remove(index))
    }

    /// Removes every saved vehicle.
    pub fn clear(&mut self) {
        self.vehicles.clear();
    }

    /// Writes the garage to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<(), GarageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|source| GarageError::Io { path: parent.to_path_buf(), source })?;
        }

        let json = serde_json::to_string_pretty(&self.vehicles)
            .map_err(|source| GarageError::Corrupt { path: self.path.clone(), source })?;

        std::fs::write(&self.path, json)
            .map_err(|source| GarageError::Io { path: self.path.clone(), source })?;

        debug!("Saved {} vehicles to {}", self.vehicles.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn camry() -> SavedVehicle {
        SavedVehicle {
            make: Some("Toyota".to_string()),
            model: Some("Camry".to_string()),
            year: Some("2020".to_string()),
            trim: Some("LE".to_string()),
        }
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let garage = Garage::open(dir.path().join("garage.json")).unwrap();
        assert!(garage.vehicles().is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("garage.json");

        let mut garage = Garage::open(&path).unwrap();
        assert_eq!(garage.add(camry()), 0);
        garage.save().unwrap();

        let reopened = Garage::open(&path).unwrap();
        assert_eq!(reopened.vehicles(), &[camry()]);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let mut garage = Garage::open(dir.path().join("garage.json")).unwrap();
        garage.add(camry());
        garage.add(SavedVehicle { model: Some("Civic".to_string()), ..Default::default() });

        let removed = garage.remove(0).unwrap();
        assert_eq!(removed, camry());
        assert_eq!(garage.vehicles().len(), 1);

        let err = garage.remove(5).unwrap_err();
        assert!(matches!(err, GarageError::NoSuchVehicle(5)));
        assert_eq!(err.to_string(), "no saved vehicle at position 5");
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let mut garage = Garage::open(dir.path().join("garage.json")).unwrap();
        garage.add(camry());
        garage.clear();
        assert!(garage.vehicles().is_empty());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garage.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Garage::open(&path).unwrap_err();
        assert!(matches!(err, GarageError::Corrupt { .. }));
        assert!(err.to_string().contains("is not valid"));
    }

    #[test]
    fn test_empty_file_is_empty_garage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garage.json");
        std::fs::write(&path, "  \n").unwrap();

        let garage = Garage::open(&path).unwrap();
        assert!(garage.vehicles().is_empty());
    }

    #[test]
    fn test_partial_vehicle_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garage.json");
        std::fs::write(&path, r#"[{"model": "Tacoma"}, {}]"#).unwrap();

        let garage = Garage::open(&path).unwrap();
        assert_eq!(garage.vehicles()[0].model.as_deref(), Some("Tacoma"));
        assert!(garage.vehicles()[0].make.is_none());
        assert!(garage.vehicles()[1].is_blank());
    }

    #[test]
    fn test_vehicle_display() {
        assert_eq!(camry().to_string(), "2020 Toyota Camry LE");
        assert_eq!(SavedVehicle::default().to_string(), "(any vehicle)");
        assert!(!camry().is_blank());
    }

    #[test]
    fn test_default_path_location() {
        if let Some(path) = Garage::default_path() {
            assert!(path.ends_with("tread-catalog/garage.json"));
        }
    }
}
