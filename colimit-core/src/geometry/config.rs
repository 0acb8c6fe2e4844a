use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{EARTH_RADIUS, FlatEarth, GeometryModel, Spherical};
use crate::Error;

/// Earth model selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[default]
    Flat,
    Spherical,
}

/// Configuration of the geometry model locations are evaluated under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub model: ModelKind,
    /// Earth radius in meters
    pub earth_radius: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::Flat,
            earth_radius: EARTH_RADIUS,
        }
    }
}

impl GeometryConfig {
    /// Reads a configuration from JSON, missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON for this structure
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Creates the configured geometry model
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the earth radius is not a positive finite number
    pub fn build(&self) -> Result<Arc<dyn GeometryModel>, Error> {
        validate_config(self)?;
        log::debug!(
            "Using {:?} geometry with earth radius {} m",
            self.model,
            self.earth_radius
        );
        let model: Arc<dyn GeometryModel> = match self.model {
            ModelKind::Flat => Arc::new(FlatEarth::new(self.earth_radius)),
            ModelKind::Spherical => Arc::new(Spherical::new(self.earth_radius)),
        };
        Ok(model)
    }
}

fn validate_config(config: &GeometryConfig) -> Result<(), Error> {
    if !config.earth_radius.is_finite() || config.earth_radius <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "earth radius must be a positive number of meters, got {}",
            config.earth_radius
        )));
    }
    Ok(())
}
