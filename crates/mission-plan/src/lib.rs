pub mod doctor;
pub mod init;
pub mod loader;
pub mod waypoint;
mod column;
mod error;

use serde::Deserialize;

pub use error::{PlanError, Result};
pub use init::MissionInit;
pub use waypoint::{route_length_m, Waypoint};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CsvCfg {
    /// Single field separator character.
    pub delimiter: char,
    /// First line holds column names and is not data.
    pub skip_header: bool,
}

impl Default for CsvCfg {
    fn default() -> Self {
        Self { delimiter: mission_csv::DEFAULT_DELIMITER, skip_header: true }
    }
}

/// Pre-flight bounds checked by [`doctor::check_mission`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_velocity_mps: f32,
    pub max_alt_m: f32,
    /// Max distance of any waypoint from the first one.
    pub max_radius_m: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_velocity_mps: 15.0, max_alt_m: 500.0, max_radius_m: 5_000.0 }
    }
}
