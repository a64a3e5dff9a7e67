use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical inputs of one simulation run.
///
/// Everything else the engine needs is filled in from
/// [`ScienceDefaults`](crate::engine::ScienceDefaults) by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Simulation wavelength [nm]
    pub wavelength_nm: f64,
    /// Solar zenith angle [deg], 0-90
    pub solar_zenith: f64,
    /// Chlorophyll-a concentration [mg/m^3]
    pub chlorophyll: f64,
    /// Aerosol optical thickness at the reference wavelength
    pub aot: f64,
    /// Wind speed driving sea-surface roughness [m/s]
    pub wind_speed: f64,
    /// Ocean depth, sets the range of the vertical profile [m]
    pub sea_depth: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    Wavelength(f64),
    SolarZenith(f64),
    Chlorophyll(f64),
    Aot(f64),
    WindSpeed(f64),
    SeaDepth(f64),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Wavelength(v) => write!(f, "wavelength_nm must be > 0, got {}", v),
            ScenarioError::SolarZenith(v) => {
                write!(f, "solar_zenith must be between 0 and 90 degrees, got {}", v)
            }
            ScenarioError::Chlorophyll(v) => write!(f, "chlorophyll must be >= 0, got {}", v),
            ScenarioError::Aot(v) => write!(f, "aot must be >= 0, got {}", v),
            ScenarioError::WindSpeed(v) => write!(f, "wind_speed must be >= 0, got {}", v),
            ScenarioError::SeaDepth(v) => write!(f, "sea_depth must be > 0, got {}", v),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            wavelength_nm: 550.0,
            solar_zenith: 30.0,
            chlorophyll: 0.1,
            aot: 0.1,
            wind_speed: 5.0,
            sea_depth: 100.0,
        }
    }
}

impl ScenarioParameters {
    pub fn new(
        wavelength_nm: f64,
        solar_zenith: f64,
        chlorophyll: f64,
        aot: f64,
        wind_speed: f64,
        sea_depth: f64,
    ) -> Result<Self, ScenarioError> {
        let scenario = ScenarioParameters {
            wavelength_nm,
            solar_zenith,
            chlorophyll,
            aot,
            wind_speed,
            sea_depth,
        };
        scenario.validate()?;

        Ok(scenario)
    }

    /// Checks the physical ranges. NaN fails every check.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.wavelength_nm.is_nan() || self.wavelength_nm <= 0.0 {
            return Err(ScenarioError::Wavelength(self.wavelength_nm));
        }

        if !(0.0..=90.0).contains(&self.solar_zenith) {
            return Err(ScenarioError::SolarZenith(self.solar_zenith));
        }

        if !(0.0..).contains(&self.chlorophyll) {
            return Err(ScenarioError::Chlorophyll(self.chlorophyll));
        }

        if !(0.0..).contains(&self.aot) {
            return Err(ScenarioError::Aot(self.aot));
        }

        if !(0.0..).contains(&self.wind_speed) {
            return Err(ScenarioError::WindSpeed(self.wind_speed));
        }

        if self.sea_depth.is_nan() || self.sea_depth <= 0.0 {
            return Err(ScenarioError::SeaDepth(self.sea_depth));
        }

        Ok(())
    }

    /// Wavelength in micrometers, the unit the engine expects.
    pub fn wavelength_um(&self) -> f64 {
        self.wavelength_nm / 1000.0
    }

    pub fn with_wavelength(mut self, wavelength_nm: f64) -> Self {
        self.wavelength_nm = wavelength_nm;
        self
    }

    pub fn with_chlorophyll(mut self, chlorophyll: f64) -> Self {
        self.chlorophyll = chlorophyll;
        self
    }

    pub fn with_solar_zenith(mut self, solar_zenith: f64) -> Self {
        self.solar_zenith = solar_zenith;
        self
    }

    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    pub fn with_sea_depth(mut self, sea_depth: f64) -> Self {
        self.sea_depth = sea_depth;
        self
    }
}

impl fmt::Display for ScenarioParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wavelength: {:.1} nm, chlorophyll: {} mg/m^3, solar zenith: {} deg, aot: {}, wind: {} m/s, sea depth: {} m",
            self.wavelength_nm,
            self.chlorophyll,
            self.solar_zenith,
            self.aot,
            self.wind_speed,
            self.sea_depth
        )
    }
}
