use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::attenuation::{AttenuationFit, FitError};
use crate::engine::EngineConfiguration;
use crate::profile::{AngularRadianceProfile, FluxProfile, OceanProfile};

/// Everything one engine run produced.
///
/// Either profile is `None` when the engine did not write the matching file.
#[derive(Debug, Clone)]
pub struct SimulationResults {
    pub config: EngineConfiguration,
    pub flux: Option<FluxProfile>,
    pub flux_path: Option<PathBuf>,
    pub vza: Option<AngularRadianceProfile>,
    pub vza_path: Option<PathBuf>,
    pub started: DateTime<Utc>,
    pub duration: Duration,
}

impl SimulationResults {
    pub fn ocean_profile(&self) -> Option<OceanProfile> {
        self.flux.as_ref().map(FluxProfile::ocean_profile)
    }

    /// Kd fit over the ocean part of the flux profile, if there is one.
    pub fn attenuation(
        &self,
        depth_range: Option<(f64, f64)>,
    ) -> Option<Result<AttenuationFit, FitError>> {
        self.ocean_profile().map(|ocean| ocean.attenuation(depth_range))
    }

    /// Condensed, serializable view of the run.
    pub fn report(&self, depth_range: Option<(f64, f64)>) -> RunReport {
        let ocean = self.ocean_profile();

        let (fit, fit_error) = match self.attenuation(depth_range) {
            Some(Ok(fit)) => (Some(FitSummary::from(&fit)), None),
            Some(Err(e)) => (None, Some(e.to_string())),
            None => (None, None),
        };

        RunReport {
            started: self.started,
            duration_secs: self.duration.as_secs_f64(),
            wavelength_nm: self.config.wavelength_nm(),
            config: self.config.clone(),
            flux_file: self.flux_path.clone(),
            flux_levels: self.flux.as_ref().map(FluxProfile::len),
            ocean_levels: ocean.as_ref().map(OceanProfile::len),
            max_depth: self.flux.as_ref().and_then(FluxProfile::max_depth),
            vza_file: self.vza_path.clone(),
            vza_rows: self.vza.as_ref().map(AngularRadianceProfile::len),
            nadir_reflectance: self
                .vza
                .as_ref()
                .and_then(|vza| vza.nadir().map(|row| row.reflectance)),
            depth_range,
            fit,
            fit_error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FitSummary {
    pub kd: f64,
    pub ed0: f64,
    pub r_squared: f64,
    pub euphotic_depth: f64,
    pub points: usize,
}

impl From<&AttenuationFit> for FitSummary {
    fn from(fit: &AttenuationFit) -> Self {
        Self {
            kd: fit.kd,
            ed0: fit.ed0,
            r_squared: fit.r_squared,
            euphotic_depth: fit.euphotic_depth,
            points: fit.depth_fit.len(),
        }
    }
}

/// JSON run report written by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started: DateTime<Utc>,
    pub duration_secs: f64,
    pub wavelength_nm: Option<f64>,
    pub config: EngineConfiguration,
    pub flux_file: Option<PathBuf>,
    pub flux_levels: Option<usize>,
    pub ocean_levels: Option<usize>,
    pub max_depth: Option<f64>,
    pub vza_file: Option<PathBuf>,
    pub vza_rows: Option<usize>,
    pub nadir_reflectance: Option<f64>,
    pub depth_range: Option<(f64, f64)>,
    pub fit: Option<FitSummary>,
    pub fit_error: Option<String>,
}
