//! Driver for the OSOAA ocean-atmosphere radiative-transfer engine.
//!
//! A [`ScenarioParameters`] is expanded into the engine's full parameter set,
//! the engine is run on it, and the flux and radiance tables it writes are
//! read back as typed profiles. [`attenuation::fit_kd`] derives the diffuse
//! attenuation coefficient from the ocean part of the flux profile.

pub mod attenuation;
pub mod config;
pub mod engine;
pub mod profile;
pub mod readers;
pub mod results;
pub mod scenario;

pub use attenuation::{AttenuationFit, FitError, fit_kd};
pub use config::{Config, ConfigError};
pub use engine::{EngineConfiguration, EngineError, ParameterBuilder, RunContext};
pub use profile::{AngularRadianceProfile, FluxProfile, OceanProfile};
pub use results::{RunReport, SimulationResults};
pub use scenario::{ScenarioError, ScenarioParameters};
