//! Typed views of the engine's output tables

pub mod angular;
pub mod flux;

pub use angular::{AngularRadianceProfile, AngularRow};
pub use flux::{FluxProfile, FluxRow, OceanProfile, OceanRow};
