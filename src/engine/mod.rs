//! Everything between a scenario and the engine's output files: building the
//! parameter set, serializing it to a command line, and running the binary.

pub mod builder;
pub mod command;
pub mod context;
pub mod defaults;
pub mod error;
pub mod params;
pub mod runner;

pub use builder::{ParameterBuilder, WorkDirs, ensure_complete};
pub use command::{build_command, display_command};
pub use context::{EXECUTABLE, RunContext};
pub use defaults::{DEFAULT_VZA_FILE, ScienceDefaults};
pub use error::EngineError;
pub use params::{EngineConfiguration, ParamValue, REQUIRED_KEYS};
pub use runner::{DEFAULT_TIMEOUT, ProcessRunner, RunOutput};
