use crate::readers::ReadError;
use crate::scenario::ScenarioError;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub enum EngineError {
    MissingExecutable(PathBuf),
    Incomplete(Vec<&'static str>),
    Scenario(ScenarioError),
    Failed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    Timeout {
        limit: Duration,
    },
    Io(std::io::Error),
    Read(ReadError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MissingExecutable(path) => {
                write!(f, "OSOAA executable not found at {}", path.display())
            }
            EngineError::Incomplete(keys) => {
                write!(f, "Engine configuration is missing keys: {}", keys.join(", "))
            }
            EngineError::Scenario(e) => write!(f, "Invalid scenario: {}", e),
            EngineError::Failed {
                code,
                stdout,
                stderr,
            } => {
                let code = code.map_or("none (killed by signal)".to_string(), |c| c.to_string());
                write!(
                    f,
                    "OSOAA simulation failed with return code {}\nSTDOUT: {}\nSTDERR: {}",
                    code,
                    if stdout.is_empty() { "(empty)" } else { stdout.as_str() },
                    if stderr.is_empty() { "(empty)" } else { stderr.as_str() },
                )
            }
            EngineError::Timeout { limit } => {
                write!(f, "OSOAA simulation timed out after {:.1} s", limit.as_secs_f64())
            }
            EngineError::Io(e) => write!(f, "I/O error: {}", e),
            EngineError::Read(e) => write!(f, "Failed to read engine output: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Scenario(e) => Some(e),
            EngineError::Io(e) => Some(e),
            EngineError::Read(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> EngineError {
        EngineError::Io(err)
    }
}

impl From<ScenarioError> for EngineError {
    fn from(err: ScenarioError) -> EngineError {
        EngineError::Scenario(err)
    }
}

impl From<ReadError> for EngineError {
    fn from(err: ReadError) -> EngineError {
        EngineError::Read(err)
    }
}
