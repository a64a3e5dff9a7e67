use std::fmt;
use std::path::{Path, PathBuf};

/// Decodes one engine output table.
///
/// `Ok(None)` means the file is absent, which is not an error: a run may only
/// produce one of the two tables.
pub trait DataReader {
    type Profile;

    fn read_data(&self, path: &Path) -> Result<Option<Self::Profile>, ReadError>;
}

#[derive(Debug)]
pub enum ReadError {
    Io(PathBuf, std::io::Error),
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    Number {
        line: usize,
        token: String,
    },
    Empty(PathBuf),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(path, e) => write!(f, "Failed to read {}: {}", path.display(), e),
            ReadError::ColumnCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} columns, found {}",
                line, expected, found
            ),
            ReadError::Number { line, token } => {
                write!(f, "line {}: cannot parse '{}' as a number", line, token)
            }
            ReadError::Empty(path) => write!(f, "{} contains no data rows", path.display()),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(_, e) => Some(e),
            _ => None,
        }
    }
}

/// The two tables the engine writes under its result root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Flux,
    Vza,
}

pub const FLUX_FILE: &str = "Advanced_outputs/Flux.txt";
pub const STANDARD_OUTPUTS: &str = "Standard_outputs";

impl OutputKind {
    /// Location of the table under `result_root`. The radiance table is
    /// named by the run configuration.
    pub fn path(&self, result_root: &Path, vza_file: &str) -> PathBuf {
        match self {
            OutputKind::Flux => result_root.join(FLUX_FILE),
            OutputKind::Vza => result_root.join(STANDARD_OUTPUTS).join(vza_file),
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            OutputKind::Flux => 9,
            OutputKind::Vza => 7,
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Flux => write!(f, "flux profile"),
            OutputKind::Vza => write!(f, "radiance vs VZA"),
        }
    }
}
