pub mod flux;
pub mod scan;
pub mod types;
pub mod utils;
pub mod vza;

pub use flux::FluxReader;
pub use scan::{HeaderLabels, HeaderPattern, HeaderScan, ScanState};
pub use types::{DataReader, FLUX_FILE, OutputKind, ReadError, STANDARD_OUTPUTS};
pub use vza::VzaReader;
