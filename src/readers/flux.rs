use super::scan::HeaderPattern;
use super::types::{DataReader, OutputKind, ReadError};
use super::utils::read_table;
use crate::profile::{FluxProfile, FluxRow};
use std::path::Path;

/// Reader for `Advanced_outputs/Flux.txt`.
#[derive(Debug, Clone)]
pub struct FluxReader {
    pub pattern: HeaderPattern,
}

impl Default for FluxReader {
    fn default() -> Self {
        Self {
            pattern: HeaderPattern::flux(),
        }
    }
}

impl DataReader for FluxReader {
    type Profile = FluxProfile;

    fn read_data(&self, path: &Path) -> Result<Option<FluxProfile>, ReadError> {
        let Some(table) = read_table(path, &self.pattern, OutputKind::Flux.columns())? else {
            return Ok(None);
        };

        let rows = table
            .iter()
            .filter_map(|values| FluxRow::from_columns(values))
            .collect();

        Ok(Some(FluxProfile::new(rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const FLUX_TXT: &str = "\
 Upward and downward irradiances (normalised to the solar irradiance at TOA)

 Level    Z(m)      Edir_down   Edif_down   Etot_down   Edir_up     Edif_up     Etot_up     Eup/Edown
                                                                                                      
     0   300000.00  0.8660E+00  0.0000E+00  0.8660E+00  0.0000E+00  0.1200E+00  0.1200E+00  0.1386E+00
    13        0.00  0.7500E+00  0.9000E-01  0.8400E+00  0.0000E+00  0.3000E-01  0.3000E-01  0.3571E-01
    14       -0.01  0.7000E+00  0.1200E+00  0.8200E+00  0.0000E+00  0.1500E-01  0.1500E-01  0.1829E-01
    20      -10.00  0.3000E+00  0.1000E+00  0.4000E+00  0.0000E+00  0.8000E-02  0.8000E-02  0.2000E-01
";

    #[test]
    fn test_read_flux_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Flux.txt");
        fs::write(&path, FLUX_TXT).unwrap();

        let profile = FluxReader::default().read_data(&path).unwrap().unwrap();

        assert_eq!(profile.len(), 4);
        assert_eq!(profile.levels(), vec![0, 13, 14, 20]);
        assert_eq!(profile.z(), vec![300000.0, 0.0, -0.01, -10.0]);
        assert_eq!(profile.ed_total()[3], 0.4);
        assert_eq!(profile.ocean_profile().depths(), vec![0.01, 10.0]);
    }

    #[test]
    fn test_missing_flux_file_is_none() {
        let dir = tempdir().unwrap();
        let result = FluxReader::default()
            .read_data(&dir.path().join("Advanced_outputs/Flux.txt"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_truncated_row_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Flux.txt");
        fs::write(&path, format!("{}    21  -20.00  0.1  0.1\n", FLUX_TXT)).unwrap();

        let result = FluxReader::default().read_data(&path);
        assert!(matches!(
            result,
            Err(ReadError::ColumnCount {
                line: 9,
                expected: 9,
                found: 4
            })
        ));
    }
}
