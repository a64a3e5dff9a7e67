use super::scan::HeaderPattern;
use super::types::{DataReader, OutputKind, ReadError};
use super::utils::read_table;
use crate::profile::{AngularRadianceProfile, AngularRow};
use std::path::Path;

/// Reader for the radiance-vs-VZA table in `Standard_outputs`.
#[derive(Debug, Clone)]
pub struct VzaReader {
    pub pattern: HeaderPattern,
}

impl Default for VzaReader {
    fn default() -> Self {
        Self {
            pattern: HeaderPattern::vza(),
        }
    }
}

impl DataReader for VzaReader {
    type Profile = AngularRadianceProfile;

    fn read_data(&self, path: &Path) -> Result<Option<AngularRadianceProfile>, ReadError> {
        let Some(table) = read_table(path, &self.pattern, OutputKind::Vza.columns())? else {
            return Ok(None);
        };

        let rows = table
            .iter()
            .filter_map(|values| AngularRow::from_columns(values))
            .collect();

        Ok(Some(AngularRadianceProfile::new(rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::scan::HeaderLabels;
    use std::fs;
    use tempfile::tempdir;

    const VZA_TXT: &str = "\
 Radiance and polarization versus VZA, for the relative azimuth PHI = 90 deg
 Values of VZA and SCA_ANG are given in degrees
  VZA    SCA_ANG        I            REFL        POL_RATE      LPOL        REFL_POL
 -80.00   110.50   0.2500E-01   0.3000E-01   45.00   0.1125E-01   0.1350E-01
   0.00   150.00   0.5000E-02   0.6000E-02   12.00   0.6000E-03   0.7200E-03
  80.00   110.50   0.2600E-01   0.3100E-01   44.00   0.1144E-01   0.1364E-01
";

    #[test]
    fn test_read_vza_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("LUM_vsVZA.txt");
        fs::write(&path, VZA_TXT).unwrap();

        let profile = VzaReader::default().read_data(&path).unwrap().unwrap();

        assert_eq!(profile.len(), 3);
        assert_eq!(profile.vza(), vec![-80.0, 0.0, 80.0]);
        assert_eq!(profile.dolp(), vec![45.0, 12.0, 44.0]);
        assert_eq!(profile.nadir().map(|r| r.scattering_angle), Some(150.0));
    }

    #[test]
    fn test_relabelled_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("LUM_vsVZA.txt");
        fs::write(&path, "THETA  SCAT  I  R  P  LP  RP\n 10 140 1 1 1 1 1\n").unwrap();

        let default = VzaReader::default().read_data(&path);
        assert!(matches!(default, Err(ReadError::Number { line: 1, .. })));

        let reader = VzaReader {
            pattern: HeaderPattern::vza()
                .with_labels(&HeaderLabels("THETA".to_string(), "SCAT".to_string())),
        };
        let profile = reader.read_data(&path).unwrap().unwrap();
        assert_eq!(profile.vza(), vec![10.0]);
    }
}
