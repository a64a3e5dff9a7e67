use serde::Serialize;

/// One viewing direction of the radiance-vs-VZA table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngularRow {
    pub vza: f64,                   // Viewing zenith angle [deg], signed
    pub scattering_angle: f64,      // [deg]
    pub intensity: f64,             // Stokes I, normalized radiance (pi*L/Esun)
    pub reflectance: f64,           // pi*L/Ed
    pub dolp: f64,                  // Degree of linear polarization [%]
    pub polarized_intensity: f64,   // Polarized intensity
    pub polarized_reflectance: f64, // Polarized reflectance
}

impl AngularRow {
    pub fn from_columns(values: &[f64]) -> Option<Self> {
        match *values {
            [vza, scattering_angle, intensity, reflectance, dolp, pol_i, pol_refl] => Some(Self {
                vza,
                scattering_angle,
                intensity,
                reflectance,
                dolp,
                polarized_intensity: pol_i,
                polarized_reflectance: pol_refl,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AngularRadianceProfile {
    rows: Vec<AngularRow>,
}

impl AngularRadianceProfile {
    pub fn new(rows: Vec<AngularRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[AngularRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vza(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.vza).collect()
    }

    pub fn scattering_angle(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.scattering_angle).collect()
    }

    pub fn intensity(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.intensity).collect()
    }

    pub fn reflectance(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.reflectance).collect()
    }

    pub fn dolp(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.dolp).collect()
    }

    pub fn polarized_intensity(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.polarized_intensity).collect()
    }

    pub fn polarized_reflectance(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.polarized_reflectance).collect()
    }

    /// Row looking closest to straight down (minimal |VZA|). The first one
    /// wins on ties.
    pub fn nadir(&self) -> Option<&AngularRow> {
        self.rows
            .iter()
            .reduce(|best, r| if r.vza.abs() < best.vza.abs() { r } else { best })
    }

    /// (min, max) viewing zenith angle.
    pub fn vza_range(&self) -> Option<(f64, f64)> {
        let first = self.rows.first()?.vza;
        Some(self.rows.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.vza), hi.max(r.vza))
        }))
    }
}
