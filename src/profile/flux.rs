use serde::Serialize;

/// One level of the engine's vertical flux profile.
///
/// Fluxes are normalized to the solar irradiance at TOA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluxRow {
    pub level: i64,       // Layer index
    pub z: f64,           // Altitude (>0) or depth (<0) [m]
    pub ed_direct: f64,   // Direct downwelling flux
    pub ed_diffuse: f64,  // Diffuse downwelling flux
    pub ed_total: f64,    // Total downwelling flux (Ed)
    pub eu_direct: f64,   // Direct upwelling flux
    pub eu_diffuse: f64,  // Diffuse upwelling flux
    pub eu_total: f64,    // Total upwelling flux (Eu)
    pub eu_ed_ratio: f64, // Eu/Ed
}

impl FluxRow {
    /// Builds a row from the 9 columns of Flux.txt. The layer index is
    /// truncated from its parsed float value.
    pub fn from_columns(values: &[f64]) -> Option<Self> {
        match *values {
            [level, z, ed_direct, ed_diffuse, ed_total, eu_direct, eu_diffuse, eu_total, ratio] => {
                Some(Self {
                    level: level as i64,
                    z,
                    ed_direct,
                    ed_diffuse,
                    ed_total,
                    eu_direct,
                    eu_diffuse,
                    eu_total,
                    eu_ed_ratio: ratio,
                })
            }
            _ => None,
        }
    }
}

/// Full atmosphere + ocean profile, in the engine's output order
/// (top of atmosphere first).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FluxProfile {
    rows: Vec<FluxRow>,
}

impl FluxProfile {
    pub fn new(rows: Vec<FluxRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FluxRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn levels(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.level).collect()
    }

    pub fn z(&self) -> Vec<f64> {
        self.column(|r| r.z)
    }

    pub fn ed_direct(&self) -> Vec<f64> {
        self.column(|r| r.ed_direct)
    }

    pub fn ed_diffuse(&self) -> Vec<f64> {
        self.column(|r| r.ed_diffuse)
    }

    pub fn ed_total(&self) -> Vec<f64> {
        self.column(|r| r.ed_total)
    }

    pub fn eu_direct(&self) -> Vec<f64> {
        self.column(|r| r.eu_direct)
    }

    pub fn eu_diffuse(&self) -> Vec<f64> {
        self.column(|r| r.eu_diffuse)
    }

    pub fn eu_total(&self) -> Vec<f64> {
        self.column(|r| r.eu_total)
    }

    pub fn eu_ed_ratio(&self) -> Vec<f64> {
        self.column(|r| r.eu_ed_ratio)
    }

    fn column<F: Fn(&FluxRow) -> f64>(&self, f: F) -> Vec<f64> {
        self.rows.iter().map(f).collect()
    }

    /// Ocean-only view: rows with z < 0, depth = -z, order unchanged.
    ///
    /// The surface row (z = 0) belongs to the atmosphere side; readings just
    /// below the surface sit at a small negative z.
    pub fn ocean_profile(&self) -> OceanProfile {
        OceanProfile {
            rows: self
                .rows
                .iter()
                .filter(|r| r.z < 0.0)
                .map(OceanRow::from)
                .collect(),
        }
    }

    /// Highest level of the profile.
    pub fn toa(&self) -> Option<&FluxRow> {
        self.rows.iter().max_by(|a, b| a.z.total_cmp(&b.z))
    }

    /// Rows closest to the air-sea interface from above (z >= 0) and from
    /// below (z < 0).
    pub fn surface_pair(&self) -> Option<(&FluxRow, &FluxRow)> {
        let above = self
            .rows
            .iter()
            .filter(|r| r.z >= 0.0)
            .min_by(|a, b| a.z.total_cmp(&b.z))?;
        let below = self
            .rows
            .iter()
            .filter(|r| r.z < 0.0)
            .max_by(|a, b| a.z.total_cmp(&b.z))?;
        Some((above, below))
    }

    /// Deepest ocean depth reached [m], positive.
    pub fn max_depth(&self) -> Option<f64> {
        self.rows
            .iter()
            .filter(|r| r.z < 0.0)
            .map(|r| -r.z)
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// A flux level below the sea surface, indexed by positive depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OceanRow {
    pub level: i64,
    pub depth: f64, // [m], positive downward
    pub ed_direct: f64,
    pub ed_diffuse: f64,
    pub ed_total: f64,
    pub eu_direct: f64,
    pub eu_diffuse: f64,
    pub eu_total: f64,
    pub eu_ed_ratio: f64,
}

impl From<&FluxRow> for OceanRow {
    fn from(row: &FluxRow) -> Self {
        Self {
            level: row.level,
            depth: -row.z,
            ed_direct: row.ed_direct,
            ed_diffuse: row.ed_diffuse,
            ed_total: row.ed_total,
            eu_direct: row.eu_direct,
            eu_diffuse: row.eu_diffuse,
            eu_total: row.eu_total,
            eu_ed_ratio: row.eu_ed_ratio,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OceanProfile {
    rows: Vec<OceanRow>,
}

impl OceanProfile {
    pub fn rows(&self) -> &[OceanRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn depths(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.depth).collect()
    }

    pub fn ed_total(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.ed_total).collect()
    }

    pub fn eu_total(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.eu_total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(level: i64, z: f64, ed_direct: f64, ed_diffuse: f64) -> FluxRow {
        let ed_total = ed_direct + ed_diffuse;
        let eu_total = 0.02 * ed_total;
        FluxRow {
            level,
            z,
            ed_direct,
            ed_diffuse,
            ed_total,
            eu_direct: 0.0,
            eu_diffuse: eu_total,
            eu_total,
            eu_ed_ratio: 0.02,
        }
    }

    // TOA down to the bottom, with an unsorted tail to check that order is kept
    fn sample_profile() -> FluxProfile {
        FluxProfile::new(vec![
            row(0, 300000.0, 0.80, 0.00),
            row(1, 1000.0, 0.70, 0.15),
            row(2, 0.0, 0.65, 0.20),
            row(3, -0.01, 0.60, 0.20),
            row(4, -10.0, 0.30, 0.15),
            row(5, -50.0, 0.02, 0.05),
            row(6, -25.0, 0.10, 0.10),
        ])
    }

    #[test]
    fn test_ocean_profile_selects_negative_z_only() {
        let profile = sample_profile();
        let ocean = profile.ocean_profile();

        assert_eq!(ocean.len(), 4);
        assert_eq!(ocean.depths(), vec![0.01, 10.0, 50.0, 25.0]);
        assert_eq!(
            ocean.rows().iter().map(|r| r.level).collect::<Vec<_>>(),
            vec![3, 4, 5, 6]
        );
        // non-depth columns pass through unchanged
        for (ocean_row, flux_row) in ocean.rows().iter().zip(&profile.rows()[3..]) {
            assert_eq!(ocean_row.ed_total, flux_row.ed_total);
            assert_eq!(ocean_row.eu_ed_ratio, flux_row.eu_ed_ratio);
            assert_eq!(ocean_row.depth, -flux_row.z);
        }
    }

    #[test]
    fn test_ocean_profile_of_atmosphere_only_is_empty() {
        let profile = FluxProfile::new(vec![row(0, 100.0, 1.0, 0.0), row(1, 0.0, 0.9, 0.1)]);
        assert!(profile.ocean_profile().is_empty());
        assert_eq!(profile.max_depth(), None);
    }

    #[test]
    fn test_toa_surface_and_depth() {
        let profile = sample_profile();

        assert_eq!(profile.toa().map(|r| r.level), Some(0));

        let (above, below) = profile.surface_pair().unwrap();
        assert_eq!(above.z, 0.0);
        assert_eq!(below.z, -0.01);
        assert!(below.ed_total < above.ed_total);

        assert_eq!(profile.max_depth(), Some(50.0));
    }

    #[test]
    fn test_from_columns() {
        let values = [12.0, -3.5, 0.1, 0.2, 0.3, 0.0, 0.01, 0.01, 0.0333];
        let r = FluxRow::from_columns(&values).unwrap();

        assert_eq!(r.level, 12);
        assert_eq!(r.z, -3.5);
        assert_eq!(r.eu_ed_ratio, 0.0333);
        assert!(FluxRow::from_columns(&values[..8]).is_none());
    }
}
