//! Fixed scientific settings of the engine
//!
//! These are the parts of an OSOAA run that are not scenario inputs: the
//! atmospheric profile, the viewing geometry, the aerosol and hydrosol
//! particle models and the sea-surface/bottom description. The builder
//! interleaves them with the scenario values in the engine's key order.

/// Viewing geometry of the radiance output
#[derive(Debug, Clone, PartialEq)]
pub struct ViewGeometry {
    pub relative_azimuth: f64, // Relative azimuth angle [deg]
    pub level: i64,            // 4 = sea surface 0- (just below the surface)
    pub depth: f64,            // Output depth [m]
}

/// Molecular and aerosol vertical profile
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphereProfile {
    pub pressure: f64,              // Surface pressure [hPa]
    pub rayleigh_scale_height: f64, // [km]
    pub aerosol_scale_height: f64,  // [km]
}

/// Mono-modal log-normal aerosol model (AER.Model 0, SDtype 1)
#[derive(Debug, Clone, PartialEq)]
pub struct AerosolModel {
    pub model: i64,
    pub real_index: f64,
    /// Imaginary refractive index. The engine expects it negative.
    pub imaginary_index: f64,
    pub size_distribution: i64,
    pub modal_radius: f64, // [um]
    pub log_variance: f64,
}

/// Junge-distributed phytoplankton hydrosol (HYD.Model 1)
#[derive(Debug, Clone, PartialEq)]
pub struct HydrosolModel {
    pub model: i64,
    pub profile_type: i64, // 1 = homogeneous
    pub junge_slope: f64,
    pub r_min: f64, // [um]
    pub r_max: f64, // [um]
    pub real_index: f64,
    pub imaginary_index: f64,
    pub mode_rate: f64,
}

/// Sediments, yellow substance and detritus
#[derive(Debug, Clone, PartialEq)]
pub struct DissolvedMatter {
    pub sediment_concentration: f64,  // [mg/L]
    pub yellow_substance_abs440: f64, // [m^-1]
    pub detritus_abs440: f64,         // [m^-1]
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeaSurface {
    pub refractive_index: f64,
    pub surface_albedo: f64,
    pub bottom_type: i64,
    pub bottom_albedo: f64,
}

/// Everything the engine needs that the caller does not choose.
#[derive(Debug, Clone, PartialEq)]
pub struct ScienceDefaults {
    pub view: ViewGeometry,
    pub atmosphere: AtmosphereProfile,
    pub aerosol: AerosolModel,
    pub hydrosol: HydrosolModel,
    pub dissolved: DissolvedMatter,
    pub sea: SeaSurface,
    pub vza_file: String,
}

pub const DEFAULT_VZA_FILE: &str = "LUM_vsVZA.txt";

impl Default for ScienceDefaults {
    fn default() -> Self {
        Self {
            view: ViewGeometry {
                relative_azimuth: 90.0,
                level: 4,
                depth: 0.0,
            },
            atmosphere: AtmosphereProfile {
                pressure: 1013.0,
                rayleigh_scale_height: 8.0,
                aerosol_scale_height: 2.0,
            },
            aerosol: AerosolModel {
                model: 0,
                real_index: 1.45,
                imaginary_index: -0.001,
                size_distribution: 1,
                modal_radius: 0.10,
                log_variance: 0.46,
            },
            hydrosol: HydrosolModel {
                model: 1,
                profile_type: 1,
                junge_slope: 4.0,
                r_min: 0.01,
                r_max: 200.0,
                real_index: 1.05,
                imaginary_index: 0.0,
                mode_rate: 1.0,
            },
            dissolved: DissolvedMatter {
                sediment_concentration: 0.0,
                yellow_substance_abs440: 0.0,
                detritus_abs440: 0.0,
            },
            sea: SeaSurface {
                refractive_index: 1.34,
                surface_albedo: 0.0,
                bottom_type: 1,
                bottom_albedo: 0.30,
            },
            vza_file: DEFAULT_VZA_FILE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aerosol_imaginary_index_is_negative() {
        let defaults = ScienceDefaults::default();
        assert!(defaults.aerosol.imaginary_index < 0.0);
    }

    #[test]
    fn test_junge_radius_bounds_are_ordered() {
        let hydrosol = ScienceDefaults::default().hydrosol;
        assert!(hydrosol.r_min < hydrosol.r_max);
        assert_eq!(hydrosol.junge_slope, 4.0);
    }
}
