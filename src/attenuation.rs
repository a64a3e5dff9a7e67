//! Diffuse attenuation coefficient (Kd) from a depth/irradiance profile
//!
//! Downwelling irradiance in a homogeneous water column decays roughly
//! exponentially with depth:
//!
//! ```text
//! Ed(z) = Ed0 * exp(-Kd * z)
//! ```
//!
//! Taking the natural log turns this into a straight line,
//! `ln(Ed) = ln(Ed0) - Kd * z`, which is fitted by ordinary least squares.
//!
//! ## Steps
//!
//! 1. Keep rows inside the optional depth window `[lo, hi]` (inclusive)
//! 2. Drop rows with `Ed <= 0`, where the log is undefined, and non-finite values
//! 3. Fit `ln(Ed)` against depth
//! 4. `Kd = -slope`, `Ed0 = exp(intercept)`
//! 5. R² computed in log space, 1.0 when the log values have no variance
//! 6. Euphotic depth `4.6 / Kd`, the depth of 1% surface light
//!    (`-ln(0.01) ≈ 4.6`), NaN when `Kd <= 0`
//!
//! ## References
//!
//! - Kirk, J. T. O. (2011). *Light and Photosynthesis in Aquatic Ecosystems*
//!   (3rd ed.). Cambridge University Press.
//! - Lee, Z., et al. (2009). Euphotic zone depth: Its derivation and implication to
//!   ocean-color remote sensing. *Journal of Geophysical Research*, 114, C01009.

use crate::profile::OceanProfile;
use serde::Serialize;
use std::fmt;

/// `-ln(0.01)` rounded as used for the 1% light level.
pub const EUPHOTIC_FACTOR: f64 = 4.6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttenuationFit {
    pub kd: f64,              // Diffuse attenuation coefficient [m^-1]
    pub ed0: f64,             // Extrapolated irradiance at depth 0
    pub r_squared: f64,       // Goodness of fit in log space
    pub depth_fit: Vec<f64>,  // Depths that entered the fit [m]
    pub ed_fitted: Vec<f64>,  // Model irradiance at depth_fit
    pub euphotic_depth: f64,  // 4.6 / Kd [m], NaN when Kd <= 0
}

#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    LengthMismatch { depth: usize, irradiance: usize },
    /// Fewer than two usable points, or all of them at the same depth.
    Underdetermined { valid: usize },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::LengthMismatch { depth, irradiance } => write!(
                f,
                "depth and irradiance lengths differ ({} vs {})",
                depth, irradiance
            ),
            FitError::Underdetermined { valid } => write!(
                f,
                "cannot fit Kd: need at least two distinct depths with positive irradiance, got {} valid points",
                valid
            ),
        }
    }
}

impl std::error::Error for FitError {}

/// Fits `ln(ed)` against `depth`, optionally restricted to `depth_range`.
pub fn fit_kd(
    depth: &[f64],
    ed: &[f64],
    depth_range: Option<(f64, f64)>,
) -> Result<AttenuationFit, FitError> {
    if depth.len() != ed.len() {
        return Err(FitError::LengthMismatch {
            depth: depth.len(),
            irradiance: ed.len(),
        });
    }

    let (x, y): (Vec<f64>, Vec<f64>) = depth
        .iter()
        .zip(ed)
        .filter(|&(&z, _)| depth_range.is_none_or(|(lo, hi)| lo <= z && z <= hi))
        .filter(|&(&z, &e)| z.is_finite() && e.is_finite() && e > 0.0)
        .map(|(&z, &e)| (z, e.ln()))
        .unzip();

    let n = x.len();
    if n < 2 {
        return Err(FitError::Underdetermined { valid: n });
    }

    let x_mean = mean(&x);
    let y_mean = mean(&y);
    let sxx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
    if sxx == 0.0 {
        return Err(FitError::Underdetermined { valid: n });
    }
    let sxy: f64 = x
        .iter()
        .zip(&y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum();

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let ln_fitted: Vec<f64> = x.iter().map(|xi| intercept + slope * xi).collect();
    let ss_res: f64 = y
        .iter()
        .zip(&ln_fitted)
        .map(|(yi, fi)| (yi - fi).powi(2))
        .sum();
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    let kd = -slope;
    let euphotic_depth = if kd > 0.0 {
        EUPHOTIC_FACTOR / kd
    } else {
        f64::NAN
    };

    Ok(AttenuationFit {
        kd,
        ed0: intercept.exp(),
        r_squared,
        depth_fit: x,
        ed_fitted: ln_fitted.into_iter().map(f64::exp).collect(),
        euphotic_depth,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl OceanProfile {
    /// Kd of the total downwelling irradiance.
    pub fn attenuation(&self, depth_range: Option<(f64, f64)>) -> Result<AttenuationFit, FitError> {
        fit_kd(&self.depths(), &self.ed_total(), depth_range)
    }
}
