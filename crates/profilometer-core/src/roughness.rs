//! Roughness parameters
//!
//! `Ra` is the mean of absolute heights. `Rz` is the signed peak-to-valley
//! span `max(h) - min(h)`; the valley is taken on the signed height, not its
//! absolute value.

use crate::data::Profile;
use crate::error::ProfileError;
use crate::units::format_micrometres;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Roughness parameters of one profile, in the profile's height units (µm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Roughness {
    /// Arithmetic mean roughness
    pub ra: f64,
    /// Maximum height of the profile
    pub rz: f64,
}

impl fmt::Display for Roughness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = f.precision().unwrap_or(4);
        write!(
            f,
            "Ra = {}, Rz = {}",
            format_micrometres(self.ra, decimals),
            format_micrometres(self.rz, decimals)
        )
    }
}

/// Compute Ra and Rz over every sample of `profile`
///
/// No rounding is applied. An empty profile has no roughness.
pub fn compute_roughness(profile: &Profile) -> Result<Roughness, ProfileError> {
    if profile.is_empty() {
        return Err(ProfileError::Empty);
    }

    let mut abs_sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for height in profile.heights() {
        abs_sum += height.abs();
        max = max.max(height);
        min = min.min(height);
    }

    Ok(Roughness {
        ra: abs_sum / profile.len() as f64,
        rz: max - min,
    })
}
