//! Height samples and the profile they form

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};

/// One stylus reading: sample index along the traverse and surface height in µm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    /// Sample index along the traverse
    pub position: usize,
    /// Height offset from the reference line
    pub height: f64,
}

impl ProfileSample {
    /// Create a sample
    pub fn new(position: usize, height: f64) -> Self {
        debug_assert!(height.is_finite(), "ProfileSample height must be finite: {height}");
        Self { position, height }
    }
}

/// Ordered sequence of samples produced by one scan
///
/// Positions always run `0..len` in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile")]
pub struct Profile {
    samples: Vec<ProfileSample>,
}

/// Unchecked wire form of [`Profile`]
#[derive(Deserialize)]
struct RawProfile {
    samples: Vec<ProfileSample>,
}

impl TryFrom<RawProfile> for Profile {
    type Error = ProfileError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        let mut profile = Profile::new();
        for sample in raw.samples {
            profile.push_sample(sample)?;
        }
        Ok(profile)
    }
}

impl Profile {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from heights, numbering positions from zero
    ///
    /// Rejects NaN or infinite heights.
    pub fn from_heights<I>(heights: I) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = f64>,
    {
        let samples = heights
            .into_iter()
            .enumerate()
            .map(|(position, height)| {
                if height.is_finite() {
                    Ok(ProfileSample { position, height })
                } else {
                    Err(ProfileError::NonFiniteHeight { position })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { samples })
    }

    /// Append the next sample, assigning it the next position
    pub(crate) fn push_height(&mut self, height: f64) {
        let position = self.samples.len();
        self.samples.push(ProfileSample::new(position, height));
    }

    /// Append `sample`, which must carry the next position and a finite height
    pub fn push_sample(&mut self, sample: ProfileSample) -> Result<(), ProfileError> {
        let expected = self.samples.len();
        if sample.position != expected {
            return Err(ProfileError::OutOfOrder {
                expected,
                found: sample.position,
            });
        }
        if !sample.height.is_finite() {
            return Err(ProfileError::NonFiniteHeight {
                position: sample.position,
            });
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Samples in traverse order
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// Sample at `position`
    pub fn get(&self, position: usize) -> Option<&ProfileSample> {
        self.samples.get(position)
    }

    /// Iterator over heights in traverse order
    pub fn heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.height)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no samples were recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Copy of the first `count` samples, as seen part-way through a scan
    pub fn prefix(&self, count: usize) -> Profile {
        Profile {
            samples: self.samples[..count.min(self.samples.len())].to_vec(),
        }
    }
}
