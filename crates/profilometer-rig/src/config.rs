//! Runtime configuration of the rig
//!
//! Timing of the zero and scan sequences plus the traverse resolution.

use profilometer_core::{
    RigError, DEFAULT_SAMPLE_COUNT, INITIAL_STYLUS_POSITION, REFERENCE_STYLUS_POSITION,
    SCAN_END_POSITION,
};
use std::time::Duration;

/// Validated rig configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RigConfig {
    /// Samples per traverse
    pub sample_count: usize,
    /// Interval between successive samples
    pub scan_tick: Duration,
    /// Delay before the stylus drops onto the reference corner
    pub zero_engage_delay: Duration,
    /// Settle time after touching the reference before the rig is zeroed
    pub zero_settle_delay: Duration,
    /// Stylus parking position before zeroing and after reset
    pub initial_stylus_position: f64,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            scan_tick: Duration::from_millis(60),
            zero_engage_delay: Duration::from_millis(100),
            zero_settle_delay: Duration::from_millis(800),
            initial_stylus_position: INITIAL_STYLUS_POSITION,
        }
    }
}

impl RigConfig {
    /// Check the configuration, returning it unchanged if valid
    pub fn validated(self) -> Result<Self, RigError> {
        if self.sample_count == 0 {
            return Err(RigError::InvalidConfig {
                reason: "sample count must be > 0".to_string(),
            });
        }
        let pos = self.initial_stylus_position;
        if !(INITIAL_STYLUS_POSITION..=SCAN_END_POSITION).contains(&pos)
            || pos == REFERENCE_STYLUS_POSITION
        {
            return Err(RigError::InvalidConfig {
                reason: format!(
                    "initial stylus position {} must lie in [{}, {}] and differ from the reference {}",
                    pos, INITIAL_STYLUS_POSITION, SCAN_END_POSITION, REFERENCE_STYLUS_POSITION
                ),
            });
        }
        Ok(self)
    }

    /// Configuration with every delay collapsed to `tick`, for fast runs
    pub fn with_uniform_timing(mut self, tick: Duration) -> Self {
        self.scan_tick = tick;
        self.zero_engage_delay = tick;
        self.zero_settle_delay = tick;
        self
    }

    /// Wall time of a full traverse, saturating at `Duration::MAX`
    pub fn scan_duration(&self) -> Duration {
        u32::try_from(self.sample_count)
            .ok()
            .and_then(|count| self.scan_tick.checked_mul(count))
            .unwrap_or(Duration::MAX)
    }
}
