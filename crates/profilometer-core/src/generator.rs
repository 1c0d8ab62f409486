//! Procedural surface profiles
//!
//! Each workpiece class is modelled as a deterministic trend plus bounded
//! positive uniform noise. The amplitude ordering polished < machined < rough
//! is what makes the Ra/Rz of the three classes come out in the same order.
//!
//! The random source is always injected: [`generate_profile`] takes any
//! [`rand::Rng`], and the rig asks a [`ProfileSource`] for whole profiles so
//! tests can substitute fixed surfaces.

use crate::data::{Profile, WorkpieceClass};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Samples taken across one traverse
pub const DEFAULT_SAMPLE_COUNT: usize = 80;

/// Generate a synthetic profile of `sample_count` heights for `workpiece`
///
/// Height `i` is `workpiece.trend(i) + U(0, workpiece.noise_amplitude())`.
pub fn generate_profile<R>(workpiece: WorkpieceClass, sample_count: usize, rng: &mut R) -> Profile
where
    R: Rng + ?Sized,
{
    let amplitude = workpiece.noise_amplitude();
    let mut profile = Profile::new();
    for i in 0..sample_count {
        let noise: f64 = rng.random::<f64>() * amplitude;
        profile.push_height(workpiece.trend(i) + noise);
    }
    profile
}

/// Supplies whole profiles to the rig when a scan starts
pub trait ProfileSource: Send + Sync {
    /// Produce a profile of exactly `sample_count` samples
    fn generate(&self, workpiece: WorkpieceClass, sample_count: usize) -> Profile;
}

/// Unseeded source backed by the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomProfileSource;

impl ProfileSource for RandomProfileSource {
    fn generate(&self, workpiece: WorkpieceClass, sample_count: usize) -> Profile {
        generate_profile(workpiece, sample_count, &mut rand::rng())
    }
}

/// Reproducible source for demonstrations and regression checks
#[derive(Debug)]
pub struct SeededProfileSource {
    rng: Mutex<StdRng>,
}

impl SeededProfileSource {
    /// Create a source whose sequence of profiles is fixed by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ProfileSource for SeededProfileSource {
    fn generate(&self, workpiece: WorkpieceClass, sample_count: usize) -> Profile {
        let mut rng = self.rng.lock();
        generate_profile(workpiece, sample_count, &mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roughness::compute_roughness;

    #[test]
    fn test_sample_count_and_positions() {
        let mut rng = StdRng::seed_from_u64(1);
        for class in WorkpieceClass::ALL {
            let profile = generate_profile(class, DEFAULT_SAMPLE_COUNT, &mut rng);
            assert_eq!(profile.len(), DEFAULT_SAMPLE_COUNT);
            for (i, sample) in profile.samples().iter().enumerate() {
                assert_eq!(sample.position, i);
                assert!(sample.height.is_finite());
            }
        }
    }

    #[test]
    fn test_zero_samples_gives_empty_profile() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_profile(WorkpieceClass::Rough, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_heights_stay_within_trend_plus_noise() {
        let mut rng = StdRng::seed_from_u64(42);
        for class in WorkpieceClass::ALL {
            let profile = generate_profile(class, 500, &mut rng);
            for sample in profile.samples() {
                let noise = sample.height - class.trend(sample.position);
                assert!(noise >= -1e-12, "{class}: noise {noise} below zero");
                assert!(noise < class.noise_amplitude() + 1e-12);
            }
        }
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = SeededProfileSource::new(7);
        let b = SeededProfileSource::new(7);
        assert_eq!(
            a.generate(WorkpieceClass::Machined, 80),
            b.generate(WorkpieceClass::Machined, 80)
        );
    }

    #[test]
    fn test_successive_random_profiles_differ() {
        let source = RandomProfileSource;
        let first = source.generate(WorkpieceClass::Polished, 80);
        let second = source.generate(WorkpieceClass::Polished, 80);
        assert_ne!(first, second);
    }

    #[test]
    fn test_roughness_orders_by_class() {
        // Averaged over many scans the classes separate cleanly.
        let mut rng = StdRng::seed_from_u64(2024);
        let mean_ra = |class: WorkpieceClass, rng: &mut StdRng| {
            let runs = 50;
            (0..runs)
                .map(|_| {
                    compute_roughness(&generate_profile(class, DEFAULT_SAMPLE_COUNT, rng))
                        .map(|r| r.ra)
                        .unwrap_or_default()
                })
                .sum::<f64>()
                / runs as f64
        };
        let polished = mean_ra(WorkpieceClass::Polished, &mut rng);
        let machined = mean_ra(WorkpieceClass::Machined, &mut rng);
        let rough = mean_ra(WorkpieceClass::Rough, &mut rng);
        assert!(polished < machined, "{polished} !< {machined}");
        assert!(machined < rough, "{machined} !< {rough}");
    }
}
