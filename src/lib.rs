//! # Profilometer Lab
//!
//! A virtual contact profilometer for teaching surface roughness:
//! - Procedural surface profiles for machined, polished and rough-cast workpieces
//! - A zero-then-scan measurement rig driven on real-time timers
//! - Ra / Rz roughness statistics
//! - A multiple-choice self-check quiz
//!
//! ## Architecture
//!
//! The lab is organized as a workspace with multiple crates:
//!
//! 1. **profilometer-core** - Data model, profile generator, roughness, quiz, events
//! 2. **profilometer-rig** - Scan state machine and timed zero/scan sequences
//! 3. **profilometer-settings** - Configuration files and validation
//! 4. **profilometer-lab** - Command-line binary that runs lab sessions

pub mod cli;

pub use profilometer_core::{
    compute_roughness, generate_profile, score, standard_key, AnswerMap, Error, Profile,
    ProfileSample, QuizAnswerKey, QuizScore, Result, RigEvent, RigListener, Roughness,
    ScanResult, ScanStep, WorkpieceClass,
};
pub use profilometer_rig::{ProfilometerRig, RigConfig, ScanState};
pub use profilometer_settings::{Config, DisplaySettings, MeasurementSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log filter from a `RUST_LOG`-style directive string, INFO when unset or invalid
pub fn env_filter(directives: Option<&str>) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::EnvFilter;

    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Initialize logging
///
/// Sets up structured logging to stderr with:
/// - RUST_LOG environment variable support, INFO by default
/// - Pretty human-readable output, or one JSON object per line with `json`
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .json();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
