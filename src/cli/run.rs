//! `profilometer-lab run` - one complete measurement session

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use profilometer_core::{
    format_height, ProfileSource, RandomProfileSource, RigEvent, RigListener, ScanResult,
    ScanStep, SeededProfileSource, WorkpieceClass,
};
use profilometer_rig::ProfilometerRig;
use profilometer_settings::{Config, DisplaySettings};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Workpiece to measure (machined, polished, rough)
    #[arg(long, short = 'w')]
    pub workpiece: WorkpieceClass,

    /// Configuration file (.toml or .json)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible surface
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Prints the instructional step as the session advances
struct StepPrinter;

#[async_trait]
impl RigListener for StepPrinter {
    async fn on_step_changed(&self, step: ScanStep) {
        let hint = match step {
            ScanStep::Select => "Select a workpiece",
            ScanStep::Zero => "Zero the stylus on the reference corner",
            ScanStep::Scan => "Start the traverse",
            ScanStep::Complete => "Measurement complete",
        };
        eprintln!("[{}] {}", step, hint);
    }
}

/// Run the measurement command
pub async fn run(args: RunArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    let progress = config.display.show_progress && !args.json;

    let result = measure(args.workpiece, &config, args.seed, progress).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_result(&result, &config.display));
    }
    Ok(())
}

/// Drive a rig through select, zero and scan, returning the measured roughness
pub async fn measure(
    workpiece: WorkpieceClass,
    config: &Config,
    seed: Option<u64>,
    progress: bool,
) -> Result<ScanResult> {
    let rig_config = config.to_rig_config()?;
    let source: Arc<dyn ProfileSource> = match seed.or(config.measurement.seed) {
        Some(seed) => {
            tracing::info!("Using profile seed {}", seed);
            Arc::new(SeededProfileSource::new(seed))
        }
        None => Arc::new(RandomProfileSource),
    };
    let rig = ProfilometerRig::with_source(rig_config, source)?;

    let printer = progress.then(|| {
        rig.register_listener(Arc::new(StepPrinter));
        tokio::spawn(print_progress(
            rig.subscribe(),
            config.display.clone(),
        ))
    });

    if !rig.select_workpiece(workpiece).await || !rig.start_zero().await {
        bail!("Rig refused to start the zero sequence");
    }
    wait_or_cancel(&rig).await?;

    if !rig.start_scan().await {
        bail!("Rig refused to start the scan");
    }
    wait_or_cancel(&rig).await?;

    let result = rig.result().context("Scan finished without a result")?;
    if let Some(printer) = printer {
        printer.abort();
    }
    Ok(result)
}

async fn wait_or_cancel(rig: &ProfilometerRig) -> Result<()> {
    let interrupted = tokio::select! {
        _ = rig.settle() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        rig.cancel().await;
        bail!("Measurement cancelled");
    }
    Ok(())
}

async fn print_progress(
    mut events: tokio::sync::broadcast::Receiver<RigEvent>,
    display: DisplaySettings,
) {
    use tokio::sync::broadcast::error::RecvError;

    loop {
        match events.recv().await {
            Ok(RigEvent::SampleRecorded {
                sample,
                emitted,
                total,
            }) => {
                eprintln!(
                    "  sample {:>3}/{}  {:>14}",
                    emitted,
                    total,
                    format_height(sample.height, display.measurement_system, display.decimal_places)
                );
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Progress output skipped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Human-readable Ra/Rz report
pub fn render_result(result: &ScanResult, display: &DisplaySettings) -> String {
    let fmt = |v| format_height(v, display.measurement_system, display.decimal_places);
    format!(
        "{}\n  Ra = {}\n  Rz = {}",
        result.workpiece.label(),
        fmt(result.ra),
        fmt(result.rz)
    )
}
