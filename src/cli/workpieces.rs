//! `profilometer-lab workpieces` - list the catalog

use profilometer_core::WorkpieceClass;

#[derive(clap::Args, Debug)]
pub struct WorkpiecesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the workpieces command
pub fn run(args: WorkpiecesArgs) -> anyhow::Result<()> {
    if args.json {
        let infos: Vec<_> = WorkpieceClass::ALL.iter().map(|w| w.info()).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    for workpiece in WorkpieceClass::ALL {
        let info = workpiece.info();
        println!("{:<10} {:<20} {}", workpiece.id(), info.label, info.description);
    }
    Ok(())
}
