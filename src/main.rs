use clap::Parser;
use profilometer_lab::cli::{self, Cli, Commands};
use profilometer_lab::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.log_json)?;
    tracing::debug!(
        "profilometer-lab {} (built {})",
        profilometer_lab::VERSION,
        profilometer_lab::BUILD_DATE
    );

    match cli.command {
        Commands::Run(args) => cli::run::run(args).await,
        Commands::Workpieces(args) => cli::workpieces::run(args),
        Commands::Quiz(args) => cli::quiz::run(args),
        Commands::Config(cmd) => cli::config::run(cmd),
    }
}
