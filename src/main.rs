use anyhow::Result;
use clap::{Parser, Subcommand};

/// folio - Portfolio site contact relay
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio site backend relaying contact messages by email", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Check that the configured SMTP account can authenticate
    SmtpCheck,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = folio::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    folio::observability::init_observability(
        "folio",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Serve { host, port } => folio::cli::serve(config, host, port).await,
        Commands::SmtpCheck => folio::cli::smtp_check(config).await,
    }
}
