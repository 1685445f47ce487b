//! Rack bracket renderer entry point

use std::path::PathBuf;
use std::process::ExitCode;

use bracket_frontend::{AppConfig, RenderCommand};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bracket")]
#[command(about = "Resolve and export rack bracket scenes", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// RON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the rack
    Render {
        /// Use finer tessellation settings
        #[arg(short, long)]
        production: bool,

        /// Number of rack segments
        #[arg(long, default_value_t = 3)]
        units: u8,

        /// Output file, `-` for stdout
        #[arg(default_value = "-")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let cli = Cli::parse();
    let default_filter = if cli.debug {
        "bracket_frontend=debug,bracket_core=debug"
    } else {
        "bracket_frontend=info,bracket_core=info"
    };

    // logs go to stderr so the scene can be piped from stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load_or_default(cli.config.as_deref());

    let result = match cli.command {
        Commands::Render {
            production,
            units,
            output,
        } => RenderCommand {
            production,
            units,
            output,
        }
        .run(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
