use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lsync")]
#[command(about = "Keyed list reconciliation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overlays)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Replay wire actions over a JSON list and print the resulting list
    Apply {
        /// Layered config paths in merge order
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        /// Initial state: a JSON array of records (empty when omitted)
        #[arg(long)]
        state: Option<String>,

        /// Wire actions: a JSON array or JSON Lines, one {"type","payload"} per line
        #[arg(long)]
        actions: String,

        /// Write the resulting state here instead of stdout
        #[arg(long)]
        out: Option<String>,

        /// Fail on config keys nothing reads (default: warn)
        #[arg(long, default_value_t = false)]
        strict_config: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => commands::config_hash(&paths),
        Commands::Apply {
            config_paths,
            state,
            actions,
            out,
            strict_config,
        } => commands::apply::run(commands::apply::ApplyArgs {
            config_paths,
            state,
            actions,
            out,
            strict_config,
        }),
    }
}

/// Logs go to stderr; stdout carries only command output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
