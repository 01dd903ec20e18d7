use std::path::PathBuf;

use carebook::headless;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "carebook", about = "carebook: medical records with typo-tolerant search")]
struct Cli {
    /// Dataset JSON file (overrides `[data].path`; default: demo records).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file (default: `$XDG_CONFIG_HOME/carebook/config.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Colour theme for the TUI (`default`, `gruvbox`).
    #[arg(long)]
    theme: Option<String>,

    /// Write debug logs to /tmp/carebook-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the records matching a query and filters.
    Search {
        #[command(flatten)]
        filters: headless::FilterArgs,
        /// Print a JSON array instead of one line per record.
        #[arg(long)]
        json: bool,
    },
    /// Write the records matching a query and filters to a JSON file.
    Export {
        #[command(flatten)]
        filters: headless::FilterArgs,
        /// Output file (default: `[export].file_name`).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/carebook-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("carebook debug log started, tail -f /tmp/carebook-debug.log");
    }

    let config = headless::load_config(cli.config.as_deref())?;
    let store = headless::load_store(cli.data.as_deref(), &config)?;

    match cli.command {
        None => carebook_tui::run(store, config, cli.theme.as_deref()),
        Some(Cmd::Search { filters, json }) => {
            let stdout = std::io::stdout().lock();
            headless::search(&store, &filters, json, &config.ui.date_format, stdout)?;
            Ok(())
        }
        Some(Cmd::Export { filters, output }) => {
            let (count, path) = headless::export(&store, &filters, output, &config)?;
            println!("exported {count} records to {}", path.display());
            Ok(())
        }
    }
}
