//! gradebook CLI — replay student mark sessions and print reports.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Validated student records and mark averages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session and print the student report
    Report {
        /// Path to the .toml session file
        #[arg(long)]
        session: PathBuf,

        /// Output format: text, table, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Decimals used for averages
        #[arg(long)]
        precision: Option<usize>,

        /// Skip rejected marks instead of stopping at the first one
        #[arg(long)]
        lenient: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a session file without printing a report
    Validate {
        /// Path to the .toml session file
        #[arg(long)]
        session: PathBuf,
    },

    /// Check whether a value is a valid name component
    CheckName {
        /// The candidate name
        value: String,

        /// Which component to check: first, middle, last
        #[arg(long, default_value = "first")]
        field: String,
    },

    /// Create a sample session and subject list
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradebook=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            session,
            format,
            precision,
            lenient,
            config,
        } => commands::report::execute(session, format, precision, lenient, config),
        Commands::Validate { session } => commands::validate::execute(session),
        Commands::CheckName { value, field } => commands::check_name::execute(value, field),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
