//! dissect CLI — play the section quiz in a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "dissect",
    version,
    about = "Match research-article excerpts to their sections"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the quiz interactively
    Play {
        /// Seed for section selection (reproducible rounds)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory exports are written to
        #[arg(long)]
        output: Option<PathBuf>,

        /// Export format: csv, json, all
        #[arg(long, default_value = "csv")]
        format: String,

        /// Skip the bonus question after each guess
        #[arg(long)]
        no_bonus: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the article sections in the content store
    Sections {
        /// Also print each section's excerpt
        #[arg(long)]
        excerpts: bool,
    },

    /// Validate the built-in content
    Check,

    /// Print a saved JSON session report
    Summary {
        /// Session report JSON
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter dissect.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dissect=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            seed,
            output,
            format,
            no_bonus,
            config,
        } => commands::play::execute(seed, output, format, no_bonus, config),
        Commands::Sections { excerpts } => commands::sections::execute(excerpts),
        Commands::Check => commands::check::execute(),
        Commands::Summary { report, format } => commands::summary::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
