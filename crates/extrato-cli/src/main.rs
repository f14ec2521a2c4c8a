mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "extrato",
    version,
    about = "Extrator de dados de relatórios de fiscalização (CREA-RJ)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse inspection-report PDFs into structured records (no reports)
    Parse {
        /// PDF files to process
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Process a batch and generate the consolidated PDF report
    Report {
        /// PDF files to process
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the generated PDFs
        #[arg(short = 'd', long = "out-dir", default_value = ".")]
        out_dir: PathBuf,

        /// Optional logo image for the consolidated header
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Also write the four per-section reports
        #[arg(long)]
        secoes: bool,
    },
}

/// Read log level filters from RUST_LOG, defaulting to "info".
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

fn main() {
    setup_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            inputs,
            output,
            out,
        } => commands::parse::run(inputs, &output, out),
        Commands::Report {
            inputs,
            out_dir,
            logo,
            secoes,
        } => commands::report::run(inputs, out_dir, logo, secoes),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
