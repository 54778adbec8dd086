mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quotex",
    version,
    about = "Convert Alcorn quote PDFs into a single Excel workbook"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract quote PDFs into one merged workbook
    Extract {
        /// PDF files and/or directories to scan for *.pdf
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output workbook path
        #[arg(short, long, default_value = "quotes.xlsx")]
        out: PathBuf,
    },
    /// Parse a quote PDF into structured data (without writing a workbook)
    Parse {
        /// Path to a quote PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { inputs, out } => commands::extract::run(inputs, out),
        Commands::Parse {
            input_file,
            output,
            out,
        } => commands::parse::run(input_file, &output, out),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
