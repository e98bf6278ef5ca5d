use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::debug;
use roi_report::InputRecord;

/// Renders an investment return report from a JSON record into a DOCX file.
#[derive(Parser)]
#[command(author, version, about = "Render an investment report to DOCX")]
struct Cli {
    /// JSON-encoded input record.
    json_data: String,

    /// Destination of the DOCX file; an existing file is overwritten.
    output_path: PathBuf,

    /// Reject records with empty fields instead of rendering blank cells.
    #[arg(long)]
    strict: bool,
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let record = InputRecord::from_json(&cli.json_data)?;
    debug!("Decoded record with {} projection rows", record.years.len());
    if cli.strict {
        record.validate()?;
    }

    roi_report::write_report(&record, &cli.output_path)?;
    println!("[DOCX] Created: {}", cli.output_path.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
