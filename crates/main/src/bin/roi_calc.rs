use std::error::Error;
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use log::info;
use roi_report::calc;

/// Projects the returns of a unit and renders the report as `ROI_<code>.docx`.
#[derive(Parser)]
#[command(author, version, about = "Calculate an investment projection and render it")]
#[command(group(ArgGroup::new("pricing").required(true).args(["price_m2", "price"])))]
struct Cli {
    /// Unit area in square metres.
    #[arg(long)]
    area: f64,

    /// Price per square metre in roubles.
    #[arg(long = "price-m2")]
    price_m2: Option<u64>,

    /// Total price in roubles; the price per square metre is derived from it.
    #[arg(long)]
    price: Option<u64>,

    /// Unit code used in the title and the file name; Cyrillic look-alikes are latinized.
    #[arg(long, default_value = "unit")]
    code: String,

    /// Directory receiving the report; defaults to the system temp directory.
    #[arg(long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Print a short summary of the projection.
    #[arg(long)]
    summary: bool,

    /// Print the generated input record as JSON instead of rendering it.
    #[arg(long)]
    json: bool,
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
    // clap guarantees exactly one of the two pricing flags.
    let price_m2 = match cli.price_m2 {
        Some(price_m2) => price_m2,
        None => calc::price_m2_from_total(cli.price.unwrap_or_default(), cli.area),
    };
    info!("Projecting {} m² at {} per m²", cli.area, price_m2);

    let code = calc::latin_code(&cli.code);
    let projection = calc::calculate(cli.area, price_m2);
    if cli.summary {
        println!("{}", calc::summary_text(&code, &projection));
    }

    let record = calc::report_record(&code, &projection);
    if cli.json {
        println!("{}", record.to_json()?);
        return Ok(());
    }

    let output_dir = cli.output_dir.clone().unwrap_or_else(std::env::temp_dir);
    let output_path = output_dir.join(format!("ROI_{code}.docx"));
    roi_report::write_report(&record, &output_path)?;
    println!("[DOCX] Created: {}", output_path.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
