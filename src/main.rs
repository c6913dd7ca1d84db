// CLI wrapper around the licence field extraction pipeline: reads an OCR
// transcript from a text file and prints a report or JSON payload.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use wathiqa::field_extractor::DEFAULT_MIN_CONFIDENCE;
use wathiqa::utils::ExtractionError;
use wathiqa::{process_ocr_results, ExtractionResult, FieldExtractor, FieldName};

#[derive(Parser)]
#[command(
    name = "wathiqa",
    about = "Extract structured fields from a Moroccan driver's-licence OCR transcript"
)]
struct Cli {
    /// Path to a text file holding the raw OCR transcript
    transcript: PathBuf,

    /// Minimum confidence (0-100) for a field to count as extracted
    #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
    min_confidence: u8,

    /// Emit the consumer-shaped JSON payload instead of a report
    #[arg(long)]
    json: bool,
}

// Function to print a detailed extraction report
fn print_detailed_report(result: &ExtractionResult) {
    println!("\n===============================================");
    println!("      LICENCE FIELD EXTRACTION REPORT");
    println!("===============================================\n");

    println!("EXTRACTED FIELDS:");
    for field in FieldName::ALL {
        println!(
            "  {:<24} {:<30} {:>3}%",
            field.label(),
            result.field(field),
            result.confidence(field)
        );
    }

    println!("\nOVERALL CONFIDENCE: {}%", result.overall_confidence);
    println!("{}", result.summary);

    if let Some(errors) = &result.errors {
        println!("\nISSUES:");
        for error in errors {
            println!("  - {}", error);
        }
    }
}

fn main() -> Result<(), ExtractionError> {
    env_logger::init();
    let cli = Cli::parse();

    let transcript = fs::read_to_string(&cli.transcript)?;

    if cli.json {
        let shaped = process_ocr_results(&transcript, cli.min_confidence);
        println!("{}", serde_json::to_string_pretty(&shaped)?);
    } else {
        let result = FieldExtractor::new().extract_fields_from_ocr(&transcript, cli.min_confidence);
        print_detailed_report(&result);
    }

    Ok(())
}
