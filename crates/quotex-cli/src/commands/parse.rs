use quotex_core::extraction::pdftotext::PdftotextExtractor;
use quotex_core::templates::TemplateSet;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), quotex_core::error::QuotexError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let templates = TemplateSet::new();
    let source = pdf_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf_file.display().to_string());

    let records = quotex_core::extract_quotes(&source, &pdf_bytes, &extractor, &templates)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&records)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} quote(s), written to {}",
                records.len(),
                path.display()
            );
            for record in &records {
                if !record.skipped_rows.is_empty() {
                    eprintln!(
                        "  {}: {} row(s) skipped during parsing",
                        record.header.quote_number,
                        record.skipped_rows.len()
                    );
                }
            }
        }
        None => match output_format {
            "json" => output::json::print(&records)?,
            _ => println!("{}", output::table::format_records(&records)),
        },
    }

    Ok(())
}
