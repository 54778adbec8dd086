use quotex_core::error::QuotexError;
use quotex_core::extraction::pdftotext::PdftotextExtractor;
use quotex_core::model::{BatchOutcome, ExtractionFailure};
use quotex_core::templates::TemplateSet;
use quotex_core::workbook;
use std::path::{Path, PathBuf};

pub fn run(inputs: Vec<PathBuf>, out: PathBuf) -> Result<(), QuotexError> {
    let paths = collect_inputs(&inputs)?;
    if paths.is_empty() {
        return Err(QuotexError::NoInput(
            "no PDF files found in the given inputs".into(),
        ));
    }

    let extractor = PdftotextExtractor::new();
    let templates = TemplateSet::new();

    // Read everything up front; unreadable files go straight into the
    // failure report and the run continues.
    let mut outcome = BatchOutcome::default();
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    for path in &paths {
        let source = file_name(path);
        match std::fs::read(path) {
            Ok(bytes) => files.push((source, bytes)),
            Err(e) => outcome.failures.push(ExtractionFailure {
                source,
                reason: e.to_string(),
            }),
        }
    }

    let batch = quotex_core::extract_batch(&files, &extractor, &templates);
    outcome.records.extend(batch.records);
    outcome.failures.extend(batch.failures);

    if outcome.records.is_empty() {
        report_failures(&outcome.failures);
        return Err(QuotexError::NoInput(
            "no quotes extracted from any input file".into(),
        ));
    }

    workbook::write_workbook(&out, &outcome.records)?;

    let row_count: usize = outcome.records.iter().map(|r| r.items.len()).sum();
    println!(
        "Extracted {} line item(s) from {} quote(s), written to {}",
        row_count,
        outcome.records.len(),
        out.display()
    );
    for record in &outcome.records {
        if !record.skipped_rows.is_empty() {
            eprintln!(
                "  {}: {} row(s) skipped during parsing",
                record.source,
                record.skipped_rows.len()
            );
        }
    }
    report_failures(&outcome.failures);

    Ok(())
}

fn report_failures(failures: &[ExtractionFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("Failed to process {} file(s):", failures.len());
    for failure in failures {
        eprintln!("  {}: {}", failure.source, failure.reason);
    }
}

/// Expand directories into their PDF files (sorted by name); plain
/// paths pass through in the order given.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, QuotexError> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.extension()
                        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                        .unwrap_or(false)
                })
                .collect();
            found.sort();
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
