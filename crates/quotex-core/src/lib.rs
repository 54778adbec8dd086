pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod templates;
pub mod workbook;

use error::QuotexError;
use extraction::PdfExtractor;
use model::{BatchOutcome, ExtractionFailure, QuoteRecord};
use templates::TemplateSet;

/// Main API entry point: extract the quotes contained in one PDF.
///
/// A document usually holds exactly one quote; documents where a later
/// page carries a fresh quote-number signature yield one record per
/// signature. `source` is the file name carried into the output.
pub fn extract_quotes(
    source: &str,
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    templates: &TemplateSet,
) -> Result<Vec<QuoteRecord>, QuotexError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let quotes = parsing::parse_quotes(&pages, templates)?;

    Ok(quotes
        .into_iter()
        .map(|q| QuoteRecord {
            source: source.to_string(),
            header: q.header,
            items: q.items,
            skipped_rows: q.skipped_rows,
        })
        .collect())
}

/// Process a batch of already-read PDF files, in input order.
///
/// Per-document failures become failure-report entries and the batch
/// continues; a file never appears in both the records and the
/// failures.
pub fn extract_batch(
    files: &[(String, Vec<u8>)],
    extractor: &dyn PdfExtractor,
    templates: &TemplateSet,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (source, bytes) in files {
        match extract_quotes(source, bytes, extractor, templates) {
            Ok(records) => outcome.records.extend(records),
            Err(e) => outcome.failures.push(ExtractionFailure {
                source: source.clone(),
                reason: e.to_string(),
            }),
        }
    }
    outcome
}
