pub mod header;
pub mod line_item;

use crate::error::QuotexError;
use crate::extraction::PageContent;
use crate::model::{ParsedQuote, SkippedRow};
use crate::templates::TemplateSet;

/// Parse extracted page content into one or more quotes.
///
/// A page carrying a quote-number signature starts a new quote and its
/// header is parsed from that page. Pages without a signature (or that
/// repeat the current one) continue the running quote: their tabular
/// rows are appended to the same item list, in page order.
///
/// Every returned quote carries a non-empty quote number: quotes only
/// come into existence from a signature match, and the signature
/// patterns cannot match empty text.
pub fn parse_quotes(
    pages: &[PageContent],
    templates: &TemplateSet,
) -> Result<Vec<ParsedQuote>, QuotexError> {
    if pages.iter().all(|p| p.lines.is_empty()) {
        return Err(QuotexError::ParseError(
            "no text content found in PDF".into(),
        ));
    }

    let mut quotes: Vec<ParsedQuote> = Vec::new();
    let mut in_items = false;

    for page in pages {
        let page_text = page.lines.join("\n");

        if let Some((variant, quote_number)) = templates.detect_variant(&page_text) {
            let is_new = quotes
                .last()
                .map(|q| q.header.quote_number != quote_number)
                .unwrap_or(true);
            if is_new {
                let header = header::parse_header(&page_text, variant, &quote_number, templates);
                quotes.push(ParsedQuote {
                    header,
                    items: Vec::new(),
                    skipped_rows: Vec::new(),
                });
                in_items = false;
            }
        }

        // Rows appearing before any signature have no header to belong to.
        let Some(current) = quotes.last_mut() else {
            continue;
        };

        // The in-items flag deliberately survives page boundaries:
        // continuation pages carry rows without repeating the start
        // marker.
        for line in &page.lines {
            if line.contains(templates.items_start) {
                in_items = true;
                continue;
            }
            if in_items && line.trim().starts_with(templates.items_end) {
                in_items = false;
            }
            if !in_items {
                continue;
            }

            match line_item::parse_row(line, templates) {
                line_item::RowParse::Item(item) => current.items.push(item),
                line_item::RowParse::Unsplittable => {
                    current.skipped_rows.push(SkippedRow {
                        page_number: page.page_number,
                        text: line.trim().to_string(),
                    });
                }
                // Headers and fillers are just noise.
                line_item::RowParse::NotARow => {}
            }
        }
    }

    if quotes.is_empty() {
        return Err(QuotexError::TemplateMismatch(
            "no quote-number signature found on any page".into(),
        ));
    }

    Ok(quotes)
}
