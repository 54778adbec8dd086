use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of known quote layouts. New layouts are added as new
/// variants with their own signature and extraction rules, never by
/// extending an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariant {
    /// Standard quote, numbered like QT000171.
    #[default]
    QtStandard,
    /// Quote with an embedded MR marker, numbered like QT569MR25.
    QtMr,
    /// Requisition quote, numbered like RQ1234-1.
    Rq,
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateVariant::QtStandard => write!(f, "QT"),
            TemplateVariant::QtMr => write!(f, "QT-MR"),
            TemplateVariant::Rq => write!(f, "RQ"),
        }
    }
}

/// Header fields extracted once per quote. Everything except the quote
/// number is best-effort; absence is represented as None, not failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteHeader {
    pub quote_number: String,
    pub variant: TemplateVariant,
    pub quote_date: Option<String>,
    pub customer_number: Option<String>,
    pub salesperson_code: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// One product line of a quote. Money fields that fail to parse are
/// kept as None rather than failing the row; quantity multiplied by
/// unit price is not reconciled against total sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: String,
    pub description: String,
    pub uom: Option<String>,
    pub quantity: u32,
    pub unit_price: Option<Decimal>,
    pub total_sales: Option<Decimal>,
}

/// An in-region line that looked tabular but could not be split into
/// the expected columns. Skipping a row never fails the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub page_number: usize,
    pub text: String,
}

/// One parsed quote before it is tied to a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuote {
    pub header: QuoteHeader,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
}

/// The unit written to the output workbook: one header joined with its
/// ordered line items, tagged with the source file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub source: String,
    pub header: QuoteHeader,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
}

/// Failure-report entry for a document that was excluded from output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub source: String,
    pub reason: String,
}

/// Result of a batch run. A source file contributes records or a
/// failure entry, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub records: Vec<QuoteRecord>,
    pub failures: Vec<ExtractionFailure>,
}
