use crate::model::TemplateVariant;
use regex::Regex;

/// Immutable anchor and pattern configuration for the known quote
/// layouts. Built once and passed into the parser explicitly; nothing
/// lives in module-level state.
#[derive(Debug)]
pub struct TemplateSet {
    /// MR-variant quote numbers, e.g. QT569MR25. Tried before the
    /// standard pattern so the leading "QT" digits are not claimed.
    qt_mr: Regex,
    /// Standard quote numbers, e.g. QT000171 or QT00040347.
    qt_standard: Regex,
    /// Requisition quote numbers, e.g. RQ1234-1.
    rq: Regex,
    /// Month-name dates: "Jan 5, 2026".
    pub(crate) date: Regex,
    /// Whole-token money: optional currency symbol, optional thousands
    /// separators, exactly two decimals.
    pub(crate) money: Regex,
    /// Fallback customer-number anchor: "Customer No.: 11007-4".
    pub(crate) customer_fallback: Regex,
    /// RQ terms line: "RFQ <reference> <customer> <salesperson> ..."
    pub(crate) rq_terms: Regex,
    /// Standalone two-letter state token, used to spot city/state lines.
    pub(crate) state_token: Regex,
    /// Line marking the start of the line-item region.
    pub(crate) items_start: &'static str,
    /// Line prefix marking the end of the line-item region.
    pub(crate) items_end: &'static str,
    /// Anchor for the company address block (matched case-insensitively).
    pub(crate) ship_to: &'static str,
}

impl TemplateSet {
    pub fn new() -> Self {
        // All patterns are fixed literals; a failure here is a bug, not
        // an input condition.
        TemplateSet {
            qt_mr: Regex::new(r"(?i)\bQT\d+MR\d+\b").expect("valid QT-MR pattern"),
            qt_standard: Regex::new(r"(?i)\bQT\d{6,}\b").expect("valid QT pattern"),
            rq: Regex::new(r"(?i)\bRQ\d{4,}-\d+\b").expect("valid RQ pattern"),
            date: Regex::new(r"(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{1,2},\s+\d{4}")
                .expect("valid date pattern"),
            money: Regex::new(r"^\$?[0-9,]*\d\.\d{2}$").expect("valid money pattern"),
            customer_fallback: Regex::new(r"(?i)Customer\s+No\.?\s*:?[\s#]*([0-9A-Z\-]+)")
                .expect("valid customer fallback pattern"),
            rq_terms: Regex::new(r"RFQ\s+\S+\s+([0-9A-Z\-]+)\s+([A-Z0-9]{1,3})\s+[A-Z]")
                .expect("valid RQ terms pattern"),
            state_token: Regex::new(r"\b[A-Z]{2}\b").expect("valid state token pattern"),
            items_start: "Please send your order to:",
            items_end: "Tax Summary",
            ship_to: "ship to",
        }
    }

    /// Match a quote-number signature anywhere in the page text,
    /// returning the layout variant and the (uppercased) quote number.
    pub fn detect_variant(&self, text: &str) -> Option<(TemplateVariant, String)> {
        if let Some(m) = self.qt_mr.find(text) {
            return Some((TemplateVariant::QtMr, m.as_str().to_uppercase()));
        }
        if let Some(m) = self.qt_standard.find(text) {
            return Some((TemplateVariant::QtStandard, m.as_str().to_uppercase()));
        }
        if let Some(m) = self.rq.find(text) {
            return Some((TemplateVariant::Rq, m.as_str().to_uppercase()));
        }
        None
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_standard_qt() {
        let t = TemplateSet::new();
        let (variant, number) = t.detect_variant("Quote No. QT000171 Page 1").unwrap();
        assert_eq!(variant, TemplateVariant::QtStandard);
        assert_eq!(number, "QT000171");
    }

    #[test]
    fn test_detect_long_standard_qt() {
        let t = TemplateSet::new();
        let (variant, number) = t.detect_variant("ref QT00040347").unwrap();
        assert_eq!(variant, TemplateVariant::QtStandard);
        assert_eq!(number, "QT00040347");
    }

    #[test]
    fn test_detect_mr_variant_before_standard() {
        let t = TemplateSet::new();
        let (variant, number) = t.detect_variant("Quote No. QT569MR25").unwrap();
        assert_eq!(variant, TemplateVariant::QtMr);
        assert_eq!(number, "QT569MR25");
    }

    #[test]
    fn test_detect_rq_variant() {
        let t = TemplateSet::new();
        let (variant, number) = t.detect_variant("RFQ reference RQ12345-1").unwrap();
        assert_eq!(variant, TemplateVariant::Rq);
        assert_eq!(number, "RQ12345-1");
    }

    #[test]
    fn test_detect_lowercase_uppercased() {
        let t = TemplateSet::new();
        let (_, number) = t.detect_variant("qt000171").unwrap();
        assert_eq!(number, "QT000171");
    }

    #[test]
    fn test_no_signature_returns_none() {
        let t = TemplateSet::new();
        assert!(t.detect_variant("Invoice INV-2026-001").is_none());
    }

    #[test]
    fn test_short_qt_number_not_matched() {
        let t = TemplateSet::new();
        // Fewer than six digits is not a valid standard quote number.
        assert!(t.detect_variant("QT1234").is_none());
    }
}
