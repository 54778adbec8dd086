use crate::model::{QuoteHeader, TemplateVariant};
use crate::templates::TemplateSet;
use regex::Regex;

/// Extract header fields from the page that carried the quote-number
/// signature. Every field except the quote number is best-effort.
pub fn parse_header(
    page_text: &str,
    variant: TemplateVariant,
    quote_number: &str,
    templates: &TemplateSet,
) -> QuoteHeader {
    let mut header = QuoteHeader {
        quote_number: quote_number.to_string(),
        variant,
        ..Default::default()
    };

    header.quote_date = templates
        .date
        .find(page_text)
        .map(|m| m.as_str().to_string());

    let (customer, salesperson) =
        extract_customer_and_salesperson(page_text, variant, quote_number, templates);
    header.customer_number = customer;
    header.salesperson_code = salesperson;

    let block = extract_company_block(page_text, templates);
    header.company = block.company;
    header.address = block.address;
    header.city = block.city;
    header.state = block.state;
    header.zip_code = block.zip_code;
    header.country = block.country;

    header
}

/// Customer number and salesperson code come from the terms line. Its
/// shape depends on the layout variant:
///
/// QT / MR quotes end the line in the quote number, optionally led by
/// a contact name:
///   "11007-4 JZ UPSPPA NET30 QT000171"
///   "Brock Beehler 2026-1 MR BRAUN NET30 QT569MR25"
///
/// RQ quotes carry an RFQ reference instead:
///   "RFQ 4521 88007-2 TB NET30"
fn extract_customer_and_salesperson(
    page_text: &str,
    variant: TemplateVariant,
    quote_number: &str,
    templates: &TemplateSet,
) -> (Option<String>, Option<String>) {
    let matched = match variant {
        TemplateVariant::Rq => templates.rq_terms.captures(page_text).and_then(|c| {
            Some((
                c.get(1)?.as_str().to_string(),
                c.get(2)?.as_str().to_string(),
            ))
        }),
        TemplateVariant::QtStandard | TemplateVariant::QtMr => {
            terms_line_pattern(quote_number)
                .and_then(|re| re.captures(page_text))
                .and_then(|c| {
                    Some((
                        c.get(1)?.as_str().to_string(),
                        c.get(2)?.as_str().to_string(),
                    ))
                })
        }
    };

    match matched {
        Some((customer, salesperson)) => (Some(customer), Some(salesperson)),
        None => (fallback_customer(page_text, templates), None),
    }
}

/// Terms-line pattern for QT/MR quotes: customer id, salesperson code,
/// ship-via and terms tokens, then the quote number itself.
fn terms_line_pattern(quote_number: &str) -> Option<Regex> {
    let pattern = format!(
        r"\n(?:(?:[A-Za-z]+\s+){{0,3}})?([0-9A-Z\-]+)\s+([A-Z0-9]{{1,3}})\s+[A-Z0-9]+\s+[A-Z0-9]+\s+{}",
        regex::escape(quote_number)
    );
    Regex::new(&pattern).ok()
}

fn fallback_customer(page_text: &str, templates: &TemplateSet) -> Option<String> {
    templates
        .customer_fallback
        .captures(page_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Default)]
struct CompanyBlock {
    company: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    country: Option<String>,
}

/// Pull company, address, city/state/zip and country out of the lines
/// following the "Ship To" anchor. The block has no fixed shape, so
/// each field is located by its own heuristic:
/// - city line: first line with a comma and a two-letter state token
/// - address: nearest line above the city line containing a digit
/// - country: explicit "Canada"/"USA" line, else inferred from the
///   state (QC/ON mean Canada), else USA
/// - company: last remaining line after dropping the above plus
///   ATTN:/email/counter-sales boilerplate
fn extract_company_block(page_text: &str, templates: &TemplateSet) -> CompanyBlock {
    // Match the anchor per line; lowercasing can change byte lengths,
    // so an offset into the lowercased text must never be used to
    // slice the original.
    let Some(anchor) = page_text
        .lines()
        .position(|ln| ln.to_lowercase().contains(templates.ship_to))
    else {
        return CompanyBlock::default();
    };

    let lines: Vec<&str> = page_text
        .lines()
        .skip(anchor + 1)
        .take(11)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return CompanyBlock::default();
    }

    let mut country: Option<&str> = None;
    let mut country_line: Option<&str> = None;
    for ln in lines.iter().rev() {
        if ln.contains("Canada") {
            country = Some("Canada");
            country_line = Some(ln);
            break;
        }
        if ln.contains("USA") || ln.contains("United States") {
            country = Some("USA");
            country_line = Some(ln);
            break;
        }
    }

    let cs_line = lines
        .iter()
        .copied()
        .find(|ln| ln.contains(',') && templates.state_token.is_match(ln));

    let mut city = None;
    let mut state = None;
    let mut zip_code = None;
    if let Some(cs) = cs_line {
        let mut parts = cs.splitn(2, ',');
        city = parts
            .next()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let rest = parts.next().unwrap_or("").trim();
        let mut rest_tokens = rest.split_whitespace();
        state = rest_tokens.next().map(|s| s.to_string());
        let zip_tokens: Vec<&str> = rest_tokens.collect();
        if !zip_tokens.is_empty() {
            zip_code = Some(zip_tokens.join(" "));
        }
    }

    let mut address = None;
    if let Some(cs) = cs_line {
        let idx_cs = lines.iter().position(|l| *l == cs).unwrap_or(0);
        for ln in lines[..idx_cs].iter().rev() {
            if ln.chars().any(|c| c.is_ascii_digit()) {
                address = Some(ln.to_string());
                break;
            }
        }
    }

    let company = lines
        .iter()
        .filter(|ln| {
            Some(**ln) != cs_line
                && Some(**ln) != country_line
                && address.as_deref() != Some(**ln)
                && !ln.to_uppercase().starts_with("ATTN:")
                && !ln.contains('@')
                && !ln.contains("Customers ONLY")
                && !ln.contains("Counter Sales")
        })
        .last()
        .map(|s| s.to_string());

    let mut country = country.map(str::to_string);
    if country.is_none() && matches!(state.as_deref(), Some("QC") | Some("ON")) {
        country = Some("Canada".to_string());
    }
    if country.is_none() {
        country = Some("USA".to_string());
    }

    CompanyBlock {
        company,
        address,
        city,
        state,
        zip_code,
        country,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> TemplateSet {
        TemplateSet::new()
    }

    const QT_PAGE: &str = "Alcorn Industrial Inc\n\
        Quote Date: Jan 5, 2026\n\
        \n\
        Customer No.   Salesperson   Ship Via   Terms   Quote No.\n\
        11007-4 JZ UPSPPA NET30 QT000171\n\
        \n\
        Ship To:\n\
        Acme Fabrication Ltd\n\
        ATTN: RECEIVING\n\
        2200 Industrial Blvd\n\
        Sherbrooke, QC J1L 2T9\n\
        Canada\n";

    #[test]
    fn test_parse_header_qt_page() {
        let h = parse_header(QT_PAGE, TemplateVariant::QtStandard, "QT000171", &templates());
        assert_eq!(h.quote_number, "QT000171");
        assert_eq!(h.quote_date.as_deref(), Some("Jan 5, 2026"));
        assert_eq!(h.customer_number.as_deref(), Some("11007-4"));
        assert_eq!(h.salesperson_code.as_deref(), Some("JZ"));
        assert_eq!(h.company.as_deref(), Some("Acme Fabrication Ltd"));
        assert_eq!(h.address.as_deref(), Some("2200 Industrial Blvd"));
        assert_eq!(h.city.as_deref(), Some("Sherbrooke"));
        assert_eq!(h.state.as_deref(), Some("QC"));
        assert_eq!(h.zip_code.as_deref(), Some("J1L 2T9"));
        assert_eq!(h.country.as_deref(), Some("Canada"));
    }

    #[test]
    fn test_terms_line_with_contact_name_prefix() {
        let text = "Quote\nBrock Beehler 2026-1 MR BRAUN NET30 QT569MR25\n";
        let (customer, salesperson) = extract_customer_and_salesperson(
            text,
            TemplateVariant::QtMr,
            "QT569MR25",
            &templates(),
        );
        assert_eq!(customer.as_deref(), Some("2026-1"));
        assert_eq!(salesperson.as_deref(), Some("MR"));
    }

    #[test]
    fn test_rq_terms_line() {
        let text = "Header\nRFQ 4521 88007-2 TB NET30\n";
        let (customer, salesperson) =
            extract_customer_and_salesperson(text, TemplateVariant::Rq, "RQ12345-1", &templates());
        assert_eq!(customer.as_deref(), Some("88007-2"));
        assert_eq!(salesperson.as_deref(), Some("TB"));
    }

    #[test]
    fn test_customer_fallback_anchor() {
        let text = "Quote QT000200\nCustomer No.: 99001-3\n";
        let (customer, salesperson) = extract_customer_and_salesperson(
            text,
            TemplateVariant::QtStandard,
            "QT000200",
            &templates(),
        );
        assert_eq!(customer.as_deref(), Some("99001-3"));
        assert_eq!(salesperson, None);
    }

    #[test]
    fn test_company_block_country_inferred_from_state() {
        let text = "Ship To:\n\
            Nordik Tooling\n\
            55 Rue Principale\n\
            Gatineau, QC J8X 3V9\n";
        let block = extract_company_block(text, &templates());
        assert_eq!(block.company.as_deref(), Some("Nordik Tooling"));
        assert_eq!(block.state.as_deref(), Some("QC"));
        assert_eq!(block.country.as_deref(), Some("Canada"));
    }

    #[test]
    fn test_company_block_defaults_to_usa() {
        let text = "Ship To:\n\
            Midwest Milling Co\n\
            412 Prairie Ave\n\
            Des Moines, IA 50309\n";
        let block = extract_company_block(text, &templates());
        assert_eq!(block.city.as_deref(), Some("Des Moines"));
        assert_eq!(block.state.as_deref(), Some("IA"));
        assert_eq!(block.zip_code.as_deref(), Some("50309"));
        assert_eq!(block.country.as_deref(), Some("USA"));
    }

    #[test]
    fn test_company_block_multibyte_text_before_anchor() {
        // Uppercase sharp s (U+1E9E) shrinks from 3 bytes to 2 when
        // lowercased; text like this ahead of the anchor must not
        // shift the block or panic.
        let text = "\u{1E9E}\u{1E9E}\u{00E9} Ship To:\n\
            Nordik Tooling\n\
            55 Rue Principale\n\
            Gatineau, QC J8X 3V9\n";
        let block = extract_company_block(text, &templates());
        assert_eq!(block.company.as_deref(), Some("Nordik Tooling"));
        assert_eq!(block.city.as_deref(), Some("Gatineau"));
        assert_eq!(block.country.as_deref(), Some("Canada"));
    }

    #[test]
    fn test_company_block_missing_anchor() {
        let block = extract_company_block("no address block here", &templates());
        assert_eq!(block.company, None);
        assert_eq!(block.country, None);
    }

    #[test]
    fn test_company_block_filters_boilerplate() {
        let text = "Ship To:\n\
            Acme Fabrication Ltd\n\
            ATTN: RECEIVING\n\
            orders@acme.example\n\
            Counter Sales 8AM-5PM\n\
            2200 Industrial Blvd\n\
            Sherbrooke, QC J1L 2T9\n";
        let block = extract_company_block(text, &templates());
        assert_eq!(block.company.as_deref(), Some("Acme Fabrication Ltd"));
    }
}
