use crate::model::LineItem;
use crate::templates::TemplateSet;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Outcome of reading one line of the items region.
#[derive(Debug)]
pub enum RowParse {
    /// A well-formed line-item row.
    Item(LineItem),
    /// The line carried a money pair, so it was meant to be a row, but
    /// it could not be split into the expected columns.
    Unsplittable,
    /// Not a tabular row at all: blank line, column header, subtotal.
    NotARow,
}

/// Parse a money token, tolerating a leading currency symbol and
/// thousands separators. Unparsable text is None, never an error.
pub fn parse_money(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().trim_start_matches('$').replace(',', "");
    Decimal::from_str(&cleaned).ok()
}

/// Try to parse one line of the items region as a line-item row.
///
/// Rows are anchored on the trailing unit-price/total-sales pair. The
/// leading run of digit tokens carries the quantity, the tokens up to
/// the unit price are item ID and description, and the tokens between
/// the two money columns are the unit of measure.
pub fn parse_row(line: &str, templates: &TemplateSet) -> RowParse {
    let s = line.trim();
    if s.is_empty() {
        return RowParse::NotARow;
    }

    let tokens: Vec<&str> = s.split_whitespace().collect();
    let money_idxs: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| templates.money.is_match(t))
        .map(|(i, _)| i)
        .collect();
    if money_idxs.len() < 2 {
        return RowParse::NotARow;
    }

    let total_idx = money_idxs[money_idxs.len() - 1];
    let price_idx = money_idxs[money_idxs.len() - 2];

    let unit_price = parse_money(tokens[price_idx]);
    let total_sales = parse_money(tokens[total_idx]);

    // Leading run of pure digit tokens; the first one is the quantity,
    // the rest are zero-filler columns.
    let mut digit_run = 0;
    while digit_run < tokens.len() && is_digits(tokens[digit_run]) {
        digit_run += 1;
    }
    if digit_run == 0 {
        return RowParse::Unsplittable;
    }
    let Ok(quantity) = tokens[0].parse::<u32>() else {
        return RowParse::Unsplittable;
    };

    if digit_run >= price_idx {
        return RowParse::Unsplittable;
    }
    let mut body: Vec<&str> = tokens[digit_run..price_idx].to_vec();

    let uom_tokens = &tokens[price_idx + 1..total_idx];
    let uom = if uom_tokens.is_empty() {
        None
    } else {
        Some(uom_tokens.join(" "))
    };

    // Strip zero-filler columns that survive in front of the item ID.
    while body.first() == Some(&"0") {
        body.remove(0);
    }
    if body.is_empty() {
        return RowParse::Unsplittable;
    }

    // The item ID is the first token that looks like a part number;
    // failing that, the first token that is not category filler.
    let idx_item = body
        .iter()
        .position(|t| t.chars().any(|c| c.is_ascii_digit() || c == '-'))
        .or_else(|| body.iter().position(|t| !is_stopword(t)));
    let Some(idx_item) = idx_item else {
        return RowParse::Unsplittable;
    };

    let item_id = body[idx_item].to_string();
    let description = body[idx_item + 1..].join(" ").trim().to_string();

    RowParse::Item(LineItem {
        item_id,
        description,
        uom,
        quantity,
        unit_price,
        total_sales,
    })
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn is_stopword(token: &str) -> bool {
    matches!(
        token.to_uppercase().as_str(),
        "PARTS" | "&" | "MISC" | "PARTS&MISC"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn templates() -> TemplateSet {
        TemplateSet::new()
    }

    fn item(line: &str) -> LineItem {
        match parse_row(line, &templates()) {
            RowParse::Item(item) => item,
            other => panic!("expected an item for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_money_plain() {
        assert_eq!(parse_money("310.75"), Some(dec!(310.75)));
    }

    #[test]
    fn test_parse_money_thousands_separator() {
        assert_eq!(parse_money("1,250.00"), Some(dec!(1250.00)));
    }

    #[test]
    fn test_parse_money_currency_symbol() {
        assert_eq!(parse_money("$1,250.00"), Some(dec!(1250.00)));
    }

    #[test]
    fn test_parse_money_garbage_is_none() {
        assert_eq!(parse_money("N/C"), None);
    }

    #[test]
    fn test_parse_full_row() {
        let item = item("2 0 PH-1000 PUMP HOUSING ASSY 1,250.00 EA 2,500.00");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.item_id, "PH-1000");
        assert_eq!(item.description, "PUMP HOUSING ASSY");
        assert_eq!(item.uom.as_deref(), Some("EA"));
        assert_eq!(item.unit_price, Some(dec!(1250.00)));
        assert_eq!(item.total_sales, Some(dec!(2500.00)));
    }

    #[test]
    fn test_parse_row_without_uom() {
        // Adjacent money columns leave no unit-of-measure tokens.
        let item = item("4 0 X-9 SPACER 10.00 40.00");
        assert_eq!(item.uom, None);
        assert_eq!(item.quantity, 4);
        assert_eq!(item.total_sales, Some(dec!(40.00)));
    }

    #[test]
    fn test_parse_row_stopwords_before_item_id() {
        let item = item("1 0 PARTS & MISC FREIGHT-IN CHARGE 25.00 EA 25.00");
        assert_eq!(item.item_id, "FREIGHT-IN");
        assert_eq!(item.description, "CHARGE");
    }

    #[test]
    fn test_parse_row_all_stopwords_takes_first_non_stopword() {
        let item = item("1 0 PARTS & MISC SHIPPING 15.00 EA 15.00");
        // SHIPPING has no digits or dash, but it is the first
        // non-filler token.
        assert_eq!(item.item_id, "SHIPPING");
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_header_row_is_not_a_row() {
        assert!(matches!(
            parse_row("Qty  Item ID  Description  UOM  Unit Price  Total", &templates()),
            RowParse::NotARow
        ));
    }

    #[test]
    fn test_subtotal_line_is_not_a_row() {
        // One money token only.
        assert!(matches!(
            parse_row("Subtotal 2,810.75", &templates()),
            RowParse::NotARow
        ));
    }

    #[test]
    fn test_money_pair_without_quantity_is_unsplittable() {
        assert!(matches!(
            parse_row("MISC FREIGHT 25.00 25.00", &templates()),
            RowParse::Unsplittable
        ));
    }

    #[test]
    fn test_money_pair_without_body_is_unsplittable() {
        assert!(matches!(
            parse_row("2 25.00 25.00", &templates()),
            RowParse::Unsplittable
        ));
    }

    #[test]
    fn test_blank_line_is_not_a_row() {
        assert!(matches!(parse_row("   ", &templates()), RowParse::NotARow));
    }
}
