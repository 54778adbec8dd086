use quotex_core::model::QuoteRecord;
use std::fmt::Write;

pub fn format_records(records: &[QuoteRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        format_record(&mut out, record);
    }
    out
}

fn format_record(out: &mut String, record: &QuoteRecord) {
    let header = &record.header;
    let _ = writeln!(out, "=== {} ({}) ===", header.quote_number, header.variant);

    if let Some(ref date) = header.quote_date {
        let _ = writeln!(out, "  Date:        {date}");
    }
    if header.customer_number.is_some() || header.salesperson_code.is_some() {
        let _ = writeln!(
            out,
            "  Customer:    {}    Salesperson: {}",
            or_dash(&header.customer_number),
            or_dash(&header.salesperson_code)
        );
    }
    if let Some(ref company) = header.company {
        let _ = writeln!(out, "  Company:     {company}");
    }
    let place: Vec<&str> = [&header.address, &header.city, &header.state, &header.country]
        .iter()
        .filter_map(|f| f.as_deref())
        .collect();
    if !place.is_empty() {
        let _ = writeln!(out, "  Ship To:     {}", place.join(", "));
    }

    if record.items.is_empty() {
        let _ = writeln!(out, "\n  (no line items)");
        return;
    }

    let id_width = record
        .items
        .iter()
        .map(|i| i.item_id.len())
        .max()
        .unwrap_or(0)
        .max("Item ID".len());

    let _ = writeln!(
        out,
        "\n  {:>5}  {:<id_width$}  {:<12}  {:>12}  {:>12}  Description",
        "Qty", "Item ID", "UOM", "Unit Price", "Total"
    );
    for item in &record.items {
        let _ = writeln!(
            out,
            "  {:>5}  {:<id_width$}  {:<12}  {:>12}  {:>12}  {}",
            item.quantity,
            item.item_id,
            item.uom.as_deref().unwrap_or("-"),
            money(item.unit_price.as_ref()),
            money(item.total_sales.as_ref()),
            item.description
        );
    }

    if !record.skipped_rows.is_empty() {
        let _ = writeln!(
            out,
            "\n  {} row(s) could not be split into columns",
            record.skipped_rows.len()
        );
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn money<T: std::fmt::Display>(value: Option<&T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}
