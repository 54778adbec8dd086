use crate::error::QuotexError;
use crate::model::{LineItem, QuoteRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Fixed output column order. One row per line item, with the quote's
/// header fields repeated on every row.
pub const COLUMNS: [&str; 16] = [
    "Quote Number",
    "Quote Date",
    "Customer Number",
    "Salesperson Code",
    "Company",
    "Address",
    "City",
    "State",
    "Zip Code",
    "Country",
    "Item ID",
    "Description",
    "UOM",
    "Qty",
    "Unit Price",
    "Total Sales",
];

/// Write all records into one workbook, in input order. Failed
/// documents are not passed in here; they belong to the failure report.
pub fn write_workbook(path: &Path, records: &[QuoteRecord]) -> Result<(), QuotexError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Quotes")?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    let mut row: u32 = 1;
    for record in records {
        for item in &record.items {
            write_row(sheet, row, record, item)?;
            row += 1;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_row(
    sheet: &mut Worksheet,
    row: u32,
    record: &QuoteRecord,
    item: &LineItem,
) -> Result<(), QuotexError> {
    let header = &record.header;
    sheet.write_string(row, 0, &header.quote_number)?;
    write_opt(sheet, row, 1, &header.quote_date)?;
    write_opt(sheet, row, 2, &header.customer_number)?;
    write_opt(sheet, row, 3, &header.salesperson_code)?;
    write_opt(sheet, row, 4, &header.company)?;
    write_opt(sheet, row, 5, &header.address)?;
    write_opt(sheet, row, 6, &header.city)?;
    write_opt(sheet, row, 7, &header.state)?;
    write_opt(sheet, row, 8, &header.zip_code)?;
    write_opt(sheet, row, 9, &header.country)?;
    sheet.write_string(row, 10, &item.item_id)?;
    sheet.write_string(row, 11, &item.description)?;
    write_opt(sheet, row, 12, &item.uom)?;
    sheet.write_number(row, 13, item.quantity as f64)?;
    if let Some(price) = item.unit_price.and_then(|d| d.to_f64()) {
        sheet.write_number(row, 14, price)?;
    }
    if let Some(total) = item.total_sales.and_then(|d| d.to_f64()) {
        sheet.write_number(row, 15, total)?;
    }
    Ok(())
}

fn write_opt(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Option<String>,
) -> Result<(), QuotexError> {
    if let Some(v) = value {
        sheet.write_string(row, col, v)?;
    }
    Ok(())
}
