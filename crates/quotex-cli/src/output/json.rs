use quotex_core::error::QuotexError;
use quotex_core::model::QuoteRecord;

pub fn print(records: &[QuoteRecord]) -> Result<(), QuotexError> {
    let json = serde_json::to_string_pretty(records)?;
    println!("{json}");
    Ok(())
}
