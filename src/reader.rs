use crate::config::InputFormat;
use anyhow::{bail, Context, Result};
use csv::StringRecord;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use wallet_ledger::{
    transaction::{Transaction, TransactionRecord},
    validator::validate_record,
};

const REQUIRED_HEADERS: [&str; 3] = ["action", "currency", "amount"];

/// Read and validate every transaction in the file at `path`
pub fn read_transactions(path: &Path, format: InputFormat) -> Result<Vec<Transaction>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file `{}`", path.display()))?;

    let format = resolve_format(path, &content, format);
    debug!("Reading {} as {format:?}", path.display());

    match format {
        InputFormat::Json => parse_json(content.as_bytes()),
        InputFormat::Csv | InputFormat::Auto => parse_csv(content.as_bytes()),
    }
}

fn resolve_format(path: &Path, content: &str, format: InputFormat) -> InputFormat {
    if format != InputFormat::Auto {
        return format;
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => InputFormat::Csv,
        Some("json") => InputFormat::Json,
        _ if content.trim_start().starts_with('[') => InputFormat::Json,
        _ => InputFormat::Csv,
    }
}

/// Parse CSV with an `action,currency,amount` header row (any case, any order)
pub fn parse_csv<R: Read>(source: R) -> Result<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: StringRecord = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(str::to_ascii_lowercase)
        .collect();

    if !REQUIRED_HEADERS
        .iter()
        .all(|required| headers.iter().any(|header| header == *required))
    {
        bail!("CSV must include headers: {}", REQUIRED_HEADERS.join(","));
    }

    let mut transactions = Vec::new();

    for result in reader.records() {
        let record = result.context("Failed to read CSV record")?;
        let line = record.position().map_or(0, |pos| pos.line());

        let tx = record
            .deserialize::<TransactionRecord>(Some(&headers))
            .map_err(anyhow::Error::from)
            .and_then(|raw| validate_record(&raw).map_err(anyhow::Error::from))
            .with_context(|| format!("Invalid row {line}"))?;

        transactions.push(tx);
    }

    Ok(transactions)
}

/// Parse a JSON array of `{"action", "currency", "amount"}` objects
pub fn parse_json<R: Read>(source: R) -> Result<Vec<Transaction>> {
    let items: Vec<serde_json::Value> =
        serde_json::from_reader(source).context("JSON must be a list of transactions")?;

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<TransactionRecord>(item)
                .map_err(anyhow::Error::from)
                .and_then(|raw| validate_record(&raw).map_err(anyhow::Error::from))
                .with_context(|| format!("Invalid item at index {}", i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use wallet_ledger::{transaction::Currency, validator::ValidationError};

    #[test]
    fn test_parse_csv() {
        let input = "Action, Currency ,AMOUNT\ndeposit,btc,1.5\nWITHDRAW, USD ,300\n";

        let transactions = parse_csv(input.as_bytes()).unwrap();

        assert_eq!(
            transactions,
            vec![
                Transaction::deposit(Currency::Btc, Decimal::new(15, 1)),
                Transaction::withdraw(Currency::Usd, Decimal::new(300, 0)),
            ]
        );
    }

    #[test]
    fn test_parse_csv_columns_in_any_order() {
        let input = "amount,action,currency\n5,DEPOSIT,ETH\n";

        let transactions = parse_csv(input.as_bytes()).unwrap();

        assert_eq!(
            transactions,
            vec![Transaction::deposit(Currency::Eth, Decimal::new(5, 0))]
        );
    }

    #[test]
    fn test_parse_csv_missing_header() {
        let err = parse_csv("action,amount\nDEPOSIT,1\n".as_bytes()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "CSV must include headers: action,currency,amount"
        );
    }

    #[test]
    fn test_parse_csv_reports_invalid_row() {
        let input = "action,currency,amount\nDEPOSIT,USD,10\nDEPOSIT,DOGE,1\n";

        let err = parse_csv(input.as_bytes()).unwrap_err();

        assert_eq!(err.to_string(), "Invalid row 3");
        assert_eq!(
            err.root_cause().downcast_ref::<ValidationError>(),
            Some(&ValidationError::UnsupportedCurrency("DOGE".to_string()))
        );
    }

    #[test]
    fn test_parse_csv_rejects_unparseable_amount() {
        let input = "action,currency,amount\nDEPOSIT,USD,lots\n";

        let err = parse_csv(input.as_bytes()).unwrap_err();

        assert_eq!(err.to_string(), "Invalid row 2");
    }

    #[test]
    fn test_parse_json() {
        let input = r#"[
            {"action": "deposit", "currency": "USD", "amount": 1000},
            {"action": "WITHDRAW", "currency": "usd", "amount": "300.5"}
        ]"#;

        let transactions = parse_json(input.as_bytes()).unwrap();

        assert_eq!(
            transactions,
            vec![
                Transaction::deposit(Currency::Usd, Decimal::new(1000, 0)),
                Transaction::withdraw(Currency::Usd, Decimal::new(3005, 1)),
            ]
        );
    }

    #[test]
    fn test_parse_json_requires_list() {
        let err = parse_json(r#"{"action": "DEPOSIT"}"#.as_bytes()).unwrap_err();

        assert_eq!(err.to_string(), "JSON must be a list of transactions");
    }

    #[test]
    fn test_parse_json_reports_invalid_item() {
        let input = r#"[
            {"action": "DEPOSIT", "currency": "BTC", "amount": 1},
            {"action": "DEPOSIT", "currency": "BTC", "amount": 0}
        ]"#;

        let err = parse_json(input.as_bytes()).unwrap_err();

        assert_eq!(err.to_string(), "Invalid item at index 2");
        assert_eq!(
            err.root_cause().downcast_ref::<ValidationError>(),
            Some(&ValidationError::NonPositiveAmount(Decimal::ZERO))
        );
    }

    #[test]
    fn test_resolve_format() {
        let csv_path = PathBuf::from("tx.CSV");
        let json_path = PathBuf::from("tx.json");
        let bare_path = PathBuf::from("tx");

        assert_eq!(
            resolve_format(&csv_path, "[", InputFormat::Auto),
            InputFormat::Csv
        );
        assert_eq!(
            resolve_format(&json_path, "", InputFormat::Auto),
            InputFormat::Json
        );
        assert_eq!(
            resolve_format(&bare_path, "  \n[{}]", InputFormat::Auto),
            InputFormat::Json
        );
        assert_eq!(
            resolve_format(&bare_path, "action,currency,amount", InputFormat::Auto),
            InputFormat::Csv
        );
        assert_eq!(
            resolve_format(&json_path, "", InputFormat::Csv),
            InputFormat::Csv
        );
    }
}
