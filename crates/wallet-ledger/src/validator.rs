use crate::transaction::{Currency, Transaction, TransactionRecord, WalletAction};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported wallet action: {0}")]
    UnsupportedAction(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Amount must be positive: {0}")]
    NonPositiveAmount(Decimal),
    #[error("Deposit of {amount} {currency} overflows the balance")]
    BalanceOverflow { currency: Currency, amount: Decimal },
}

/// Validate a raw action/currency/amount triple into a [`Transaction`].
///
/// Checks run in order: action, currency, amount. The first failing check
/// is returned.
pub fn validate(
    action: &str,
    currency: &str,
    amount: Decimal,
) -> Result<Transaction, ValidationError> {
    let action = action.parse::<WalletAction>()?;
    let currency = currency.parse::<Currency>()?;
    check_amount(amount)?;

    Ok(Transaction::new(action, currency, amount))
}

pub fn validate_record(record: &TransactionRecord) -> Result<Transaction, ValidationError> {
    validate(&record.action, &record.currency, record.amount)
}

/// Validate an already typed transaction before it touches wallet state
pub fn validate_transaction(tx: &Transaction) -> Result<(), ValidationError> {
    if !WalletAction::ALL.contains(&tx.action) {
        return Err(ValidationError::UnsupportedAction(tx.action.to_string()));
    }

    if !Currency::ALL.contains(&tx.currency) {
        return Err(ValidationError::UnsupportedCurrency(tx.currency.to_string()));
    }

    check_amount(tx.amount)
}

fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }

    Ok(())
}
