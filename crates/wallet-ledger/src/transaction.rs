use crate::validator::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currency codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Btc,
    Eth,
}

impl Currency {
    pub const ALL: [Self; 3] = [Self::Usd, Self::Btc, Self::Eth];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Btc => "BTC",
            Self::Eth => "ETH",
        }
    }

    /// Slot of this currency in a per-currency table
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();

        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::UnsupportedCurrency(s.to_string()))
    }
}

/// Wallet action enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WalletAction {
    Deposit,
    Withdraw,
}

impl WalletAction {
    pub const ALL: [Self; 2] = [Self::Deposit, Self::Withdraw];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for WalletAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for WalletAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();

        Self::ALL
            .into_iter()
            .find(|action| action.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::UnsupportedAction(s.to_string()))
    }
}

/// Validated wallet transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub action: WalletAction,
    pub currency: Currency,
    pub amount: Decimal,
}

impl Transaction {
    pub const fn new(action: WalletAction, currency: Currency, amount: Decimal) -> Self {
        Self {
            action,
            currency,
            amount,
        }
    }

    pub const fn deposit(currency: Currency, amount: Decimal) -> Self {
        Self::new(WalletAction::Deposit, currency, amount)
    }

    pub const fn withdraw(currency: Currency, amount: Decimal) -> Self {
        Self::new(WalletAction::Withdraw, currency, amount)
    }
}

/// Transaction record as read from an input file, not yet validated
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub action: String,
    pub currency: String,
    pub amount: Decimal,
}
