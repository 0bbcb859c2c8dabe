use crate::transaction::{Currency, Transaction, WalletAction};
use crate::validator::{validate_transaction, ValidationError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Snapshot of wallet balances, detached from the wallet that produced it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Balance(BTreeMap<Currency, Decimal>);

impl Balance {
    /// Balance held in `currency`, zero when it was never touched
    pub fn get(&self, currency: Currency) -> Decimal {
        self.0.get(&currency).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.0.iter().map(|(currency, amount)| (*currency, *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<Currency, Decimal> {
        self.0
    }
}

/// Single wallet holding one non-negative balance per currency
#[derive(Debug, Default)]
pub struct Wallet {
    // `None` until a transaction references the currency
    balances: [Option<Decimal>; Currency::ALL.len()],
    skipped: Vec<Transaction>,
}

impl Wallet {
    /// Build a wallet by applying `transactions` in order.
    ///
    /// Stops at the first invalid transaction. Withdrawals without enough
    /// funds are skipped with a warning and do not stop the replay.
    pub fn new<I>(transactions: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut wallet = Self::default();

        for tx in transactions {
            wallet.apply(tx.action, tx.currency, tx.amount, true)?;
        }

        Ok(wallet)
    }

    /// Apply one transaction.
    ///
    /// Returns `Ok(false)` when a withdrawal was skipped for insufficient
    /// funds; the balance is left untouched in that case.
    pub fn apply(
        &mut self,
        action: WalletAction,
        currency: Currency,
        amount: Decimal,
        report_skip: bool,
    ) -> Result<bool, ValidationError> {
        let tx = Transaction::new(action, currency, amount);
        validate_transaction(&tx)?;

        let balance = self.balances[currency.index()].get_or_insert(Decimal::ZERO);

        match action {
            WalletAction::Deposit => {
                *balance = balance
                    .checked_add(amount)
                    .ok_or(ValidationError::BalanceOverflow { currency, amount })?;
                debug!("Deposited {amount} {currency}, balance {balance}");

                Ok(true)
            }
            WalletAction::Withdraw => {
                if *balance < amount {
                    if report_skip {
                        warn!(
                            "Insufficient funds for withdrawal: {amount} {currency}, transaction skipped"
                        );
                    }

                    self.skipped.push(tx);

                    return Ok(false);
                }

                *balance -= amount;
                debug!("Withdrew {amount} {currency}, balance {balance}");

                Ok(true)
            }
        }
    }

    pub fn balance(&self) -> Balance {
        Balance(
            Currency::ALL
                .into_iter()
                .filter_map(|currency| {
                    self.balances[currency.index()].map(|amount| (currency, amount))
                })
                .collect(),
        )
    }

    pub fn balance_of(&self, currency: Currency) -> Decimal {
        self.balances[currency.index()].unwrap_or_default()
    }

    /// Withdrawals skipped for insufficient funds, in the order they were seen
    pub fn skipped(&self) -> &[Transaction] {
        &self.skipped
    }
}
