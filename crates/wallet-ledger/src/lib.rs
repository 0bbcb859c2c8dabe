pub mod transaction;
pub mod validator;
pub mod wallet;

use transaction::Transaction;
use validator::ValidationError;
use wallet::{Balance, Wallet};

/// Replay a batch of transactions into a fresh wallet and return its balances
pub fn replay(
    transactions: impl IntoIterator<Item = Transaction>,
) -> Result<Balance, ValidationError> {
    Wallet::new(transactions).map(|wallet| wallet.balance())
}
