mod config;
mod reader;

use anyhow::{Context, Result};
use clap::Parser;
use config::{CliConfig, Config};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{info, warn};
use wallet_ledger::{
    transaction::{Currency, Transaction, WalletAction},
    wallet::{Balance, Wallet},
};

const TRANSACTION_HEADERS: [&str; 4] = ["#", "action", "currency", "amount"];
const BALANCE_HEADERS: [&str; 2] = ["currency", "balance"];

#[derive(Debug, Serialize)]
struct TransactionRow {
    #[serde(rename = "#")]
    index: usize,
    action: WalletAction,
    currency: Currency,
    amount: Decimal,
}

#[derive(Debug, Serialize)]
struct BalanceRow {
    currency: Currency,
    balance: Decimal,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CliConfig::parse();

    process_transactions(&config)?;

    info!("Processing completed successfully");

    Ok(())
}

fn process_transactions<C: Config>(config: &C) -> Result<()> {
    let transactions = reader::read_transactions(config.input_path(), config.input_format())
        .context("Failed to load transactions")?;

    let wallet = Wallet::new(transactions.iter().copied()).context("Failed to create wallet")?;

    let skipped = wallet.skipped().len();
    if skipped > 0 {
        warn!("{skipped} withdrawals skipped for insufficient funds");
    }
    info!(
        "Applied {} transactions, skipped {skipped}",
        transactions.len() - skipped
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_summary(&mut handle, &transactions, &wallet.balance())?;

    Ok(())
}

// Headers are written explicitly so empty tables still carry them
fn headerless_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(out)
}

fn render_summary<W: Write>(
    out: &mut W,
    transactions: &[Transaction],
    balance: &Balance,
) -> Result<()> {
    {
        let mut writer = headerless_writer(&mut *out);
        writer
            .write_record(TRANSACTION_HEADERS)
            .context("Failed to write transaction headers")?;

        for (i, tx) in transactions.iter().enumerate() {
            writer
                .serialize(TransactionRow {
                    index: i + 1,
                    action: tx.action,
                    currency: tx.currency,
                    amount: tx.amount,
                })
                .context("Failed to serialize transaction")?;
        }

        writer.flush().context("Failed to flush stdout")?;
    }

    writeln!(out).context("Failed to write to stdout")?;

    let mut writer = headerless_writer(&mut *out);
    writer
        .write_record(BALANCE_HEADERS)
        .context("Failed to write balance headers")?;

    for (currency, amount) in balance.iter() {
        writer
            .serialize(BalanceRow {
                currency,
                balance: amount,
            })
            .context("Failed to serialize balance")?;
    }

    writer.flush().context("Failed to flush stdout")?;

    Ok(())
}
