use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Format of the transactions file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    /// Detect from the file extension, then from the file contents
    #[default]
    Auto,
    Csv,
    Json,
}

/// Trait for reading configuration parameters
pub trait Config {
    fn input_path(&self) -> &Path;
    fn input_format(&self) -> InputFormat;
}

/// CLI configuration
#[derive(Parser, Debug)]
#[command(
    name = "wallet-cli",
    about = "Replays deposit/withdraw transactions from a CSV or JSON file and prints wallet balances",
    version
)]
pub struct CliConfig {
    /// Path to the input file containing transactions
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Input file format
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,
}

impl Config for CliConfig {
    fn input_path(&self) -> &Path {
        &self.input_file
    }

    fn input_format(&self) -> InputFormat {
        self.format
    }
}
