//! CLI argument parsing for Cribar

use crate::testing::TestMethod;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for run reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cribar")]
#[command(version)]
#[command(about = "Combinatorial multiple-testing correction with adaptive FWER control", long_about = None)]
pub struct Cli {
    /// Item matrix file (CSV: header names the item columns, rows are 0/1 flags)
    pub matrix_file: PathBuf,

    /// Outcome file (one name,value row per transaction, same order as the matrix)
    pub outcome_file: PathBuf,

    /// Statistical significance threshold
    pub alpha: f64,

    /// P-value procedure
    #[arg(short = 'p', long = "pvalue", value_enum, default_value = "fisher")]
    pub method: TestMethod,

    /// Maximum size of combinations to be tested (unlimited if absent)
    #[arg(long = "max-comb", value_name = "SIZE")]
    pub max_comb: Option<usize>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging of the threshold search
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_positional_arguments() {
        let cli = Cli::parse_from(["cribar", "matrix.csv", "flags.csv", "0.05"]);
        assert_eq!(cli.matrix_file, PathBuf::from("matrix.csv"));
        assert_eq!(cli.outcome_file, PathBuf::from("flags.csv"));
        assert_eq!(cli.alpha, 0.05);
    }

    #[test]
    fn test_cli_default_method_is_fisher() {
        let cli = Cli::parse_from(["cribar", "m.csv", "f.csv", "0.05"]);
        assert_eq!(cli.method, TestMethod::Fisher);
    }

    #[test]
    fn test_cli_selects_u_test() {
        let cli = Cli::parse_from(["cribar", "m.csv", "f.csv", "0.05", "-p", "u-test"]);
        assert_eq!(cli.method, TestMethod::UTest);
    }

    #[test]
    fn test_cli_rejects_unknown_method() {
        assert!(Cli::try_parse_from(["cribar", "m.csv", "f.csv", "0.05", "-p", "anova"]).is_err());
    }

    #[test]
    fn test_cli_max_comb() {
        let cli = Cli::parse_from(["cribar", "m.csv", "f.csv", "0.05", "--max-comb", "3"]);
        assert_eq!(cli.max_comb, Some(3));
    }

    #[test]
    fn test_cli_max_comb_default_unlimited() {
        let cli = Cli::parse_from(["cribar", "m.csv", "f.csv", "0.05"]);
        assert_eq!(cli.max_comb, None);
    }

    #[test]
    fn test_cli_debug_default_false() {
        let cli = Cli::parse_from(["cribar", "m.csv", "f.csv", "0.05"]);
        assert!(!cli.debug);
    }
}
