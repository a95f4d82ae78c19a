//! These structs provide the CLI interface for the txn CLI.

use crate::model::Category;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// txn: browse, filter and add financial transactions.
///
/// Transactions live in memory only. Every invocation starts from the same set of sample
/// records; use the `session` subcommand to add, filter and search interactively.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and write a default configuration file.
    Init,
    /// List transactions, optionally filtered by category and merchant text.
    List(ListArgs),
    /// Show every field of one transaction.
    Show(ShowArgs),
    /// Validate and add an expense, then list the result.
    Add(AddArgs),
    /// Read commands from stdin, one per line, against a single in-memory store.
    ///
    /// Type `help` once started for the list of commands.
    Session,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory holding config.json. Defaults to ~/txn-tracker
    #[arg(long, env = "TXN_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `txn list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Only show transactions in this category (case-insensitive name).
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,

    /// Only show transactions whose merchant contains this text, ignoring case.
    #[arg(long)]
    pub search: Option<String>,

    /// Print the matching records as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Args for the `txn show` command.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// The transaction id.
    pub id: String,
}

/// Args for the `txn add` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct AddArgs {
    /// The amount spent. Recorded as an expense whatever its sign.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    /// Where the money was spent.
    #[arg(long)]
    pub merchant: String,

    /// One of: Groceries, Transportation, Dining, Entertainment, Healthcare, Shopping, Utilities
    #[arg(long)]
    pub category: Option<String>,

    /// The date as YYYY-MM-DD. Defaults to today and may not be in the future.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Parses a category name without regard to case.
pub fn parse_category(s: &str) -> std::result::Result<Category, String> {
    Category::from_name_ignore_case(s).ok_or_else(|| {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown category '{s}', expected one of: {}", names.join(", "))
    })
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("txn-tracker"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or TXN_HOME instead of relying on the default home \
                directory.",
            );
            PathBuf::from("txn-tracker")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_args() {
        let args = Args::try_parse_from([
            "txn",
            "--home",
            "/tmp/x",
            "list",
            "--category",
            "groceries",
            "--search",
            "whole",
        ])
        .unwrap();
        assert_eq!(args.common().home().path(), Path::new("/tmp/x"));
        match args.command() {
            Command::List(list) => {
                assert_eq!(list.category, Some(Category::Groceries));
                assert_eq!(list.search.as_deref(), Some("whole"));
                assert!(!list.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_args_with_negative_amount() {
        let args = Args::try_parse_from([
            "txn", "add", "--amount", "-45", "--merchant", "Shop", "--date", "2024-02-01",
        ])
        .unwrap();
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.amount, "-45");
                assert_eq!(add.category, None);
                assert_eq!(add.date, NaiveDate::from_ymd_opt(2024, 2, 1));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = parse_category("Rent").unwrap_err();
        assert!(err.contains("Groceries"));
        assert!(Args::try_parse_from(["txn", "list", "--category", "Rent"]).is_err());
    }
}
