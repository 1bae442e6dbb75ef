use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

pub const INTEREST_KEY: &str = "interest";
pub const EMPTY_KEY: &str = "empty";

/// Key used to look a transaction up in the category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationKey {
    /// Remainder of a `VS`-prefixed end-to-end reference, kept verbatim.
    VariableSymbol(String),
    Interest,
    Empty,
}

impl ClassificationKey {
    pub fn as_str(&self) -> &str {
        match self {
            ClassificationKey::VariableSymbol(symbol) => symbol,
            ClassificationKey::Interest => INTEREST_KEY,
            ClassificationKey::Empty => EMPTY_KEY,
        }
    }
}

impl fmt::Display for ClassificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement entry field that failed extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Amount,
    Date,
    EndToEndCode,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryField::Amount => "amount",
            EntryField::Date => "date",
            EntryField::EndToEndCode => "end-to-end code",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// 1-based position of the entry in its source document.
    pub ordinal: usize,
    /// Credits are positive, debits negative.
    pub amount: Decimal,
    pub date: String,
    pub key: ClassificationKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    pub source: String,
    pub records: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFailure {
    pub field: EntryField,
    pub ordinal: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedStatement {
    pub file: StatementFile,
    /// Entries dropped under [`InvalidEntryPolicy::Skip`].
    pub skipped: Vec<EntryFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidEntryPolicy {
    /// Stop the run at the first malformed entry.
    #[default]
    Abort,
    /// Drop malformed entries and report them as warnings.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub date: String,
    /// Empty when the key could not be mapped.
    pub category: String,
    pub amount: Decimal,
}

/// One CSV row. `Name` and `Description` are always empty.
#[derive(Debug, Serialize)]
pub struct LedgerRow<'a> {
    #[serde(rename = "Date")]
    pub date: &'a str,
    #[serde(rename = "Category")]
    pub category: &'a str,
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Description")]
    pub description: &'a str,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl<'a> From<&'a OutputRecord> for LedgerRow<'a> {
    fn from(record: &'a OutputRecord) -> Self {
        Self {
            date: &record.date,
            category: &record.category,
            name: "",
            description: "",
            amount: format_amount(record.amount),
        }
    }
}

/// Two decimals, halves rounded away from zero.
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub output_path: String,
    pub count: usize,
    pub written: bool,
}
