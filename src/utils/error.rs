use crate::domain::model::EntryField;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("mandatory command line argument \"{0}\" is missing")]
    MissingArgument(String),

    #[error("cannot read configuration file \"{0}\"")]
    ConfigRead(String),

    #[error("cannot parse configuration file \"{0}\"")]
    ConfigParse(String),

    #[error("invalid format of configuration file \"{0}\"")]
    ConfigFormat(String),

    #[error("invalid entry \"{key}\" in configuration file \"{file}\" (string expected)")]
    ConfigEntry { key: String, file: String },

    #[error("no file with prefix \"{prefix}\" found in current directory")]
    NoStatementFiles { prefix: String },

    #[error("cannot read XML file \"{0}\"")]
    StatementRead(String),

    #[error("cannot parse XML file \"{0}\"")]
    StatementParse(String),

    #[error("invalid format of XML file \"{0}\" (entries not found)")]
    StatementFormat(String),

    #[error("cannot process \"{field}\" field of entry number {ordinal} in XML file \"{file}\"")]
    InvalidEntry {
        field: EntryField,
        ordinal: usize,
        file: String,
    },

    #[error("cannot write CSV file \"{0}\"")]
    OutputWrite(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Coarse grouping used when logging a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Discovery,
    Structure,
    Entry,
    Output,
    Internal,
}

impl LedgerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingArgument(_)
            | Self::ConfigRead(_)
            | Self::ConfigParse(_)
            | Self::ConfigFormat(_)
            | Self::ConfigEntry { .. } => ErrorCategory::Configuration,
            Self::NoStatementFiles { .. } => ErrorCategory::Discovery,
            Self::StatementRead(_) | Self::StatementParse(_) | Self::StatementFormat(_) => {
                ErrorCategory::Structure
            }
            Self::InvalidEntry { .. } => ErrorCategory::Entry,
            Self::OutputWrite(_) => ErrorCategory::Output,
            Self::IoError(_) | Self::CsvError(_) => ErrorCategory::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
