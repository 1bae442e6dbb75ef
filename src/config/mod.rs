pub mod cli;
pub mod mapping;

use crate::domain::model::InvalidEntryPolicy;
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_required_field, Validate};

pub const DEFAULT_MAPPING_FILE: &str = "mapping.json";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "camt2csv")]
#[command(about = "Convert camt.053 XML bank statements into a categorized CSV ledger")]
pub struct CliConfig {
    /// Prefix of the XML statement files in the current directory
    #[arg(long = "in", value_name = "XML_FILENAMES_PREFIX", num_args = 0..=1, default_missing_value = "")]
    pub in_prefix: Option<String>,

    /// CSV file to write
    #[arg(long, value_name = "CSV_FILENAME", num_args = 0..=1, default_missing_value = "")]
    pub out: Option<String>,

    /// JSON file mapping end-to-end codes to categories
    #[arg(long, value_name = "MAPPING_FILENAME", default_value = DEFAULT_MAPPING_FILE)]
    pub config: String,

    /// Report malformed statement entries as warnings and leave them out
    #[arg(long)]
    pub skip_invalid_entries: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_required_field("in", &self.in_prefix)?;
        validate_required_field("out", &self.out)?;
        validate_non_empty_string("config", &self.config)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn run_options(&self) -> Result<RunOptions> {
        self.validate()?;
        Ok(RunOptions {
            input_prefix: validate_required_field("in", &self.in_prefix)?.to_string(),
            output_file: validate_required_field("out", &self.out)?.to_string(),
            mapping_file: self.config.clone(),
            invalid_entry_policy: if self.skip_invalid_entries {
                InvalidEntryPolicy::Skip
            } else {
                InvalidEntryPolicy::Abort
            },
        })
    }
}

/// Validated settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input_prefix: String,
    pub output_file: String,
    pub mapping_file: String,
    pub invalid_entry_policy: InvalidEntryPolicy,
}

impl RunOptions {
    pub fn new(input_prefix: impl Into<String>, output_file: impl Into<String>) -> Self {
        Self {
            input_prefix: input_prefix.into(),
            output_file: output_file.into(),
            mapping_file: DEFAULT_MAPPING_FILE.to_string(),
            invalid_entry_policy: InvalidEntryPolicy::Abort,
        }
    }

    pub fn with_mapping_file(mut self, mapping_file: impl Into<String>) -> Self {
        self.mapping_file = mapping_file.into();
        self
    }

    pub fn with_policy(mut self, policy: InvalidEntryPolicy) -> Self {
        self.invalid_entry_policy = policy;
        self
    }
}

impl ConfigProvider for RunOptions {
    fn input_prefix(&self) -> &str {
        &self.input_prefix
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn mapping_file(&self) -> &str {
        &self.mapping_file
    }

    fn invalid_entry_policy(&self) -> InvalidEntryPolicy {
        self.invalid_entry_policy
    }
}
