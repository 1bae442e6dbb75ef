use crate::domain::model::{InvalidEntryPolicy, LoadSummary, OutputRecord, StatementFile};
use crate::utils::diagnostics::Reporter;
use crate::utils::error::Result;

/// File access relative to the run's working directory.
pub trait Storage {
    /// Names of the regular files in the working directory.
    fn list_files(&self) -> Result<Vec<String>>;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_prefix(&self) -> &str;
    fn output_file(&self) -> &str;
    fn mapping_file(&self) -> &str;
    fn invalid_entry_policy(&self) -> InvalidEntryPolicy;
}

pub trait Pipeline {
    fn extract(&self, reporter: &mut Reporter) -> Result<Vec<StatementFile>>;
    fn transform(&self, files: Vec<StatementFile>, reporter: &mut Reporter) -> Result<Vec<OutputRecord>>;
    fn load(&self, records: Vec<OutputRecord>, reporter: &mut Reporter) -> Result<LoadSummary>;
}
