use crate::domain::model::LoadSummary;
use crate::domain::ports::Pipeline;
use crate::utils::diagnostics::Reporter;
use crate::utils::error::Result;

/// Runs a pipeline through its three phases. Each phase after the first
/// starts a fresh diagnostics group.
pub struct LedgerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> LedgerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self, reporter: &mut Reporter) -> Result<LoadSummary> {
        tracing::debug!("Extracting statements");
        let files = self.pipeline.extract(reporter)?;

        reporter.reset();
        tracing::debug!("Mapping {} statement files", files.len());
        let records = self.pipeline.transform(files, reporter)?;

        reporter.reset();
        tracing::debug!("Writing {} ledger rows", records.len());
        let summary = self.pipeline.load(records, reporter)?;

        Ok(summary)
    }
}
