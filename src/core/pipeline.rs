use crate::config::mapping::CategoryTable;
use crate::core::ledger::{assemble, render_csv};
use crate::core::statement::{discover_statements, parse_statement};
use crate::domain::model::{LoadSummary, OutputRecord, StatementFile};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::diagnostics::{Notice, Reporter};
use crate::utils::error::{LedgerError, Result};

pub struct LedgerPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    table: CategoryTable,
}

impl<S: Storage, C: ConfigProvider> LedgerPipeline<S, C> {
    pub fn new(storage: S, config: C, table: CategoryTable) -> Self {
        Self {
            storage,
            config,
            table,
        }
    }

    fn read_statement(&self, name: &str) -> Result<String> {
        let raw = self.storage.read_file(name).map_err(|e| {
            tracing::debug!("Reading {} failed: {}", name, e);
            LedgerError::StatementRead(name.to_string())
        })?;
        tracing::debug!("Read {} ({} bytes)", name, raw.len());
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for LedgerPipeline<S, C> {
    fn extract(&self, reporter: &mut Reporter) -> Result<Vec<StatementFile>> {
        let prefix = self.config.input_prefix();
        let names = discover_statements(&self.storage.list_files()?, prefix);
        if names.is_empty() {
            return Err(LedgerError::NoStatementFiles {
                prefix: prefix.to_string(),
            });
        }
        tracing::debug!("Found {} statement files for prefix {:?}", names.len(), prefix);

        let mut files = Vec::with_capacity(names.len());
        for name in &names {
            let xml = self.read_statement(name)?;
            let extracted = parse_statement(name, &xml, self.config.invalid_entry_policy())?;

            for failure in &extracted.skipped {
                reporter.warning(&Notice::EntrySkipped {
                    field: failure.field,
                    ordinal: failure.ordinal,
                    file: name.clone(),
                });
            }
            tracing::debug!(
                "Extracted {} records from {} ({} skipped)",
                extracted.file.records.len(),
                name,
                extracted.skipped.len()
            );
            reporter.info(&Notice::StatementLoaded { file: name.clone() });
            files.push(extracted.file);
        }

        Ok(files)
    }

    fn transform(&self, files: Vec<StatementFile>, reporter: &mut Reporter) -> Result<Vec<OutputRecord>> {
        let records = assemble(&self.table, &files, reporter);
        tracing::debug!("Categorized {} records", records.len());
        Ok(records)
    }

    fn load(&self, records: Vec<OutputRecord>, reporter: &mut Reporter) -> Result<LoadSummary> {
        let output_path = self.config.output_file().to_string();
        let data = render_csv(&records)?;

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        let written = match self.storage.write_file(&output_path, &data) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Writing {} failed: {}", output_path, e);
                reporter.error(&LedgerError::OutputWrite(output_path.clone()));
                false
            }
        };

        reporter.info(&Notice::OutputWritten {
            file: output_path.clone(),
            count: records.len(),
        });

        Ok(LoadSummary {
            output_path,
            count: records.len(),
            written,
        })
    }
}
