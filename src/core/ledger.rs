use crate::config::mapping::CategoryTable;
use crate::core::resolver::{resolve, Resolution};
use crate::domain::model::{LedgerRow, OutputRecord, StatementFile};
use crate::utils::diagnostics::{Notice, Reporter};
use crate::utils::error::{LedgerError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const LEDGER_HEADER: [&str; 5] = ["Date", "Category", "Name", "Description", "Amount"];

/// Categorizes every record, keeping file order and entry order.
pub fn assemble(
    table: &CategoryTable,
    files: &[StatementFile],
    reporter: &mut Reporter,
) -> Vec<OutputRecord> {
    let mut output = Vec::with_capacity(files.iter().map(|f| f.records.len()).sum());

    for file in files {
        for record in &file.records {
            let resolution = resolve(&record.key, table);
            if resolution == Resolution::Unresolved {
                reporter.warning(&Notice::UnmappedCode {
                    code: record.key.to_string(),
                    ordinal: record.ordinal,
                    file: file.source.clone(),
                });
            }
            output.push(OutputRecord {
                date: record.date.clone(),
                category: resolution.category().to_string(),
                amount: record.amount,
            });
        }
    }

    output
}

/// Renders the ledger CSV: every field quoted, `\n` line endings, header
/// always present.
pub fn render_csv(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(LEDGER_HEADER)?;
    for record in records {
        wtr.serialize(LedgerRow::from(record))?;
    }

    wtr.into_inner()
        .map_err(|e| LedgerError::IoError(e.into_error()))
}
