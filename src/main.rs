use camt2csv::domain::model::LoadSummary;
use camt2csv::domain::ports::ConfigProvider;
use camt2csv::utils::logger;
use camt2csv::{
    CategoryTable, CliConfig, LedgerEngine, LedgerPipeline, LocalStorage, Reporter, Result,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let mut reporter = Reporter::stdout();

    match run(&config, &mut reporter) {
        Ok(summary) if summary.written => ExitCode::SUCCESS,
        Ok(summary) => {
            tracing::error!("Output file {} was not written", summary.output_path);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Conversion failed: {} (Category: {:?})", e, e.category());
            reporter.fatal(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig, reporter: &mut Reporter) -> Result<LoadSummary> {
    let options = config.run_options()?;
    let storage = LocalStorage::current_dir();

    let table = CategoryTable::load(&storage, options.mapping_file(), reporter)?;
    let pipeline = LedgerPipeline::new(storage, options, table);

    LedgerEngine::new(pipeline).run(reporter)
}
