pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, mapping::CategoryTable, RunOptions};
pub use core::{etl::LedgerEngine, pipeline::LedgerPipeline};
pub use utils::diagnostics::Reporter;
pub use utils::error::{LedgerError, Result};
