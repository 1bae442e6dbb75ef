pub mod etl;
pub mod ledger;
pub mod pipeline;
pub mod resolver;
pub mod statement;

pub use crate::domain::model::{OutputRecord, StatementFile, TransactionRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
