use crate::config::mapping::CategoryTable;
use crate::domain::model::ClassificationKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Mapped(&'a str),
    /// The key is unknown and the table's `"default"` entry applied.
    Default(&'a str),
    Unresolved,
}

impl<'a> Resolution<'a> {
    /// Category text for the ledger; empty when unresolved.
    pub fn category(&self) -> &'a str {
        match *self {
            Resolution::Mapped(category) | Resolution::Default(category) => category,
            Resolution::Unresolved => "",
        }
    }
}

pub fn resolve<'a>(key: &ClassificationKey, table: &'a CategoryTable) -> Resolution<'a> {
    if let Some(category) = table.get(key.as_str()) {
        return Resolution::Mapped(category);
    }
    match table.default_category() {
        Some(category) => Resolution::Default(category),
        None => Resolution::Unresolved,
    }
}
