use crate::domain::ports::Storage;
use crate::utils::diagnostics::{Notice, Reporter};
use crate::utils::error::{LedgerError, Result};
use std::collections::HashMap;

/// Reserved key holding the fallback category.
pub const DEFAULT_CATEGORY_KEY: &str = "default";

/// End-to-end code to category mapping, read once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    categories: HashMap<String, String>,
}

impl CategoryTable {
    /// Reads and parses the mapping file, reporting success as info.
    pub fn load<S: Storage>(storage: &S, file: &str, reporter: &mut Reporter) -> Result<Self> {
        let raw = storage.read_file(file).map_err(|e| {
            tracing::debug!("Reading {} failed: {}", file, e);
            LedgerError::ConfigRead(file.to_string())
        })?;
        let content = String::from_utf8(raw).map_err(|_| LedgerError::ConfigRead(file.to_string()))?;

        let table = Self::from_json_str(&content, file)?;
        if table.is_empty() {
            tracing::debug!("{} maps no codes, every entry stays uncategorized", file);
        } else {
            tracing::debug!("Loaded {} category mappings from {}", table.len(), file);
        }
        reporter.info(&Notice::ConfigLoaded {
            file: file.to_string(),
        });
        Ok(table)
    }

    /// `file` is only used in error messages.
    pub fn from_json_str(content: &str, file: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
            tracing::debug!("JSON error in {}: {}", file, e);
            LedgerError::ConfigParse(file.to_string())
        })?;

        let serde_json::Value::Object(entries) = value else {
            return Err(LedgerError::ConfigFormat(file.to_string()));
        };

        let mut categories = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            match value {
                serde_json::Value::String(category) => {
                    categories.insert(key, category);
                }
                _ => {
                    return Err(LedgerError::ConfigEntry {
                        key,
                        file: file.to_string(),
                    })
                }
            }
        }

        Ok(Self { categories })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.categories.get(key).map(String::as_str)
    }

    pub fn default_category(&self) -> Option<&str> {
        self.get(DEFAULT_CATEGORY_KEY)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            categories: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
