use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::{AppError, AppResult};
use crate::models::domain::QuestionBank;
use crate::repositories::bank_loader;

/// Build-once, read-many access to question banks keyed by source file name.
#[cfg_attr(test, mockall::automock)]
pub trait BankRegistry: Send + Sync {
    /// Available source keys, sorted by name. A missing data directory
    /// lists as empty rather than failing.
    fn list_sources(&self) -> AppResult<Vec<String>>;

    /// The bank for `key`, loading and caching it on first request. Load
    /// failures propagate and cache nothing.
    fn get(&self, key: &str) -> AppResult<Arc<QuestionBank>>;
}

pub struct CsvBankRegistry {
    data_dir: PathBuf,
    cache: Mutex<HashMap<String, Arc<QuestionBank>>>,
}

impl CsvBankRegistry {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl BankRegistry for CsvBankRegistry {
    fn list_sources(&self) -> AppResult<Vec<String>> {
        let entries = match std::fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") || !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                files.push(name.to_string());
            }
        }
        files.sort();
        Ok(files)
    }

    fn get(&self, key: &str) -> AppResult<Arc<QuestionBank>> {
        if !self.list_sources()?.iter().any(|source| source == key) {
            return Err(AppError::SourceNotFound(key.to_string()));
        }

        // The lock is held across the load so concurrent requests for a
        // not-yet-loaded source converge on a single load, and no caller
        // can observe a partially-built bank.
        let mut cache = self.cache.lock();
        if let Some(bank) = cache.get(key) {
            return Ok(Arc::clone(bank));
        }

        let bank = Arc::new(bank_loader::load_bank(&self.data_dir.join(key))?);
        cache.insert(key.to_string(), Arc::clone(&bank));
        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures_registry() -> CsvBankRegistry {
        CsvBankRegistry::new("tests/fixtures")
    }

    #[test]
    fn lists_csv_sources_sorted() {
        let registry = fixtures_registry();
        let sources = registry.list_sources().unwrap();

        assert_eq!(sources, vec!["arithmetic.csv", "capitals.csv"]);
    }

    #[test]
    fn missing_directory_lists_as_empty() {
        let registry = CsvBankRegistry::new("tests/fixtures/does-not-exist");
        assert!(registry.list_sources().unwrap().is_empty());
    }

    #[test]
    fn get_builds_once_and_reuses_the_instance() {
        let registry = fixtures_registry();

        let first = registry.get("capitals.csv").unwrap();
        let second = registry.get("capitals.csv").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.total_questions(), 3);
    }

    #[test]
    fn get_rejects_unknown_keys() {
        let registry = fixtures_registry();
        let result = registry.get("missing.csv");

        assert!(matches!(result, Err(AppError::SourceNotFound(_))));
    }
}
