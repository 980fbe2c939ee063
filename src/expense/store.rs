//! The file-backed repository that owns the persisted expense list.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, expense::Expense};

/// Stores the full expense list as one JSON array in one file.
///
/// The file is the single source of truth: handlers re-read it on every
/// request and every save overwrites the whole value. Concurrent writers
/// are last-write-wins.
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store that reads and writes the file at `path`.
    ///
    /// The file is created lazily by the first [ExpenseStore::save].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full expense list from the data file.
    ///
    /// A missing file is an empty list. An unreadable file or contents that
    /// do not parse as a list of expenses are also treated as an empty
    /// list: the condition is logged but never surfaced to the caller.
    pub fn load(&self) -> Vec<Expense> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                tracing::warn!(
                    "could not read the expense file {}: {error}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(expenses) => expenses,
            Err(error) => {
                tracing::warn!(
                    "could not parse the expense file {}: {error}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the data file with `expenses`.
    ///
    /// The whole value is replaced in one write; there are no partial
    /// updates. Parent directories are created on demand.
    ///
    /// # Errors
    /// Returns [Error::StoreWrite] if the file or its parent directories
    /// cannot be written.
    pub fn save(&self, expenses: &[Expense]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|error| Error::StoreWrite(error.to_string()))?;
        }

        let payload = serde_json::to_string_pretty(expenses)
            .map_err(|error| Error::StoreWrite(error.to_string()))?;

        fs::write(&self.path, payload).map_err(|error| Error::StoreWrite(error.to_string()))
    }

    /// Delete the data file entirely.
    ///
    /// This is the explicit destructive action behind "clear all". A file
    /// that is already absent is success: afterwards [ExpenseStore::load]
    /// returns an empty list either way.
    ///
    /// # Errors
    /// Returns [Error::StoreWrite] if the file exists but cannot be removed.
    pub fn clear_all(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Error::StoreWrite(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use time::macros::date;

    use crate::expense::Expense;

    use super::ExpenseStore;

    fn get_test_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.json"));

        (temp_dir, store)
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            Expense::new(date!(2024 - 05 - 01), 84.5, "Groceries", "Weekly shop").unwrap(),
            Expense::new(date!(2024 - 05 - 03), 3.2, "Transport", "").unwrap(),
            Expense::new(date!(2024 - 06 - 11), 120.0, "Power", "winter bill").unwrap(),
        ]
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_temp_dir, store) = get_test_store();
        let expenses = sample_expenses();

        store.save(&expenses).unwrap();

        assert_eq!(store.load(), expenses);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let (_temp_dir, store) = get_test_store();

        assert_eq!(store.load(), Vec::new());
    }

    #[test]
    fn load_corrupt_file_is_empty() {
        let (_temp_dir, store) = get_test_store();
        fs::write(store.path(), "not json {").unwrap();

        assert_eq!(store.load(), Vec::new());
    }

    #[test]
    fn load_non_list_shape_is_empty() {
        let (_temp_dir, store) = get_test_store();
        fs::write(store.path(), r#"{"id": "a", "amount": 1.0}"#).unwrap();

        assert_eq!(store.load(), Vec::new());
    }

    #[test]
    fn save_overwrites_previous_value() {
        let (_temp_dir, store) = get_test_store();
        let expenses = sample_expenses();
        store.save(&expenses).unwrap();

        store.save(&expenses[..1]).unwrap();

        assert_eq!(store.load(), expenses[..1]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("data").join("expenses.json"));

        store.save(&sample_expenses()).unwrap();

        assert_eq!(store.load().len(), 3);
    }

    #[test]
    fn clear_all_then_load_is_empty() {
        let (_temp_dir, store) = get_test_store();
        store.save(&sample_expenses()).unwrap();

        store.clear_all().unwrap();

        assert_eq!(store.load(), Vec::new());
        assert!(!store.path().exists(), "data file should be deleted");
    }

    #[test]
    fn clear_all_on_missing_file_succeeds() {
        let (_temp_dir, store) = get_test_store();

        assert_eq!(store.clear_all(), Ok(()));
    }

    #[test]
    fn dates_are_stored_in_iso_form() {
        let (_temp_dir, store) = get_test_store();
        store
            .save(&[Expense::new(date!(2024 - 05 - 01), 84.5, "Groceries", "").unwrap()])
            .unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();

        assert!(
            contents.contains("\"2024-05-01\""),
            "want ISO date in file, got {contents}"
        );
    }
}
