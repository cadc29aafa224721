//! Inventory data types.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A discovered local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size: u64,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Base name of the file, used as the remote object name.
    ///
    /// Falls back to the full path when there is no final component.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

/// Every file found by a scan, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    files: HashMap<PathBuf, u64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a file. A repeated path overwrites the earlier size.
    pub fn insert(&mut self, path: PathBuf, size: u64) {
        self.files.insert(path, size);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Size of a recorded file.
    pub fn size_of(&self, path: &Path) -> Option<u64> {
        self.files.get(path).copied()
    }

    /// Sum of all recorded sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.values().sum()
    }

    /// Consumes the inventory, yielding one record per file in no particular order.
    pub fn into_records(self) -> impl Iterator<Item = FileRecord> {
        self.files
            .into_iter()
            .map(|(path, size)| FileRecord { path, size })
    }
}

impl FromIterator<FileRecord> for Inventory {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for record in iter {
            inventory.insert(record.path, record.size);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_directories() {
        let record = FileRecord::new("/photos/2013/summer/beach.jpg", 10);
        assert_eq!(record.file_name(), "beach.jpg");
    }

    #[test]
    fn file_name_of_bare_name() {
        let record = FileRecord::new("beach.jpg", 10);
        assert_eq!(record.file_name(), "beach.jpg");
    }

    #[test]
    fn inventory_keys_are_unique() {
        let mut inventory = Inventory::new();
        inventory.insert(PathBuf::from("/a"), 1);
        inventory.insert(PathBuf::from("/a"), 7);
        inventory.insert(PathBuf::from("/b"), 2);

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.size_of(Path::new("/a")), Some(7));
        assert_eq!(inventory.total_size(), 9);
    }

    #[test]
    fn collect_from_records() {
        let inventory: Inventory = vec![FileRecord::new("/x", 3), FileRecord::new("/y", 4)]
            .into_iter()
            .collect();
        assert!(inventory.contains(Path::new("/x")));
        assert!(inventory.contains(Path::new("/y")));
        assert_eq!(inventory.into_records().count(), 2);
    }
}
