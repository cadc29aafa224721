//! Size-ordered transfer queue.

use std::cmp::Ordering;

use crate::types::{FileRecord, Inventory};

/// Inventory records sorted ascending by size.
///
/// Files of equal size are ordered by path so a given tree always produces the
/// same queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedQueue {
    records: Vec<FileRecord>,
}

/// Builds the transfer queue from a scanned inventory.
pub fn build_queue(inventory: Inventory) -> OrderedQueue {
    OrderedQueue::from(inventory)
}

fn by_size_then_path(a: &FileRecord, b: &FileRecord) -> Ordering {
    a.size.cmp(&b.size).then_with(|| a.path.cmp(&b.path))
}

impl OrderedQueue {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    /// Sum of all queued sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }

    pub fn as_slice(&self) -> &[FileRecord] {
        &self.records
    }
}

impl From<Inventory> for OrderedQueue {
    fn from(inventory: Inventory) -> Self {
        let mut records: Vec<FileRecord> = inventory.into_records().collect();
        records.sort_unstable_by(by_size_then_path);
        Self { records }
    }
}

impl IntoIterator for OrderedQueue {
    type Item = FileRecord;
    type IntoIter = std::vec::IntoIter<FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedQueue {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
