//! Local file inventory and size-ordered transfer queue.
//!
//! # Pipeline
//!
//! 1. **Scan**: walk the root directory, recording every regular file and its size
//! 2. **Order**: sort the inventory ascending by size into an [`OrderedQueue`]
//!
//! The queue is what the transfer phase consumes. Small files go first so that
//! connectivity or credential problems show up before large uploads start.

pub mod error;
pub mod queue;
pub mod scanner;
pub mod types;

pub use error::ScanError;
pub use queue::{OrderedQueue, build_queue};
pub use scanner::{scan, walk_files};
pub use types::{FileRecord, Inventory};
