//! Read tracking for archive items.
//!
//! Each item is implicitly `unread` until the reader opens it; `read` is
//! terminal. The read set is persisted as a JSON array of ids under a
//! single storage key.
//!
//! # Storage Layout
//!
//! ```text
//! <storage_dir>/
//! └── readDocuments.json     # ["mmz23","test1",...] in first-read order
//! ```

pub mod storage;
pub mod tracker;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use tracker::{ReadTracker, READ_DOCUMENTS_KEY};
