//! evidence-archive - Content store and read tracking for an evidence archive
//!
//! A curated collection of fictional documents, audio transcripts and email
//! threads, browsed by a reader who marks items as read.
//!
//! # Architecture
//!
//! - The content collection is compiled in, normalized once and presented
//!   in a deterministic shuffled order
//! - Read state is an owned set of item ids persisted through a pluggable
//!   key/value storage backend
//! - Storage failures never abort the reader; they are logged and ignored
//!
//! # Modules
//!
//! - `content`: Items, keyword derivation, seeded shuffle, the content store
//! - `read`: Read tracker and storage backends
//! - `config`: Path and seed configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List everything not yet read
//! archive list --unread
//!
//! # Open an item (marks it as read)
//! archive show mmz23
//!
//! # Search by keyword
//! archive search kontrollmäuse
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod read;

// Re-export main types at crate root for convenience
pub use content::{
    ContentError, ContentStore, EmailMessage, FileType, Item, ItemKind, ItemType, Lcg, DEFAULT_SEED,
};
pub use read::{FileStorage, MemoryStorage, ReadTracker, Storage, StorageError, READ_DOCUMENTS_KEY};
