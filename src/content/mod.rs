//! Archive content: items, keywords and presentation order.
//!
//! The collection is authored as a literal dataset, normalized once and
//! exposed through [`ContentStore`] in a reproducible shuffled order.
//!
//! # Item Layout
//!
//! ```text
//! Item
//! ├── id, datetime, name, keywords, priority   # common metadata
//! └── kind
//!     ├── document { filename }
//!     ├── audio    { durationSeconds }
//!     └── email    { thread: [message] }       # keywords derived from thread
//! ```

pub mod dataset;
pub mod item;
pub mod keywords;
pub mod shuffle;
pub mod store;

pub use item::{EmailMessage, FileType, Item, ItemKind, ItemType};
pub use keywords::{email_keywords, normalize_keywords, split_and_clean};
pub use shuffle::{shuffle, Lcg, DEFAULT_SEED};
pub use store::{ContentError, ContentStore};
