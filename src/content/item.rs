//! Archive item types.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::keywords::{email_keywords, normalize_keywords};

/// One unit of archive content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, stable identifier
    pub id: String,

    /// When the item was created (local wall-clock time as authored)
    pub datetime: NaiveDateTime,

    /// Display label
    pub name: String,

    /// Lowercase search terms
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Higher is more prominent
    #[serde(default)]
    pub priority: i32,

    /// Type-specific payload
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// Type-specific item payload, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// A scanned or rendered document
    Document { filename: String },

    /// An audio recording with transcript
    Audio {
        #[serde(rename = "durationSeconds")]
        duration_seconds: u32,
    },

    /// An email thread (always a single message)
    Email { thread: [EmailMessage; 1] },
}

/// A single message in an email thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        sender: impl Into<String>,
        recipients: impl IntoIterator<Item = impl Into<String>>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipients: recipients.into_iter().map(Into::into).collect(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Item discriminant, used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Document,
    Audio,
    Email,
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Document => write!(f, "document"),
            ItemType::Audio => write!(f, "audio"),
            ItemType::Email => write!(f, "email"),
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "document" | "doc" => Ok(ItemType::Document),
            "audio" => Ok(ItemType::Audio),
            "email" | "mail" => Ok(ItemType::Email),
            _ => anyhow::bail!("Unknown item type: {}", s),
        }
    }
}

/// Document file type, derived from the filename extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Png,
    Pdf,
    Html,
}

impl FileType {
    /// Detect the file type from a filename, case-insensitively
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "png" => Some(FileType::Png),
            "pdf" => Some(FileType::Pdf),
            "html" | "htm" => Some(FileType::Html),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Png => write!(f, "png"),
            FileType::Pdf => write!(f, "pdf"),
            FileType::Html => write!(f, "html"),
        }
    }
}

impl Item {
    /// Create a document item
    pub fn document(
        id: impl Into<String>,
        datetime: NaiveDateTime,
        name: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            id,
            datetime,
            name,
            ItemKind::Document {
                filename: filename.into(),
            },
        )
    }

    /// Create an audio item
    pub fn audio(
        id: impl Into<String>,
        datetime: NaiveDateTime,
        name: impl Into<String>,
        duration_seconds: u32,
    ) -> Self {
        Self::with_kind(id, datetime, name, ItemKind::Audio { duration_seconds })
    }

    /// Create an email item; keywords are derived from the message
    pub fn email(
        id: impl Into<String>,
        datetime: NaiveDateTime,
        name: impl Into<String>,
        message: EmailMessage,
    ) -> Self {
        let thread = [message];
        let keywords = email_keywords(&thread);
        let mut item = Self::with_kind(id, datetime, name, ItemKind::Email { thread });
        item.keywords = keywords;
        item
    }

    fn with_kind(
        id: impl Into<String>,
        datetime: NaiveDateTime,
        name: impl Into<String>,
        kind: ItemKind,
    ) -> Self {
        Self {
            id: id.into(),
            datetime,
            name: name.into(),
            keywords: Vec::new(),
            priority: 0,
            kind,
        }
    }

    /// Add authored keywords
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Lowercase and deduplicate keywords
    ///
    /// Email keywords are always re-derived from the thread, discarding any
    /// authored or deserialized ones.
    pub fn normalized(mut self) -> Self {
        self.keywords = match &self.kind {
            ItemKind::Email { thread } => email_keywords(thread),
            _ => normalize_keywords(std::mem::take(&mut self.keywords)),
        };
        self
    }

    /// Get the item discriminant
    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Document { .. } => ItemType::Document,
            ItemKind::Audio { .. } => ItemType::Audio,
            ItemKind::Email { .. } => ItemType::Email,
        }
    }

    /// File type for documents with a recognized extension
    pub fn file_type(&self) -> Option<FileType> {
        match &self.kind {
            ItemKind::Document { filename } => FileType::from_filename(filename),
            _ => None,
        }
    }

    /// Whether the query appears in the name or any keyword (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query_lower)
            || self.keywords.iter().any(|k| k.contains(&query_lower))
    }
}
