//! Command-line interface for the archive.
//!
//! Stands in for the reader's UI: list and search items, open an item
//! (which marks it as read), and inspect read progress.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::content::{ContentStore, Item, ItemKind, ItemType};
use crate::read::{FileStorage, ReadTracker, Storage};

/// archive - Browse the evidence archive
#[derive(Parser, Debug)]
#[command(name = "archive")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Override the reader state directory
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Override the presentation order seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items in presentation order
    List {
        /// Filter by item type
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Only show items not yet read
        #[arg(short, long)]
        unread: bool,

        /// Order by priority (highest first)
        #[arg(short, long)]
        by_priority: bool,

        /// Maximum number of items to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Search items by name and keyword
    Search {
        /// Search query
        query: String,
    },

    /// Open an item and mark it as read
    Show {
        /// Item ID
        id: String,
    },

    /// Mark an item as read without opening it
    MarkRead {
        /// Item ID
        id: String,
    },

    /// Show read progress
    Status,

    /// Show resolved configuration (debug)
    Config,
}

/// Item type for CLI (maps to ItemType)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Document,
    Audio,
    Email,
}

impl From<KindArg> for ItemType {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Document => ItemType::Document,
            KindArg::Audio => ItemType::Audio,
            KindArg::Email => ItemType::Email,
        }
    }
}

/// Listing options
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub item_type: Option<ItemType>,
    pub unread_only: bool,
    pub by_priority: bool,
    pub limit: Option<usize>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let Cli {
            storage_dir,
            seed,
            command,
        } = self;

        match command {
            Commands::Config => show_config(),
            Commands::List {
                kind,
                unread,
                by_priority,
                limit,
            } => {
                let (store, tracker) = open_archive(storage_dir, seed)?;
                let options = ListOptions {
                    item_type: kind.map(ItemType::from),
                    unread_only: unread,
                    by_priority,
                    limit: Some(limit),
                };
                list_items(&store, &tracker, &options);
                Ok(())
            }
            Commands::Search { query } => {
                let (store, tracker) = open_archive(storage_dir, seed)?;
                search_items(&store, &tracker, &query);
                Ok(())
            }
            Commands::Show { id } => {
                let (store, mut tracker) = open_archive(storage_dir, seed)?;
                show_item(&store, &mut tracker, &id)
            }
            Commands::MarkRead { id } => {
                let (store, mut tracker) = open_archive(storage_dir, seed)?;
                mark_read(&store, &mut tracker, &id)
            }
            Commands::Status => {
                let (store, tracker) = open_archive(storage_dir, seed)?;
                show_status(&store, &tracker);
                Ok(())
            }
        }
    }
}

/// Build the content store and restore the reader's state
fn open_archive(
    storage_dir: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<(ContentStore, ReadTracker<FileStorage>)> {
    let seed = match seed {
        Some(seed) => seed,
        None => config::seed()?,
    };
    let storage = match storage_dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::open_default()?,
    };

    let store = ContentStore::builtin(seed).context("Failed to build content store")?;
    Ok((store, ReadTracker::open(storage)))
}

/// Select items for a listing, in presentation (or priority) order
pub fn select_items<'a, S: Storage>(
    store: &'a ContentStore,
    tracker: &ReadTracker<S>,
    options: &ListOptions,
) -> Vec<&'a Item> {
    let ordered: Vec<&Item> = if options.by_priority {
        store.by_priority()
    } else {
        store.get_all_items().iter().collect()
    };

    ordered
        .into_iter()
        .filter(|item| options.item_type.map_or(true, |t| item.item_type() == t))
        .filter(|item| !options.unread_only || !tracker.is_read(&item.id))
        .take(options.limit.unwrap_or(usize::MAX))
        .collect()
}

/// Look up an item, failing with a CLI error if unknown
pub fn find_item<'a>(store: &'a ContentStore, id: &str) -> Result<&'a Item> {
    store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))
}

/// Truncate to `max` characters, appending "..." when cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Format seconds as m:ss
fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn print_table<S: Storage>(items: &[&Item], tracker: &ReadTracker<S>) {
    println!("{:<12} {:<10} {:<6} {:<50}", "ID", "TYPE", "READ", "NAME");
    println!("{}", "-".repeat(80));

    for item in items {
        println!(
            "{:<12} {:<10} {:<6} {:<50}",
            item.id,
            item.item_type().to_string(),
            if tracker.is_read(&item.id) { "yes" } else { "" },
            truncate(&item.name, 50)
        );
    }
}

/// List items
fn list_items<S: Storage>(store: &ContentStore, tracker: &ReadTracker<S>, options: &ListOptions) {
    let items = select_items(store, tracker, options);

    if items.is_empty() {
        if options.unread_only {
            println!("Nothing left to read.");
        } else {
            println!("No items found.");
        }
        return;
    }

    print_table(&items, tracker);
    println!("\nShown: {} of {} items", items.len(), store.len());
}

/// Search items
fn search_items<S: Storage>(store: &ContentStore, tracker: &ReadTracker<S>, query: &str) {
    let results = store.search(query);

    if results.is_empty() {
        println!("No results found for: {}", query);
        return;
    }

    println!("Found {} result(s) for \"{}\":\n", results.len(), query);
    print_table(&results, tracker);
}

/// Show an item in full and mark it as read
fn show_item<S: Storage>(store: &ContentStore, tracker: &mut ReadTracker<S>, id: &str) -> Result<()> {
    let item = find_item(store, id)?;

    println!("{}", "=".repeat(80));
    println!("  ID: {}", item.id);
    println!("  Name: {}", item.name);
    println!("  Type: {}", item.item_type());
    println!("  Date: {}", item.datetime.format("%Y-%m-%d %H:%M"));
    println!("  Priority: {}", item.priority);
    if !item.keywords.is_empty() {
        println!("  Keywords: {}", item.keywords.join(", "));
    }
    println!("{}", "=".repeat(80));

    match &item.kind {
        ItemKind::Document { filename } => {
            let file_type = item
                .file_type()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("\nFile: {} ({})", filename, file_type);
        }
        ItemKind::Audio { duration_seconds } => {
            println!("\nDuration: {}", format_duration(*duration_seconds));
        }
        ItemKind::Email { thread } => {
            for message in thread {
                println!("\nFrom: {}", message.sender);
                println!("To: {}", message.recipients.join(", "));
                println!("Subject: {}\n", message.subject);
                println!("{}", message.body);
            }
        }
    }

    tracker.mark_as_read(&item.id);
    Ok(())
}

/// Mark an item as read
fn mark_read<S: Storage>(store: &ContentStore, tracker: &mut ReadTracker<S>, id: &str) -> Result<()> {
    let item = find_item(store, id)?;

    if tracker.mark_as_read(&item.id) {
        eprintln!("Marked as read: {}", item.name);
    } else {
        eprintln!("Already read: {}", item.name);
    }

    Ok(())
}

/// Show read progress
fn show_status<S: Storage>(store: &ContentStore, tracker: &ReadTracker<S>) {
    let read = store
        .get_all_items()
        .iter()
        .filter(|item| tracker.is_read(&item.id))
        .count();

    println!("Read:   {}", read);
    println!("Unread: {}", store.len() - read);
    println!("Total:  {}", store.len());
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Storage: {}", cfg.storage_dir.display());
    println!();
    println!("Shuffle seed: {}", cfg.seed);

    Ok(())
}
