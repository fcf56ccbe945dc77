//! Content Store Integration Tests
//!
//! Tests for presentation order, keyword normalization and lookup over the
//! compiled-in dataset.

use std::collections::HashSet;

use evidence_archive::content::{dataset, email_keywords};
use evidence_archive::{ContentStore, EmailMessage, ItemKind, ItemType, DEFAULT_SEED};

#[test]
fn test_builtin_store_is_reproducible() {
    let first = ContentStore::builtin(DEFAULT_SEED).unwrap();
    let second = ContentStore::builtin(DEFAULT_SEED).unwrap();

    assert_eq!(first.get_all_items(), second.get_all_items());
    assert_eq!(first.get_all_items(), first.get_all_items());
}

#[test]
fn test_presentation_order_is_a_permutation() {
    let authored = dataset::authored().unwrap();
    let store = ContentStore::builtin(DEFAULT_SEED).unwrap();

    let authored_ids: HashSet<_> = authored.iter().map(|i| i.id.clone()).collect();
    let shown_ids: HashSet<_> = store.get_all_items().iter().map(|i| i.id.clone()).collect();

    assert_eq!(store.len(), authored.len());
    assert_eq!(authored_ids, shown_ids);
}

#[test]
fn test_ids_unique_and_keywords_lowercase() {
    let store = ContentStore::builtin(DEFAULT_SEED).unwrap();

    let mut seen = HashSet::new();
    for item in store.get_all_items() {
        assert!(seen.insert(item.id.as_str()), "duplicate id {}", item.id);
        for keyword in &item.keywords {
            assert_eq!(keyword, &keyword.to_lowercase());
        }
    }
}

#[test]
fn test_email_keywords_for_rat_mail() {
    let store = ContentStore::builtin(DEFAULT_SEED).unwrap();
    let email = store.get("mmz23").unwrap();

    let ItemKind::Email { thread } = &email.kind else {
        panic!("mmz23 should be an email");
    };
    assert_eq!(thread[0].subject, "Brauche deinen Rat");

    let addresses: HashSet<String> = std::iter::once(thread[0].sender.to_lowercase())
        .chain(thread[0].recipients.iter().map(|r| r.to_lowercase()))
        .collect();

    for address in &addresses {
        assert!(email.keywords.contains(address), "missing {address}");
    }
    for keyword in email.keywords.iter().filter(|k| !addresses.contains(*k)) {
        assert!(keyword.chars().count() >= 5, "too short: {keyword}");
        assert_eq!(keyword, &keyword.to_lowercase());
    }
    assert!(email.keywords.contains(&"brauche".to_string()));
    assert!(!email.keywords.contains(&"rat".to_string()));
}

#[test]
fn test_email_keywords_from_free_message() {
    let message = EmailMessage::new(
        "Zentrale@NSA.maus",
        ["A.Ratte@kanal.de", "b@c.de"],
        "Brauche deinen Rat",
        "Treffen morgen, 12 Uhr. Kommt allein!",
    );

    let keywords = email_keywords(std::slice::from_ref(&message));
    assert_eq!(
        keywords,
        vec![
            "zentrale@nsa.maus",
            "a.ratte@kanal.de",
            "b@c.de",
            "brauche",
            "deinen",
            "treffen",
            "morgen",
            "kommt",
            "allein",
        ]
    );
}

#[test]
fn test_document_metadata() {
    let store = ContentStore::builtin(DEFAULT_SEED).unwrap();
    let doc = store.get("test1").unwrap();

    assert_eq!(doc.item_type(), ItemType::Document);
    assert_eq!(doc.keywords, vec!["testtest"]);
    assert_eq!(doc.priority, 1);
    assert_eq!(
        doc.file_type(),
        Some(evidence_archive::FileType::Pdf)
    );
}

#[test]
fn test_different_seed_same_items() {
    let a = ContentStore::builtin(DEFAULT_SEED).unwrap();
    let b = ContentStore::builtin(1).unwrap();

    let mut a_ids: Vec<_> = a.get_all_items().iter().map(|i| &i.id).collect();
    let mut b_ids: Vec<_> = b.get_all_items().iter().map(|i| &i.id).collect();
    a_ids.sort();
    b_ids.sort();
    assert_eq!(a_ids, b_ids);
}
