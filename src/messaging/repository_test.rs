use std::sync::Arc;

use super::*;
use crate::messaging::model::{LabelColor, MessageKind};
use crate::messaging::seed;

fn repo() -> MemoryRepository {
    MemoryRepository::new(seed::snapshot_at(1_700_000_000_000))
}

fn label(id: &str, name: &str) -> Label {
    Label { id: id.into(), name: name.into(), color: LabelColor::Gray, sub_labels: Vec::new() }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn lookups_find_seed_records() {
    let repo = repo();
    assert_eq!(repo.chats().len(), 4);
    assert_eq!(repo.labels().len(), 5);
    assert_eq!(repo.users().len(), 6);
    assert_eq!(repo.chat("c4").and_then(|c| c.name), Some("Team Discussion".into()));
    assert_eq!(repo.user("u3").map(|u| u.name), Some("Rahim Ahmed".into()));
    assert_eq!(repo.label("l5").map(|l| l.name), Some("Support".into()));
    assert!(repo.chat("nope").is_none());
}

#[test]
fn append_message_goes_to_the_end() {
    let repo = repo();
    let msg = Message {
        id: "m99".into(),
        sender_id: "u1".into(),
        content: "thanks".into(),
        timestamp: 1,
        kind: MessageKind::Text,
        media_url: None,
        file_name: None,
    };
    repo.append_message("c2", msg).unwrap();
    let chat = repo.chat("c2").unwrap();
    assert_eq!(chat.messages.len(), 3);
    assert_eq!(chat.last_message().unwrap().id, "m99");
}

#[test]
fn append_to_unknown_chat_fails() {
    let repo = repo();
    let msg = repo.chat("c1").unwrap().messages[0].clone();
    assert!(matches!(repo.append_message("c404", msg), Err(StoreError::UnknownChat(id)) if id == "c404"));
}

#[test]
fn set_chat_labels_replaces_wholesale() {
    let repo = repo();
    let stored = repo.set_chat_labels("c1", &ids(&["l5", "l3"])).unwrap();
    assert_eq!(stored, ids(&["l5", "l3"]));
    assert_eq!(repo.chat("c1").unwrap().label_ids, ids(&["l5", "l3"]));
}

#[test]
fn set_chat_labels_drops_unknown_and_duplicate_ids() {
    let repo = repo();
    let stored = repo.set_chat_labels("c2", &ids(&["l1", "ghost", "l1", "l4"])).unwrap();
    assert_eq!(stored, ids(&["l1", "l4"]));
}

#[test]
fn add_label_rejects_duplicate_id() {
    let repo = repo();
    repo.add_label(label("l6", "Wholesale")).unwrap();
    assert_eq!(repo.labels().last().map(|l| l.id.clone()), Some("l6".into()));
    assert!(matches!(repo.add_label(label("l6", "Again")), Err(StoreError::DuplicateLabel(_))));
}

#[test]
fn replace_labels_cascades_to_chats() {
    let repo = repo();
    let mut kept = repo.labels();
    kept.retain(|l| l.id != "l2" && l.id != "l4");

    let removed = repo.replace_labels(kept);
    assert_eq!(removed, ids(&["l2", "l4"]));
    assert_eq!(repo.chat("c1").unwrap().label_ids, ids(&["l1"]));
    assert!(repo.chat("c3").unwrap().label_ids.is_empty());
    assert_eq!(repo.chat("c2").unwrap().label_ids, ids(&["l3"]));
}

#[test]
fn delete_label_cascades_to_chats() {
    let repo = repo();
    repo.delete_label("l1").unwrap();
    assert!(repo.label("l1").is_none());
    assert_eq!(repo.chat("c1").unwrap().label_ids, ids(&["l2"]));
    assert!(matches!(repo.delete_label("l1"), Err(StoreError::UnknownLabel(_))));
}

#[test]
fn snapshot_reflects_writes() {
    let repo = repo();
    repo.delete_label("l3").unwrap();
    let snap = repo.snapshot();
    assert_eq!(snap.labels.len(), 4);
    assert!(snap.chats.iter().all(|c| !c.has_label("l3")));
}

#[test]
fn shared_repository_across_threads() {
    let repo: Arc<dyn ChatRepository> = Arc::new(repo());
    let handles: Vec<_> = ["l1", "l3", "l5"]
        .into_iter()
        .map(|id| {
            let repo = Arc::clone(&repo);
            std::thread::spawn(move || repo.set_chat_labels("c1", &[id.to_owned()]))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    // Last writer wins; exactly one label remains.
    assert_eq!(repo.chat("c1").unwrap().label_ids.len(), 1);
}

#[test]
fn empty_store_loads_seed_data() {
    let store = LocalStore::in_memory();
    let repo = MemoryRepository::load(&store);
    assert_eq!(repo.chats().len(), 4);
    assert!(repo.label("l2").is_some());
}

#[test]
fn persisted_changes_survive_reload() {
    let mut store = LocalStore::in_memory();
    let first = repo();
    first.delete_label("l1").unwrap();
    first.persist(&mut store).unwrap();

    let reloaded = MemoryRepository::load(&store);
    assert!(reloaded.label("l1").is_none());
    assert_eq!(reloaded.snapshot(), first.snapshot());
}

#[test]
fn corrupt_snapshot_falls_back_to_seed() {
    let mut store = LocalStore::in_memory();
    store.set_item(SNAPSHOT_KEY, "{\"chats\": 3}").unwrap();
    assert_eq!(MemoryRepository::load(&store).labels().len(), 5);
}
