//! Chat/label store.
//!
//! DESIGN
//! ======
//! `ChatRepository` is the only way screens read or change messaging state.
//! `MemoryRepository` keeps a whole [`Snapshot`] behind a `RwLock` so one
//! `Arc<dyn ChatRepository>` can be shared; a poisoned lock is recovered
//! rather than propagated since every write replaces data wholesale.
//!
//! LABEL REFERENCES
//! ================
//! Removing a label from the global set also strips its id from every chat.
//! Setting a chat's labels keeps only ids present in the global set, in the
//! order given, without duplicates.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::StoreError;
use super::model::{Chat, Label, Message, Snapshot, User};
use crate::storage::{LocalStore, StorageError};

/// Local-store key holding the persisted [`Snapshot`].
pub const SNAPSHOT_KEY: &str = "chat-snapshot";

pub trait ChatRepository: Send + Sync {
    fn users(&self) -> Vec<User>;
    fn user(&self, user_id: &str) -> Option<User>;
    fn chats(&self) -> Vec<Chat>;
    fn chat(&self, chat_id: &str) -> Option<Chat>;
    fn labels(&self) -> Vec<Label>;
    fn label(&self, label_id: &str) -> Option<Label>;

    /// Append `message` to the end of a chat's history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownChat`] if the chat does not exist.
    fn append_message(&self, chat_id: &str, message: Message) -> Result<(), StoreError>;

    /// Replace a chat's label membership. Returns the ids actually stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownChat`] if the chat does not exist.
    fn set_chat_labels(&self, chat_id: &str, label_ids: &[String]) -> Result<Vec<String>, StoreError>;

    /// Append a label to the global set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateLabel`] if the id is taken.
    fn add_label(&self, label: Label) -> Result<(), StoreError>;

    /// Replace the global label set. Returns the ids of labels that were
    /// dropped (and removed from every chat).
    fn replace_labels(&self, labels: Vec<Label>) -> Vec<String>;

    /// Remove one label from the global set and from every chat.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownLabel`] if the label does not exist.
    fn delete_label(&self, label_id: &str) -> Result<(), StoreError>;

    fn snapshot(&self) -> Snapshot;
}

// =============================================================================
// IN-MEMORY
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<Snapshot>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self { state: RwLock::new(snapshot) }
    }

    /// Repository pre-loaded with the demo inbox.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(super::seed::snapshot())
    }

    /// Repository over the snapshot persisted in `store`, or the seed data
    /// when nothing readable is stored.
    #[must_use]
    pub fn load(store: &LocalStore) -> Self {
        match store.load_json(SNAPSHOT_KEY) {
            Some(snapshot) => Self::new(snapshot),
            None => Self::seeded(),
        }
    }

    /// Write the current state back to `store`.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be written.
    pub fn persist(&self, store: &mut LocalStore) -> Result<(), StorageError> {
        let snapshot = self.snapshot();
        store.save_json(SNAPSHOT_KEY, &snapshot)?;
        debug!(chats = snapshot.chats.len(), labels = snapshot.labels.len(), "repository: persisted");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drop every label id not in `known` from all chats. Returns chats touched.
fn strip_dangling_labels(chats: &mut [Chat], known: &HashSet<&str>) -> usize {
    let mut touched = 0;
    for chat in chats {
        let before = chat.label_ids.len();
        chat.label_ids.retain(|id| known.contains(id.as_str()));
        if chat.label_ids.len() != before {
            touched += 1;
        }
    }
    touched
}

impl ChatRepository for MemoryRepository {
    fn users(&self) -> Vec<User> {
        self.read().users.clone()
    }

    fn user(&self, user_id: &str) -> Option<User> {
        self.read().users.iter().find(|u| u.id == user_id).cloned()
    }

    fn chats(&self) -> Vec<Chat> {
        self.read().chats.clone()
    }

    fn chat(&self, chat_id: &str) -> Option<Chat> {
        self.read().chats.iter().find(|c| c.id == chat_id).cloned()
    }

    fn labels(&self) -> Vec<Label> {
        self.read().labels.clone()
    }

    fn label(&self, label_id: &str) -> Option<Label> {
        self.read().labels.iter().find(|l| l.id == label_id).cloned()
    }

    fn append_message(&self, chat_id: &str, message: Message) -> Result<(), StoreError> {
        let mut state = self.write();
        let chat = state
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| StoreError::UnknownChat(chat_id.to_owned()))?;
        chat.messages.push(message);
        Ok(())
    }

    fn set_chat_labels(&self, chat_id: &str, label_ids: &[String]) -> Result<Vec<String>, StoreError> {
        let mut state = self.write();
        let known: HashSet<String> = state.labels.iter().map(|l| l.id.clone()).collect();
        let chat = state
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| StoreError::UnknownChat(chat_id.to_owned()))?;

        let mut seen = HashSet::new();
        let mut stored = Vec::with_capacity(label_ids.len());
        for id in label_ids {
            if !known.contains(id) {
                warn!(%chat_id, label_id = %id, "repository: ignoring unknown label id");
                continue;
            }
            if seen.insert(id.as_str()) {
                stored.push(id.clone());
            }
        }
        chat.label_ids.clone_from(&stored);
        info!(%chat_id, count = stored.len(), "repository: chat labels saved");
        Ok(stored)
    }

    fn add_label(&self, label: Label) -> Result<(), StoreError> {
        let mut state = self.write();
        if state.labels.iter().any(|l| l.id == label.id) {
            return Err(StoreError::DuplicateLabel(label.id));
        }
        info!(label_id = %label.id, name = %label.name, "repository: label added");
        state.labels.push(label);
        Ok(())
    }

    fn replace_labels(&self, labels: Vec<Label>) -> Vec<String> {
        let mut state = self.write();
        let kept: HashSet<&str> = labels.iter().map(|l| l.id.as_str()).collect();
        let removed: Vec<String> = state
            .labels
            .iter()
            .filter(|l| !kept.contains(l.id.as_str()))
            .map(|l| l.id.clone())
            .collect();
        let touched = strip_dangling_labels(&mut state.chats, &kept);
        info!(count = labels.len(), removed = removed.len(), chats_touched = touched, "repository: label set replaced");
        state.labels = labels;
        removed
    }

    fn delete_label(&self, label_id: &str) -> Result<(), StoreError> {
        let mut state = self.write();
        let Some(pos) = state.labels.iter().position(|l| l.id == label_id) else {
            return Err(StoreError::UnknownLabel(label_id.to_owned()));
        };
        state.labels.remove(pos);
        for chat in &mut state.chats {
            chat.label_ids.retain(|id| id != label_id);
        }
        info!(%label_id, "repository: label deleted");
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        self.read().clone()
    }
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
