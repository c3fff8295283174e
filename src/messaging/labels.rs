//! Label assignment and label-set editing.
//!
//! DESIGN
//! ======
//! Both editors work on a private copy and write back wholesale on save:
//!
//! - `LabelSelection` holds one chat's checked label ids. Saving replaces
//!   the chat's membership list (last writer wins, no diffing). Creating a
//!   label from the selection is the exception: the new label goes into the
//!   global set immediately and is auto-selected.
//! - `LabelEditor` holds a copy of the global label set. Saving replaces the
//!   global set; labels missing from the copy are removed from every chat.

use tracing::{debug, info};

use super::StoreError;
use super::ids::{LABEL_PREFIX, SUB_LABEL_PREFIX, next_id};
use super::model::{Chat, Label, LabelColor, SubLabel};
use super::repository::ChatRepository;

fn clean_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::BlankLabelName);
    }
    Ok(trimmed.to_owned())
}

// =============================================================================
// PER-CHAT SELECTION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSelection {
    chat_id: String,
    selected: Vec<String>,
}

impl LabelSelection {
    /// Start from the chat's current membership.
    #[must_use]
    pub fn for_chat(chat: &Chat) -> Self {
        Self { chat_id: chat.id.clone(), selected: chat.label_ids.clone() }
    }

    /// # Errors
    ///
    /// Returns [`StoreError::UnknownChat`] if the chat does not exist.
    pub fn open(repo: &dyn ChatRepository, chat_id: &str) -> Result<Self, StoreError> {
        repo.chat(chat_id)
            .map(|chat| Self::for_chat(&chat))
            .ok_or_else(|| StoreError::UnknownChat(chat_id.to_owned()))
    }

    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, label_id: &str) -> bool {
        self.selected.iter().any(|id| id == label_id)
    }

    /// Flip one label. Returns whether it is now selected.
    pub fn toggle(&mut self, label_id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|id| id == label_id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(label_id.to_owned());
            true
        }
    }

    /// Add a new label to the global set and select it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BlankLabelName`] if `name` is blank after trimming.
    pub fn create_label(
        &mut self,
        repo: &dyn ChatRepository,
        name: &str,
        color: LabelColor,
    ) -> Result<Label, StoreError> {
        let label = Label { id: next_id(LABEL_PREFIX), name: clean_name(name)?, color, sub_labels: Vec::new() };
        repo.add_label(label.clone())?;
        self.selected.push(label.id.clone());
        Ok(label)
    }

    /// Write the selection back as the chat's label list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownChat`] if the chat has gone away.
    pub fn save(&self, repo: &dyn ChatRepository) -> Result<Vec<String>, StoreError> {
        repo.set_chat_labels(&self.chat_id, &self.selected)
    }
}

// =============================================================================
// GLOBAL EDITOR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEditor {
    labels: Vec<Label>,
}

impl LabelEditor {
    #[must_use]
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    #[must_use]
    pub fn open(repo: &dyn ChatRepository) -> Self {
        Self::new(repo.labels())
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn label_mut(&mut self, label_id: &str) -> Result<&mut Label, StoreError> {
        self.labels
            .iter_mut()
            .find(|l| l.id == label_id)
            .ok_or_else(|| StoreError::UnknownLabel(label_id.to_owned()))
    }

    /// # Errors
    ///
    /// Returns [`StoreError::BlankLabelName`] if `name` is blank.
    pub fn add_label(&mut self, name: &str, color: LabelColor) -> Result<Label, StoreError> {
        let label = Label { id: next_id(LABEL_PREFIX), name: clean_name(name)?, color, sub_labels: Vec::new() };
        debug!(label_id = %label.id, "label editor: add");
        self.labels.push(label.clone());
        Ok(label)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::UnknownLabel`] if no such label is in the copy.
    pub fn delete_label(&mut self, label_id: &str) -> Result<Label, StoreError> {
        let pos = self
            .labels
            .iter()
            .position(|l| l.id == label_id)
            .ok_or_else(|| StoreError::UnknownLabel(label_id.to_owned()))?;
        Ok(self.labels.remove(pos))
    }

    /// Change a label's name and color together.
    ///
    /// # Errors
    ///
    /// Fails on an unknown label or a blank name.
    pub fn update_label(&mut self, label_id: &str, name: &str, color: LabelColor) -> Result<(), StoreError> {
        let name = clean_name(name)?;
        let label = self.label_mut(label_id)?;
        label.name = name;
        label.color = color;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails on an unknown label or a blank name.
    pub fn add_sub_label(&mut self, label_id: &str, name: &str) -> Result<SubLabel, StoreError> {
        let name = clean_name(name)?;
        let label = self.label_mut(label_id)?;
        let sub = SubLabel { id: next_id(SUB_LABEL_PREFIX), name };
        label.sub_labels.push(sub.clone());
        Ok(sub)
    }

    /// # Errors
    ///
    /// Fails on an unknown label or sub-label, or a blank name.
    pub fn rename_sub_label(&mut self, label_id: &str, sub_label_id: &str, name: &str) -> Result<(), StoreError> {
        let name = clean_name(name)?;
        let label = self.label_mut(label_id)?;
        let sub = label
            .sub_labels
            .iter_mut()
            .find(|s| s.id == sub_label_id)
            .ok_or_else(|| StoreError::UnknownSubLabel {
                label_id: label_id.to_owned(),
                sub_label_id: sub_label_id.to_owned(),
            })?;
        sub.name = name;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails on an unknown label or sub-label.
    pub fn remove_sub_label(&mut self, label_id: &str, sub_label_id: &str) -> Result<SubLabel, StoreError> {
        let label = self.label_mut(label_id)?;
        let pos = label
            .sub_labels
            .iter()
            .position(|s| s.id == sub_label_id)
            .ok_or_else(|| StoreError::UnknownSubLabel {
                label_id: label_id.to_owned(),
                sub_label_id: sub_label_id.to_owned(),
            })?;
        Ok(label.sub_labels.remove(pos))
    }

    /// Replace the global label set with the edited copy. Returns the ids
    /// of labels that were removed.
    pub fn save(self, repo: &dyn ChatRepository) -> Vec<String> {
        let removed = repo.replace_labels(self.labels);
        info!(removed = removed.len(), "label editor: saved");
        removed
    }
}

#[cfg(test)]
#[path = "labels_test.rs"]
mod tests;
