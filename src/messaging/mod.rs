//! Messaging: chats, labels, users and messages for the business inbox.
//!
//! DESIGN
//! ======
//! All state sits behind the [`repository::ChatRepository`] trait; the
//! in-memory implementation is seeded from [`seed`] or a saved snapshot.
//! Screens are modeled as plain functions and small state objects on top of
//! the repository:
//!
//! - [`filter`]: chat-list tabs, search and row previews.
//! - [`labels`]: per-chat label selection and the global label editor.
//! - [`service`]: sending text, attachments and voice notes.
//! - [`recorder`]: voice-note capture with a seconds counter.
//!
//! Every update is an immediate replacement of in-memory state. Deleting a
//! label removes its id from every chat, so chats never reference a label
//! that no longer exists.

pub mod filter;
pub mod ids;
pub mod labels;
pub mod model;
pub mod recorder;
pub mod repository;
pub mod seed;
pub mod service;

pub use model::{Chat, ChatKind, Label, LabelColor, Message, MessageKind, Snapshot, SubLabel, User};
pub use repository::{ChatRepository, MemoryRepository};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("chat not found: {0}")]
    UnknownChat(String),
    #[error("label not found: {0}")]
    UnknownLabel(String),
    #[error("sub-label {sub_label_id} not found on label {label_id}")]
    UnknownSubLabel { label_id: String, sub_label_id: String },
    #[error("label id already exists: {0}")]
    DuplicateLabel(String),
    #[error("message is empty")]
    EmptyMessage,
    #[error("label name must not be blank")]
    BlankLabelName,
}

impl crate::error::ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownChat(_) => "E_CHAT_NOT_FOUND",
            Self::UnknownLabel(_) => "E_LABEL_NOT_FOUND",
            Self::UnknownSubLabel { .. } => "E_SUB_LABEL_NOT_FOUND",
            Self::DuplicateLabel(_) => "E_DUPLICATE_LABEL",
            Self::EmptyMessage => "E_EMPTY_MESSAGE",
            Self::BlankLabelName => "E_BLANK_LABEL_NAME",
        }
    }
}
