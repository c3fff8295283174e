//! Message sending: text, file attachments and voice notes.

use std::sync::Arc;

use tracing::info;

use super::StoreError;
use super::ids::{MESSAGE_PREFIX, next_stamp};
use super::model::{Message, MessageKind};
use super::recorder::VoiceClip;
use super::repository::ChatRepository;
use super::seed::BUSINESS_USER_ID;

/// A file picked for sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    /// Where the file can be fetched from (path or URL).
    pub media_url: String,
}

/// `image` for `image/*` MIME types, `document` for everything else.
#[must_use]
pub fn attachment_kind(mime_type: &str) -> MessageKind {
    if mime_type.starts_with("image/") { MessageKind::Image } else { MessageKind::Document }
}

pub struct MessageService {
    repo: Arc<dyn ChatRepository>,
    sender_id: String,
}

impl MessageService {
    /// Service sending as the business account.
    #[must_use]
    pub fn new(repo: Arc<dyn ChatRepository>) -> Self {
        Self { repo, sender_id: BUSINESS_USER_ID.to_owned() }
    }

    #[must_use]
    pub fn with_sender(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = sender_id.into();
        self
    }

    #[must_use]
    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    fn deliver(
        &self,
        chat_id: &str,
        content: &str,
        kind: MessageKind,
        media_url: Option<String>,
        file_name: Option<String>,
    ) -> Result<Message, StoreError> {
        let stamp = next_stamp();
        let message = Message {
            id: format!("{MESSAGE_PREFIX}{stamp}"),
            sender_id: self.sender_id.clone(),
            content: content.to_owned(),
            timestamp: stamp,
            kind,
            media_url,
            file_name,
        };
        self.repo.append_message(chat_id, message.clone())?;
        info!(%chat_id, message_id = %message.id, kind = kind.as_str(), "service: message sent");
        Ok(message)
    }

    /// Send a text message. Content is stored exactly as typed.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyMessage`] for blank text; [`StoreError::UnknownChat`]
    /// if the chat does not exist.
    pub fn send_text(&self, chat_id: &str, text: &str) -> Result<Message, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        self.deliver(chat_id, text, MessageKind::Text, None, None)
    }

    /// Send a file with an optional caption.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownChat`] if the chat does not exist.
    pub fn send_attachment(&self, chat_id: &str, attachment: &Attachment, caption: &str) -> Result<Message, StoreError> {
        self.deliver(
            chat_id,
            caption,
            attachment_kind(&attachment.mime_type),
            Some(attachment.media_url.clone()),
            Some(attachment.file_name.clone()),
        )
    }

    /// Send a recorded voice note. Voice notes carry no text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownChat`] if the chat does not exist.
    pub fn send_voice_note(&self, chat_id: &str, clip: &VoiceClip) -> Result<Message, StoreError> {
        self.deliver(chat_id, "", MessageKind::Audio, None, Some(clip.file_name.clone()))
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
