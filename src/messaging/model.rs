//! Messaging data model: users, messages, labels and chats.
//!
//! Field names serialize in camelCase so a snapshot file reads the same as
//! the app's seed data (`labelIds`, `subLabels`, `avatarUrl`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// USERS & MESSAGES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    #[serde(default)]
    pub is_team_member: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    Video,
    Audio,
    Document,
    System,
}

impl MessageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
            Self::System => "system",
        }
    }
}

/// A chat message. Content is the text body, or the caption for media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub content: String,
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

// =============================================================================
// LABELS
// =============================================================================

/// Fixed label palette. Serialized as the style class the app renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LabelColor {
    #[default]
    #[serde(rename = "bg-blue-500")]
    Blue,
    #[serde(rename = "bg-green-500")]
    Green,
    #[serde(rename = "bg-yellow-500")]
    Yellow,
    #[serde(rename = "bg-red-500")]
    Red,
    #[serde(rename = "bg-purple-500")]
    Purple,
    #[serde(rename = "bg-pink-500")]
    Pink,
    #[serde(rename = "bg-indigo-500")]
    Indigo,
    #[serde(rename = "bg-gray-500")]
    Gray,
}

impl LabelColor {
    pub const PALETTE: [Self; 8] = [
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Red,
        Self::Purple,
        Self::Pink,
        Self::Indigo,
        Self::Gray,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Indigo => "indigo",
            Self::Gray => "gray",
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown label color '{0}'")]
pub struct UnknownColor(pub String);

impl FromStr for LabelColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::PALETTE
            .into_iter()
            .find(|c| c.name() == wanted || format!("bg-{}-500", c.name()) == wanted)
            .ok_or_else(|| UnknownColor(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubLabel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: LabelColor,
    #[serde(default)]
    pub sub_labels: Vec<SubLabel>,
}

// =============================================================================
// CHATS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Personal,
    Group,
    Team,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    pub participants: Vec<User>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub label_ids: Vec<String>,
    /// Group and team chats carry their own name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Chat {
    /// First participant who is not on the business team.
    #[must_use]
    pub fn customer(&self) -> Option<&User> {
        self.participants.iter().find(|p| !p.is_team_member)
    }

    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[must_use]
    pub fn has_label(&self, label_id: &str) -> bool {
        self.label_ids.iter().any(|id| id == label_id)
    }
}

/// Complete messaging state, as held by a repository or written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub chats: Vec<Chat>,
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
