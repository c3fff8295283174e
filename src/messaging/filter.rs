//! Chat-list view: tab partition, name search and row previews.
//!
//! Filtering never fails. A chat is listed when its kind belongs to the
//! active tab and its resolved display name contains the search text,
//! ignoring case.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::model::{Chat, ChatKind, Label};

pub const UNKNOWN_NAME: &str = "Unknown";
pub const DEFAULT_AVATAR_URL: &str = "https://picsum.photos/200";
pub const NO_MESSAGES_PREVIEW: &str = "No messages yet";

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatTab {
    /// Everything except internal team chats.
    #[default]
    Customers,
    Team,
}

impl ChatTab {
    #[must_use]
    pub fn matches(self, kind: ChatKind) -> bool {
        match self {
            Self::Customers => kind != ChatKind::Team,
            Self::Team => kind == ChatKind::Team,
        }
    }
}

impl fmt::Display for ChatTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Customers => "customers",
            Self::Team => "team",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown tab '{0}' (expected customers or team)")]
pub struct UnknownTab(pub String);

impl FromStr for ChatTab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customers" | "customer" => Ok(Self::Customers),
            "team" => Ok(Self::Team),
            _ => Err(UnknownTab(s.to_owned())),
        }
    }
}

/// Chat name if non-empty, else the first customer's name, else `"Unknown"`.
#[must_use]
pub fn display_name(chat: &Chat) -> &str {
    chat.name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or_else(|| chat.customer().map(|u| u.name.as_str()).filter(|name| !name.is_empty()))
        .unwrap_or(UNKNOWN_NAME)
}

#[must_use]
pub fn avatar_url(chat: &Chat) -> &str {
    chat.avatar_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| chat.customer().map(|u| u.avatar_url.as_str()).filter(|url| !url.is_empty()))
        .unwrap_or(DEFAULT_AVATAR_URL)
}

/// Chats visible on `tab` whose display name contains `search` (case-insensitive).
#[must_use]
pub fn filter_chats<'a>(chats: &'a [Chat], tab: ChatTab, search: &str) -> Vec<&'a Chat> {
    let needle = search.to_lowercase();
    chats
        .iter()
        .filter(|chat| tab.matches(chat.kind))
        .filter(|chat| display_name(chat).to_lowercase().contains(&needle))
        .collect()
}

#[must_use]
pub fn chats_with_label<'a>(chats: &'a [Chat], label_id: &str) -> Vec<&'a Chat> {
    chats.iter().filter(|c| c.has_label(label_id)).collect()
}

#[must_use]
pub fn label_chat_count(chats: &[Chat], label_id: &str) -> usize {
    chats.iter().filter(|c| c.has_label(label_id)).count()
}

// =============================================================================
// ROW PREVIEW
// =============================================================================

/// One chat-list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub chat_id: String,
    pub name: String,
    pub avatar_url: String,
    pub preview: String,
    /// `HH:MM` of the last message, absent for empty chats.
    pub time: Option<String>,
    /// The chat's labels in global label-set order. The first one is shown
    /// as the row's pill.
    pub labels: Vec<Label>,
}

impl ChatSummary {
    #[must_use]
    pub fn pill(&self) -> Option<&Label> {
        self.labels.first()
    }
}

#[must_use]
pub fn summarize(chat: &Chat, all_labels: &[Label]) -> ChatSummary {
    let last = chat.last_message();
    ChatSummary {
        chat_id: chat.id.clone(),
        name: display_name(chat).to_owned(),
        avatar_url: avatar_url(chat).to_owned(),
        preview: last.map_or_else(|| NO_MESSAGES_PREVIEW.to_owned(), |m| m.content.clone()),
        time: last.map(|m| format_clock(m.timestamp)),
        labels: all_labels.iter().filter(|l| chat.has_label(&l.id)).cloned().collect(),
    }
}

/// `HH:MM` (UTC) for a Unix-millisecond timestamp.
#[must_use]
pub fn format_clock(timestamp_ms: i64) -> String {
    let minutes_of_day = timestamp_ms.rem_euclid(DAY_MS) / 60_000;
    format!("{:02}:{:02}", minutes_of_day / 60, minutes_of_day % 60)
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
