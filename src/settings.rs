//! Persisted preferences: appearance settings and the API base URL.
//!
//! Both live in [`LocalStore`] under the keys the app has always used, so a
//! store file stays readable by older builds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::storage::{LocalStore, StorageError};

pub const SETTINGS_KEY: &str = "app-settings";
pub const API_BASE_URL_KEY: &str = "apiBaseUrl";

// =============================================================================
// APPEARANCE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Blue,
    Emerald,
    Purple,
    Amber,
    Rose,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid {field} '{value}'")]
pub struct InvalidSetting {
    pub field: &'static str,
    pub value: String,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl AccentColor {
    pub const ALL: [Self; 5] = [Self::Blue, Self::Emerald, Self::Purple, Self::Amber, Self::Rose];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Emerald => "emerald",
            Self::Purple => "purple",
            Self::Amber => "amber",
            Self::Rose => "rose",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = InvalidSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(InvalidSetting { field: "theme", value: s.to_owned() }),
        }
    }
}

impl FromStr for AccentColor {
    type Err = InvalidSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| InvalidSetting { field: "accent", value: s.to_owned() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub accent: AccentColor,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPatch {
    pub theme: Option<ThemeMode>,
    pub accent: Option<AccentColor>,
}

impl AppSettings {
    /// Stored settings, or the defaults when missing or unreadable.
    #[must_use]
    pub fn load(store: &LocalStore) -> Self {
        store.load_json(SETTINGS_KEY).unwrap_or_default()
    }

    #[must_use]
    pub fn merged(self, patch: SettingsPatch) -> Self {
        Self { theme: patch.theme.unwrap_or(self.theme), accent: patch.accent.unwrap_or(self.accent) }
    }

    /// Merge `patch` into the stored settings and persist the result.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be written.
    pub fn update(store: &mut LocalStore, patch: SettingsPatch) -> Result<Self, StorageError> {
        let next = Self::load(store).merged(patch);
        store.save_json(SETTINGS_KEY, &next)?;
        info!(theme = %next.theme, accent = %next.accent, "settings: updated");
        Ok(next)
    }
}

// =============================================================================
// API BASE URL
// =============================================================================

/// Stored API base URL, falling back to `default_url` when unset or blank.
#[must_use]
pub fn api_base_url(store: &LocalStore, default_url: &str) -> String {
    store
        .get_item(API_BASE_URL_KEY)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(default_url)
        .to_owned()
}

/// Save a new API base URL. Blank input stores `default_url` instead.
///
/// # Errors
///
/// Fails if the store cannot be written.
pub fn set_api_base_url(store: &mut LocalStore, url: &str, default_url: &str) -> Result<String, StorageError> {
    let trimmed = url.trim();
    let to_save = if trimmed.is_empty() { default_url } else { trimmed };
    store.set_item(API_BASE_URL_KEY, to_save)?;
    info!(url = %to_save, "settings: api base url saved");
    Ok(to_save.to_owned())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
