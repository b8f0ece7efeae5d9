//! Parser configuration.
//!
//! Settings are plain data and can be loaded from JSON; missing fields take
//! their default values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading [`ParserSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The JSON was malformed or had fields of the wrong type.
    #[error("invalid parser settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options consulted by the parser engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Collapse each run of whitespace in text nodes to its first character.
    /// A CR immediately followed by LF is kept as a pair.
    pub remove_white_spaces: bool,
    /// Accepted and stored, but comments are always kept in the tree.
    pub remove_comments: bool,
}

impl ParserSettings {
    /// Settings with whitespace collapsing switched on or off.
    #[must_use]
    pub const fn with_remove_white_spaces(mut self, enabled: bool) -> Self {
        self.remove_white_spaces = enabled;
        self
    }

    /// Settings with the (reserved) comment removal flag set.
    #[must_use]
    pub const fn with_remove_comments(mut self, enabled: bool) -> Self {
        self.remove_comments = enabled;
        self
    }

    /// Parse settings from a JSON object such as `{"remove_white_spaces": true}`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Json`] if `json` is not a valid settings object.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }
}
