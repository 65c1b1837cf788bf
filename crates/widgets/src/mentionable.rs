//! Mention autocomplete configuration

use serde::{Deserialize, Serialize};

/// Autocomplete options for mention inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionableConfig {
    /// Character that opens the suggestion menu
    #[serde(default = "default_at")]
    pub at: String,
    /// Where usernames are looked up
    #[serde(default = "default_data")]
    pub data: String,
    /// Maximum number of suggestions shown
    #[serde(default = "default_menu_item_limit")]
    pub menu_item_limit: usize,
}

fn default_at() -> String {
    "@".to_string()
}

fn default_data() -> String {
    "/usernames".to_string()
}

fn default_menu_item_limit() -> usize {
    8
}

impl Default for MentionableConfig {
    fn default() -> Self {
        Self { at: default_at(), data: default_data(), menu_item_limit: default_menu_item_limit() }
    }
}

/// One autocomplete entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tribute {
    /// Text shown in the menu
    pub key: String,
    /// Text inserted after the trigger
    pub value: String,
}

impl Tribute {
    /// Entry whose key and value are the username
    pub fn username(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { key: name.clone(), value: name }
    }
}

/// Build entries from a comma separated `usernames` meta tag
pub fn tributes_from_meta(content: &str) -> Vec<Tribute> {
    content
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Tribute::username)
        .collect()
}

impl MentionableConfig {
    /// Entries matching what was typed after the trigger, up to the menu limit
    ///
    /// Matching is a case-insensitive substring test on the key.
    pub fn suggestions<'a>(&self, tributes: &'a [Tribute], query: &str) -> Vec<&'a Tribute> {
        let query = query.to_lowercase();
        tributes
            .iter()
            .filter(|t| t.key.to_lowercase().contains(&query))
            .take(self.menu_item_limit)
            .collect()
    }
}
