//! Mention links
//!
//! Rewrites `@name` into a link to the user's profile page. Names may contain
//! ASCII word characters, `-`, `.`, and the Latin-1 Supplement and Latin
//! Extended-A letters (`U+00C0` to `U+017F`), so `@jørgen` and `@Æble` link.

use crate::config::MentionConfig;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

fn mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)@([-0-9A-Za-z_.\x{00C0}-\x{017F}]+)").unwrap())
}

/// Rewrites mentions into profile links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRewriter {
    base_path: String,
}

impl Default for MentionRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionRewriter {
    /// Link mentions under `/usernames`
    pub fn new() -> Self {
        Self { base_path: "/usernames".to_string() }
    }

    /// Link mentions under another path
    pub fn with_base_path(base_path: impl Into<String>) -> Self {
        Self { base_path: base_path.into() }
    }

    /// Build from configuration, or `None` when mentions are disabled
    pub fn from_config(config: &MentionConfig) -> Option<Self> {
        config.enabled.then(|| Self::with_base_path(config.base_path.clone()))
    }

    /// Path profile links are placed under
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn link(&self, name: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        format!(r#"<a href="{base}/{name}">{name}</a>"#)
    }

    /// Rewrite every mention in the content
    pub fn rewrite(&self, content: &str) -> String {
        match mention_regex().replace_all(content, |caps: &Captures<'_>| self.link(&caps[1])) {
            Cow::Borrowed(_) => content.to_string(),
            Cow::Owned(rewritten) => {
                tracing::debug!("rewrote mentions");
                rewritten
            }
        }
    }

    /// Names mentioned in the content, in order of appearance
    pub fn mentions<'h>(&self, content: &'h str) -> Vec<&'h str> {
        mention_regex()
            .captures_iter(content)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}
