//! Rewrite configuration
//!
//! Selects which providers and dialects the rewriter runs and how mentions
//! are linked. Stored as JSON alongside the rest of the page configuration.

use crate::provider::{Dialect, EmbedProvider, RuleKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be decoded
    #[error("Invalid configuration JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Every rule is filtered out
    #[error("No embed rules enabled")]
    NoRulesEnabled,

    /// Mention base path is not an absolute path
    #[error("Invalid mention base path: {0}")]
    InvalidBasePath(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Which embeds are rewritten, and how mentions are linked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteConfig {
    /// Enabled providers
    #[serde(default = "default_providers")]
    pub providers: Vec<EmbedProvider>,

    /// Enabled dialects
    #[serde(default = "default_dialects")]
    pub dialects: Vec<Dialect>,

    /// Mention linking
    #[serde(default)]
    pub mentions: MentionConfig,
}

fn default_providers() -> Vec<EmbedProvider> {
    EmbedProvider::ALL.to_vec()
}

fn default_dialects() -> Vec<Dialect> {
    vec![Dialect::Bracket, Dialect::Url]
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            dialects: default_dialects(),
            mentions: MentionConfig::default(),
        }
    }
}

impl RewriteConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that at least one rule is enabled and the mention path is usable
    pub fn validate(&self) -> Result<()> {
        if self.enabled_kinds().is_empty() {
            return Err(ConfigError::NoRulesEnabled);
        }
        self.mentions.validate()
    }

    /// Rule kinds that survive the provider and dialect filters, in rewrite order
    pub fn enabled_kinds(&self) -> Vec<RuleKind> {
        RuleKind::ALL
            .into_iter()
            .filter(|kind| {
                self.providers.contains(&kind.provider()) && self.dialects.contains(&kind.dialect())
            })
            .collect()
    }

    /// Set the enabled providers
    pub fn with_providers(mut self, providers: Vec<EmbedProvider>) -> Self {
        self.providers = providers;
        self
    }

    /// Set the enabled dialects
    pub fn with_dialects(mut self, dialects: Vec<Dialect>) -> Self {
        self.dialects = dialects;
        self
    }

    /// Set the mention configuration
    pub fn with_mentions(mut self, mentions: MentionConfig) -> Self {
        self.mentions = mentions;
        self
    }
}

/// Mention linking configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionConfig {
    /// Rewrite `@name` into profile links
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Path profile links are placed under
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

fn default_true() -> bool {
    true
}

fn default_base_path() -> String {
    "/usernames".to_string()
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self { enabled: true, base_path: default_base_path() }
    }
}

impl MentionConfig {
    /// Check the base path
    ///
    /// It must start with `/`, must not end with one (unless it is the root),
    /// and must not contain whitespace or quotes since it lands in an `href`.
    pub fn validate(&self) -> Result<()> {
        let path = self.base_path.as_str();
        let valid = path.starts_with('/')
            && (path == "/" || !path.ends_with('/'))
            && !path.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'');

        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidBasePath(self.base_path.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = RewriteConfig::default();
        assert_eq!(config.enabled_kinds(), RuleKind::ALL.to_vec());
        assert!(config.mentions.enabled);
        assert_eq!(config.mentions.base_path, "/usernames");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = RewriteConfig::from_json("{}").unwrap();
        assert_eq!(config, RewriteConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = RewriteConfig::from_json(
            r#"{"providers": ["youtube", "soundcloud"], "mentions": {"basePath": "/people"}}"#,
        )
        .unwrap();

        assert_eq!(
            config.enabled_kinds(),
            vec![RuleKind::YouTubeBracket, RuleKind::SoundCloudBracket, RuleKind::YouTubeUrl]
        );
        assert_eq!(config.mentions.base_path, "/people");
        assert!(config.mentions.enabled);
    }

    #[test]
    fn test_url_only_soundcloud_enables_nothing() {
        let config = RewriteConfig::default()
            .with_providers(vec![EmbedProvider::SoundCloud])
            .with_dialects(vec![Dialect::Url]);
        assert!(matches!(config.validate(), Err(ConfigError::NoRulesEnabled)));
    }

    #[test]
    fn test_invalid_json() {
        let result = RewriteConfig::from_json(r#"{"providers": ["myspace"]}"#);
        assert!(matches!(result, Err(ConfigError::InvalidJson(_))));
    }

    #[test]
    fn test_base_path_validation() {
        for (path, ok) in [
            ("/usernames", true),
            ("/", true),
            ("/users/profile", true),
            ("usernames", false),
            ("/usernames/", false),
            ("/user names", false),
            ("/x\"onmouseover", false),
        ] {
            let config = MentionConfig { enabled: true, base_path: path.to_string() };
            assert_eq!(config.validate().is_ok(), ok, "{path}");
        }
    }

    #[test]
    fn test_json_round_trip_keeps_camel_case() {
        let json = RewriteConfig::default().to_json().unwrap();
        assert!(json.contains("\"basePath\""));
        assert_eq!(RewriteConfig::from_json(&json).unwrap(), RewriteConfig::default());
    }

    #[test]
    fn test_error_display() {
        let error = ConfigError::InvalidBasePath("nope".to_string());
        assert!(error.to_string().contains("Invalid mention base path"));
        assert_eq!(ConfigError::NoRulesEnabled.to_string(), "No embed rules enabled");
    }
}
