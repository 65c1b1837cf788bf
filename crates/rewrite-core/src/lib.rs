//! Embed and mention rewriting for trusted page content
//!
//! This crate turns bracket tags (`[youtube]id[/youtube]`) and raw provider
//! URLs into embed markup, and `@name` mentions into profile links. Every
//! operation is a pure string transform; nothing here touches a document.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod fragments;
pub mod mentions;
pub mod provider;
pub mod rewriter;
pub mod rules;

pub use config::{ConfigError, MentionConfig, RewriteConfig};
pub use mentions::MentionRewriter;
pub use provider::{Dialect, EmbedProvider, RuleKind};
pub use rewriter::{overlapping, EmbedMatch, Rewriter};
pub use rules::{PatternRule, PatternSet};
