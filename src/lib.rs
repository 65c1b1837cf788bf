//! Content embeds
//!
//! Rewrites provider shorthand and URLs into embed markup, links `@name`
//! mentions, and applies both to the marked elements of a page.
//!
//! ```
//! use content_embeds::Rewriter;
//!
//! let html = Rewriter::new().rewrite("[vimeo]76979871[/vimeo]");
//! assert!(html.contains("player.vimeo.com/video/76979871"));
//! ```

pub use page_host;
pub use rewrite_core;
pub use widgets;

pub use page_host::{ElementLocator, PageRunner, StaticPage};
pub use rewrite_core::{MentionRewriter, RewriteConfig, Rewriter};
