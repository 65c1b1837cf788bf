//! Embed rewriter
//!
//! Applies an ordered [`PatternSet`] to a content block. Each rule runs over
//! the output of the previous one with a global, non-overlapping
//! find-and-replace. Bracket dialects run before URL dialects, and no
//! generated fragment satisfies any matcher, so a rewritten block is a fixed
//! point of [`Rewriter::rewrite`].

use crate::config::{self, RewriteConfig};
use crate::provider::RuleKind;
use crate::rules::PatternSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Range;

/// One place in a content block that a rule would rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedMatch {
    /// Rule that matched
    pub kind: RuleKind,
    /// Captured resource id
    pub id: String,
    /// Byte range of the whole match in the scanned content
    pub range: Range<usize>,
}

/// Rewrites embed tags and provider URLs into embed fragments
///
/// # Example
///
/// ```
/// use rewrite_core::Rewriter;
///
/// let rewriter = Rewriter::new();
/// let html = rewriter.rewrite("check this [youtube]dQw4w9WgXcQ[/youtube] out");
/// assert!(html.starts_with("check this <div"));
/// assert!(html.ends_with("</div> out"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: PatternSet,
}

impl Rewriter {
    /// Rewriter with every rule enabled
    pub fn new() -> Self {
        Self { rules: PatternSet::standard() }
    }

    /// Rewriter over an explicit rule set
    pub fn with_rules(rules: PatternSet) -> Self {
        Self { rules }
    }

    /// Rewriter over the rules a configuration enables
    pub fn from_config(config: &RewriteConfig) -> config::Result<Self> {
        config.validate()?;
        Ok(Self::with_rules(PatternSet::from_kinds(config.enabled_kinds())))
    }

    /// The rules, in the order they are applied
    pub fn rules(&self) -> &PatternSet {
        &self.rules
    }

    /// Rewrite a content block
    ///
    /// The input is never modified; text no rule matches comes back verbatim.
    pub fn rewrite(&self, content: &str) -> String {
        let mut current = Cow::Borrowed(content);

        for rule in &self.rules {
            let rewritten = match rule.apply(&current) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(rewritten) => rewritten,
            };
            tracing::debug!(rule = rule.kind().as_str(), "rewrote embed");
            current = Cow::Owned(rewritten);
        }

        current.into_owned()
    }

    /// Whether any rule matches the content
    pub fn has_embeds(&self, content: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(content))
    }

    /// Report every match of every rule against the content as given
    ///
    /// Each rule scans the unmodified input independently, so matches from
    /// different rules may overlap; see [`overlapping`] to find them. Results
    /// are sorted by start offset, then by rule order.
    pub fn scan(&self, content: &str) -> Vec<EmbedMatch> {
        let mut found: Vec<EmbedMatch> = self
            .rules
            .iter()
            .flat_map(|rule| {
                rule.matcher().captures_iter(content).filter_map(move |caps| {
                    let whole = caps.get(0)?;
                    let id = caps.get(1)?;
                    Some(EmbedMatch {
                        kind: rule.kind(),
                        id: id.as_str().to_string(),
                        range: whole.range(),
                    })
                })
            })
            .collect();

        found.sort_by_key(|m| (m.range.start, m.kind));
        found
    }
}

/// Pairs of matches from different rules that claim overlapping text
///
/// Expects the sorted output of [`Rewriter::scan`].
pub fn overlapping(matches: &[EmbedMatch]) -> Vec<(&EmbedMatch, &EmbedMatch)> {
    let mut pairs = Vec::new();

    for (i, a) in matches.iter().enumerate() {
        for b in &matches[i + 1..] {
            if b.range.start >= a.range.end {
                break;
            }
            if a.kind != b.kind {
                pairs.push((a, b));
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments;
    use crate::provider::{Dialect, EmbedProvider};

    #[test]
    fn test_bracket_youtube_in_context() {
        let rewriter = Rewriter::new();
        let out = rewriter.rewrite("check this [youtube]dQw4w9WgXcQ[/youtube] out");
        assert_eq!(out, format!("check this {} out", fragments::youtube("dQw4w9WgXcQ")));
        assert!(!out.contains("[youtube]"));
    }

    #[test]
    fn test_every_bracket_provider() {
        let rewriter = Rewriter::new();
        let cases = [
            ("[youtube]abc[/youtube]", fragments::youtube("abc")),
            ("[vimeo]123[/vimeo]", fragments::vimeo("123")),
            ("[giphy]xyz[/giphy]", fragments::giphy("xyz")),
            ("[imgur]AbCdE[/imgur]", fragments::imgur("AbCdE", true)),
            ("[imgur]AbCdEfG[/imgur]", fragments::imgur("AbCdEfG", false)),
            ("[soundcloud]293[/soundcloud]", fragments::soundcloud("293")),
        ];
        for (input, expected) in cases {
            assert_eq!(rewriter.rewrite(input), expected, "{input}");
        }
    }

    #[test]
    fn test_plain_vimeo_url() {
        let rewriter = Rewriter::new();
        assert_eq!(rewriter.rewrite("https://vimeo.com/76979871"), fragments::vimeo("76979871"));
    }

    #[test]
    fn test_identity_on_plain_text() {
        let rewriter = Rewriter::new();
        let texts = [
            "",
            "just words",
            "<p>an <a href=\"https://example.com\">ordinary link</a></p>",
            "[youtube]unterminated",
            "[unknown]abc[/unknown]",
            "https://vimeo.com/about",
        ];
        for text in texts {
            assert_eq!(rewriter.rewrite(text), text);
            assert!(!rewriter.has_embeds(text), "{text}");
        }
    }

    #[test]
    fn test_two_providers_keep_order() {
        let rewriter = Rewriter::new();
        let out = rewriter.rewrite("a [vimeo]1[/vimeo] b https://youtu.be/dQw4w9WgXcQ c");
        assert_eq!(
            out,
            format!("a {} b {} c", fragments::vimeo("1"), fragments::youtube("dQw4w9WgXcQ"))
        );
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let rewriter = Rewriter::new();
        let input = concat!(
            "[youtube]dQw4w9WgXcQ[/youtube] [vimeo]42[/vimeo] [giphy]g1[/giphy] ",
            "[imgur]AbCdE[/imgur] [soundcloud]https://api.soundcloud.com/tracks/9[/soundcloud] ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ https://vimeo.com/76979871 ",
            "https://giphy.com/gifs/cat-abc123 https://imgur.com/gallery/XyZ12"
        );
        let once = rewriter.rewrite(input);
        assert_eq!(rewriter.rewrite(&once), once);
        assert!(!rewriter.has_embeds(&once));
    }

    #[test]
    fn test_from_config_filters_rules() {
        let config = RewriteConfig::default()
            .with_providers(vec![EmbedProvider::Vimeo])
            .with_dialects(vec![Dialect::Bracket]);
        let rewriter = Rewriter::from_config(&config).unwrap();
        assert_eq!(rewriter.rules().kinds(), vec![RuleKind::VimeoBracket]);

        let input = "[vimeo]1[/vimeo] [youtube]x[/youtube] https://vimeo.com/2";
        let out = rewriter.rewrite(input);
        assert!(out.starts_with(&fragments::vimeo("1")));
        assert!(out.ends_with(" [youtube]x[/youtube] https://vimeo.com/2"));
    }

    #[test]
    fn test_from_config_rejects_empty_rule_set() {
        let config = RewriteConfig::default().with_providers(vec![]);
        assert!(Rewriter::from_config(&config).is_err());
    }

    #[test]
    fn test_scan_reports_ids_and_ranges() {
        let rewriter = Rewriter::new();
        let content = "x [giphy]g1[/giphy] y https://vimeo.com/77";
        let found = rewriter.scan(content);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, RuleKind::GiphyBracket);
        assert_eq!(found[0].id, "g1");
        assert_eq!(&content[found[0].range.clone()], "[giphy]g1[/giphy]");
        assert_eq!(found[1].kind, RuleKind::VimeoUrl);
        assert_eq!(found[1].id, "77");
    }

    #[test]
    fn test_overlapping_detects_url_inside_bracket() {
        let rewriter = Rewriter::new();
        let found = rewriter.scan("[vimeo]https://vimeo.com/5[/vimeo]");
        let pairs = overlapping(&found);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.kind, RuleKind::VimeoBracket);
        assert_eq!(pairs[0].1.kind, RuleKind::VimeoUrl);
    }

    #[test]
    fn test_no_overlap_between_distinct_embeds() {
        let rewriter = Rewriter::new();
        let found = rewriter.scan("https://giphy.com/gifs/x-1234 https://vimeo.com/1234");
        assert_eq!(found.len(), 2);
        assert!(overlapping(&found).is_empty());
    }
}
