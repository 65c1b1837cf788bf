//! Pattern rules: one matcher and one generator per provider dialect
//!
//! Matchers are compiled once per process and shared. A [`PatternSet`] holds
//! rules in the fixed [`RuleKind::ALL`] order regardless of how it was built.

use crate::fragments;
use crate::provider::{EmbedProvider, RuleKind};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Builds the embed fragment for one match
pub type Generator = fn(&Captures<'_>) -> String;

/// A matcher paired with the generator that replaces its matches
#[derive(Clone)]
pub struct PatternRule {
    kind: RuleKind,
    matcher: &'static Regex,
    generator: Generator,
}

impl std::fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRule")
            .field("kind", &self.kind)
            .field("matcher", &self.matcher.as_str())
            .finish()
    }
}

impl PatternRule {
    /// Create the rule for a kind
    pub fn new(kind: RuleKind) -> Self {
        let (matcher, generator): (&'static Regex, Generator) = match kind {
            RuleKind::YouTubeBracket => (bracket_matcher(EmbedProvider::YouTube), gen_youtube),
            RuleKind::VimeoBracket => (bracket_matcher(EmbedProvider::Vimeo), gen_vimeo),
            RuleKind::GiphyBracket => (bracket_matcher(EmbedProvider::Giphy), gen_giphy),
            RuleKind::ImgurBracket => (bracket_matcher(EmbedProvider::Imgur), gen_imgur_bracket),
            RuleKind::SoundCloudBracket => {
                (bracket_matcher(EmbedProvider::SoundCloud), gen_soundcloud)
            }
            RuleKind::YouTubeUrl => (youtube_url_matcher(), gen_youtube),
            RuleKind::VimeoUrl => (vimeo_url_matcher(), gen_vimeo),
            RuleKind::GiphyUrl => (giphy_url_matcher(), gen_giphy),
            RuleKind::ImgurGalleryUrl => (imgur_gallery_matcher(), gen_imgur_album),
        };

        Self { kind, matcher, generator }
    }

    /// The kind of this rule
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The compiled matcher; capture group 1 is the resource id
    pub fn matcher(&self) -> &'static Regex {
        self.matcher
    }

    /// Generate the fragment for a set of captures from this rule's matcher
    pub fn generate(&self, caps: &Captures<'_>) -> String {
        (self.generator)(caps)
    }

    /// Replace every non-overlapping match, left to right
    ///
    /// Returns [`Cow::Borrowed`] when nothing matched.
    pub fn apply<'h>(&self, content: &'h str) -> Cow<'h, str> {
        self.matcher.replace_all(content, |caps: &Captures<'_>| (self.generator)(caps))
    }

    /// Whether the content contains at least one match
    pub fn is_match(&self, content: &str) -> bool {
        self.matcher.is_match(content)
    }
}

fn captured_id<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(1).map(|m| m.as_str()).unwrap_or_default()
}

fn gen_youtube(caps: &Captures<'_>) -> String {
    fragments::youtube(captured_id(caps))
}

fn gen_vimeo(caps: &Captures<'_>) -> String {
    fragments::vimeo(captured_id(caps))
}

fn gen_giphy(caps: &Captures<'_>) -> String {
    fragments::giphy(captured_id(caps))
}

fn gen_imgur_bracket(caps: &Captures<'_>) -> String {
    let id = captured_id(caps);
    fragments::imgur(id, fragments::is_imgur_album_id(id))
}

fn gen_imgur_album(caps: &Captures<'_>) -> String {
    fragments::imgur(captured_id(caps), true)
}

fn gen_soundcloud(caps: &Captures<'_>) -> String {
    fragments::soundcloud(captured_id(caps))
}

/// `[provider]ID[/provider]`, case-insensitive, shortest id, single line
fn bracket_matcher(provider: EmbedProvider) -> &'static Regex {
    static MATCHERS: OnceLock<HashMap<EmbedProvider, Regex>> = OnceLock::new();
    let matchers = MATCHERS.get_or_init(|| {
        EmbedProvider::ALL
            .into_iter()
            .map(|p| {
                let tag = regex::escape(p.as_str());
                (p, Regex::new(&format!(r"(?i)\[{tag}\](.+?)\[/{tag}\]")).unwrap())
            })
            .collect()
    });
    &matchers[&provider]
}

fn youtube_url_matcher() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // The id is exactly 11 characters; anything after it in the
        // query/hash alphabet is consumed and dropped.
        Regex::new(concat!(
            r"(?i)https?://(?:[0-9A-Z-]+\.)?",
            r"(?:youtu\.be/|youtube\.com(?:/embed/|/v/|/watch\?v=|/ytscreeningroom\?v=",
            r"|/feeds/api/videos/|/user\S*[^\w\s-]|\S*[^\w\s-]))",
            r"([0-9A-Za-z_-]{11})[?=&+%0-9A-Za-z_-]*",
        ))
        .unwrap()
    })
}

fn vimeo_url_matcher() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)https?://(?:www\.)?vimeo\.com/",
            r"(?:channels/(?:[0-9A-Za-z_-]+/)?|groups/[^/\s]+/videos/|album/[0-9]+/video/)?",
            r"([0-9]+)\b",
        ))
        .unwrap()
    })
}

fn giphy_url_matcher() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)https?://(?:[0-9A-Za-z-]+\.)?(?:giphy\.com|gph\.is)/",
            r"(?:gifs/|media/|embed/)?(?:[0-9A-Za-z_-]*-)?([0-9A-Za-z]+)",
            r"(?:/source|/html5|(?:/giphy)?\.gif)?",
        ))
        .unwrap()
    })
}

fn imgur_gallery_matcher() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)https?://(?:www\.|m\.)?imgur\.com/gallery/([0-9A-Za-z]+)").unwrap()
    })
}

/// Ordered, de-duplicated collection of pattern rules
#[derive(Debug, Clone)]
pub struct PatternSet {
    rules: Vec<PatternRule>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl PatternSet {
    /// Every rule kind, in rewrite order
    pub fn standard() -> Self {
        Self::from_kinds(RuleKind::ALL)
    }

    /// Only the given kinds
    ///
    /// The result is always in [`RuleKind::ALL`] order; duplicates are dropped.
    pub fn from_kinds(kinds: impl IntoIterator<Item = RuleKind>) -> Self {
        let mut kinds: Vec<RuleKind> = kinds.into_iter().collect();
        kinds.sort();
        kinds.dedup();

        Self { rules: kinds.into_iter().map(PatternRule::new).collect() }
    }

    /// Iterate over rules in rewrite order
    pub fn iter(&self) -> std::slice::Iter<'_, PatternRule> {
        self.rules.iter()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether a kind is part of the set
    pub fn contains(&self, kind: RuleKind) -> bool {
        self.rules.iter().any(|r| r.kind == kind)
    }

    /// Kinds in rewrite order
    pub fn kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|r| r.kind).collect()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a PatternRule;
    type IntoIter = std::slice::Iter<'a, PatternRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
