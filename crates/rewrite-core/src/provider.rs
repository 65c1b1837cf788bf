//! Embed providers, input dialects, and the rule kinds built from them
//!
//! Every pattern rule is identified by a [`RuleKind`], the pairing of an
//! [`EmbedProvider`] with the [`Dialect`] it recognizes. The kinds are
//! enumerable and carry the fixed order in which the rewriter applies them.

use serde::{Deserialize, Serialize};

/// Third-party media service that content can be embedded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedProvider {
    /// YouTube video
    YouTube,
    /// Vimeo video
    Vimeo,
    /// Giphy animation
    Giphy,
    /// Imgur image or album
    Imgur,
    /// SoundCloud track
    SoundCloud,
}

impl EmbedProvider {
    /// All providers, in rewrite order
    pub const ALL: [EmbedProvider; 5] = [
        EmbedProvider::YouTube,
        EmbedProvider::Vimeo,
        EmbedProvider::Giphy,
        EmbedProvider::Imgur,
        EmbedProvider::SoundCloud,
    ];

    /// Get the provider as a string
    ///
    /// This is also the name used inside bracket tags (`[youtube]...[/youtube]`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedProvider::YouTube => "youtube",
            EmbedProvider::Vimeo => "vimeo",
            EmbedProvider::Giphy => "giphy",
            EmbedProvider::Imgur => "imgur",
            EmbedProvider::SoundCloud => "soundcloud",
        }
    }

    /// Rule kinds recognized for this provider
    pub fn kinds(&self) -> impl Iterator<Item = RuleKind> + '_ {
        RuleKind::ALL.into_iter().filter(move |kind| kind.provider() == *self)
    }
}

impl std::fmt::Display for EmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input form an embed is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Legacy `[provider]id[/provider]` shorthand
    Bracket,
    /// Raw provider URL pasted into the content
    Url,
}

impl Dialect {
    /// Get the dialect as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Bracket => "bracket",
            Dialect::Url => "url",
        }
    }
}

/// A provider paired with one of its dialects
///
/// The declaration order is the rewrite order: every bracket dialect runs
/// before any URL dialect. SoundCloud only has a bracket dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// `[youtube]ID[/youtube]`
    #[serde(rename = "youtube-bracket")]
    YouTubeBracket,
    /// `[vimeo]ID[/vimeo]`
    VimeoBracket,
    /// `[giphy]ID[/giphy]`
    GiphyBracket,
    /// `[imgur]ID[/imgur]`
    ImgurBracket,
    /// `[soundcloud]TRACK[/soundcloud]`
    #[serde(rename = "soundcloud-bracket")]
    SoundCloudBracket,
    /// `youtu.be` and `youtube.com` video URLs
    #[serde(rename = "youtube-url")]
    YouTubeUrl,
    /// `vimeo.com` video URLs
    VimeoUrl,
    /// `giphy.com` and `gph.is` URLs
    GiphyUrl,
    /// `imgur.com/gallery/ID` URLs
    ImgurGalleryUrl,
}

impl RuleKind {
    /// All rule kinds, in rewrite order
    pub const ALL: [RuleKind; 9] = [
        RuleKind::YouTubeBracket,
        RuleKind::VimeoBracket,
        RuleKind::GiphyBracket,
        RuleKind::ImgurBracket,
        RuleKind::SoundCloudBracket,
        RuleKind::YouTubeUrl,
        RuleKind::VimeoUrl,
        RuleKind::GiphyUrl,
        RuleKind::ImgurGalleryUrl,
    ];

    /// The provider this rule embeds from
    pub fn provider(&self) -> EmbedProvider {
        match self {
            RuleKind::YouTubeBracket | RuleKind::YouTubeUrl => EmbedProvider::YouTube,
            RuleKind::VimeoBracket | RuleKind::VimeoUrl => EmbedProvider::Vimeo,
            RuleKind::GiphyBracket | RuleKind::GiphyUrl => EmbedProvider::Giphy,
            RuleKind::ImgurBracket | RuleKind::ImgurGalleryUrl => EmbedProvider::Imgur,
            RuleKind::SoundCloudBracket => EmbedProvider::SoundCloud,
        }
    }

    /// The dialect this rule recognizes
    pub fn dialect(&self) -> Dialect {
        match self {
            RuleKind::YouTubeBracket
            | RuleKind::VimeoBracket
            | RuleKind::GiphyBracket
            | RuleKind::ImgurBracket
            | RuleKind::SoundCloudBracket => Dialect::Bracket,
            RuleKind::YouTubeUrl
            | RuleKind::VimeoUrl
            | RuleKind::GiphyUrl
            | RuleKind::ImgurGalleryUrl => Dialect::Url,
        }
    }

    /// Get the rule kind as a string, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::YouTubeBracket => "youtube-bracket",
            RuleKind::VimeoBracket => "vimeo-bracket",
            RuleKind::GiphyBracket => "giphy-bracket",
            RuleKind::ImgurBracket => "imgur-bracket",
            RuleKind::SoundCloudBracket => "soundcloud-bracket",
            RuleKind::YouTubeUrl => "youtube-url",
            RuleKind::VimeoUrl => "vimeo-url",
            RuleKind::GiphyUrl => "giphy-url",
            RuleKind::ImgurGalleryUrl => "imgur-gallery-url",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
