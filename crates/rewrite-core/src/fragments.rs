//! Embed fragment markup
//!
//! Each function renders the complete HTML fragment for one provider. The
//! class names are styling hooks shared with the page stylesheet and must not
//! change. Ids are inserted verbatim: the surrounding content is trusted.
//!
//! No fragment contains a `http(s)://` URL that one of the URL rules accepts,
//! which keeps a second rewrite pass from touching them.

/// Base of the SoundCloud API track URL, with the scheme separator pre-encoded
const SOUNDCLOUD_TRACKS: &str = "https%3A//api.soundcloud.com/tracks/";

/// Number of characters that marks an Imgur id as an album id
pub const IMGUR_ALBUM_ID_LEN: usize = 5;

/// YouTube player in a 16:9 responsive wrapper
pub fn youtube(video_id: &str) -> String {
    format!(
        r#"<div class="embed-responsive embed-responsive-16by9"><iframe class="embed-responsive-item" width="560" height="315" src="https://www.youtube-nocookie.com/embed/{video_id}?rel=0" frameborder="0" allowfullscreen></iframe></div>"#
    )
}

/// Vimeo player in a 16:9 responsive wrapper
pub fn vimeo(video_id: &str) -> String {
    format!(
        r#"<div class="embed-responsive embed-responsive-16by9"><iframe class="embed-responsive-item" src="https://player.vimeo.com/video/{video_id}?color=ffffff&title=0&byline=0&portrait=0" width="640" height="268" frameborder="0" allowfullscreen></iframe></div>"#
    )
}

/// Giphy player in a 1:1 responsive wrapper
pub fn giphy(image_id: &str) -> String {
    format!(
        r#"<div class="embed-responsive embed-responsive-1by1"><iframe src="//giphy.com/embed/{image_id}?hideSocial=true" width="480" height="600" frameborder="0" class="giphy-embed embed-responsive-item" allowfullscreen=""></iframe></div>"#
    )
}

/// Imgur embed blockquote plus its script loader
///
/// Albums are addressed as `a/{id}` in `data-id`; the link keeps the bare id.
pub fn imgur(image_id: &str, album: bool) -> String {
    let prefix = if album { "a/" } else { "" };
    format!(
        r#"<blockquote class="imgur-embed-pub" lang="en" data-id="{prefix}{image_id}"><a href="//imgur.com/{image_id}"></a></blockquote><script async src="//s.imgur.com/min/embed.js" charset="utf-8"></script>"#
    )
}

/// Whether a bracket-tag Imgur id refers to an album
pub fn is_imgur_album_id(image_id: &str) -> bool {
    image_id.chars().count() == IMGUR_ALBUM_ID_LEN
}

/// SoundCloud player iframe
///
/// `track` is either a numeric track id, expanded to the API track URL, or a
/// full `http(s)` track URL, which is percent-encoded into the `url` parameter.
pub fn soundcloud(track: &str) -> String {
    let track_url = soundcloud_track_url(track);
    format!(
        r#"<iframe width="100%" height="166" scrolling="no" frameborder="no" src="https://w.soundcloud.com/player/?url={track_url}&amp;color=ef4c25&amp;auto_play=false&amp;hide_related=false&amp;show_comments=true&amp;show_user=true&amp;show_reposts=false"></iframe>"#
    )
}

fn soundcloud_track_url(track: &str) -> String {
    let trimmed = track.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        urlencoding::encode(trimmed).into_owned()
    } else {
        format!("{SOUNDCLOUD_TRACKS}{track}")
    }
}
