use serde::{Deserialize, Serialize};

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
    Youtube,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Youtube => "youtube",
        }
    }
}

/// Derives the embeddable player URL for a YouTube link.
///
/// Accepts the `watch?v=<id>` and `youtu.be/<id>` forms. Links that already
/// point at an `embed/` path are returned as-is. Anything else has no embed URL.
pub fn youtube_embed_url(url: &str) -> Option<String> {
    let video_id = if let Some((_, rest)) = url.split_once("watch?v=") {
        rest.split('&').next().unwrap_or_default()
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest.split('?').next().unwrap_or_default()
    } else if url.contains("embed/") {
        return Some(url.to_string());
    } else {
        return None;
    };

    if video_id.is_empty() {
        return None;
    }

    Some(format!("{YOUTUBE_EMBED_BASE}{video_id}"))
}
