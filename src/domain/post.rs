use serde::{Deserialize, Serialize};

use crate::domain::engagement::Comment;
use crate::domain::media::{youtube_embed_url, MediaType};

/// Full persisted record of a post. Field names and types match the stored JSON
/// so records written by earlier clients keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cat_name: String,
    #[serde(default)]
    pub media_type: MediaType,
    pub media_url: String,
    #[serde(default)]
    pub tags: String,
    pub timestamp: i64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Builds a freshly published post from a draft: zeroed counters, no comments.
    pub fn publish(id: String, draft: PostDraft, timestamp: i64) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            cat_name: draft.cat_name,
            media_type: draft.media_type,
            media_url: draft.media_url,
            tags: draft.tags,
            timestamp,
            likes: 0,
            shares: 0,
            views: 0,
            comments: Vec::new(),
        }
    }

    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Embeddable player URL. Only YouTube posts have one; image and video
    /// posts are rendered straight from `media_url`.
    pub fn embed_url(&self) -> Option<String> {
        match self.media_type {
            MediaType::Youtube => youtube_embed_url(&self.media_url),
            MediaType::Image | MediaType::Video => None,
        }
    }
}

/// Fields supplied by the publisher when creating a post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cat_name: String,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub tags: String,
}

/// Display filter over the loaded posts. Never affects storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFilter {
    #[default]
    All,
    Images,
    Videos,
}

impl MediaFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Self::All => true,
            Self::Images => post.media_type == MediaType::Image,
            Self::Videos => matches!(post.media_type, MediaType::Video | MediaType::Youtube),
        }
    }
}

/// A post as served to clients: the stored record plus derived display fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    pub tag_list: Vec<String>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        let embed_url = post.embed_url();
        let tag_list = post.tag_list();
        Self {
            post,
            embed_url,
            tag_list,
        }
    }
}
