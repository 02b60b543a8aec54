use url::form_urlencoded;

use crate::domain::engagement::{ShareOutcome, SharePlatform, ShareTarget};
use crate::domain::post::Post;

const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";
const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const INSTAGRAM_MANUAL: &str =
    "Instagram only supports sharing from the mobile app. Download the media first.";

/// Builds outbound share payloads for a post.
#[derive(Debug, Clone)]
pub struct ShareComposer {
    region: String,
}

impl ShareComposer {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    pub fn text(&self, post: &Post) -> String {
        format!(
            "🐱 {} - {} desde {}, {}",
            post.title, post.cat_name, post.location, self.region
        )
    }

    pub fn compose(&self, post: &Post, platform: SharePlatform) -> ShareOutcome {
        let text = self.text(post);
        let target = match platform {
            SharePlatform::Facebook => ShareTarget::Link {
                url: with_query(
                    FACEBOOK_SHARER,
                    &[("u", post.media_url.as_str()), ("quote", text.as_str())],
                ),
            },
            SharePlatform::Twitter => ShareTarget::Link {
                url: with_query(
                    TWITTER_INTENT,
                    &[("text", text.as_str()), ("url", post.media_url.as_str())],
                ),
            },
            SharePlatform::Instagram => ShareTarget::Manual {
                message: INSTAGRAM_MANUAL.to_string(),
            },
        };

        ShareOutcome {
            platform,
            text,
            target,
        }
    }
}

fn with_query(base: &str, pairs: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{}?{}", base, query)
}
