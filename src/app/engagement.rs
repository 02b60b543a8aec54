use tracing::{debug, info};

use crate::app::error::{RepoError, RepoResult};
use crate::app::posts::{new_id, now_millis, PostRepository};
use crate::domain::engagement::{Comment, ShareOutcome, SharePlatform};
use crate::domain::post::Post;

/// Interactions on published posts. Counters only ever move up by one and
/// nothing here deduplicates repeat visitors.
impl PostRepository {
    pub async fn like(&self, post_id: &str) -> RepoResult<Post> {
        let post = self.mutate(post_id, |post| post.likes += 1).await?;
        debug!(post_id = %post_id, likes = post.likes, "liked post");
        Ok(post)
    }

    pub async fn increment_views(&self, post_id: &str) -> RepoResult<Post> {
        let post = self.mutate(post_id, |post| post.views += 1).await?;
        debug!(post_id = %post_id, views = post.views, "counted view");
        Ok(post)
    }

    /// Counts a share and returns where the client should send the visitor.
    pub async fn record_share(
        &self,
        post_id: &str,
        platform: SharePlatform,
    ) -> RepoResult<(Post, ShareOutcome)> {
        let post = self.mutate(post_id, |post| post.shares += 1).await?;
        let outcome = self.share.compose(&post, platform);
        info!(post_id = %post_id, platform = %platform, shares = post.shares, "recorded share");
        Ok((post, outcome))
    }

    pub async fn add_comment(&self, post_id: &str, name: &str, text: &str) -> RepoResult<Post> {
        if name.trim().is_empty() || text.trim().is_empty() {
            return Err(RepoError::validation("comment name and text are required"));
        }

        let comment = Comment {
            id: new_id(),
            name: name.to_string(),
            text: text.to_string(),
            timestamp: now_millis(),
        };
        let comment_id = comment.id.clone();

        let post = self
            .mutate(post_id, move |post| post.comments.push(comment))
            .await?;
        debug!(post_id = %post_id, comment_id = %comment_id, "added comment");
        Ok(post)
    }

    /// Removes one comment. A comment that is already gone is not an error.
    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> RepoResult<Post> {
        let post = self
            .mutate(post_id, |post| {
                if let Some(index) = post.comments.iter().position(|c| c.id == comment_id) {
                    post.comments.remove(index);
                }
            })
            .await?;
        debug!(post_id = %post_id, comment_id = %comment_id, "deleted comment");
        Ok(post)
    }
}
