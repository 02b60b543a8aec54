use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::app::error::{RepoError, RepoResult};
use crate::app::locks::KeyLocks;
use crate::app::share::ShareComposer;
use crate::domain::post::{MediaFilter, Post, PostDraft};
use crate::infra::store::SharedStore;

pub const DEFAULT_NAMESPACE: &str = "cat-post";

/// Mediates between clients and the key-value store.
///
/// Holds the most recently loaded set of posts. Every mutation is a
/// read-modify-write of one post record followed by a full reload, so the
/// in-memory view always comes from the store.
#[derive(Clone)]
pub struct PostRepository {
    store: SharedStore,
    namespace: Arc<str>,
    pub(crate) share: ShareComposer,
    locks: KeyLocks,
    view: Arc<RwLock<Vec<Post>>>,
}

pub(crate) fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub(crate) fn new_id() -> String {
    Ulid::new().to_string()
}

impl PostRepository {
    pub fn new(store: SharedStore, namespace: &str, share: ShareComposer) -> Self {
        Self {
            store,
            namespace: Arc::from(namespace),
            share,
            locks: KeyLocks::new(),
            view: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn key_for(&self, id: &str) -> String {
        format!("{}:{}", self.namespace, id)
    }

    fn prefix(&self) -> String {
        format!("{}:", self.namespace)
    }

    /// Posts from the last load, newest first. Does not touch the store.
    pub async fn posts(&self) -> Vec<Post> {
        self.view.read().await.clone()
    }

    pub async fn filtered(&self, filter: MediaFilter) -> Vec<Post> {
        self.view
            .read()
            .await
            .iter()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect()
    }

    /// Reloads every post from the store, newest first.
    ///
    /// Never fails: a failed listing yields no posts and unreadable records
    /// are skipped.
    pub async fn load_all(&self) -> Vec<Post> {
        let prefix = self.prefix();
        let keys = match self.store.list(&prefix).await {
            Ok(keys) => keys,
            Err(err) => {
                warn!(error = ?err, prefix = %prefix, "failed to list posts, treating as empty");
                Vec::new()
            }
        };

        let mut posts: Vec<Post> = join_all(keys.iter().map(|key| self.read_record(key)))
            .await
            .into_iter()
            .flatten()
            .collect();

        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));

        let mut seen = HashSet::with_capacity(posts.len());
        posts.retain(|post| {
            let fresh = seen.insert(post.id.clone());
            if !fresh {
                warn!(post_id = %post.id, "duplicate post id in store, keeping newest record");
            }
            fresh
        });

        debug!(count = posts.len(), "loaded posts");
        *self.view.write().await = posts.clone();
        posts
    }

    async fn read_record(&self, key: &str) -> Option<Post> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = ?err, key = %key, "failed to read post record");
                return None;
            }
        };

        match serde_json::from_str::<Post>(&raw) {
            Ok(post) => Some(post),
            Err(err) => {
                warn!(error = ?err, key = %key, "dropping undecodable post record");
                None
            }
        }
    }

    /// Reads one post straight from the store. Read failures count as absence.
    pub async fn find(&self, id: &str) -> Option<Post> {
        self.read_record(&self.key_for(id)).await
    }

    /// Current record for a mutation. Unlike `find`, a failed store call is
    /// reported so the mutation can fail instead of acting on stale data.
    async fn fetch_current(&self, key: &str) -> RepoResult<Option<Post>> {
        let raw = self.store.get(key).await.map_err(RepoError::Storage)?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str::<Post>(&raw) {
            Ok(post) => Ok(Some(post)),
            Err(err) => {
                warn!(error = ?err, key = %key, "post record is undecodable, treating as missing");
                Ok(None)
            }
        }
    }

    async fn persist(&self, key: &str, post: &Post) -> RepoResult<()> {
        let payload = serde_json::to_string(post)?;
        self.store
            .set(key, payload)
            .await
            .map_err(RepoError::Storage)
    }

    /// Validates and publishes a new post.
    pub async fn create(&self, draft: PostDraft) -> RepoResult<Post> {
        if draft.title.trim().is_empty() || draft.media_url.trim().is_empty() {
            return Err(RepoError::validation("title and mediaUrl are required"));
        }

        let post = Post::publish(new_id(), draft, now_millis());
        let key = self.key_for(&post.id);
        {
            let _guard = self.locks.acquire(&key).await;
            self.persist(&key, &post).await?;
        }

        info!(post_id = %post.id, media_type = post.media_type.as_str(), "published post");
        self.load_all().await;
        Ok(post)
    }

    /// Replaces an existing post with the given full record.
    ///
    /// Fields the caller did not intend to change must already be carried
    /// over; nothing is merged here.
    pub async fn update(&self, post: Post) -> RepoResult<Post> {
        let key = self.key_for(&post.id);
        {
            let _guard = self.locks.acquire(&key).await;
            if self.fetch_current(&key).await?.is_none() {
                return Err(RepoError::NotFound(post.id));
            }
            self.persist(&key, &post).await?;
        }

        debug!(post_id = %post.id, "updated post");
        self.load_all().await;
        Ok(post)
    }

    /// Removes a post. Deleting a missing post succeeds.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = self.key_for(id);
        {
            let _guard = self.locks.acquire(&key).await;
            self.store.delete(&key).await.map_err(RepoError::Storage)?;
        }

        info!(post_id = %id, "deleted post");
        self.load_all().await;
        Ok(())
    }

    /// Applies `change` to the current record of `id` under the key lock,
    /// writes the result back and reloads.
    pub(crate) async fn mutate<F>(&self, id: &str, change: F) -> RepoResult<Post>
    where
        F: FnOnce(&mut Post) + Send,
    {
        let key = self.key_for(id);
        let post = {
            let _guard = self.locks.acquire(&key).await;
            let mut post = self
                .fetch_current(&key)
                .await?
                .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
            change(&mut post);
            self.persist(&key, &post).await?;
            post
        };

        self.load_all().await;
        Ok(post)
    }
}
