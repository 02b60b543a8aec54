pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod infra;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::app::posts::PostRepository;
use crate::app::share::ShareComposer;
use crate::config::{AppConfig, StoreBackend};
use crate::infra::memory::MemoryStore;
use crate::infra::redis_store::RedisStore;
use crate::infra::store::{SharedStore, TimeoutStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub posts: PostRepository,
}

impl AppState {
    pub fn new(store: SharedStore, namespace: &str, share_region: &str) -> Self {
        let posts = PostRepository::new(store.clone(), namespace, ShareComposer::new(share_region));
        Self { store, posts }
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.store_timeout_ms);
        let store: SharedStore = match config.store_backend {
            StoreBackend::Redis => {
                let redis = RedisStore::connect(&config.redis_url).await?;
                Arc::new(TimeoutStore::new(redis, timeout))
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store, posts will not survive a restart");
                Arc::new(TimeoutStore::new(MemoryStore::new(), timeout))
            }
        };

        Ok(Self::new(store, &config.key_namespace, &config.share_region))
    }
}
