use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// String-keyed storage consumed by the post repository.
///
/// Every call may fail. Implementations must not assume callers serialize
/// their requests.
pub trait KvStore: Send + Sync {
    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>>>;

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>>>;

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<()>>;

    /// Removing a missing key is not an error.
    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<()>>;

    fn ping(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async { Ok(()) })
    }
}

pub type SharedStore = Arc<dyn KvStore>;

/// Wraps a store so that no single call outlives `timeout`.
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

async fn bounded<T>(
    timeout: Duration,
    op: &'static str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| anyhow!("store {} timed out after {:?}", op, timeout))?
}

impl<S: KvStore> KvStore for TimeoutStore<S> {
    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
        Box::pin(bounded(self.timeout, "list", self.inner.list(prefix)))
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(bounded(self.timeout, "get", self.inner.get(key)))
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<()>> {
        Box::pin(bounded(self.timeout, "set", self.inner.set(key, value)))
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(bounded(self.timeout, "delete", self.inner.delete(key)))
    }

    fn ping(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(bounded(self.timeout, "ping", self.inner.ping()))
    }
}
