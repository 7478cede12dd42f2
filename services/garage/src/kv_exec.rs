use std::sync::Arc;
use tokio::sync::RwLock;

pub async fn with_store_blocking<S, R, F>(
    store: Arc<RwLock<S>>,
    f: F,
) -> Result<R, tokio::task::JoinError>
where
    S: Send + Sync + 'static,
    R: Send + 'static,
    F: FnOnce(&mut S) -> R + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = store.blocking_write();
        f(&mut *guard)
    })
    .await
}

pub async fn read_store_blocking<S, R, F>(
    store: Arc<RwLock<S>>,
    f: F,
) -> Result<R, tokio::task::JoinError>
where
    S: Send + Sync + 'static,
    R: Send + 'static,
    F: FnOnce(&S) -> R + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let guard = store.blocking_read();
        f(&*guard)
    })
    .await
}
