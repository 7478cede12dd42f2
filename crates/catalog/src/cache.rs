//! Keyed in-process cache with a per-lookup time-to-live.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::Clock;

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    captured_at: DateTime<Utc>,
}

pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone + Send> TtlCache<V> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Return the entry for `key` while `now - captured_at < ttl`, otherwise
    /// run `loader` and store its value.
    ///
    /// The lock is held while `loader` runs, so concurrent callers for a cold
    /// key wait for the first load instead of starting their own. A failed
    /// load stores nothing and leaves any previous entry in place.
    pub async fn get_or_populate<F, Fut, E>(&self, key: &str, ttl: TimeDelta, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(key) {
            if self.clock.now() - entry.captured_at < ttl {
                debug!(key, "cache: hit");
                return Ok(entry.value.clone());
            }
            debug!(key, "cache: expired");
        } else {
            debug!(key, "cache: miss");
        }

        let value = loader().await?;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                captured_at: self.clock.now(),
            },
        );
        Ok(value)
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> (ManualClock, TtlCache<u32>) {
        let clock = ManualClock::new(Utc::now());
        let cache = TtlCache::new(Arc::new(clock.clone()));
        (clock, cache)
    }

    async fn load(cache: &TtlCache<u32>, calls: &AtomicUsize, value: u32) -> Result<u32, String> {
        cache
            .get_or_populate("k", TimeDelta::hours(1), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(value)
            })
            .await
    }

    #[tokio::test]
    async fn test_hit_until_ttl_elapses() {
        let (clock, cache) = setup();
        let calls = AtomicUsize::new(0);

        assert_eq!(load(&cache, &calls, 1).await, Ok(1));
        clock.advance(TimeDelta::minutes(59));
        assert_eq!(load(&cache, &calls, 2).await, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        clock.advance(TimeDelta::minutes(1));
        assert_eq!(load(&cache, &calls, 3).await, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_entry() {
        let (clock, cache) = setup();
        let calls = AtomicUsize::new(0);
        load(&cache, &calls, 7).await.unwrap();
        clock.advance(TimeDelta::hours(2));

        let err = cache
            .get_or_populate("k", TimeDelta::hours(1), || async { Err::<u32, _>("offline".to_string()) })
            .await;
        assert_eq!(err, Err("offline".to_string()));
        assert_eq!(cache.len().await, 1);

        // a longer ttl still sees the old value
        let v = cache
            .get_or_populate("k", TimeDelta::hours(3), || async { Ok::<_, String>(99) })
            .await;
        assert_eq!(v, Ok(7));
    }

    #[tokio::test]
    async fn test_failed_first_load_stores_nothing() {
        let (_clock, cache) = setup();
        let err = cache
            .get_or_populate("k", TimeDelta::hours(1), || async { Err::<u32, _>(()) })
            .await;
        assert!(err.is_err());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let (_clock, cache) = setup();
        let calls = AtomicUsize::new(0);
        load(&cache, &calls, 1).await.unwrap();

        cache.invalidate("k").await;
        load(&cache, &calls, 2).await.unwrap();
        cache.clear().await;
        assert!(cache.is_empty().await);
        assert_eq!(load(&cache, &calls, 3).await, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
