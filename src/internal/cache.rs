use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Generic in-memory cache with per-entry TTL.
///
/// Clones share the same store, so a cloned service sees the same entries.
/// Used to front the article scraping API; item fetches are never cached here.
pub struct Cache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the value if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(key)?;
        if Instant::now() < entry.expires_at {
            tracing::debug!(hit = true, "cache.get");
            Some(entry.value.clone())
        } else {
            tracing::debug!(hit = false, "cache.get");
            None
        }
    }

    pub fn set(&self, key: K, value: V) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key,
                CacheEntry {
                    value,
                    expires_at: Instant::now() + self.ttl,
                },
            );
        }
    }
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn set_then_get() {
        let cache = Cache::new(Duration::from_secs(60));
        cache.set("a".to_string(), 1);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"b".to_string()), None);
    }

    #[test]
    fn entries_expire() {
        let cache = Cache::new(Duration::from_millis(50));
        cache.set(1, "x".to_string());
        assert_eq!(cache.get(&1), Some("x".to_string()));

        thread::sleep(Duration::from_millis(80));
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn clones_share_entries() {
        let cache = Cache::new(Duration::from_secs(60));
        let other = cache.clone();
        cache.set(7, "shared".to_string());
        assert_eq!(other.get(&7), Some("shared".to_string()));
    }
}
