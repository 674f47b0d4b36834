use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Memoizes values per key for a fixed time-to-live.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Expired entries are evicted on lookup.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        let fresh = self
            .entries
            .get(key)
            .map(|e| now.saturating_duration_since(e.inserted_at) < self.ttl)?;
        if fresh {
            self.entries.get(key).map(|e| e.value.clone())
        } else {
            self.entries.remove(key);
            None
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    pub fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_expires_after_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(12 * 3600));
        let t0 = Instant::now();
        cache.insert_at(3u32, "table", t0);

        assert_eq!(cache.get_at(&3, t0 + Duration::from_secs(11 * 3600)), Some("table"));
        assert_eq!(cache.get_at(&3, t0 + Duration::from_secs(12 * 3600)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert(1u32, 10);
        cache.insert(2u32, 20);
        cache.invalidate(&1);

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(20));
        assert_eq!(cache.len(), 1);
    }
}
