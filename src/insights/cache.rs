/// Cache for generated insight text
///
/// Owned by the calling layer, never by the statistics engine. Keys come
/// from an injectable function so callers decide how coarse a "same request"
/// is; the default scopes by user and buckets the rounded average with the
/// entry count halved, so a new key appears every second entry.
///
/// The cache holds at most `capacity` keys and evicts the least recently
/// used one when full. Expired entries are dropped when read and on insert.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::insights::InsightRequest;

type KeyFn = Box<dyn Fn(&InsightRequest) -> String + Send + Sync>;

/// Default time an insight stays fresh
pub const DEFAULT_INSIGHT_TTL: Duration = Duration::from_secs(3600);

/// Default number of keys kept
pub const DEFAULT_INSIGHT_CACHE_CAPACITY: usize = 256;

/// Default cache key: kind, user scope, rounded average, entry count bucket
pub fn default_cache_key(request: &InsightRequest) -> String {
    let scope = match &request.user {
        Some(user) => format!("u:{}", user),
        None => "anon".to_string(),
    };
    format!(
        "{}_{}_{}_{}",
        request.kind.cache_prefix(),
        scope,
        request.average.round() as i64,
        request.entries.len() / 2
    )
}

struct CachedInsight {
    text: String,
    stored_at: Instant,
}

pub struct InsightCache {
    ttl: Duration,
    key_fn: KeyFn,
    entries: LruCache<String, CachedInsight>,
}

fn default_capacity() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_INSIGHT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN)
}

impl InsightCache {
    /// Cache with the default key function and capacity
    pub fn new(ttl: Duration) -> Self {
        Self::with_key_fn(ttl, default_cache_key)
    }

    pub fn with_key_fn<F>(ttl: Duration, key_fn: F) -> Self
    where
        F: Fn(&InsightRequest) -> String + Send + Sync + 'static,
    {
        Self::with_capacity(ttl, default_capacity(), key_fn)
    }

    pub fn with_capacity<F>(ttl: Duration, capacity: NonZeroUsize, key_fn: F) -> Self
    where
        F: Fn(&InsightRequest) -> String + Send + Sync + 'static,
    {
        Self {
            ttl,
            key_fn: Box::new(key_fn),
            entries: LruCache::new(capacity),
        }
    }

    pub fn key_for(&self, request: &InsightRequest) -> String {
        (self.key_fn)(request)
    }

    fn is_fresh(&self, cached: &CachedInsight, now: Instant) -> bool {
        now.saturating_duration_since(cached.stored_at) < self.ttl
    }

    /// Cached text for a request, if present and younger than the TTL at `now`
    ///
    /// A hit marks the key as recently used; an expired entry is removed.
    pub fn get(&mut self, request: &InsightRequest, now: Instant) -> Option<&str> {
        let key = self.key_for(request);
        let fresh = self.entries.peek(&key).map(|cached| self.is_fresh(cached, now))?;
        if !fresh {
            self.entries.pop(&key);
            return None;
        }
        self.entries.get(&key).map(|cached| cached.text.as_str())
    }

    pub fn insert(&mut self, request: &InsightRequest, text: String, now: Instant) {
        self.purge_expired(now);
        let key = self.key_for(request);
        tracing::debug!("Caching insight under key {}", key);
        if let Some((evicted, _)) = self.entries.push(key.clone(), CachedInsight { text, stored_at: now }) {
            if evicted != key {
                tracing::debug!("Evicted insight {} to make room", evicted);
            }
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, cached)| !self.is_fresh(cached, now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.entries.pop(key);
        }
        expired.len()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
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
    use crate::domain::UserId;
    use crate::insights::InsightKind;
    use crate::stats::test_support::*;

    fn request(average: f64, count: usize) -> InsightRequest {
        InsightRequest::recommendations(average, daily(&vec![6; count]))
    }

    #[test]
    fn test_default_key_buckets() {
        assert_eq!(default_cache_key(&request(6.4, 7)), "recs_anon_6_3");
        // Same bucket after one more entry, new bucket after two
        assert_eq!(default_cache_key(&request(6.4, 6)), "recs_anon_6_3");
        assert_eq!(default_cache_key(&request(6.6, 8)), "recs_anon_7_4");

        let plan = InsightRequest {
            kind: InsightKind::ImprovementPlan,
            user: None,
            average: 3.2,
            entries: daily(&[3; 10]),
        };
        assert_eq!(default_cache_key(&plan), "plan_anon_3_5");
    }

    #[test]
    fn test_default_key_is_scoped_per_user() {
        let alice = request(6.0, 3).for_user(Some(UserId::new("alice").unwrap()));
        let bob = request(6.0, 3).for_user(Some(UserId::new("bob").unwrap()));

        assert_eq!(default_cache_key(&alice), "recs_u:alice_6_1");
        assert_ne!(default_cache_key(&alice), default_cache_key(&bob));
        assert_ne!(default_cache_key(&alice), default_cache_key(&request(6.0, 3)));

        let mut cache = InsightCache::new(DEFAULT_INSIGHT_TTL);
        let now = Instant::now();
        cache.insert(&alice, "for alice".to_string(), now);
        assert!(cache.get(&bob, now).is_none());
        assert_eq!(cache.get(&alice, now), Some("for alice"));
    }

    #[test]
    fn test_hit_then_expiry() {
        let start = Instant::now();
        let mut cache = InsightCache::new(Duration::from_secs(60));
        let req = request(7.0, 4);

        assert!(cache.get(&req, start).is_none());
        cache.insert(&req, "Keep going".to_string(), start);

        assert_eq!(cache.get(&req, start + Duration::from_secs(59)), Some("Keep going"));
        assert!(cache.get(&req, start + Duration::from_secs(60)).is_none());
        // The expired read removed it
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_purges_expired() {
        let start = Instant::now();
        let mut cache = InsightCache::new(Duration::from_secs(60));

        cache.insert(&request(2.0, 2), "old".to_string(), start);
        cache.insert(&request(3.0, 2), "old too".to_string(), start);
        assert_eq!(cache.len(), 2);

        cache.insert(&request(9.0, 2), "new".to_string(), start + Duration::from_secs(61));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge_expired(start + Duration::from_secs(200)), 1);
    }

    #[test]
    fn test_size_stays_bounded() {
        let start = Instant::now();
        let capacity = NonZeroUsize::new(3).unwrap();
        let mut cache = InsightCache::with_capacity(DEFAULT_INSIGHT_TTL, capacity, default_cache_key);

        for i in 0..20 {
            let user = UserId::new(format!("user_{}", i)).unwrap();
            cache.insert(&request(5.0, 4).for_user(Some(user)), format!("text {}", i), start);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.capacity(), 3);

        // Least recently used keys went first
        let latest = request(5.0, 4).for_user(Some(UserId::new("user_19").unwrap()));
        let oldest = request(5.0, 4).for_user(Some(UserId::new("user_0").unwrap()));
        assert_eq!(cache.get(&latest, start), Some("text 19"));
        assert!(cache.get(&oldest, start).is_none());
    }

    #[test]
    fn test_custom_key_function() {
        let start = Instant::now();
        // One slot per kind regardless of data
        let mut cache = InsightCache::with_key_fn(DEFAULT_INSIGHT_TTL, |r| {
            r.kind.cache_prefix().to_string()
        });

        cache.insert(&request(2.0, 3), "first".to_string(), start);
        assert_eq!(cache.get(&request(9.0, 20), start), Some("first"));
        assert_eq!(cache.len(), 1);
    }
}
