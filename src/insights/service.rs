/// Cached, retried access to an insight provider

use std::time::{Duration, Instant};

use crate::insights::{
    call_with_retry, InsightCache, InsightError, InsightProvider, InsightRequest,
    RateLimitGate, RetryPolicy,
};

/// Generated text and whether it came from the cache
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub text: String,
    pub cached: bool,
}

/// A provider with the caller-owned state that sits in front of it
pub struct InsightService {
    provider: Box<dyn InsightProvider>,
    cache: InsightCache,
    gate: RateLimitGate,
    policy: RetryPolicy,
}

impl InsightService {
    pub fn new(provider: Box<dyn InsightProvider>, ttl: Duration) -> Self {
        Self::with_parts(provider, InsightCache::new(ttl), RetryPolicy::default())
    }

    pub fn with_parts(
        provider: Box<dyn InsightProvider>,
        cache: InsightCache,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            cache,
            gate: RateLimitGate::new(),
            policy,
        }
    }

    /// Answer from the cache when fresh, otherwise ask the provider
    ///
    /// Only successful answers are cached.
    pub async fn get(&mut self, request: &InsightRequest) -> Result<Insight, InsightError> {
        let cached = self.cache.get(request, Instant::now()).map(str::to_string);
        if let Some(text) = cached {
            tracing::debug!("Insight cache hit for {}", self.cache.key_for(request));
            return Ok(Insight { text, cached: true });
        }

        let provider = &self.provider;
        let text = call_with_retry(&self.policy, &mut self.gate, || provider.generate(request)).await?;

        self.cache.insert(request, text.clone(), Instant::now());
        Ok(Insight { text, cached: false })
    }

    pub fn cache(&self) -> &InsightCache {
        &self.cache
    }
}
