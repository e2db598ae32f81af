/// Rate-limit-aware retry around an insight provider
///
/// A rate-limited call is retried with a doubling delay. The instant of the
/// last rate limit is kept in a `RateLimitGate` owned by the caller; while
/// its cooldown runs, new calls fail fast without reaching the provider.
/// Retries inside a call that is already in flight are not blocked by the
/// gate.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::insights::InsightError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first rate-limited one
    pub retries: u32,
    /// Delay before the first retry; doubles each time
    pub initial_delay: Duration,
    /// How long new calls are refused after a rate limit
    pub cooldown: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            initial_delay: Duration::from_secs(3),
            cooldown: Duration::from_secs(60),
        }
    }
}

/// Remembers when the provider last rate limited us
#[derive(Debug, Clone, Default)]
pub struct RateLimitGate {
    last_rate_limited: Option<Instant>,
}

impl RateLimitGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_rate_limit(&mut self, at: Instant) {
        self.last_rate_limited = Some(at);
    }

    /// Whole seconds of cooldown left at `now`, rounded up; 0 when open
    pub fn cooldown_remaining(&self, cooldown: Duration, now: Instant) -> u64 {
        let Some(last) = self.last_rate_limited else {
            return 0;
        };
        let elapsed = now.duration_since(last);
        if elapsed >= cooldown {
            return 0;
        }
        let left = cooldown - elapsed;
        left.as_secs() + u64::from(left.subsec_nanos() > 0)
    }

    pub fn is_cooling_down(&self, cooldown: Duration, now: Instant) -> bool {
        self.cooldown_remaining(cooldown, now) > 0
    }
}

/// Run `call`, retrying on `InsightError::RateLimited` per `policy`
///
/// Other errors are returned immediately.
pub async fn call_with_retry<F, Fut>(
    policy: &RetryPolicy,
    gate: &mut RateLimitGate,
    mut call: F,
) -> Result<String, InsightError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, InsightError>>,
{
    let remaining_secs = gate.cooldown_remaining(policy.cooldown, Instant::now());
    if remaining_secs > 0 {
        return Err(InsightError::CoolingDown { remaining_secs });
    }

    let mut retries_left = policy.retries;
    let mut delay = policy.initial_delay;

    loop {
        match call().await {
            Err(InsightError::RateLimited) => {
                gate.record_rate_limit(Instant::now());
                if retries_left == 0 {
                    tracing::warn!("Insight provider still rate limited after {} retries", policy.retries);
                    return Err(InsightError::RateLimited);
                }
                tracing::debug!("Insight provider rate limited, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
                retries_left -= 1;
                delay *= 2;
            }
            other => return other,
        }
    }
}
