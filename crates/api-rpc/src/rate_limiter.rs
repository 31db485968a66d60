//! Request Rate Limiter (token bucket)
//!
//! Guards the database from request floods; one token per call.

use crate::error::ServerError;
use std::sync::Mutex;
use std::time::Instant;

const ENV_BURST: &str = "APP_RATE_LIMIT_BURST";
const ENV_RATE: &str = "APP_RATE_LIMIT_RATE";
const DEFAULT_BURST: u32 = 200;
const DEFAULT_RATE: u32 = 100;

pub struct RateLimiter {
    bucket: Mutex<Bucket>,
    capacity: f64,
    refill_per_sec: f64,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// `capacity` is the burst size, `refill_per_sec` the sustained rate
    pub fn new(capacity: u32, refill_per_sec: u32) -> Self {
        Self {
            bucket: Mutex::new(Bucket {
                tokens: capacity as f64,
                last_refill: Instant::now(),
            }),
            capacity: capacity as f64,
            refill_per_sec: refill_per_sec as f64,
        }
    }

    /// Burst/rate from `APP_RATE_LIMIT_BURST` / `APP_RATE_LIMIT_RATE`
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or blank keys take the defaults; anything else must parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str, default: u32| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value
                .trim()
                .parse::<u32>()
                .map_err(|_| ServerError::InvalidSetting { key, value }),
            _ => Ok(default),
        };
        Ok(Self::new(
            read(ENV_BURST, DEFAULT_BURST)?,
            read(ENV_RATE, DEFAULT_RATE)?,
        ))
    }

    /// Consume one token; false when the bucket is empty
    pub fn check(&self) -> bool {
        let mut bucket = match self.bucket.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}
