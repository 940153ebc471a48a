//! Shared application state injected into handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::services::CharityService;
use crate::config::Config;
use crate::infrastructure::persistence::{InMemoryCharityRepository, seed_charities};
use crate::security::{
    AnomalyFlagger, Clock, HoneypotMatcher, IdentityHasher, RateLimiter, SecurityHeaders,
    TarpitPolicy,
};

/// Application state cloned into every request.
///
/// Everything is behind an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub charity_service: Arc<CharityService<InMemoryCharityRepository>>,
    pub identity_hasher: Arc<IdentityHasher>,
    pub rate_limiter: Arc<RateLimiter>,
    pub anomaly_flagger: Arc<AnomalyFlagger>,
    pub honeypot: Arc<HoneypotMatcher>,
    pub tarpit: TarpitPolicy,
    pub honeypot_delay: Duration,
    pub security_headers: Arc<SecurityHeaders>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Builds the state from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a honeypot pattern cannot be compiled.
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let repository = if config.seed_data {
            InMemoryCharityRepository::with_seed(seed_charities())
        } else {
            InMemoryCharityRepository::new()
        };

        let honeypot = HoneypotMatcher::new(&config.honeypot_patterns)
            .context("Failed to compile HONEYPOT_PATTERNS")?;

        Ok(Self {
            charity_service: Arc::new(CharityService::new(Arc::new(repository))),
            identity_hasher: Arc::new(IdentityHasher::new(
                config.ip_hash_secret.as_bytes(),
                config.identity_prefix_len,
            )),
            rate_limiter: Arc::new(RateLimiter::new(
                config.rate_limit_policy(),
                clock.clone(),
            )),
            anomaly_flagger: Arc::new(AnomalyFlagger::new(
                config.anomaly_policy(),
                clock.clone(),
            )),
            honeypot: Arc::new(honeypot),
            tarpit: config.tarpit_policy(),
            honeypot_delay: config.honeypot_delay(),
            security_headers: Arc::new(SecurityHeaders::for_mode(config.mode)),
            clock,
        })
    }
}
