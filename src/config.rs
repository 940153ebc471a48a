//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `IP_HASH_SECRET` - Key for the client identity HMAC. Must be non-empty.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `APP_ENV` - `production` or `development` (default: `production`)
//! - `IDENTITY_PREFIX_LEN` - Hex characters kept from the identity digest (default: 16)
//! - `RATE_LIMIT_MAX` - Requests per window, 0 disables limiting (default: 100)
//! - `RATE_LIMIT_WINDOW_SECS` - Base window length, at most 86400 (default: 900)
//! - `RATE_LIMIT_MAX_PENALTY_EXP` - Cap on the penalty exponent (default: 5)
//! - `BURST_THRESHOLD` / `BURST_WINDOW_SECS` - Burst flagging (default: 20 per 60s)
//! - `SUSPICION_TTL_SECS` - Lifetime of an idle suspicion flag (default: 86400)
//! - `TARPIT_MIN_MS` / `TARPIT_MAX_MS` - Tarpit jitter bounds (default: 1000 / 6000)
//! - `HONEYPOT_DELAY_MS` - Delay before answering a honeypot hit (default: 5000)
//! - `HONEYPOT_PATTERNS` - Comma-separated path fragments
//! - `SWEEP_INTERVAL_SECS` - Period of the expired-state sweep (default: 60)
//! - `SEED_DATA` - Load the built-in charity list; `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` (default: `true`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::security::honeypot::DEFAULT_HONEYPOT_PATTERNS;
use crate::security::{AnomalyPolicy, DeploymentMode, RateLimitPolicy, TarpitPolicy};

/// Longest accepted rate-limit window: one day.
const MAX_WINDOW_SECS: u64 = 86_400;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub mode: DeploymentMode,
    /// HMAC key for client identities. Loaded from `IP_HASH_SECRET`.
    pub ip_hash_secret: String,
    pub identity_prefix_len: usize,

    // ── Admission control ───────────────────────────────────────────────────
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    pub rate_limit_max_penalty_exp: u32,
    pub burst_threshold: usize,
    pub burst_window_secs: u64,
    pub suspicion_ttl_secs: u64,
    pub tarpit_min_ms: u64,
    pub tarpit_max_ms: u64,
    pub honeypot_delay_ms: u64,
    pub honeypot_patterns: Vec<String>,
    pub sweep_interval_secs: u64,

    pub seed_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            mode: DeploymentMode::Production,
            ip_hash_secret: String::new(),
            identity_prefix_len: 16,
            rate_limit_max: 100,
            rate_limit_window_secs: 900,
            rate_limit_max_penalty_exp: 5,
            burst_threshold: 20,
            burst_window_secs: 60,
            suspicion_ttl_secs: 86_400,
            tarpit_min_ms: 1000,
            tarpit_max_ms: 6000,
            honeypot_delay_ms: 5000,
            honeypot_patterns: DEFAULT_HONEYPOT_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            sweep_interval_secs: 60,
            seed_data: true,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `IP_HASH_SECRET` is missing or a set variable
    /// does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let mode = match env::var("APP_ENV") {
            Ok(v) => v.parse::<DeploymentMode>().map_err(anyhow::Error::msg)?,
            Err(_) => defaults.mode,
        };

        let ip_hash_secret = env::var("IP_HASH_SECRET").context("IP_HASH_SECRET must be set")?;

        let honeypot_patterns = match env::var("HONEYPOT_PATTERNS") {
            Ok(v) => parse_list(&v),
            Err(_) => defaults.honeypot_patterns,
        };

        let seed_data = env_flag("SEED_DATA", defaults.seed_data)?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            mode,
            ip_hash_secret,
            identity_prefix_len: env_or("IDENTITY_PREFIX_LEN", defaults.identity_prefix_len)?,
            rate_limit_max: env_or("RATE_LIMIT_MAX", defaults.rate_limit_max)?,
            rate_limit_window_secs: env_or(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            )?,
            rate_limit_max_penalty_exp: env_or(
                "RATE_LIMIT_MAX_PENALTY_EXP",
                defaults.rate_limit_max_penalty_exp,
            )?,
            burst_threshold: env_or("BURST_THRESHOLD", defaults.burst_threshold)?,
            burst_window_secs: env_or("BURST_WINDOW_SECS", defaults.burst_window_secs)?,
            suspicion_ttl_secs: env_or("SUSPICION_TTL_SECS", defaults.suspicion_ttl_secs)?,
            tarpit_min_ms: env_or("TARPIT_MIN_MS", defaults.tarpit_min_ms)?,
            tarpit_max_ms: env_or("TARPIT_MAX_MS", defaults.tarpit_max_ms)?,
            honeypot_delay_ms: env_or("HONEYPOT_DELAY_MS", defaults.honeypot_delay_ms)?,
            honeypot_patterns,
            sweep_interval_secs: env_or("SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs)?,
            seed_data,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `ip_hash_secret` is empty
    /// - a window, interval or bound is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.ip_hash_secret.is_empty() {
            anyhow::bail!("IP_HASH_SECRET must not be empty");
        }

        if !(8..=64).contains(&self.identity_prefix_len) {
            anyhow::bail!(
                "IDENTITY_PREFIX_LEN must be between 8 and 64, got {}",
                self.identity_prefix_len
            );
        }

        if !(1..=MAX_WINDOW_SECS).contains(&self.rate_limit_window_secs) {
            anyhow::bail!(
                "RATE_LIMIT_WINDOW_SECS must be between 1 and {MAX_WINDOW_SECS}, got {}",
                self.rate_limit_window_secs
            );
        }

        if self.rate_limit_max_penalty_exp > 16 {
            anyhow::bail!(
                "RATE_LIMIT_MAX_PENALTY_EXP must be at most 16, got {}",
                self.rate_limit_max_penalty_exp
            );
        }

        if self.burst_window_secs == 0 {
            anyhow::bail!("BURST_WINDOW_SECS must be greater than 0");
        }

        if self.tarpit_min_ms > self.tarpit_max_ms {
            anyhow::bail!(
                "TARPIT_MIN_MS ({}) must not exceed TARPIT_MAX_MS ({})",
                self.tarpit_min_ms,
                self.tarpit_max_ms
            );
        }

        if self.sweep_interval_secs == 0 {
            anyhow::bail!("SWEEP_INTERVAL_SECS must be greater than 0");
        }

        Ok(())
    }

    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            limit: self.rate_limit_max,
            window: Duration::from_secs(self.rate_limit_window_secs),
            max_penalty_exponent: self.rate_limit_max_penalty_exp,
        }
    }

    pub fn anomaly_policy(&self) -> AnomalyPolicy {
        AnomalyPolicy {
            burst_threshold: self.burst_threshold,
            burst_window: Duration::from_secs(self.burst_window_secs),
            suspicion_ttl: Duration::from_secs(self.suspicion_ttl_secs),
        }
    }

    pub fn tarpit_policy(&self) -> TarpitPolicy {
        TarpitPolicy {
            min: Duration::from_millis(self.tarpit_min_ms),
            max: Duration::from_millis(self.tarpit_max_ms),
        }
    }

    pub fn honeypot_delay(&self) -> Duration {
        Duration::from_millis(self.honeypot_delay_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Environment: {}", self.mode);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if self.rate_limit_max == 0 {
            tracing::info!("  Rate limit: disabled");
        } else {
            tracing::info!(
                "  Rate limit: {} per {}s (penalty cap 2^{})",
                self.rate_limit_max,
                self.rate_limit_window_secs,
                self.rate_limit_max_penalty_exp
            );
        }

        tracing::info!(
            "  Burst flagging: >{} per {}s",
            self.burst_threshold,
            self.burst_window_secs
        );
        tracing::info!(
            "  Tarpit: {}-{}ms, honeypot delay {}ms",
            self.tarpit_min_ms,
            self.tarpit_max_ms,
            self.honeypot_delay_ms
        );
        tracing::info!("  Honeypot patterns: {}", self.honeypot_patterns.len());
        tracing::info!("  Seed data: {}", self.seed_data);
    }
}

/// Reads `key` and parses it, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value '{v}'")),
        Err(_) => Ok(default),
    }
}

/// Reads a boolean flag. Accepts `true`/`false`, `1`/`0`, `yes`/`no` and
/// `on`/`off`, case-insensitively.
fn env_flag(key: &str, default: bool) -> Result<bool> {
    let Ok(v) = env::var(key) else {
        return Ok(default);
    };

    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{key} must be a boolean, got '{v}'"),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            ip_hash_secret: "test-secret".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.ip_hash_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bounds_validation() {
        let mut config = valid_config();

        config.identity_prefix_len = 4;
        assert!(config.validate().is_err());
        config.identity_prefix_len = 16;

        config.tarpit_min_ms = 7000;
        assert!(config.validate().is_err());
        config.tarpit_min_ms = 1000;

        config.sweep_interval_secs = 0;
        assert!(config.validate().is_err());
        config.sweep_interval_secs = 60;

        config.rate_limit_window_secs = 0;
        assert!(config.validate().is_err());
        config.rate_limit_window_secs = MAX_WINDOW_SECS + 1;
        assert!(config.validate().is_err());
        config.rate_limit_window_secs = MAX_WINDOW_SECS;
        assert!(config.validate().is_ok());
        config.rate_limit_window_secs = 900;

        config.rate_limit_max_penalty_exp = 17;
        assert!(config.validate().is_err());
        config.rate_limit_max_penalty_exp = 5;

        // zero disables limiting rather than rejecting everything
        config.rate_limit_max = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policies_follow_config() {
        let config = valid_config();

        let rate = config.rate_limit_policy();
        assert_eq!(rate.limit, 100);
        assert_eq!(rate.window, Duration::from_secs(900));

        let tarpit = config.tarpit_policy();
        assert_eq!(tarpit.min, Duration::from_millis(1000));
        assert_eq!(tarpit.max, Duration::from_millis(6000));

        assert_eq!(config.anomaly_policy().burst_threshold, 20);
        assert_eq!(config.honeypot_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" /admin, ,/.env ,"),
            vec!["/admin".to_string(), "/.env".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_secret() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("IP_HASH_SECRET");
        }

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("IP_HASH_SECRET", "from-env");
            env::set_var("APP_ENV", "development");
            env::set_var("RATE_LIMIT_MAX", "5");
            env::set_var("HONEYPOT_PATTERNS", "/secret,/hidden");
            env::set_var("SEED_DATA", "false");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.ip_hash_secret, "from-env");
        assert_eq!(config.mode, DeploymentMode::Development);
        assert_eq!(config.rate_limit_max, 5);
        assert_eq!(config.honeypot_patterns, vec!["/secret", "/hidden"]);
        assert!(!config.seed_data);

        // Cleanup
        unsafe {
            env::remove_var("IP_HASH_SECRET");
            env::remove_var("APP_ENV");
            env::remove_var("RATE_LIMIT_MAX");
            env::remove_var("HONEYPOT_PATTERNS");
            env::remove_var("SEED_DATA");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_garbage() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("IP_HASH_SECRET", "s");
            env::set_var("RATE_LIMIT_MAX", "lots");
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("RATE_LIMIT_MAX"));

        // Cleanup
        unsafe {
            env::remove_var("IP_HASH_SECRET");
            env::remove_var("RATE_LIMIT_MAX");
        }
    }

    #[test]
    #[serial]
    fn test_seed_flag_parsing() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("IP_HASH_SECRET", "s");
            env::set_var("SEED_DATA", "0");
        }
        assert!(!Config::from_env().unwrap().seed_data);

        unsafe {
            env::set_var("SEED_DATA", "Yes");
        }
        assert!(Config::from_env().unwrap().seed_data);

        unsafe {
            env::set_var("SEED_DATA", "maybe");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SEED_DATA"));

        // Cleanup
        unsafe {
            env::remove_var("IP_HASH_SECRET");
            env::remove_var("SEED_DATA");
        }
    }
}
