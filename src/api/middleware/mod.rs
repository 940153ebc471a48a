//! HTTP middleware for request processing and protection.
//!
//! Requests pass the layers in this order:
//!
//! 1. [`security_headers`] - hardening headers on every response
//! 2. [`honeypot`] - traps scanner paths
//! 3. [`rate_limit`] - per-client window with penalty
//! 4. [`tarpit`] - burst detection and delays
//! 5. [`fingerprint`] - header fingerprint for anomaly logs
//! 6. [`access_log`] - one log line per handled request
//!
//! [`tracing`] wraps all of them.

pub mod access_log;
pub mod client;
pub mod fingerprint;
pub mod honeypot;
pub mod rate_limit;
pub mod security_headers;
pub mod tarpit;
pub mod tracing;
