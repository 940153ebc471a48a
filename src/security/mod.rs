//! Request admission: client identity, rate limiting and abuse heuristics.
//!
//! These components are transport-agnostic. The HTTP wiring lives in
//! [`crate::api::middleware`].
//!
//! # Modules
//!
//! - [`identity`] - Client address resolution and keyed identity digests
//! - [`rate_limiter`] - Fixed-window limiter with exponential penalty
//! - [`anomaly`] - Honeypot and burst flagging
//! - [`honeypot`] - Scanner path matching
//! - [`tarpit`] - Delay policy for suspicious clients
//! - [`headers`] - Security response headers per deployment mode
//! - [`sweeper`] - Background eviction of expired state
//! - [`clock`] - Injectable time source

pub mod anomaly;
pub mod clock;
pub mod headers;
pub mod honeypot;
pub mod identity;
pub mod rate_limiter;
pub mod sweeper;
pub mod tarpit;

pub use anomaly::{AnomalyFlagger, AnomalyPolicy};
pub use clock::{Clock, ManualClock, SystemClock};
pub use headers::{DeploymentMode, SecurityHeaders};
pub use honeypot::HoneypotMatcher;
pub use identity::{ClientIdentity, IdentityHasher, RequestFingerprint};
pub use rate_limiter::{Admission, RateLimitPolicy, RateLimiter, WindowState};
pub use tarpit::TarpitPolicy;
