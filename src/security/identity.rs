//! Client identity derivation.
//!
//! A [`ClientIdentity`] is an opaque bucketing key: the keyed digest of the
//! client address as reported by the request. Proxy headers are taken at face
//! value, so any client can pick its own identity by sending them. The key is
//! good enough to group traffic for rate limiting and abuse heuristics; it is
//! not a credential and must never be used for access decisions.

use std::fmt;
use std::net::IpAddr;

use axum::http::{HeaderMap, HeaderName};
use axum::http::header::{ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Headers consulted for the client address, highest priority first.
pub const PROXY_HEADERS: [&str; 9] = [
    "x-vercel-forwarded-for",
    "x-forwarded-for",
    "x-real-ip",
    "cf-connecting-ip",
    "x-cluster-client-ip",
    "x-client-ip",
    "x-forwarded",
    "forwarded-for",
    "forwarded",
];

/// Address used when neither headers nor the transport provide one.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Length of identities and fingerprints in log lines.
pub const LOG_PREFIX_LEN: usize = 8;

/// Opaque, one-way client key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for log lines.
    pub fn short(&self) -> &str {
        truncate(&self.0, LOG_PREFIX_LEN)
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...", self.short())
    }
}

/// Digest of the client's header profile, attached to requests for
/// anomaly logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFingerprint(String);

impl RequestFingerprint {
    /// SHA-256 over user agent, accept-language, accept-encoding and the
    /// resolved address. Missing headers count as `"unknown"`.
    pub fn from_headers(headers: &HeaderMap, client_ip: &str) -> Self {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or(UNKNOWN_CLIENT)
        };

        let data = format!(
            "{}|{}|{}|{}",
            header(USER_AGENT),
            header(ACCEPT_LANGUAGE),
            header(ACCEPT_ENCODING),
            client_ip
        );

        Self(hex::encode(Sha256::digest(data.as_bytes())))
    }

    pub fn short(&self) -> &str {
        truncate(&self.0, LOG_PREFIX_LEN)
    }
}

/// Resolves the client address from proxy headers, then the peer address.
///
/// The first header in [`PROXY_HEADERS`] with a non-empty leading
/// comma-separated token wins. Never fails.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    for name in PROXY_HEADERS {
        let token = headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|t| !t.is_empty());

        if let Some(ip) = token {
            return ip.to_string();
        }
    }

    peer.map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Derives [`ClientIdentity`] values with a server-side secret.
pub struct IdentityHasher {
    secret: Vec<u8>,
    prefix_len: usize,
}

impl IdentityHasher {
    /// Creates a hasher keyed by `secret`, keeping `prefix_len` hex characters
    /// of each digest (at most 64).
    pub fn new(secret: impl Into<Vec<u8>>, prefix_len: usize) -> Self {
        Self {
            secret: secret.into(),
            prefix_len: prefix_len.min(64),
        }
    }

    /// HMAC-SHA256 of `client_ip`, hex-encoded and truncated.
    pub fn identify(&self, client_ip: &str) -> ClientIdentity {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(client_ip.as_bytes());
        let digest = hex::encode(mac.finalize().into_bytes());

        ClientIdentity(digest[..self.prefix_len].to_string())
    }

    /// Resolves the client address and hashes it.
    pub fn identify_request(&self, headers: &HeaderMap, peer: Option<IpAddr>) -> ClientIdentity {
        self.identify(&resolve_client_ip(headers, peer))
    }
}

fn truncate(s: &str, len: usize) -> &str {
    &s[..len.min(s.len())]
}
