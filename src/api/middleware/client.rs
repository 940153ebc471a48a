//! Per-request client resolution shared by the admission middleware.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};

use crate::security::ClientIdentity;
use crate::security::identity::resolve_client_ip;
use crate::state::AppState;

/// Resolved client of the current request, cached in request extensions.
///
/// `ip` stays inside the process; only `identity` may appear in logs.
#[derive(Debug, Clone)]
pub struct ResolvedClient {
    pub ip: String,
    pub identity: ClientIdentity,
}

/// Returns the request's client, resolving and caching it on first use.
///
/// The peer address comes from `ConnectInfo<SocketAddr>` when the server was
/// started with connect info; otherwise only proxy headers are consulted.
pub fn resolve(state: &AppState, req: &mut Request) -> ResolvedClient {
    if let Some(client) = req.extensions().get::<ResolvedClient>() {
        return client.clone();
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let ip = resolve_client_ip(req.headers(), peer);
    let identity = state.identity_hasher.identify(&ip);
    let client = ResolvedClient { ip, identity };

    req.extensions_mut().insert(client.clone());
    client
}
