#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use charity_directory::config::Config;
use charity_directory::routes::build_router;
use charity_directory::security::{Clock, DeploymentMode, ManualClock};
use charity_directory::state::AppState;
use tower::Layer;

/// Configuration with small limits and millisecond delays.
pub fn test_config() -> Config {
    Config {
        ip_hash_secret: "integration-test-secret".to_string(),
        rate_limit_max: 1000,
        burst_threshold: 1000,
        tarpit_min_ms: 1,
        tarpit_max_ms: 2,
        honeypot_delay_ms: 5,
        ..Config::default()
    }
}

pub fn create_test_state(config: &Config) -> (AppState, ManualClock) {
    let clock = ManualClock::default();
    let shared: Arc<dyn Clock> = Arc::new(clock.clone());
    let state = AppState::from_config(config, shared).unwrap();
    (state, clock)
}

/// Full router, with every request arriving from `127.0.0.1:12345` unless a
/// proxy header says otherwise.
pub fn create_test_server(config: &Config) -> (TestServer, AppState, ManualClock) {
    let (state, clock) = create_test_state(config);
    let app = build_router(state.clone()).layer(MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();
    (server, state, clock)
}

pub fn default_server() -> TestServer {
    create_test_server(&test_config()).0
}

pub fn development_config() -> Config {
    Config {
        mode: DeploymentMode::Development,
        ..test_config()
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
