mod common;

use std::time::{Duration, Instant};

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use axum_test::TestServer;
use charity_directory::api::middleware::fingerprint;
use charity_directory::config::Config;
use charity_directory::security::RequestFingerprint;
use serde_json::Value;

const BROWSER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

fn tarpit_config() -> Config {
    Config {
        tarpit_min_ms: 400,
        tarpit_max_ms: 500,
        ..common::test_config()
    }
}

fn limited_config(limit: u32) -> Config {
    Config {
        rate_limit_max: limit,
        rate_limit_window_secs: 60,
        ..common::test_config()
    }
}

#[tokio::test]
async fn test_production_security_headers() {
    let server = common::default_server();

    let response = server.get("/charities").await;

    response.assert_status_ok();
    assert_eq!(response.header("x-frame-options"), "DENY");
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-xss-protection"), "1; mode=block");
    assert!(response.maybe_header("content-security-policy").is_some());
    assert!(response.maybe_header("strict-transport-security").is_some());
    assert_eq!(
        response.header("referrer-policy"),
        "strict-origin-when-cross-origin"
    );
    assert!(response.maybe_header("permissions-policy").is_some());
}

#[tokio::test]
async fn test_development_security_headers() {
    let (server, _, _) = common::create_test_server(&common::development_config());

    let response = server.get("/charities").await;

    assert_eq!(response.header("x-frame-options"), "DENY");
    assert!(response.maybe_header("content-security-policy").is_none());
    assert!(response.maybe_header("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_headers_on_not_found() {
    let server = common::default_server();

    let response = server.get("/nowhere").await;

    response.assert_status_not_found();
    assert_eq!(response.header("x-content-type-options"), "nosniff");
}

#[tokio::test]
async fn test_honeypot_returns_not_found_and_flags_client() {
    let (server, state, _) = common::create_test_server(&common::test_config());
    let identity = state.identity_hasher.identify("127.0.0.1");

    assert!(!state.anomaly_flagger.is_suspicious(&identity));

    let response = server.get("/wp-admin/install.php").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
    assert_eq!(response.header("x-frame-options"), "DENY");
    assert!(state.anomaly_flagger.is_suspicious(&identity));
}

#[tokio::test]
async fn test_honeypot_waits_before_answering() {
    let config = Config {
        honeypot_delay_ms: 300,
        ..common::test_config()
    };
    let (server, _, _) = common::create_test_server(&config);

    let started = Instant::now();
    let response = server.get("/admin").await;

    response.assert_status_not_found();
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_honeypot_is_case_insensitive() {
    let (server, state, _) = common::create_test_server(&common::test_config());
    let identity = state.identity_hasher.identify("127.0.0.1");

    server.get("/PHPMyAdmin").await.assert_status_not_found();

    assert!(state.anomaly_flagger.is_suspicious(&identity));
}

#[tokio::test]
async fn test_honeypot_ignores_query_string() {
    let (server, state, _) = common::create_test_server(&common::test_config());
    let identity = state.identity_hasher.identify("127.0.0.1");

    let response = server
        .get("/charities")
        .add_query_param("next", "/admin")
        .await;

    response.assert_status_ok();
    assert!(!state.anomaly_flagger.is_suspicious(&identity));
}

#[tokio::test]
async fn test_honeypot_does_not_count_against_rate_limit() {
    let (server, _, _) = common::create_test_server(&limited_config(1));

    server.get("/.env").await.assert_status_not_found();

    server.get("/charities").await.assert_status_ok();
}

#[tokio::test]
async fn test_rate_limit_rejects_after_limit() {
    let (server, state, _) = common::create_test_server(&limited_config(3));
    let identity = state.identity_hasher.identify("127.0.0.1");

    for remaining in ["2", "1", "0"] {
        let response = server.get("/charities").await;
        response.assert_status_ok();
        assert_eq!(response.header("x-ratelimit-limit"), "3");
        assert_eq!(response.header("x-ratelimit-remaining"), remaining);
    }

    let response = server.get("/charities").await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    // first violation doubles the 60s window
    assert_eq!(response.header("retry-after"), "120");
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "rate_limited");
    assert_eq!(json["error"]["details"]["retryAfter"], 120);
    assert_eq!(response.header("x-frame-options"), "DENY");

    assert!(state.anomaly_flagger.is_suspicious(&identity));
}

#[tokio::test]
async fn test_rate_limit_penalty_grows_and_resets() {
    let (server, _, clock) = common::create_test_server(&limited_config(1));

    server.get("/charities").await.assert_status_ok();

    let first = server.get("/charities").await;
    first.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(first.header("retry-after"), "120");

    let second = server.get("/charities").await;
    assert_eq!(second.header("retry-after"), "240");

    clock.advance(Duration::from_secs(241));

    server.get("/charities").await.assert_status_ok();
}

#[tokio::test]
async fn test_rate_limit_is_per_identity() {
    let (server, _, _) = common::create_test_server(&limited_config(1));

    server
        .get("/charities")
        .add_header("x-forwarded-for", "203.0.113.7")
        .await
        .assert_status_ok();
    server
        .get("/charities")
        .add_header("x-forwarded-for", "203.0.113.7")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    server
        .get("/charities")
        .add_header("x-forwarded-for", "198.51.100.20, 10.0.0.1")
        .await
        .assert_status_ok();
    server.get("/charities").await.assert_status_ok();
}

#[tokio::test]
async fn test_zero_limit_disables_rate_limiting() {
    let (server, state, _) = common::create_test_server(&limited_config(0));

    for _ in 0..10 {
        let response = server.get("/charities").await;
        response.assert_status_ok();
        assert!(response.maybe_header("x-ratelimit-limit").is_none());
    }

    assert_eq!(state.rate_limiter.tracked(), 0);
}

#[tokio::test]
async fn test_burst_flags_client() {
    let config = Config {
        burst_threshold: 3,
        ..common::test_config()
    };
    let (server, state, _) = common::create_test_server(&config);
    let identity = state.identity_hasher.identify("127.0.0.1");

    for _ in 0..3 {
        server.get("/charities").await.assert_status_ok();
    }
    assert!(!state.anomaly_flagger.is_suspicious(&identity));

    // flagged clients are slowed down, never rejected
    server.get("/charities").await.assert_status_ok();
    assert!(state.anomaly_flagger.is_suspicious(&identity));
}

#[tokio::test]
async fn test_flagged_client_is_tarpitted() {
    let (server, state, _) = common::create_test_server(&tarpit_config());
    let identity = state.identity_hasher.identify("127.0.0.1");
    state.anomaly_flagger.flag(&identity);

    let started = Instant::now();
    let response = server
        .get("/charities")
        .add_header("user-agent", BROWSER_AGENT)
        .await;

    response.assert_status_ok();
    assert!(started.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_unflagged_browser_is_not_delayed() {
    let (server, _, _) = common::create_test_server(&tarpit_config());

    let started = Instant::now();
    let response = server
        .get("/charities")
        .add_header("user-agent", BROWSER_AGENT)
        .await;

    response.assert_status_ok();
    assert!(started.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn test_unflagged_crawler_waits_minimum() {
    let (server, _, _) = common::create_test_server(&tarpit_config());

    let started = Instant::now();
    server
        .get("/charities")
        .add_header("user-agent", "curl/8.5.0")
        .await
        .assert_status_ok();

    assert!(started.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_fingerprint_reaches_handlers() {
    let (state, _) = common::create_test_state(&common::test_config());
    let app = Router::new()
        .route(
            "/fingerprint",
            get(|Extension(fp): Extension<RequestFingerprint>| async move {
                fp.short().to_string()
            }),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            fingerprint::layer,
        ))
        .with_state(state)
        .layer(common::MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    let mut headers = HeaderMap::new();
    headers.insert("user-agent", BROWSER_AGENT.parse().unwrap());
    headers.insert("accept-language", "en-US".parse().unwrap());
    headers.insert("accept-encoding", "gzip".parse().unwrap());
    let expected = RequestFingerprint::from_headers(&headers, "127.0.0.1");

    let response = server
        .get("/fingerprint")
        .add_header("user-agent", BROWSER_AGENT)
        .add_header("accept-language", "en-US")
        .add_header("accept-encoding", "gzip")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), expected.short());
}
