//! Failure injection tests against a bound proxy.

use std::net::SocketAddr;
use std::time::Duration;

use roblox_proxy::config::ProxyConfig;
use roblox_proxy::error::EXHAUSTED_MESSAGE;
use roblox_proxy::http::HttpServer;
use roblox_proxy::lifecycle::Shutdown;

mod common;
use common::{test_config, MockUpstream};

async fn start(server: HttpServer, shutdown: &Shutdown) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    addr
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_unreachable_upstream_returns_synthetic_500() {
    let mut config = ProxyConfig::default();
    // Reserved TLD: name resolution always fails
    config.upstream.scheme = "http".into();
    config.upstream.domain = "invalid".into();
    config.timeouts.request_secs = 2;
    config.retries.max_retries = 2;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let addr = start(server, &shutdown).await;

    let res = client()
        .get(format!("http://{addr}/users/v1/users/1"))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), EXHAUSTED_MESSAGE);

    shutdown.trigger();
}

#[tokio::test]
async fn test_scenario_users_lookup_is_cached() {
    let upstream = MockUpstream::responding(200, "{\"id\":1}");
    let shutdown = Shutdown::new();
    let server = HttpServer::with_transport(test_config(), upstream.clone());
    let addr = start(server, &shutdown).await;

    let client = client();
    for _ in 0..3 {
        let res = client
            .get(format!("http://{addr}/users/v1/users/1"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["content-type"], "application/json");

        let json: serde_json::Value = res.json().await.unwrap();
        assert_eq!(json["id"], 1);
    }

    assert_eq!(upstream.calls(), 1);
    let sent = &upstream.requests()[0];
    assert_eq!(sent.url.as_str(), "https://users.roblox.com/v1/users/1");
    assert!(sent.headers.get("host").is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests_share_cache() {
    let upstream = MockUpstream::responding(200, "{\"data\":[]}");
    let shutdown = Shutdown::new();
    let server = HttpServer::with_transport(test_config(), upstream.clone());
    let addr = start(server, &shutdown).await;

    let client = client();
    // Warm the entry, then fan out
    client
        .get(format!("http://{addr}/games/v1/games/list"))
        .send()
        .await
        .unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let client = client.clone();
            let url = format!("http://{addr}/games/v1/games/list");
            tokio::spawn(async move { client.get(&url).send().await.unwrap().status() })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }
    assert_eq!(upstream.calls(), 1);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(50)).await;
}
