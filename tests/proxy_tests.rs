//! Development proxy tests
//!
//! Puts the proxy in front of the local fake API and talks to it over HTTP.

mod support;

use pokedex::api::{PokeApiClient, NOT_FOUND_MESSAGE};
use pokedex::proxy::{self, ProxyConfig};
use std::net::SocketAddr;
use support::spawn_fake_api;

async fn spawn_proxy(target: String) -> SocketAddr {
    let config = ProxyConfig {
        listen: "127.0.0.1:0".parse().expect("addr"),
        target,
        prefix: proxy::DEFAULT_PREFIX.to_string(),
    };
    let app = proxy::router(&config).expect("router");

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve proxy");
    });
    addr
}

#[tokio::test]
async fn test_proxy_strips_prefix_and_forwards() {
    let api = spawn_fake_api().await;
    let proxy_addr = spawn_proxy(format!("http://{}", api.addr)).await;

    let response = reqwest::get(format!("http://{proxy_addr}/api/api/v2/pokemon/pikachu"))
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let body: serde_json::Value =
        serde_json::from_slice(&response.bytes().await.expect("body")).expect("json");
    assert_eq!(body["name"], "pikachu");
}

#[tokio::test]
async fn test_proxy_passes_upstream_status_through() {
    let api = spawn_fake_api().await;
    let proxy_addr = spawn_proxy(format!("http://{}", api.addr)).await;

    let response = reqwest::get(format!("http://{proxy_addr}/api/api/v2/pokemon/zzzzz"))
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_proxy_rejects_paths_outside_prefix() {
    let api = spawn_fake_api().await;
    let proxy_addr = spawn_proxy(format!("http://{}", api.addr)).await;

    for path in ["/api/v2/pokemon/pikachu", "/apix/v2/pokemon/pikachu"] {
        let response = reqwest::get(format!("http://{proxy_addr}{path}"))
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 404, "path {path}");
    }
}

#[tokio::test]
async fn test_proxy_unreachable_target_is_bad_gateway() {
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let closed_addr = closed.local_addr().expect("addr");
    drop(closed);

    let proxy_addr = spawn_proxy(format!("http://{closed_addr}")).await;
    let response = reqwest::get(format!("http://{proxy_addr}/api/anything"))
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn test_client_through_proxy() {
    let api = spawn_fake_api().await;
    let proxy_addr = spawn_proxy(format!("http://{}", api.addr)).await;
    let client = PokeApiClient::new(format!("http://{proxy_addr}/api/api/v2")).expect("client");

    let record = client.lookup("ditto").await.expect("lookup");
    assert_eq!(record.name, "ditto");

    let err = client.lookup("missingno").await.expect_err("missing");
    assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_proxy_relays_upstream_redirects() {
    let upstream = axum::Router::new().route(
        "/old",
        axum::routing::get(|| async { axum::response::Redirect::temporary("/new") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let upstream_addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.expect("serve upstream");
    });

    let proxy_addr = spawn_proxy(format!("http://{upstream_addr}")).await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client");

    let response = client
        .get(format!("http://{proxy_addr}/api/old"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 307);
    assert_eq!(
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/new")
    );
}
