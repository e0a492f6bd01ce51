//! # Development Proxy
//!
//! A small forwarding server for local development: any request whose path
//! sits under the prefix (default `/api`) is replayed against the target host
//! with the prefix stripped, so a client can talk to one local origin.
//!
//! ```text
//! GET http://127.0.0.1:5173/api/api/v2/pokemon/pikachu
//!   -> GET https://pokeapi.co/api/v2/pokemon/pikachu
//! ```
//!
//! The `Host` header is rewritten to the target's. Paths outside the prefix
//! answer `404`; an unreachable target answers `502`.

use anyhow::{Context, Result};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:5173";
pub const DEFAULT_TARGET: &str = "https://pokeapi.co";
pub const DEFAULT_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub listen: SocketAddr,
    pub target: String,
    pub prefix: String,
}

/// Headers that describe a single hop and must not be replayed.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection" | "host" | "content-length" | "transfer-encoding" | "te" | "upgrade"
    )
}

#[derive(Clone)]
struct ProxyState {
    client: reqwest::Client,
    target: String,
    prefix: String,
}

/// Strip `prefix` from `path`, matching whole segments only.
///
/// Returns `None` when the path is outside the prefix. The prefix alone maps
/// to `/`.
pub fn rewrite_path(path: &str, prefix: &str) -> Option<String> {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return Some(path.to_string());
    }

    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        None
    }
}

/// Build the upstream URL for an incoming request URI.
pub fn upstream_url(target: &str, prefix: &str, uri: &Uri) -> Option<String> {
    let path = rewrite_path(uri.path(), prefix)?;
    let mut url = format!("{}{}", target.trim_end_matches('/'), path);
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }
    Some(url)
}

pub fn router(config: &ProxyConfig) -> Result<Router> {
    // Upstream redirects go back to the caller untouched.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .context("Failed to build proxy HTTP client")?;

    let state = ProxyState {
        client,
        target: config.target.clone(),
        prefix: config.prefix.clone(),
    };

    Ok(Router::new().fallback(forward).with_state(state))
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: ProxyConfig) -> Result<()> {
    let app = router(&config)?;
    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind proxy on {}", config.listen))?;
    let addr = listener
        .local_addr()
        .context("Failed to read proxy address")?;

    info!(%addr, target = %config.target, prefix = %config.prefix, "proxy listening");
    axum::serve(listener, app)
        .await
        .context("Proxy server stopped unexpectedly")?;
    Ok(())
}

async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(url) = upstream_url(&state.target, &state.prefix, &uri) else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    let Ok(upstream_method) = reqwest::Method::from_bytes(method.as_str().as_bytes()) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let mut request = state.client.request(upstream_method, &url);
    for (name, value) in headers.iter() {
        if is_hop_by_hop(name) {
            continue;
        }
        request = request.header(name.as_str(), value.as_bytes());
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = match request.send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            warn!(%method, %url, error = %e, "upstream request failed");
            return (StatusCode::BAD_GATEWAY, e.to_string()).into_response();
        }
    };

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    info!(%method, path = %uri.path(), %url, %status, "forwarded");

    let mut response_headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        let Ok(name) = HeaderName::from_bytes(name.as_str().as_bytes()) else {
            continue;
        };
        if is_hop_by_hop(&name) {
            continue;
        }
        if let Ok(value) = HeaderValue::from_bytes(value.as_bytes()) {
            response_headers.append(name, value);
        }
    }

    match upstream.bytes().await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            *response.headers_mut() = response_headers;
            response
        }
        Err(e) => {
            warn!(%url, error = %e, "failed to read upstream body");
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}
