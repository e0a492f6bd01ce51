//! In-process stand-in for the PokéAPI, bound to an ephemeral local port.
//!
//! Routes:
//! - `GET /api/v2/pokemon/pikachu`  - 200, seven moves, two types
//! - `GET /api/v2/pokemon/ditto`    - 200, one move, null sprite
//! - `GET /api/v2/pokemon/slowpoke` - 200 after a delay
//! - `GET /api/v2/pokemon/garbled`  - 200 with a body that is not JSON
//! - `GET /api/v2/pokemon/{other}`  - 404
//! - `GET /sprites/{file}`          - a 4x4 opaque PNG
#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::io::Cursor;
use std::net::SocketAddr;
use std::time::Duration;

pub const SLOW_DELAY: Duration = Duration::from_millis(300);

pub struct FakeApi {
    pub addr: SocketAddr,
}

impl FakeApi {
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v2", self.addr)
    }

    pub fn sprite_url(&self, file: &str) -> String {
        format!("http://{}/sprites/{}", self.addr, file)
    }
}

pub async fn spawn_fake_api() -> FakeApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    let app = Router::new()
        .route("/api/v2/pokemon/{name}", get(pokemon))
        .route("/sprites/{file}", get(sprite))
        .with_state(addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });

    FakeApi { addr }
}

/// A loopback address nobody listens on.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/api/v2", addr)
}

fn named(names: &[&str], key: &str) -> Vec<Value> {
    names
        .iter()
        .map(|name| json!({ key: { "name": name, "url": "https://example.test/" } }))
        .collect()
}

pub fn pikachu(addr: SocketAddr) -> Value {
    json!({
        "id": 25,
        "name": "pikachu",
        "base_experience": 112,
        "sprites": { "front_default": format!("http://{}/sprites/25.png", addr) },
        "types": named(&["electric", "fairy"], "type"),
        "moves": named(
            &[
                "mega-punch",
                "pay-day",
                "thunder-punch",
                "slam",
                "double-kick",
                "mega-kick",
                "headbutt",
            ],
            "move",
        ),
    })
}

async fn pokemon(State(addr): State<SocketAddr>, Path(name): Path<String>) -> Response {
    match name.as_str() {
        "pikachu" => Json(pikachu(addr)).into_response(),
        "ditto" => Json(json!({
            "name": "ditto",
            "sprites": { "front_default": null },
            "types": named(&["normal"], "type"),
            "moves": named(&["transform"], "move"),
        }))
        .into_response(),
        "slowpoke" => {
            tokio::time::sleep(SLOW_DELAY).await;
            Json(json!({
                "name": "slowpoke",
                "sprites": { "front_default": null },
                "types": named(&["water", "psychic"], "type"),
                "moves": named(&["curse"], "move"),
            }))
            .into_response()
        }
        "garbled" => (
            [(header::CONTENT_TYPE, "application/json")],
            "<html>oops</html>",
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

pub fn sprite_png() -> Vec<u8> {
    let image = RgbaImage::from_pixel(4, 4, Rgba([250, 210, 50, 255]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

async fn sprite(Path(_file): Path<String>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], sprite_png()).into_response()
}
