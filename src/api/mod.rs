//! # PokéAPI Client
//!
//! The one remote call this application makes, plus the subset of the
//! response it cares about.
//!
//! ## Endpoint
//!
//! ```text
//! GET {base}/pokemon/{lowercased-name}
//! ```
//!
//! The default base is [`DEFAULT_BASE_URL`]. Any non-2xx answer is reported as
//! [`LookupError::NotFound`]; the status itself is not kept.
//!
//! ## Response subset
//!
//! Only `name`, `sprites.front_default`, `types[].type.name` and
//! `moves[].move.name` are read. Everything else in the body is ignored.

pub mod error;
pub mod sprite;

pub use error::{LookupError, NOT_FOUND_MESSAGE};
pub use sprite::{SpriteArt, MAX_SPRITE_COLUMNS};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Public PokéAPI v2 root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// A creature as returned by `/pokemon/{name}`, trimmed to the fields we render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub name: String,
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    /// `null` for some alternate forms.
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub kind: NamedResource,
}

/// PokéAPI's `{ "name": ..., "url": ... }` reference; only the name is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

impl CreatureRecord {
    pub fn sprite_url(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }

    /// Type labels in the order the API listed them.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|slot| slot.kind.name.as_str())
    }

    /// Move labels in the order the API listed them.
    pub fn move_names(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(|slot| slot.kind.name.as_str())
    }
}

/// Thin wrapper over a shared `reqwest::Client` pointed at one API base.
///
/// Cloning is cheap; every spawned lookup task gets its own clone.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pokedex-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Build the lookup URL for an already lower-cased key.
    pub fn endpoint(&self, key: &str) -> String {
        format!("{}/pokemon/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Look up one creature by its path key.
    ///
    /// The key is used as given; lower-casing happens when the search is
    /// submitted.
    pub async fn lookup(&self, key: &str) -> Result<CreatureRecord, LookupError> {
        let url = self.endpoint(key);
        debug!(%url, "requesting creature");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "lookup answered with non-success status");
            return Err(LookupError::NotFound);
        }

        let body = response.bytes().await?;
        let record = serde_json::from_slice(&body)?;
        Ok(record)
    }

    /// Download and decode a sprite PNG into terminal cells.
    pub async fn fetch_sprite(&self, url: &str) -> Result<SpriteArt, LookupError> {
        debug!(%url, "requesting sprite");
        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        sprite::decode(&bytes, MAX_SPRITE_COLUMNS)
    }
}
