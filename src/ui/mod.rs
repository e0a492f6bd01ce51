//! # UI Module
//!
//! The single search-and-render view.
//!
//! ## Components
//!
//! - [`App`] - view state (query, result, in-flight flag, error) and key handling
//! - [`SearchDispatcher`] - runs lookups in the background and feeds results back
//! - [`mod@render`] - drawing functions
//!
//! ## Layout
//!
//! ```text
//! ╭──────────────────────────────────────────╮
//! │              Search Pokémon              │
//! │ ╭────────────────────────────╮╭────────╮ │
//! │ │ pikachu                    ││ Search │ │
//! │ ╰────────────────────────────╯╰────────╯ │
//! │          Loading... / error text         │
//! │                 Pikachu                  │
//! │                 (sprite)                 │
//! │               [ Electric ]               │
//! │                 Moves:                   │
//! │               Mega-punch ...             │
//! │  [Enter] Search  [Ctrl+U] Clear  [Esc]   │
//! ╰──────────────────────────────────────────╯
//! ```

pub mod app;
pub mod config;
pub mod render;
pub mod search;
pub mod theme;

pub use app::App;
pub use render::render;
pub use search::SearchDispatcher;
