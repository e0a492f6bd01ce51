//! Pokédex TUI - look up a Pokémon by name and see its sprite, types and moves
//!
//! This library provides the lookup client, the development proxy, and the
//! terminal view that ties them together.

pub mod api;
pub mod logging;
pub mod proxy;
pub mod ui;
