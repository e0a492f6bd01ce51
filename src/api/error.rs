use thiserror::Error;

/// Message shown whenever the lookup endpoint answers with a non-success status.
pub const NOT_FOUND_MESSAGE: &str = "Pokémon not found.";

/// Everything that can go wrong while looking a creature up.
///
/// The `Display` text of each variant is exactly what the search view shows,
/// so transport and parse failures surface their own message while every
/// non-success status collapses into [`NOT_FOUND_MESSAGE`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Sprite(#[from] image::ImageError),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound)
    }
}
