//! Errors surfaced by the layout pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// The bounded rejection sampler could not space a main genre cluster.
    #[error("placement exhausted for genre '{genre}' after {attempts} attempts")]
    PlacementExhausted { genre: String, attempts: usize },

    #[error("artist source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
