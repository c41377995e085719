//! Jukebox - a listener's music taste as a 3D constellation.
//!
//! Top artists from several listening windows, expanded with related
//! artists, are reduced to genre statistics and laid out as genre anchors
//! surrounded by spiralling artists, ready for a 3D renderer.

pub mod aggregate;
pub mod artist;
pub mod classify;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod source;
pub mod stats;

pub use aggregate::ListenerArtists;
pub use artist::Artist;
pub use config::JukeboxConfig;
pub use error::LayoutError;
pub use graph::{Connection, Graph, Node};
pub use layout::LayoutEngine;

use rand::SeedableRng;

/// Aggregate a listener's artists and lay them out.
///
/// Without an explicit seed the seed is derived from the artists, so the
/// same input always yields the same graph.
pub fn build_graph(
    listener: &ListenerArtists,
    config: &config::LayoutConfig,
    seed: Option<u64>,
) -> error::Result<Graph> {
    let artists = listener.aggregate();
    let seed = seed.unwrap_or_else(|| stats::input_seed(&artists));
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    LayoutEngine::new(config.clone()).layout(&artists, &mut rng)
}
