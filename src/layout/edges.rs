//! Artist to genre connections.

use crate::graph::{distance, Connection, Position};

/// Connections for one placed artist.
///
/// The primary connection is always emitted. A secondary genre is connected
/// only when its node lies closer than `max_distance`.
pub fn artist_connections<'a>(
    artist: Position,
    primary: Position,
    secondary: impl IntoIterator<Item = &'a Position>,
    max_distance: f64,
) -> Vec<Connection> {
    let mut connections = vec![Connection::artist_genre(artist, primary)];
    connections.extend(
        secondary
            .into_iter()
            .filter(|genre| distance(&artist, genre) < max_distance)
            .map(|genre| Connection::artist_genre(artist, *genre)),
    );
    connections
}
