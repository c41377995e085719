//! Spatial layout of genres and artists.
//!
//! The layout is built in one pass over the deduplicated artist set:
//! - Main genres are spread through a box by bounded rejection sampling
//! - Artists are assigned to the cluster of their primary genre
//! - Bridge genres sit near the centroid of the main genres they link
//! - Artists spiral around their cluster, pulled toward secondary genres
//!
//! Every random draw comes from the caller's generator, so a layout is a
//! pure function of the artists, the configuration and the seed.

pub mod bridges;
pub mod clusters;
pub mod edges;
pub mod spiral;

use crate::artist::Artist;
use crate::classify::{GenreClassification, GenreRole};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::graph::{genre_node_id, Graph, Node, Position};
use crate::stats::GenreStats;
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

/// Positions resolved so far, keyed by genre label.
#[derive(Debug, Clone, Default)]
pub struct GenrePositions {
    positions: HashMap<String, Position>,
}

impl GenrePositions {
    pub fn insert(&mut self, genre: &str, position: Position) {
        self.positions.insert(genre.to_string(), position);
    }

    pub fn get(&self, genre: &str) -> Option<&Position> {
        self.positions.get(genre)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A placed main or bridge genre.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPosition {
    pub genre: String,
    pub position: Position,
    pub role: GenreRole,
}

impl ClusterPosition {
    fn to_node(&self) -> Node {
        Node::Genre {
            id: genre_node_id(&self.genre),
            name: self.genre.clone(),
            position: self.position,
            is_main_genre: self.role == GenreRole::Main,
        }
    }
}

pub struct LayoutEngine {
    pub config: LayoutConfig,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out a deduplicated artist set.
    ///
    /// Empty input, or input where no genre qualifies, yields an empty graph.
    pub fn layout(&self, artists: &[Artist], rng: &mut impl Rng) -> Result<Graph> {
        let stats = GenreStats::from_artists(artists);
        let classification = GenreClassification::classify(artists, &stats, &self.config);
        self.layout_classified(artists, &stats, &classification, rng)
    }

    /// Lay out with precomputed statistics and classification.
    pub fn layout_classified(
        &self,
        artists: &[Artist],
        stats: &GenreStats,
        classification: &GenreClassification,
        rng: &mut impl Rng,
    ) -> Result<Graph> {
        let mut graph = Graph::default();
        let mut positions = GenrePositions::default();

        let mains = clusters::place_main_genres(&classification.main, &self.config, rng)?;
        for placed in &mains {
            positions.insert(&placed.genre, placed.position);
            graph.nodes.push(placed.to_node());
        }

        let assigned = clusters::assign_artists(
            artists,
            stats,
            classification,
            &positions,
            self.config.max_genres_per_artist,
        );

        let linked =
            bridges::place_bridge_genres(artists, classification, &positions, &self.config, rng);
        for placed in &linked {
            positions.insert(&placed.genre, placed.position);
            graph.nodes.push(placed.to_node());
        }

        for cluster in &assigned {
            spiral::place_cluster(cluster, &positions, &self.config, rng, &mut graph);
        }

        debug!(
            main = mains.len(),
            bridge = linked.len(),
            nodes = graph.nodes.len(),
            connections = graph.connections.len(),
            "layout complete"
        );

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_input_gives_empty_graph() {
        let mut rng = StdRng::seed_from_u64(1);
        let graph = LayoutEngine::default().layout(&[], &mut rng).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn genreless_artists_give_empty_graph() {
        let artists = vec![Artist::new("1", "1", &[]), Artist::new("2", "2", &["solo"])];
        let mut rng = StdRng::seed_from_u64(1);
        let graph = LayoutEngine::default().layout(&artists, &mut rng).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn main_nodes_precede_bridge_nodes_precede_artists() {
        let artists = vec![
            Artist::new("1", "1", &["rock", "shoegaze"]),
            Artist::new("2", "2", &["rock", "shoegaze"]),
            Artist::new("3", "3", &["rock"]),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let graph = LayoutEngine::default().layout(&artists, &mut rng).unwrap();

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["genre-rock", "genre-shoegaze", "1", "2", "3"]);
        assert!(matches!(
            graph.nodes[1],
            Node::Genre {
                is_main_genre: false,
                ..
            }
        ));
    }
}
