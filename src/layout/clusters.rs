//! Main genre placement and artist-to-cluster assignment.

use super::{ClusterPosition, GenrePositions};
use crate::artist::Artist;
use crate::classify::{GenreClassification, GenreRole};
use crate::config::{LayoutConfig, PlacementPolicy};
use crate::error::{LayoutError, Result};
use crate::graph::{distance, Position};
use crate::stats::GenreStats;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, warn};

/// An artist assigned to a cluster, with its relevant genres in rank order.
#[derive(Debug, Clone)]
pub struct ClusterMember<'a> {
    pub artist: &'a Artist,
    pub genres: Vec<&'a str>,
}

/// A main genre anchor and the artists whose primary genre it is.
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    pub genre: &'a str,
    pub position: Position,
    pub members: Vec<ClusterMember<'a>>,
}

/// Uniform point in the box centred on the origin.
fn sample_in_box(half_extents: &[f64; 3], rng: &mut impl Rng) -> Position {
    [
        (rng.gen::<f64>() - 0.5) * 2.0 * half_extents[0],
        (rng.gen::<f64>() - 0.5) * 2.0 * half_extents[1],
        (rng.gen::<f64>() - 0.5) * 2.0 * half_extents[2],
    ]
}

/// Rejection-sample a point at least `min_cluster_distance` from every
/// placed center, giving up after `max_placement_attempts` draws.
fn find_position(
    genre: &str,
    placed: &[ClusterPosition],
    config: &LayoutConfig,
    rng: &mut impl Rng,
) -> Result<Position> {
    let attempts = config.max_placement_attempts.max(1);
    let mut best: Option<(Position, f64)> = None;

    for _ in 0..attempts {
        let candidate = sample_in_box(&config.cluster_half_extents, rng);
        let nearest = placed
            .iter()
            .map(|p| distance(&p.position, &candidate))
            .fold(f64::INFINITY, f64::min);

        if nearest >= config.min_cluster_distance {
            return Ok(candidate);
        }
        if best.map_or(true, |(_, d)| nearest > d) {
            best = Some((candidate, nearest));
        }
    }

    match (config.placement_policy, best) {
        (PlacementPolicy::BestEffort, Some((position, nearest))) => {
            warn!(
                genre,
                attempts,
                nearest,
                "placement exhausted, keeping best candidate"
            );
            Ok(position)
        }
        _ => Err(LayoutError::PlacementExhausted {
            genre: genre.to_string(),
            attempts,
        }),
    }
}

/// Place every main genre, in rank order.
pub fn place_main_genres(
    genres: &[String],
    config: &LayoutConfig,
    rng: &mut impl Rng,
) -> Result<Vec<ClusterPosition>> {
    let mut placed: Vec<ClusterPosition> = Vec::with_capacity(genres.len());
    for genre in genres {
        let position = find_position(genre, &placed, config, rng)?;
        placed.push(ClusterPosition {
            genre: genre.clone(),
            position,
            role: GenreRole::Main,
        });
    }
    Ok(placed)
}

/// Assign each artist to the cluster of its primary genre.
///
/// The primary genre is the first main genre among the artist's relevant
/// genres, or the first relevant genre when none is main. Artists whose
/// primary genre has no cluster (no relevant genres, or only bridge
/// genres) are left out of the graph.
pub fn assign_artists<'a>(
    artists: &'a [Artist],
    stats: &GenreStats,
    classification: &'a GenreClassification,
    positions: &GenrePositions,
    max_genres_per_artist: usize,
) -> Vec<Cluster<'a>> {
    let mut clusters: Vec<Cluster<'a>> = classification
        .main
        .iter()
        .filter_map(|genre| {
            positions.get(genre).map(|&position| Cluster {
                genre: genre.as_str(),
                position,
                members: Vec::new(),
            })
        })
        .collect();
    let index: HashMap<&str, usize> = clusters
        .iter()
        .enumerate()
        .map(|(i, c)| (c.genre, i))
        .collect();

    let mut unassigned = 0usize;
    for artist in artists {
        let genres = classification.relevant_genres(artist, stats, max_genres_per_artist);
        let primary = genres
            .iter()
            .copied()
            .find(|g| classification.is_main(g))
            .or_else(|| genres.first().copied());

        match primary.and_then(|g| index.get(g)) {
            Some(&i) => clusters[i].members.push(ClusterMember { artist, genres }),
            None => unassigned += 1,
        }
    }

    debug!(
        clusters = clusters.len(),
        unassigned, "assigned artists to clusters"
    );
    clusters
}
