//! Bridge genre placement between the main clusters they connect.

use super::{ClusterPosition, GenrePositions};
use crate::artist::Artist;
use crate::classify::{connecting_artists, GenreClassification, GenreRole};
use crate::config::LayoutConfig;
use crate::graph::{centroid, Position};
use rand::Rng;
use tracing::debug;

/// Place each bridge genre at the centroid of the main clusters of its
/// connecting artists, plus jitter.
///
/// The centroid counts a main genre once per connecting artist carrying it,
/// so heavily shared clusters pull harder. Bridges with too few connecting
/// artists are skipped.
pub fn place_bridge_genres(
    artists: &[Artist],
    classification: &GenreClassification,
    positions: &GenrePositions,
    config: &LayoutConfig,
    rng: &mut impl Rng,
) -> Vec<ClusterPosition> {
    let main = classification.main_set();
    let mut placed = Vec::new();

    for genre in &classification.bridge {
        let connected: Vec<&Artist> = connecting_artists(artists, genre, main).collect();
        if connected.len() < config.bridge_min_connecting {
            debug!(genre = genre.as_str(), connected = connected.len(), "skipping bridge genre");
            continue;
        }

        let anchors: Vec<Position> = connected
            .iter()
            .flat_map(|artist| artist.genres.iter())
            .filter(|g| main.contains(*g))
            .filter_map(|g| positions.get(g).copied())
            .collect();

        let Some(center) = centroid(&anchors) else {
            continue;
        };

        let jitter = &config.bridge_jitter;
        let position = [
            center[0] + (rng.gen::<f64>() - 0.5) * 2.0 * jitter[0],
            center[1] + (rng.gen::<f64>() - 0.5) * 2.0 * jitter[1],
            center[2] + (rng.gen::<f64>() - 0.5) * 2.0 * jitter[2],
        ];

        placed.push(ClusterPosition {
            genre: genre.clone(),
            position,
            role: GenreRole::Bridge,
        });
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn setup() -> (Vec<Artist>, GenreClassification, GenrePositions) {
        let artists = vec![
            Artist::new("1", "1", &["rock", "shoegaze"]),
            Artist::new("2", "2", &["pop", "shoegaze"]),
            Artist::new("3", "3", &["rock", "pop", "shoegaze"]),
            Artist::new("4", "4", &["rock", "lofi"]),
        ];
        let classification = GenreClassification::new(
            vec!["rock".into(), "pop".into()],
            vec!["shoegaze".into(), "lofi".into()],
        );
        let mut positions = GenrePositions::default();
        positions.insert("rock", [0.0, 0.0, 0.0]);
        positions.insert("pop", [40.0, 8.0, -20.0]);
        (artists, classification, positions)
    }

    #[test]
    fn bridge_sits_at_weighted_centroid_with_jitter() {
        let (artists, classification, positions) = setup();
        // Constant 0.5 draws cancel the jitter
        let mut rng = StepRng::new(1 << 63, 0);
        let placed = place_bridge_genres(
            &artists,
            &classification,
            &positions,
            &LayoutConfig::default(),
            &mut rng,
        );

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].genre, "shoegaze");
        assert_eq!(placed[0].role, GenreRole::Bridge);
        // rock, pop, rock, pop
        assert_eq!(placed[0].position, [20.0, 4.0, -10.0]);
    }

    #[test]
    fn jitter_is_bounded() {
        let (artists, classification, positions) = setup();
        let mut rng = StepRng::new(0, 0);
        let placed = place_bridge_genres(
            &artists,
            &classification,
            &positions,
            &LayoutConfig::default(),
            &mut rng,
        );
        assert_eq!(placed[0].position, [20.0 - 7.5, 4.0 - 6.0, -10.0 - 7.5]);
    }

    #[test]
    fn bridge_with_one_connecting_artist_is_skipped() {
        let (artists, classification, positions) = setup();
        let mut rng = StepRng::new(0, 0);
        let placed = place_bridge_genres(
            &artists,
            &classification,
            &positions,
            &LayoutConfig::default(),
            &mut rng,
        );
        assert!(placed.iter().all(|p| p.genre != "lofi"));
    }
}
