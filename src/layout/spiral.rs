//! Artist placement around a cluster anchor.
//!
//! Members wind outward along a spiral in assignment order. Each artist is
//! displaced toward the centroid of its other resolved genres, then jittered:
//! - Spiral angle: `t * turns * 2π` with `t = i / n`
//! - Spiral radius: `(base + spread * r) * (1 - shrink * t)`
//! - Vertical spread proportional to the radius

use super::clusters::Cluster;
use super::edges::artist_connections;
use super::GenrePositions;
use crate::config::LayoutConfig;
use crate::graph::{centroid, Graph, Node, Position};
use rand::Rng;
use std::f64::consts::PI;

/// Place every member of `cluster` and append its nodes and connections.
pub fn place_cluster(
    cluster: &Cluster<'_>,
    positions: &GenrePositions,
    config: &LayoutConfig,
    rng: &mut impl Rng,
    graph: &mut Graph,
) {
    let anchor = cluster.position;
    let n = cluster.members.len() as f64;

    for (i, member) in cluster.members.iter().enumerate() {
        let t = i as f64 / n;
        let angle = t * PI * 2.0 * config.spiral_turns;
        let radius = (config.spiral_base_radius + rng.gen::<f64>() * config.spiral_radius_spread)
            * (1.0 - t * config.spiral_shrink);

        let secondary: Vec<Position> = member
            .genres
            .iter()
            .filter(|g| **g != cluster.genre)
            .filter_map(|g| positions.get(g).copied())
            .collect();

        let displacement = match centroid(&secondary) {
            Some(pull) => [
                (pull[0] - anchor[0]) * config.secondary_pull,
                (pull[1] - anchor[1]) * config.secondary_pull,
                (pull[2] - anchor[2]) * config.secondary_pull,
            ],
            None => [0.0; 3],
        };

        let jitter = config.artist_jitter;
        let x = anchor[0]
            + angle.cos() * radius
            + displacement[0]
            + (rng.gen::<f64>() - 0.5) * 2.0 * jitter;
        let y = anchor[1]
            + (rng.gen::<f64>() - 0.5) * radius * 2.0 * config.vertical_spread
            + displacement[1]
            + (rng.gen::<f64>() - 0.5) * 2.0 * jitter;
        let z = anchor[2]
            + angle.sin() * radius
            + displacement[2]
            + (rng.gen::<f64>() - 0.5) * 2.0 * jitter;
        let position = [x, y, z];

        graph.nodes.push(Node::Artist {
            id: member.artist.id.clone(),
            name: member.artist.name.clone(),
            position,
            image_url: member.artist.image_url().map(str::to_string),
        });
        graph.connections.extend(artist_connections(
            position,
            anchor,
            &secondary,
            config.secondary_edge_max_distance,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artist::Artist;
    use crate::layout::clusters::ClusterMember;
    use rand::rngs::mock::StepRng;

    fn half() -> StepRng {
        StepRng::new(1 << 63, 0)
    }

    #[test]
    fn first_member_sits_on_the_spiral_start() {
        let artist = Artist::new("a", "A", &["rock"]).with_image("https://img/a");
        let cluster = Cluster {
            genre: "rock",
            position: [10.0, 0.0, 0.0],
            members: vec![ClusterMember {
                artist: &artist,
                genres: vec!["rock"],
            }],
        };
        let mut graph = Graph::default();
        place_cluster(
            &cluster,
            &GenrePositions::default(),
            &LayoutConfig::default(),
            &mut half(),
            &mut graph,
        );

        // t = 0, radius = 5 + 0.5 * 4, no jitter
        match &graph.nodes[0] {
            Node::Artist {
                id,
                position,
                image_url,
                ..
            } => {
                assert_eq!(id, "a");
                assert_eq!(*position, [17.0, 0.0, 0.0]);
                assert_eq!(image_url.as_deref(), Some("https://img/a"));
            }
            other => panic!("unexpected node {:?}", other),
        }
        assert_eq!(graph.connections.len(), 1);
        assert_eq!(graph.connections[0].end, [10.0, 0.0, 0.0]);
    }

    #[test]
    fn secondary_genres_pull_and_connect() {
        let artist = Artist::new("a", "A", &["rock", "indie", "unplaced"]);
        let cluster = Cluster {
            genre: "rock",
            position: [0.0, 0.0, 0.0],
            members: vec![ClusterMember {
                artist: &artist,
                genres: vec!["rock", "indie", "unplaced"],
            }],
        };
        let mut positions = GenrePositions::default();
        positions.insert("rock", [0.0, 0.0, 0.0]);
        positions.insert("indie", [0.0, 0.0, 20.0]);

        let mut graph = Graph::default();
        place_cluster(
            &cluster,
            &positions,
            &LayoutConfig::default(),
            &mut half(),
            &mut graph,
        );

        // spiral offset (7, 0, 0) plus 0.3 of the way to indie
        assert_eq!(*graph.nodes[0].position(), [7.0, 0.0, 6.0]);
        assert_eq!(graph.connections.len(), 2);
        assert_eq!(graph.connections[1].end, [0.0, 0.0, 20.0]);
    }

    #[test]
    fn distant_secondary_genre_is_not_connected() {
        let artist = Artist::new("a", "A", &["rock", "far"]);
        let cluster = Cluster {
            genre: "rock",
            position: [0.0, 0.0, 0.0],
            members: vec![ClusterMember {
                artist: &artist,
                genres: vec!["rock", "far"],
            }],
        };
        let mut positions = GenrePositions::default();
        positions.insert("far", [100.0, 0.0, 0.0]);

        let mut graph = Graph::default();
        place_cluster(
            &cluster,
            &positions,
            &LayoutConfig::default(),
            &mut half(),
            &mut graph,
        );

        // pulled to x = 7 + 30, still 63 away from "far"
        assert_eq!(graph.connections.len(), 1);
    }
}
