//! The positioned graph handed to a renderer.

use serde::{Deserialize, Serialize};

/// A point in layout space.
pub type Position = [f64; 3];

pub fn distance(a: &Position, b: &Position) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Arithmetic mean of the given points, `None` when there are none.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Position>) -> Option<Position> {
    let mut sum = [0.0; 3];
    let mut n = 0usize;
    for p in points {
        sum[0] += p[0];
        sum[1] += p[1];
        sum[2] += p[2];
        n += 1;
    }
    if n == 0 {
        return None;
    }
    let n = n as f64;
    Some([sum[0] / n, sum[1] / n, sum[2] / n])
}

/// Node id used for a genre label.
pub fn genre_node_id(genre: &str) -> String {
    format!("genre-{}", genre)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Genre {
        id: String,
        name: String,
        position: Position,
        #[serde(rename = "isMainGenre")]
        is_main_genre: bool,
    },
    Artist {
        id: String,
        name: String,
        position: Position,
        #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Genre { id, .. } | Node::Artist { id, .. } => id,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Node::Genre { position, .. } | Node::Artist { position, .. } => position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionKind {
    #[serde(rename = "artist-genre")]
    ArtistGenre,
}

/// An edge between two positions, captured by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub start: Position,
    pub end: Position,
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
}

impl Connection {
    pub fn artist_genre(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            kind: ConnectionKind::ArtistGenre,
        }
    }

    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn genre_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| matches!(n, Node::Genre { .. }))
    }

    pub fn artist_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| matches!(n, Node::Artist { .. }))
    }
}
