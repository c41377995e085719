//! Genre statistics derived from the deduplicated artist set.
//!
//! Two structures are built in a single pass:
//! - Counts: how many artists carry each genre label
//! - Relations: how often two distinct labels appear on the same artist,
//!   stored in both directions
//!
//! Relations are not read by classification or layout. They are kept for
//! reporting (`jukebox stats`) and for future weighting of bridge genres.

use crate::artist::Artist;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GenreStats {
    /// Genre labels in the order they were first encountered.
    order: Vec<String>,
    counts: HashMap<String, usize>,
    relations: HashMap<String, HashMap<String, usize>>,
}

impl GenreStats {
    pub fn from_artists(artists: &[Artist]) -> Self {
        let mut stats = Self::default();
        for artist in artists {
            stats.add_artist(artist);
        }
        stats
    }

    fn add_artist(&mut self, artist: &Artist) {
        for genre in &artist.genres {
            match self.counts.get_mut(genre) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(genre.clone(), 1);
                    self.order.push(genre.clone());
                }
            }

            for other in &artist.genres {
                if other != genre {
                    *self
                        .relations
                        .entry(genre.clone())
                        .or_default()
                        .entry(other.clone())
                        .or_insert(0) += 1;
                }
            }
        }
    }

    pub fn count(&self, genre: &str) -> usize {
        self.counts.get(genre).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Genres with their counts, in first-seen order.
    pub fn genres(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order.iter().map(|g| (g.as_str(), self.count(g)))
    }

    /// Genres sorted by descending count. Ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.genres().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Number of artists on which `a` and `b` appear together.
    pub fn co_occurrence(&self, a: &str, b: &str) -> usize {
        self.relations
            .get(a)
            .and_then(|m| m.get(b))
            .copied()
            .unwrap_or(0)
    }

    pub fn related_genres(&self, genre: &str) -> Option<&HashMap<String, usize>> {
        self.relations.get(genre)
    }

    /// The `n` strongest unordered co-occurrence pairs.
    ///
    /// Ordered by count, then alphabetically so output is stable.
    pub fn top_pairs(&self, n: usize) -> Vec<(&str, &str, usize)> {
        let mut pairs: Vec<(&str, &str, usize)> = self
            .relations
            .iter()
            .flat_map(|(a, others)| {
                others
                    .iter()
                    .filter(move |(b, _)| a.as_str() < b.as_str())
                    .map(move |(b, &count)| (a.as_str(), b.as_str(), count))
            })
            .collect();
        pairs.sort_by(|x, y| y.2.cmp(&x.2).then(x.0.cmp(y.0)).then(x.1.cmp(y.1)));
        pairs.truncate(n);
        pairs
    }
}

/// Derive a layout seed from the artist set.
/// Same artists in the same order always produce the same seed.
pub fn input_seed(artists: &[Artist]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update((artists.len() as u64).to_le_bytes());
    for artist in artists {
        hasher.update(artist.id.as_bytes());
        hasher.update([0u8]);
        for genre in &artist.genres {
            hasher.update(genre.as_bytes());
            hasher.update([1u8]);
        }
    }
    let hash: [u8; 32] = hasher.finalize().into();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[0..8]);
    u64::from_le_bytes(bytes)
}
