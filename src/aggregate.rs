//! Merging of a listener's artist collections into one deduplicated set.

use crate::artist::Artist;
use std::collections::HashSet;
use tracing::debug;

/// Everything fetched for one listener, before deduplication.
///
/// Any collection may be empty when its upstream request failed.
#[derive(Debug, Clone, Default)]
pub struct ListenerArtists {
    pub long_term: Vec<Artist>,
    pub medium_term: Vec<Artist>,
    pub short_term: Vec<Artist>,
    /// Related-artist expansions, flattened in seed order.
    pub related: Vec<Artist>,
}

impl ListenerArtists {
    pub fn is_empty(&self) -> bool {
        self.long_term.is_empty()
            && self.medium_term.is_empty()
            && self.short_term.is_empty()
            && self.related.is_empty()
    }

    /// All collections in priority order: long, medium, short, related.
    pub fn iter(&self) -> impl Iterator<Item = &Artist> {
        self.long_term
            .iter()
            .chain(&self.medium_term)
            .chain(&self.short_term)
            .chain(&self.related)
    }

    /// Merge into one artist per id, keeping the first occurrence.
    pub fn aggregate(&self) -> Vec<Artist> {
        dedup_artists(self.iter())
    }
}

/// Deduplicate by artist id; first occurrence wins and order is preserved.
pub fn dedup_artists<'a>(artists: impl IntoIterator<Item = &'a Artist>) -> Vec<Artist> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut result = Vec::new();
    let mut dropped = 0usize;

    for artist in artists {
        if seen.insert(artist.id.as_str()) {
            result.push(artist.clone());
        } else {
            dropped += 1;
        }
    }

    debug!(unique = result.len(), dropped, "aggregated artists");
    result
}
