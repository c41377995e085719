//! Upstream artist retrieval.
//!
//! The catalog itself is external: anything implementing [`ArtistSource`]
//! can feed the layout. Requests are issued concurrently and each one is
//! allowed to fail on its own; a failed request degrades to an empty result
//! instead of aborting the fetch.

use crate::aggregate::ListenerArtists;
use crate::artist::Artist;
use crate::config::FetchConfig;
use crate::error::{LayoutError, Result};
use async_trait::async_trait;
use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// Listening history window for top-artist requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    LongTerm,
    MediumTerm,
    ShortTerm,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [
        TimeRange::LongTerm,
        TimeRange::MediumTerm,
        TimeRange::ShortTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::LongTerm => "long_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::ShortTerm => "short_term",
        }
    }
}

#[async_trait]
pub trait ArtistSource: Send + Sync {
    /// The listener's top artists for one window, most listened first.
    async fn top_artists(&self, range: TimeRange, limit: usize) -> Result<Vec<Artist>>;

    /// Artists related to `artist_id`.
    async fn related_artists(&self, artist_id: &str) -> Result<Vec<Artist>>;
}

async fn fetch_top<S: ArtistSource + ?Sized>(
    source: &S,
    range: TimeRange,
    limit: usize,
) -> Vec<Artist> {
    match source.top_artists(range, limit).await {
        Ok(mut artists) => {
            artists.truncate(limit);
            artists
        }
        Err(e) => {
            warn!(range = range.as_str(), error = %e, "top artists request failed");
            Vec::new()
        }
    }
}

async fn fetch_related<S: ArtistSource + ?Sized>(
    source: &S,
    artist_id: &str,
    limit: usize,
) -> Vec<Artist> {
    match source.related_artists(artist_id).await {
        Ok(mut artists) => {
            artists.truncate(limit);
            artists
        }
        Err(e) => {
            warn!(artist_id, error = %e, "related artists request failed");
            Vec::new()
        }
    }
}

/// Fetch everything the layout needs for one listener.
///
/// The three windows are requested together. The first
/// `related_seed_limit` artists of each window (deduplicated by id) then get
/// a related-artists lookup, all issued at once. Never fails: every failed
/// request contributes an empty collection.
pub async fn fetch_listener_artists<S: ArtistSource + ?Sized>(
    source: &S,
    config: &FetchConfig,
) -> ListenerArtists {
    let (long_term, medium_term, short_term) = futures::join!(
        fetch_top(source, TimeRange::LongTerm, config.top_limit),
        fetch_top(source, TimeRange::MediumTerm, config.top_limit),
        fetch_top(source, TimeRange::ShortTerm, config.top_limit),
    );

    let mut seen: HashSet<&str> = HashSet::new();
    let seeds: Vec<&str> = long_term
        .iter()
        .take(config.related_seed_limit)
        .chain(medium_term.iter().take(config.related_seed_limit))
        .chain(short_term.iter().take(config.related_seed_limit))
        .map(|a| a.id.as_str())
        .filter(|id| seen.insert(*id))
        .collect();

    let related: Vec<Artist> = join_all(
        seeds
            .iter()
            .map(|id| fetch_related(source, id, config.related_limit)),
    )
    .await
    .into_iter()
    .flatten()
    .collect();

    debug!(
        long_term = long_term.len(),
        medium_term = medium_term.len(),
        short_term = short_term.len(),
        seeds = seeds.len(),
        related = related.len(),
        "fetched listener artists"
    );

    ListenerArtists {
        long_term,
        medium_term,
        short_term,
        related,
    }
}

/// A captured set of upstream responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub top: BTreeMap<TimeRange, Vec<Artist>>,

    #[serde(default)]
    pub related: BTreeMap<String, Vec<Artist>>,

    /// Windows (by name) or artist ids whose requests should fail.
    #[serde(default)]
    pub failed: Vec<String>,
}

const GENRE_FAMILIES: &[&[&str]] = &[
    &["rock", "indie rock", "alternative rock", "garage rock", "shoegaze"],
    &["pop", "dance pop", "electropop", "art pop", "indie pop"],
    &["hip hop", "rap", "trap", "conscious hip hop", "lo-fi beats"],
    &["electronic", "house", "techno", "ambient", "idm"],
    &["jazz", "jazz fusion", "nu jazz", "soul", "neo soul"],
    &["folk", "indie folk", "singer-songwriter", "americana", "chamber pop"],
    &["metal", "post-metal", "sludge metal", "post-rock", "doom metal"],
];

impl Snapshot {
    /// Generate a synthetic listener for demos and tests.
    ///
    /// Artists are grouped into genre families, with a minority crossing
    /// into a second family so bridge genres appear.
    pub fn sample(seed: u64, artist_count: usize) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

        let artists: Vec<Artist> = (0..artist_count)
            .map(|i| {
                let family = GENRE_FAMILIES[rng.gen_range(0..GENRE_FAMILIES.len())];
                let mut genres: Vec<&str> = Vec::new();
                if rng.gen_bool(0.8) {
                    genres.push(family[0]);
                }
                let extra = rng.gen_range(1..=3);
                for genre in family[1..].choose_multiple(&mut rng, extra) {
                    genres.push(*genre);
                }
                if rng.gen_bool(0.25) {
                    let other = GENRE_FAMILIES[rng.gen_range(0..GENRE_FAMILIES.len())];
                    if let Some(genre) = other.choose(&mut rng) {
                        if !genres.contains(genre) {
                            genres.push(*genre);
                        }
                    }
                }

                let artist =
                    Artist::new(format!("artist{:03}", i), format!("Artist {}", i), &genres);
                if rng.gen_bool(0.9) {
                    artist.with_image(format!("https://images.example/{:03}.jpg", i))
                } else {
                    artist
                }
            })
            .collect();

        // Top lists draw from the first half, related artists from everyone.
        let listened = &artists[..artists.len().div_ceil(2)];
        let mut top = BTreeMap::new();
        for range in TimeRange::ALL {
            let mut window: Vec<Artist> = listened
                .iter()
                .filter(|_| rng.gen_bool(0.7))
                .cloned()
                .collect();
            window.shuffle(&mut rng);
            window.truncate(50);
            top.insert(range, window);
        }

        let mut related = BTreeMap::new();
        for artist in listened {
            let picks: Vec<Artist> = artists
                .choose_multiple(&mut rng, 6)
                .filter(|a| a.id != artist.id)
                .cloned()
                .collect();
            related.insert(artist.id.clone(), picks);
        }

        Self {
            top,
            related,
            failed: Vec::new(),
        }
    }
}

/// Serves responses from a [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot JSON file.
    pub async fn open(path: &Path) -> Result<Self> {
        let data = tokio::fs::read_to_string(path).await?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn check_failed(&self, key: &str) -> Result<()> {
        if self.snapshot.failed.iter().any(|f| f == key) {
            return Err(LayoutError::Source(format!("request for '{}' failed", key)));
        }
        Ok(())
    }
}

#[async_trait]
impl ArtistSource for SnapshotSource {
    async fn top_artists(&self, range: TimeRange, limit: usize) -> Result<Vec<Artist>> {
        self.check_failed(range.as_str())?;
        let mut artists = self.snapshot.top.get(&range).cloned().unwrap_or_default();
        artists.truncate(limit);
        Ok(artists)
    }

    async fn related_artists(&self, artist_id: &str) -> Result<Vec<Artist>> {
        self.check_failed(artist_id)?;
        Ok(self
            .snapshot
            .related
            .get(artist_id)
            .cloned()
            .unwrap_or_default())
    }
}
