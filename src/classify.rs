//! Splitting genres into main cluster anchors and bridge genres.

use crate::artist::Artist;
use crate::config::LayoutConfig;
use crate::stats::GenreStats;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreRole {
    Main,
    Bridge,
}

/// Main and bridge genres, each in rank order.
#[derive(Debug, Clone, Default)]
pub struct GenreClassification {
    pub main: Vec<String>,
    pub bridge: Vec<String>,
    main_set: HashSet<String>,
    bridge_set: HashSet<String>,
}

impl GenreClassification {
    pub fn new(main: Vec<String>, bridge: Vec<String>) -> Self {
        let main_set = main.iter().cloned().collect();
        let bridge_set = bridge.iter().cloned().collect();
        Self {
            main,
            bridge,
            main_set,
            bridge_set,
        }
    }

    /// Classify genres.
    ///
    /// Main genres are the top `max_main_genres` by count among those with
    /// at least `main_min_count` artists; ties keep first-seen order.
    ///
    /// A non-main genre is a bridge candidate when it has at least
    /// `bridge_min_count` artists and at least `bridge_min_connecting` of its
    /// artists also carry a main genre. Candidates are ranked by how many
    /// artists carry them and the top `max_bridge_genres` kept.
    pub fn classify(artists: &[Artist], stats: &GenreStats, config: &LayoutConfig) -> Self {
        let main: Vec<String> = stats
            .ranked()
            .into_iter()
            .filter(|(_, count)| *count >= config.main_min_count)
            .take(config.max_main_genres)
            .map(|(genre, _)| genre.to_string())
            .collect();
        let main_set: HashSet<String> = main.iter().cloned().collect();

        let mut candidates: Vec<(&str, usize)> = stats
            .genres()
            .filter(|(genre, _)| !main_set.contains(*genre))
            .filter(|(genre, count)| {
                *count >= config.bridge_min_count
                    && connecting_artists(artists, genre, &main_set).count()
                        >= config.bridge_min_connecting
            })
            .map(|(genre, _)| {
                let carriers = artists.iter().filter(|a| a.has_genre(genre)).count();
                (genre, carriers)
            })
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        let bridge: Vec<String> = candidates
            .into_iter()
            .take(config.max_bridge_genres)
            .map(|(genre, _)| genre.to_string())
            .collect();

        debug!(
            main = main.len(),
            bridge = bridge.len(),
            total = stats.len(),
            "classified genres"
        );

        Self::new(main, bridge)
    }

    pub fn role(&self, genre: &str) -> Option<GenreRole> {
        if self.main_set.contains(genre) {
            Some(GenreRole::Main)
        } else if self.bridge_set.contains(genre) {
            Some(GenreRole::Bridge)
        } else {
            None
        }
    }

    pub fn is_main(&self, genre: &str) -> bool {
        self.main_set.contains(genre)
    }

    pub fn is_relevant(&self, genre: &str) -> bool {
        self.role(genre).is_some()
    }

    pub fn main_set(&self) -> &HashSet<String> {
        &self.main_set
    }

    /// Genres of `artist` that are main or bridge, most common first,
    /// capped at `limit`.
    pub fn relevant_genres<'a>(
        &self,
        artist: &'a Artist,
        stats: &GenreStats,
        limit: usize,
    ) -> Vec<&'a str> {
        let mut genres: Vec<&str> = artist
            .genres
            .iter()
            .map(String::as_str)
            .filter(|g| self.is_relevant(g))
            .collect();
        genres.sort_by(|a, b| stats.count(b).cmp(&stats.count(a)));
        genres.truncate(limit);
        genres
    }
}

/// Artists that carry `genre` together with at least one main genre.
pub fn connecting_artists<'a>(
    artists: &'a [Artist],
    genre: &'a str,
    main: &'a HashSet<String>,
) -> impl Iterator<Item = &'a Artist> + 'a {
    artists
        .iter()
        .filter(move |a| a.has_genre(genre) && a.genres.iter().any(|g| main.contains(g)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(artists: &[Artist]) -> GenreClassification {
        let stats = GenreStats::from_artists(artists);
        GenreClassification::classify(artists, &stats, &LayoutConfig::default())
    }

    #[test]
    fn main_genres_need_three_artists() {
        let artists = vec![
            Artist::new("1", "1", &["rock"]),
            Artist::new("2", "2", &["rock", "pop"]),
            Artist::new("3", "3", &["rock", "pop"]),
        ];
        let c = classify(&artists);
        assert_eq!(c.main, vec!["rock"]);
        assert!(!c.is_main("pop"));
    }

    #[test]
    fn main_genres_are_capped_and_ranked() {
        let mut artists = Vec::new();
        for g in 0..30 {
            for i in 0..(3 + g % 5) {
                artists.push(Artist::new(
                    format!("{}-{}", g, i),
                    "x",
                    &[format!("genre{}", g).as_str()],
                ));
            }
        }
        let stats = GenreStats::from_artists(&artists);
        let c = GenreClassification::classify(&artists, &stats, &LayoutConfig::default());
        assert_eq!(c.main.len(), 25);
        let counts: Vec<usize> = c.main.iter().map(|g| stats.count(g)).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert!(counts.iter().all(|&n| n >= 3));
        // genre4 has the highest count (7) and is encountered first among those
        assert_eq!(c.main[0], "genre4");
    }

    #[test]
    fn bridge_genres_need_two_connecting_artists() {
        let artists = vec![
            Artist::new("1", "1", &["rock", "shoegaze"]),
            Artist::new("2", "2", &["rock", "shoegaze"]),
            Artist::new("3", "3", &["rock", "lofi"]),
            Artist::new("4", "4", &["lofi"]),
            Artist::new("5", "5", &["ambient"]),
            Artist::new("6", "6", &["ambient"]),
        ];
        let c = classify(&artists);
        assert_eq!(c.main, vec!["rock"]);
        assert_eq!(c.bridge, vec!["shoegaze"]);
        assert_eq!(c.role("shoegaze"), Some(GenreRole::Bridge));
        assert_eq!(c.role("lofi"), None);
        assert_eq!(c.role("ambient"), None);
    }

    #[test]
    fn bridge_genres_are_capped_and_ranked_by_carriers() {
        let mut artists = Vec::new();
        for m in 0..25 {
            for i in 0..10 {
                artists.push(Artist::new(
                    format!("m{}-{}", m, i),
                    "x",
                    &[format!("main{}", m).as_str()],
                ));
            }
        }
        // bridge{i} is carried by 2..=5 artists, all of them also in main0
        for b in 0..50 {
            for i in 0..(2 + b % 4) {
                artists.push(Artist::new(
                    format!("b{}-{}", b, i),
                    "x",
                    &["main0", format!("bridge{}", b).as_str()],
                ));
            }
        }

        let stats = GenreStats::from_artists(&artists);
        let c = GenreClassification::classify(&artists, &stats, &LayoutConfig::default());
        assert_eq!(c.main.len(), 25);
        assert_eq!(c.bridge.len(), 40);
        assert!(c.bridge.iter().all(|g| !c.is_main(g)));

        let counts: Vec<usize> = c.bridge.iter().map(|g| stats.count(g)).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));

        // equal counts keep the order genres were first seen in
        let index = |g: &str| g["bridge".len()..].parse::<usize>().unwrap();
        for pair in c.bridge.windows(2) {
            if stats.count(&pair[0]) == stats.count(&pair[1]) {
                assert!(index(pair[0].as_str()) < index(pair[1].as_str()));
            }
        }
        assert_eq!(c.bridge[0], "bridge3");
        assert_eq!(c.bridge[37..], ["bridge0", "bridge4", "bridge8"]);
    }

    #[test]
    fn bridge_genres_are_disjoint_from_main() {
        let artists = vec![
            Artist::new("1", "1", &["rock", "indie"]),
            Artist::new("2", "2", &["rock", "indie"]),
            Artist::new("3", "3", &["rock", "indie"]),
        ];
        let c = classify(&artists);
        assert_eq!(c.main, vec!["rock", "indie"]);
        assert!(c.bridge.is_empty());
    }

    #[test]
    fn relevant_genres_are_ranked_and_capped() {
        let c = GenreClassification::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec!["d".into(), "e".into()],
        );
        let artists = vec![
            Artist::new("1", "1", &["e", "d", "c", "b", "a", "zzz"]),
            Artist::new("2", "2", &["a", "b", "c"]),
            Artist::new("3", "3", &["a", "b"]),
            Artist::new("4", "4", &["a"]),
        ];
        let stats = GenreStats::from_artists(&artists);
        let relevant = c.relevant_genres(&artists[0], &stats, 4);
        assert_eq!(relevant, vec!["a", "b", "c", "e"]);
    }

    #[test]
    fn no_genres_no_classification() {
        let c = classify(&[Artist::new("1", "1", &[])]);
        assert!(c.main.is_empty());
        assert!(c.bridge.is_empty());
    }
}
