//! Configuration loading for Jukebox.
//!
//! Configuration is loaded from TOML files with environment variable overrides.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JukeboxConfig {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Limits applied while pulling artists from the upstream source.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,

    /// How many artists per time window get a related-artists lookup.
    #[serde(default = "default_related_seed_limit")]
    pub related_seed_limit: usize,

    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            top_limit: default_top_limit(),
            related_seed_limit: default_related_seed_limit(),
            related_limit: default_related_limit(),
        }
    }
}

fn default_top_limit() -> usize {
    50
}

fn default_related_seed_limit() -> usize {
    35
}

fn default_related_limit() -> usize {
    6
}

/// What to do when a main cluster cannot be spaced within the attempt budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Fail the layout with `LayoutError::PlacementExhausted`.
    Strict,
    /// Keep the best candidate seen and carry on.
    #[default]
    BestEffort,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_main_min_count")]
    pub main_min_count: usize,

    #[serde(default = "default_max_main_genres")]
    pub max_main_genres: usize,

    #[serde(default = "default_bridge_min_count")]
    pub bridge_min_count: usize,

    #[serde(default = "default_bridge_min_connecting")]
    pub bridge_min_connecting: usize,

    #[serde(default = "default_max_bridge_genres")]
    pub max_bridge_genres: usize,

    #[serde(default = "default_max_genres_per_artist")]
    pub max_genres_per_artist: usize,

    /// Half-extents of the box main clusters are sampled from.
    #[serde(default = "default_cluster_half_extents")]
    pub cluster_half_extents: [f64; 3],

    #[serde(default = "default_min_cluster_distance")]
    pub min_cluster_distance: f64,

    #[serde(default = "default_max_placement_attempts")]
    pub max_placement_attempts: usize,

    #[serde(default)]
    pub placement_policy: PlacementPolicy,

    /// Half-range of the uniform jitter around a bridge centroid.
    #[serde(default = "default_bridge_jitter")]
    pub bridge_jitter: [f64; 3],

    #[serde(default = "default_spiral_base_radius")]
    pub spiral_base_radius: f64,

    #[serde(default = "default_spiral_radius_spread")]
    pub spiral_radius_spread: f64,

    /// Full turns of the spiral across one cluster (4 turns = 8π).
    #[serde(default = "default_spiral_turns")]
    pub spiral_turns: f64,

    #[serde(default = "default_spiral_shrink")]
    pub spiral_shrink: f64,

    /// Fraction of the way an artist is pulled toward its secondary genres.
    #[serde(default = "default_secondary_pull")]
    pub secondary_pull: f64,

    #[serde(default = "default_artist_jitter")]
    pub artist_jitter: f64,

    /// Vertical half-range as a multiple of the spiral radius.
    #[serde(default = "default_vertical_spread")]
    pub vertical_spread: f64,

    #[serde(default = "default_secondary_edge_max_distance")]
    pub secondary_edge_max_distance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            main_min_count: default_main_min_count(),
            max_main_genres: default_max_main_genres(),
            bridge_min_count: default_bridge_min_count(),
            bridge_min_connecting: default_bridge_min_connecting(),
            max_bridge_genres: default_max_bridge_genres(),
            max_genres_per_artist: default_max_genres_per_artist(),
            cluster_half_extents: default_cluster_half_extents(),
            min_cluster_distance: default_min_cluster_distance(),
            max_placement_attempts: default_max_placement_attempts(),
            placement_policy: PlacementPolicy::default(),
            bridge_jitter: default_bridge_jitter(),
            spiral_base_radius: default_spiral_base_radius(),
            spiral_radius_spread: default_spiral_radius_spread(),
            spiral_turns: default_spiral_turns(),
            spiral_shrink: default_spiral_shrink(),
            secondary_pull: default_secondary_pull(),
            artist_jitter: default_artist_jitter(),
            vertical_spread: default_vertical_spread(),
            secondary_edge_max_distance: default_secondary_edge_max_distance(),
        }
    }
}

fn default_main_min_count() -> usize {
    3
}

fn default_max_main_genres() -> usize {
    25
}

fn default_bridge_min_count() -> usize {
    2
}

fn default_bridge_min_connecting() -> usize {
    2
}

fn default_max_bridge_genres() -> usize {
    40
}

fn default_max_genres_per_artist() -> usize {
    4
}

fn default_cluster_half_extents() -> [f64; 3] {
    [32.5, 20.0, 32.5]
}

fn default_min_cluster_distance() -> f64 {
    22.0
}

fn default_max_placement_attempts() -> usize {
    10_000
}

fn default_bridge_jitter() -> [f64; 3] {
    [7.5, 6.0, 7.5]
}

fn default_spiral_base_radius() -> f64 {
    5.0
}

fn default_spiral_radius_spread() -> f64 {
    4.0
}

fn default_spiral_turns() -> f64 {
    4.0
}

fn default_spiral_shrink() -> f64 {
    0.12
}

fn default_secondary_pull() -> f64 {
    0.3
}

fn default_artist_jitter() -> f64 {
    2.0
}

fn default_vertical_spread() -> f64 {
    1.1
}

fn default_secondary_edge_max_distance() -> f64 {
    35.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            pretty: default_pretty(),
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_pretty() -> bool {
    true
}

impl JukeboxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("JUKEBOX")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
