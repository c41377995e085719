//! Jukebox CLI - lay out a listener's artists as a 3D genre graph.

use anyhow::{Context, Result};
use clap::Parser;
use jukebox::classify::GenreClassification;
use jukebox::config::JukeboxConfig;
use jukebox::graph::Graph;
use jukebox::source::{fetch_listener_artists, Snapshot, SnapshotSource};
use jukebox::stats::GenreStats;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jukebox")]
#[command(about = "Lay out a listener's top artists as a 3D genre constellation")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "jukebox.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Lay out a captured snapshot of upstream responses
    Generate {
        /// Snapshot JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for layout (derived from the input when omitted)
        #[arg(short = 'S', long)]
        seed: Option<u64>,
    },

    /// Lay out a synthetic listener
    Sample {
        /// Seed for the synthetic listener and the layout
        #[arg(short = 'S', long, default_value = "42")]
        seed: u64,

        /// Number of artists in the synthetic catalog
        #[arg(short, long, default_value = "120")]
        artists: usize,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also save the generated snapshot next to the graph
        #[arg(long)]
        save_snapshot: bool,
    },

    /// Print genre statistics for a snapshot
    Stats {
        /// Snapshot JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of genres and pairs to list
        #[arg(short, long, default_value = "15")]
        top: usize,
    },
}

fn write_graph(graph: &Graph, path: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = if pretty {
        serde_json::to_string_pretty(graph)?
    } else {
        serde_json::to_string(graph)?
    };
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jukebox=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = JukeboxConfig::load(&cli.config)?;
    let output_dir = PathBuf::from(&config.output.directory);

    match cli.command {
        Commands::Generate {
            input,
            output,
            seed,
        } => {
            let source = SnapshotSource::open(&input).await?;
            let listener = fetch_listener_artists(&source, &config.fetch).await;
            println!(
                "Fetched {} long, {} medium, {} short term and {} related artists",
                listener.long_term.len(),
                listener.medium_term.len(),
                listener.short_term.len(),
                listener.related.len()
            );

            let graph = jukebox::build_graph(&listener, &config.layout, seed)?;
            println!(
                "  {} nodes, {} connections",
                graph.nodes.len(),
                graph.connections.len()
            );

            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "graph".to_string());
            let output_path =
                output.unwrap_or_else(|| output_dir.join(format!("{}_graph.json", stem)));
            write_graph(&graph, &output_path, config.output.pretty)?;
            println!("Saved to {}", output_path.display());
        }

        Commands::Sample {
            seed,
            artists,
            output,
            save_snapshot,
        } => {
            let snapshot = Snapshot::sample(seed, artists);
            let source = SnapshotSource::new(snapshot);
            let listener = fetch_listener_artists(&source, &config.fetch).await;

            println!("Generating sample listener with seed {}...", seed);
            let graph = jukebox::build_graph(&listener, &config.layout, Some(seed))?;
            println!(
                "  {} nodes, {} connections",
                graph.nodes.len(),
                graph.connections.len()
            );

            let output_path =
                output.unwrap_or_else(|| output_dir.join(format!("sample_{}.json", seed)));
            write_graph(&graph, &output_path, config.output.pretty)?;
            println!("Saved to {}", output_path.display());

            if save_snapshot {
                let snapshot_path = output_path.with_extension("snapshot.json");
                let snapshot_json = serde_json::to_string_pretty(source.snapshot())?;
                fs::write(&snapshot_path, snapshot_json)?;
                println!("Saved snapshot to {}", snapshot_path.display());
            }
        }

        Commands::Stats { input, top } => {
            let source = SnapshotSource::open(&input).await?;
            let listener = fetch_listener_artists(&source, &config.fetch).await;
            let artists = listener.aggregate();
            let stats = GenreStats::from_artists(&artists);
            let classification = GenreClassification::classify(&artists, &stats, &config.layout);

            println!("Artists: {}", artists.len());
            println!("Genres: {}", stats.len());

            println!("\nTop genres:");
            for (genre, count) in stats.ranked().into_iter().take(top) {
                let role = match classification.role(genre) {
                    Some(jukebox::classify::GenreRole::Main) => "main",
                    Some(jukebox::classify::GenreRole::Bridge) => "bridge",
                    None => "-",
                };
                println!("  {:>4}  {:<6}  {}", count, role, genre);
            }

            println!(
                "\nMain genres: {}  Bridge genres: {}",
                classification.main.len(),
                classification.bridge.len()
            );

            println!("\nStrongest co-occurrences:");
            for (a, b, count) in stats.top_pairs(top) {
                println!("  {:>4}  {} + {}", count, a, b);
            }
        }
    }

    Ok(())
}
