use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use soccer_scout::analysis::{self, AnalysisOptions};
use soccer_scout::{clean, data_loader, join, render};

/// Ranks soccer players by their recorded attributes and answers a fixed
/// set of questions over the joined biography/snapshot data.
#[derive(Parser, Debug)]
#[command(name = "soccer_scout", version)]
struct Cli {
    /// Player biography CSV
    #[arg(long, default_value = "data/Player.csv")]
    players: PathBuf,

    /// Player attribute snapshot CSV
    #[arg(long, default_value = "data/Player_Attributes.csv")]
    attributes: PathBuf,

    /// Result size for the ranked questions
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Write each chart spec as JSON into this directory
    #[arg(long)]
    charts_dir: Option<PathBuf>,

    /// Player whose rating progression is charted
    #[arg(long, default_value = "Kaka")]
    player: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let player_rows = data_loader::load_players(&cli.players)?;
    let attribute_rows = data_loader::load_attributes(&cli.attributes)?;
    info!(
        players = player_rows.len(),
        snapshots = attribute_rows.len(),
        "loaded input tables"
    );

    let player_rows = clean::drop_duplicates(player_rows, clean::player_row_key);
    let players = clean::coerce_players(player_rows)?;

    let raw_count = attribute_rows.len();
    let snapshots = clean::drop_nulls(attribute_rows)?;
    let snapshots = clean::drop_duplicates(snapshots, clean::snapshot_key);
    info!(
        kept = snapshots.len(),
        dropped = raw_count - snapshots.len(),
        "cleaned attribute snapshots"
    );

    let records = join::merge(&players, &snapshots)?;
    info!(records = records.len(), "joined table ready");

    let options = AnalysisOptions {
        top_n: cli.top,
        progression_player: cli.player.clone(),
    };
    let results = analysis::run_all(&records, &options)?;

    if let Some(dir) = &cli.charts_dir {
        fs::create_dir_all(dir)?;
    }

    for question in &results {
        render::print_heading(&question.heading);
        if let Some(table) = &question.table {
            render::print_table(table);
        }
        if let (Some(dir), Some(chart)) = (&cli.charts_dir, &question.chart) {
            let path = render::write_chart(dir, question.slug, chart)?;
            debug!(path = %path.display(), "wrote chart spec");
        }
    }

    Ok(())
}
