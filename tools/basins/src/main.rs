/// Catchment delineation tool: labels every cell draining into each stream
/// outlet of a D8 direction raster.
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use basins_core::{delineate, BasinConfig, CategoryEntry, DelineationStats, OutletRule, TieBreak};
use clap::Parser;
use log::info;
use serde::Serialize;

mod raster;

use raster::{read_raster, write_json, RasterDoc};

#[derive(Parser, Debug)]
#[command(name = "basins", about = "Delineate stream catchments from D8 direction and stream rasters")]
struct Args {
    /// Flow direction raster (JSON grid, r.watershed codes 1-8).
    #[arg(short, long)]
    direction: PathBuf,

    /// Stream raster (JSON grid, positive values are stream cells).
    #[arg(short, long)]
    stream: PathBuf,

    /// Output basin raster.
    #[arg(short, long)]
    output: PathBuf,

    /// Optional legend JSON with one entry per catchment.
    #[arg(long)]
    legend: Option<PathBuf>,

    /// Run options as JSON; switches below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write 0 instead of null for cells outside every catchment.
    #[arg(short = 'z', long)]
    zero_background: bool,

    /// Number catchments 1..n instead of using stream values.
    #[arg(short = 'c', long)]
    categories: bool,

    /// Delineate only basins of the last stream links.
    #[arg(short = 'l', long)]
    last_links: bool,

    /// Let later outlets overwrite cells claimed by earlier ones.
    #[arg(long)]
    last_writer: bool,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Legend {
    catchments: usize,
    categories: Vec<CategoryEntry>,
    stats: DelineationStats,
}

fn load_config(args: &Args) -> Result<BasinConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => BasinConfig::default(),
    };
    if args.zero_background {
        cfg.zero_background = true;
    }
    if args.categories {
        cfg.category_labels = true;
    }
    if args.last_links {
        cfg.outlet_rule = OutletRule::NetworkTermini;
    }
    if args.last_writer {
        cfg.tie_break = TieBreak::LastWriter;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let cfg = load_config(&args)?;
    let directions = read_raster(&args.direction)?;
    let streams = read_raster(&args.stream)?;
    info!(
        "{}x{} grid, {} non-null stream cells",
        streams.rows,
        streams.cols,
        streams.non_null_count()
    );

    let start = Instant::now();
    let result = delineate(&directions, &streams, &cfg).context("delineation failed")?;
    info!(
        "{} catchments in {:.1} ms",
        result.outlet_count(),
        start.elapsed().as_secs_f64() * 1e3
    );

    write_json(&args.output, &RasterDoc::from_grid(&result.labels))?;
    info!("basins written to {}", args.output.display());

    if let Some(path) = &args.legend {
        let legend = Legend {
            catchments: result.outlet_count(),
            categories: result.category_table(),
            stats: result.stats,
        };
        write_json(path, &legend)?;
        info!("legend written to {}", path.display());
    }

    Ok(())
}
