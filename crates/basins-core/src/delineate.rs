//! Run orchestration: validate → find outlets → fill each → finalize.
use log::{debug, info};
use serde::Serialize;

use crate::config::BasinConfig;
use crate::error::{BasinError, Result};
use crate::fill::{CatchmentFiller, FillOutcome, BACKGROUND};
use crate::grid::{Grid, NULL_CELL};
use crate::outlets::{find_outlets, Outlet};

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DelineationStats {
    pub outlets: usize,
    pub filled: usize,
    pub skipped: usize,
    /// Cells holding a catchment label after the run.
    pub labeled_cells: usize,
    pub queue_inserts: u64,
    pub queue_removes: u64,
}

/// One row of the legend handed to raster writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub label: i32,
    pub rank: i32,
    pub row: usize,
    pub col: usize,
}

/// Output of a delineation run.
#[derive(Debug, Clone)]
pub struct Delineation {
    /// Catchment labels; unlabeled cells are `NULL_CELL` (or `0` with
    /// `zero_background`).
    pub labels: Grid<i32>,
    /// Outlets in discovery (= fill) order.
    pub outlets: Vec<Outlet>,
    pub stats: DelineationStats,
    category_labels: bool,
}

impl Delineation {
    pub fn outlet_count(&self) -> usize {
        self.outlets.len()
    }

    /// Label written for the outlet at `index` in discovery order.
    pub fn label_of(&self, index: usize) -> Option<i32> {
        let outlet = self.outlets.get(index)?;
        Some(outlet_label(outlet, index, self.category_labels))
    }

    /// Legend entries, one per outlet, in discovery order.
    pub fn category_table(&self) -> Vec<CategoryEntry> {
        self.outlets
            .iter()
            .enumerate()
            .map(|(i, o)| CategoryEntry {
                label: outlet_label(o, i, self.category_labels),
                rank: o.rank,
                row: o.row,
                col: o.col,
            })
            .collect()
    }
}

#[inline]
fn outlet_label(outlet: &Outlet, index: usize, category_labels: bool) -> i32 {
    if category_labels {
        (index + 1) as i32
    } else {
        outlet.rank
    }
}

fn validate(directions: &Grid<i32>, streams: &Grid<i32>) -> Result<()> {
    directions.check_len()?;
    streams.check_len()?;
    if !directions.same_shape(streams) {
        return Err(BasinError::ShapeMismatch {
            dir_rows: directions.rows,
            dir_cols: directions.cols,
            stream_rows: streams.rows,
            stream_cols: streams.cols,
        });
    }
    if directions.is_empty() {
        return Err(BasinError::EmptyGrid {
            rows: directions.rows,
            cols: directions.cols,
        });
    }
    Ok(())
}

/// Reusable delineation engine. Keeps the fill queue between runs so grids of
/// the same size do not reallocate it.
pub struct Delineator {
    config: BasinConfig,
    filler: CatchmentFiller,
}

impl Delineator {
    pub fn new(config: BasinConfig) -> Self {
        Self {
            config,
            filler: CatchmentFiller::new(0, config.tie_break),
        }
    }

    pub fn config(&self) -> &BasinConfig {
        &self.config
    }

    pub fn run(&mut self, directions: &Grid<i32>, streams: &Grid<i32>) -> Result<Delineation> {
        validate(directions, streams)?;
        let cfg = self.config;

        self.filler.set_tie_break(cfg.tie_break);
        self.filler.reserve(directions.len());
        let inserts_before = self.filler.queue().inserted();
        let removes_before = self.filler.queue().removed();

        let outlets = find_outlets(directions, streams, cfg.outlet_rule);
        info!(
            "{} outlets found on {}x{} grid",
            outlets.len(),
            directions.rows,
            directions.cols
        );

        let mut labels = Grid::new(directions.rows, directions.cols, BACKGROUND);
        let mut stats = DelineationStats {
            outlets: outlets.len(),
            ..Default::default()
        };

        for (i, outlet) in outlets.iter().enumerate() {
            let label = outlet_label(outlet, i, cfg.category_labels);
            match self.filler.fill(&mut labels, directions, outlet.point(), label)? {
                FillOutcome::Filled(n) => {
                    debug!(
                        "catchment {label} at ({}, {}): {n} cells",
                        outlet.row, outlet.col
                    );
                    stats.filled += 1;
                }
                FillOutcome::Skipped => stats.skipped += 1,
            }
        }

        stats.labeled_cells = labels.data.iter().filter(|&&v| v != BACKGROUND).count();
        if !cfg.zero_background {
            for v in labels.data.iter_mut().filter(|v| **v == BACKGROUND) {
                *v = NULL_CELL;
            }
        }
        stats.queue_inserts = self.filler.queue().inserted() - inserts_before;
        stats.queue_removes = self.filler.queue().removed() - removes_before;

        info!(
            "{} catchments filled, {} outlets skipped, {} cells labeled",
            stats.filled, stats.skipped, stats.labeled_cells
        );

        Ok(Delineation {
            labels,
            outlets,
            stats,
            category_labels: cfg.category_labels,
        })
    }
}

/// Delineate every catchment of `streams` under `directions`.
///
/// Fails only when a grid's data length disagrees with its shape, the grids
/// differ in shape, or they are empty; a stream grid
/// without outlets yields an all-background result.
pub fn delineate(
    directions: &Grid<i32>,
    streams: &Grid<i32>,
    config: &BasinConfig,
) -> Result<Delineation> {
    Delineator::new(*config).run(directions, streams)
}

/// Delineate independent `(directions, streams)` pairs. Each job gets its own
/// engine; with the `threading` feature jobs run on the rayon pool.
pub fn delineate_batch(
    jobs: &[(Grid<i32>, Grid<i32>)],
    config: &BasinConfig,
) -> Vec<Result<Delineation>> {
    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        jobs.par_iter()
            .map(|(dirs, streams)| delineate(dirs, streams, config))
            .collect()
    }
    #[cfg(not(feature = "threading"))]
    {
        let mut engine = Delineator::new(*config);
        jobs.iter()
            .map(|(dirs, streams)| engine.run(dirs, streams))
            .collect()
    }
}
