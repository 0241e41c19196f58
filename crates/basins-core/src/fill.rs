//! Upstream breadth-first catchment fill.
//!
//! Starting at an outlet, a neighbour `N` of a queued cell `C` joins the
//! catchment when `N`'s flow direction is the one pointing from `N` back to
//! `C`. Each cell enters the queue at most once per fill, so a fill is
//! `O(cells)` and the queue never holds more than the grid cell count.
use log::debug;

use crate::config::TieBreak;
use crate::direction::Direction;
use crate::error::{BasinError, Result};
use crate::grid::{Grid, Point};
use crate::queue::BoundedQueue;

/// Label value of a cell no catchment has claimed yet.
pub const BACKGROUND: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The outlet cell was already claimed by an earlier catchment.
    Skipped,
    /// Number of cells labeled by this fill, outlet included.
    Filled(usize),
}

/// Reusable fill state: the bounded queue plus per-fill visit stamps.
pub struct CatchmentFiller {
    queue: BoundedQueue,
    stamps: Vec<u32>,
    generation: u32,
    tie_break: TieBreak,
}

impl CatchmentFiller {
    /// Size the filler for grids of up to `cells` cells.
    pub fn new(cells: usize, tie_break: TieBreak) -> Self {
        Self {
            queue: BoundedQueue::with_capacity(cells),
            stamps: vec![0; cells],
            generation: 0,
            tie_break,
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
    }

    pub fn queue(&self) -> &BoundedQueue {
        &self.queue
    }

    /// Grow the buffers so a grid of `cells` cells fits. Never shrinks.
    pub fn reserve(&mut self, cells: usize) {
        if cells > self.queue.capacity() {
            self.queue = BoundedQueue::with_capacity(cells);
            self.stamps = vec![0; cells];
            self.generation = 0;
        }
    }

    fn next_generation(&mut self) -> u32 {
        if self.generation == u32::MAX {
            self.stamps.fill(0);
            self.generation = 0;
        }
        self.generation += 1;
        self.generation
    }

    /// Label every cell draining into `outlet` with `label`.
    ///
    /// Under [`TieBreak::FirstWriter`] claimed cells are never overwritten and
    /// an already claimed outlet is skipped. Under [`TieBreak::LastWriter`]
    /// the fill runs through earlier catchments and relabels them.
    pub fn fill(
        &mut self,
        labels: &mut Grid<i32>,
        directions: &Grid<i32>,
        outlet: Point,
        label: i32,
    ) -> Result<FillOutcome> {
        labels.check_len()?;
        directions.check_len()?;
        if !labels.same_shape(directions) {
            return Err(BasinError::ShapeMismatch {
                dir_rows: directions.rows,
                dir_cols: directions.cols,
                stream_rows: labels.rows,
                stream_cols: labels.cols,
            });
        }
        if !labels.contains(outlet.row as isize, outlet.col as isize) {
            return Ok(FillOutcome::Skipped);
        }
        let keep_claimed = self.tie_break == TieBreak::FirstWriter;
        if keep_claimed && labels.get(outlet) != BACKGROUND {
            debug!("outlet ({}, {}) already claimed, skipping", outlet.row, outlet.col);
            return Ok(FillOutcome::Skipped);
        }

        self.reserve(labels.len());
        let stamp = self.next_generation();
        let cols = labels.cols;
        self.queue.clear();

        self.stamps[outlet.row * cols + outlet.col] = stamp;
        labels.set(outlet, label);
        self.queue.insert(outlet)?;
        let mut filled = 1usize;

        while let Some(cell) = self.queue.remove() {
            for dir in Direction::ALL {
                let Some(nb) = labels.step(cell, dir) else {
                    continue;
                };
                let i = nb.row * cols + nb.col;
                if self.stamps[i] == stamp {
                    continue;
                }
                if keep_claimed && labels.data[i] != BACKGROUND {
                    continue;
                }
                if Direction::from_code(directions.data[i]) != Some(dir.opposite()) {
                    continue;
                }
                self.stamps[i] = stamp;
                labels.data[i] = label;
                self.queue.insert(nb)?;
                filled += 1;
            }
        }

        Ok(FillOutcome::Filled(filled))
    }
}
