//! Outlet discovery on the stream network.
//!
//! A stream cell is any cell whose stream value is non-null and positive.
//! Scanning is row-major and the result keeps that order: it is the fill
//! priority, so it must not be re-sorted by rank.
use serde::{Deserialize, Serialize};

use crate::config::OutletRule;
use crate::direction::Direction;
use crate::grid::{Grid, Point, NULL_CELL};

/// Root of one catchment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlet {
    pub row: usize,
    pub col: usize,
    /// Stream value at the outlet cell.
    pub rank: i32,
}

impl Outlet {
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.row, self.col)
    }
}

#[inline]
pub fn is_stream(value: i32) -> bool {
    value != NULL_CELL && value > 0
}

/// Stream value of the cell `p` drains into, or `None` when the flow ends
/// there: no-flow direction, off-grid target, or a non-stream target.
fn downstream_value(directions: &Grid<i32>, streams: &Grid<i32>, p: Point) -> Option<i32> {
    let dir = Direction::from_code(directions.get(p))?;
    let next = streams.step(p, dir)?;
    let v = streams.get(next);
    is_stream(v).then_some(v)
}

/// Scan both grids and return outlets in discovery order.
///
/// Grids must share a shape; [`crate::delineate`] checks this before calling.
pub fn find_outlets(directions: &Grid<i32>, streams: &Grid<i32>, rule: OutletRule) -> Vec<Outlet> {
    let mut outlets = Vec::new();
    for p in streams.points() {
        let current = streams.get(p);
        if !is_stream(current) {
            continue;
        }
        let next = downstream_value(directions, streams, p);
        let qualifies = match rule {
            OutletRule::SegmentEnds => next != Some(current),
            OutletRule::NetworkTermini => next.is_none(),
        };
        if qualifies {
            outlets.push(Outlet {
                row: p.row,
                col: p.col,
                rank: current,
            });
        }
    }
    outlets
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: i32 = NULL_CELL;

    /// Two tributaries (values 1 and 2) meeting a trunk (value 3) that leaves
    /// the grid to the south.
    ///
    /// ```text
    /// dirs        streams
    /// 7 0 5       1 N 2
    /// 0 6 0       N 3 N
    /// 0 6 0       N 3 N
    /// ```
    fn confluence() -> (Grid<i32>, Grid<i32>) {
        let dirs = Grid::from_rows(vec![vec![7, 0, 5], vec![0, 6, 0], vec![0, 6, 0]]).unwrap();
        let streams = Grid::from_rows(vec![vec![1, N, 2], vec![N, 3, N], vec![N, 3, N]]).unwrap();
        (dirs, streams)
    }

    #[test]
    fn segment_ends_include_junction_tributaries() {
        let (dirs, streams) = confluence();
        let outlets = find_outlets(&dirs, &streams, OutletRule::SegmentEnds);
        assert_eq!(
            outlets,
            vec![
                Outlet { row: 0, col: 0, rank: 1 },
                Outlet { row: 0, col: 2, rank: 2 },
                Outlet { row: 2, col: 1, rank: 3 },
            ]
        );
    }

    #[test]
    fn termini_rule_keeps_only_network_exit() {
        let (dirs, streams) = confluence();
        let outlets = find_outlets(&dirs, &streams, OutletRule::NetworkTermini);
        assert_eq!(outlets, vec![Outlet { row: 2, col: 1, rank: 3 }]);
    }

    #[test]
    fn discovery_order_is_row_major_not_rank() {
        // Two independent single-cell streams, higher rank first in scan order.
        let dirs = Grid::from_rows(vec![vec![0, 0]]).unwrap();
        let streams = Grid::from_rows(vec![vec![9, 4]]).unwrap();
        let ranks: Vec<i32> = find_outlets(&dirs, &streams, OutletRule::SegmentEnds)
            .iter()
            .map(|o| o.rank)
            .collect();
        assert_eq!(ranks, vec![9, 4]);
    }

    #[test]
    fn flow_into_non_stream_cell_is_an_outlet() {
        let dirs = Grid::from_rows(vec![vec![8, 0]]).unwrap();
        let streams = Grid::from_rows(vec![vec![5, 0]]).unwrap();
        let outlets = find_outlets(&dirs, &streams, OutletRule::NetworkTermini);
        assert_eq!(outlets, vec![Outlet { row: 0, col: 0, rank: 5 }]);
    }

    #[test]
    fn empty_network_has_no_outlets() {
        let dirs = Grid::new(4, 4, 6);
        let streams = Grid::new(4, 4, N);
        assert!(find_outlets(&dirs, &streams, OutletRule::SegmentEnds).is_empty());
        let zeros = Grid::new(4, 4, 0);
        assert!(find_outlets(&dirs, &zeros, OutletRule::SegmentEnds).is_empty());
    }
}
