//! Randomized checks of the catchment partition against a path-following model.
//!
//! A cell belongs to the catchment of an outlet iff following its flow
//! directions forward reaches that outlet. With first-writer tie-breaking the
//! winner is the earliest-discovered outlet on the forward path; with
//! last-writer it is the latest.
use std::collections::{HashMap, HashSet};

use basins_core::fill::{CatchmentFiller, FillOutcome, BACKGROUND};
use basins_core::{
    delineate, find_outlets, BasinConfig, Direction, Grid, OutletRule, Point, TieBreak, NULL_CELL,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grids(rng: &mut StdRng) -> (Grid<i32>, Grid<i32>) {
    let rows = rng.gen_range(1..=14);
    let cols = rng.gen_range(1..=14);
    let dirs: Vec<i32> = (0..rows * cols)
        .map(|_| match rng.gen_range(0..20) {
            0 => NULL_CELL,
            1 => 0,
            2 => 9,
            3 => -rng.gen_range(1..=8),
            _ => rng.gen_range(1..=8),
        })
        .collect();
    let streams: Vec<i32> = (0..rows * cols)
        .map(|_| match rng.gen_range(0..10) {
            0..=3 => rng.gen_range(1..=4),
            4 => 0,
            _ => NULL_CELL,
        })
        .collect();
    (
        Grid::from_vec(rows, cols, dirs).unwrap(),
        Grid::from_vec(rows, cols, streams).unwrap(),
    )
}

/// Discovery indices of all outlets on the forward flow path of `start`.
fn outlets_on_path(
    dirs: &Grid<i32>,
    outlet_index: &HashMap<Point, usize>,
    start: Point,
) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut cur = start;
    loop {
        if !seen.insert(cur) {
            break;
        }
        if let Some(&i) = outlet_index.get(&cur) {
            found.push(i);
        }
        match Direction::from_code(dirs.get(cur)).and_then(|d| dirs.step(cur, d)) {
            Some(next) => cur = next,
            None => break,
        }
    }
    found
}

fn expected_labels(
    dirs: &Grid<i32>,
    streams: &Grid<i32>,
    cfg: &BasinConfig,
) -> Grid<i32> {
    let outlets = find_outlets(dirs, streams, cfg.outlet_rule);
    let index: HashMap<Point, usize> =
        outlets.iter().enumerate().map(|(i, o)| (o.point(), i)).collect();
    let mut labels = Grid::new(dirs.rows, dirs.cols, NULL_CELL);
    for p in dirs.points() {
        let on_path = outlets_on_path(dirs, &index, p);
        let winner = match cfg.tie_break {
            TieBreak::FirstWriter => on_path.iter().min(),
            TieBreak::LastWriter => on_path.iter().max(),
        };
        if let Some(&i) = winner {
            let label = if cfg.category_labels {
                i as i32 + 1
            } else {
                outlets[i].rank
            };
            labels.set(p, label);
        }
    }
    labels
}

fn all_configs() -> Vec<BasinConfig> {
    let mut cfgs = Vec::new();
    for outlet_rule in [OutletRule::SegmentEnds, OutletRule::NetworkTermini] {
        for tie_break in [TieBreak::FirstWriter, TieBreak::LastWriter] {
            for category_labels in [false, true] {
                cfgs.push(BasinConfig {
                    zero_background: false,
                    category_labels,
                    outlet_rule,
                    tie_break,
                });
            }
        }
    }
    cfgs
}

#[test]
fn labels_match_forward_path_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..200 {
        let (dirs, streams) = random_grids(&mut rng);
        for cfg in all_configs() {
            let result = delineate(&dirs, &streams, &cfg).unwrap();
            let expected = expected_labels(&dirs, &streams, &cfg);
            assert_eq!(
                result.labels, expected,
                "round {round}, config {cfg:?}: labels diverge from path model"
            );
        }
    }
}

#[test]
fn queue_traffic_is_bounded_by_cell_count() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let (dirs, streams) = random_grids(&mut rng);
        let result = delineate(&dirs, &streams, &BasinConfig::default()).unwrap();
        let cells = dirs.len() as u64;
        let s = result.stats;
        assert!(s.queue_inserts <= cells, "{} inserts for {cells} cells", s.queue_inserts);
        assert_eq!(s.queue_removes, s.queue_inserts);
        assert_eq!(s.labeled_cells as u64, s.queue_inserts);
        assert_eq!(s.filled + s.skipped, s.outlets);
    }
}

#[test]
fn refilling_a_finished_grid_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(11);
    let cfg = BasinConfig {
        zero_background: true,
        ..Default::default()
    };
    for _ in 0..100 {
        let (dirs, streams) = random_grids(&mut rng);
        let result = delineate(&dirs, &streams, &cfg).unwrap();
        let mut labels = result.labels.clone();
        let mut filler = CatchmentFiller::new(labels.len(), TieBreak::FirstWriter);
        for outlet in &result.outlets {
            let out = filler.fill(&mut labels, &dirs, outlet.point(), outlet.rank).unwrap();
            assert_eq!(out, FillOutcome::Skipped);
        }
        assert_eq!(labels, result.labels);
        assert_eq!(filler.queue().inserted(), 0);
    }
}

#[test]
fn every_outlet_cell_is_labeled() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..100 {
        let (dirs, streams) = random_grids(&mut rng);
        let cfg = BasinConfig {
            zero_background: true,
            ..Default::default()
        };
        let result = delineate(&dirs, &streams, &cfg).unwrap();
        for o in &result.outlets {
            assert_ne!(result.labels.get(o.point()), BACKGROUND);
        }
    }
}
