//! Drainage basin delineation on D8 rasters.
//!
//! Given a flow-direction grid and a stream grid, every stream outlet is
//! flooded upstream and each cell draining into it receives the outlet's
//! label. See [`delineate`] for the entry point.
pub mod config;
pub mod delineate;
pub mod direction;
pub mod error;
pub mod fill;
pub mod grid;
pub mod outlets;
pub mod queue;

pub use config::{BasinConfig, OutletRule, TieBreak};
pub use delineate::{
    delineate, delineate_batch, CategoryEntry, Delineation, DelineationStats, Delineator,
};
pub use direction::Direction;
pub use error::{BasinError, Result};
pub use grid::{Grid, Point, NULL_CELL};
pub use outlets::{find_outlets, Outlet};
