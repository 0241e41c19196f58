//! JSON raster documents: `{"rows": R, "cols": C, "data": [...]}` row-major,
//! with `null` marking no-data cells.
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use basins_core::{Grid, NULL_CELL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RasterDoc {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Option<i32>>,
}

impl RasterDoc {
    pub fn into_grid(self) -> Result<Grid<i32>> {
        ensure!(
            self.data.iter().all(|v| *v != Some(NULL_CELL)),
            "raster stores the reserved null value {NULL_CELL} as data"
        );
        let data = self.data.into_iter().map(|v| v.unwrap_or(NULL_CELL)).collect();
        Ok(Grid::from_vec(self.rows, self.cols, data)?)
    }

    pub fn from_grid(grid: &Grid<i32>) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            data: grid
                .data
                .iter()
                .map(|&v| (v != NULL_CELL).then_some(v))
                .collect(),
        }
    }
}

pub fn read_raster(path: &Path) -> Result<Grid<i32>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read raster {}", path.display()))?;
    let doc: RasterDoc = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse raster {}", path.display()))?;
    doc.into_grid()
        .with_context(|| format!("invalid raster {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string(value)?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
