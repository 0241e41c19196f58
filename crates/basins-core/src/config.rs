use serde::{Deserialize, Serialize};

/// Which stream cells become catchment outlets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutletRule {
    /// Last cell of every segment: the downstream cell is off-grid, not a
    /// stream, or carries a different stream value (a junction).
    #[default]
    SegmentEnds,
    /// Only cells with no downstream stream cell at all.
    NetworkTermini,
}

/// How cells reachable from several outlets are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The first outlet in discovery order keeps the cell.
    #[default]
    FirstWriter,
    /// Every outlet is filled and later outlets overwrite earlier labels.
    LastWriter,
}

/// Run options for [`crate::delineate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BasinConfig {
    /// Keep unlabeled cells as `0` instead of null.
    pub zero_background: bool,
    /// Label catchments 1..=n in discovery order instead of by outlet rank.
    pub category_labels: bool,
    pub outlet_rule: OutletRule,
    pub tie_break: TieBreak,
}
