use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which selector implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Block index over an ordered map, O(log n) selection
    Tree,
    /// Weight-sorted list, O(n) selection
    Linear,
}
