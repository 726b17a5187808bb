//! Error types for histogrid.

use thiserror::Error;

use crate::types::GridDim_u;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistError {
    /// Elementwise operation between grids with different bin counts
    #[error("inconsistent bin counts: {left:?} vs {right:?}")]
    DimensionMismatch { left: GridDim_u, right: GridDim_u },
}

pub type Result<T> = std::result::Result<T, HistError>;
