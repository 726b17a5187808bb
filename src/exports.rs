pub use crate::attributes::{DatasetAttributes, DatasetKind};
pub use crate::axis::Axis;
pub use crate::dataset::Dataset;
pub use crate::error::{HistError, Result};
pub use crate::graph::{GraphErrors, GraphPoint};
pub use crate::hist1d::Hist1D;
pub use crate::hist2d::Hist2D;
pub use crate::index::{index1_to_2, index2_to_1, MultiIndex};
pub use crate::stats::StatSummary;

pub use crate::types::{Coordf32, Valuef32, Weightf32};
pub use crate::types::{GridDim_u, Index1_u, Index2_u};
