//! Summary statistics reported to stat-box consumers.

use serde::{Deserialize, Serialize};

use crate::types::Valuef32;

/// The numbers a stat box displays for one distribution.
///
/// Produced by the histogram containers from their own `mean`/`rms`/
/// `integral`/`maximum`; this struct holds results, it never recomputes.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct StatSummary {
    pub entries: u64,
    pub mean: Valuef32,
    pub rms: Valuef32,
    pub integral: Valuef32,
    pub maximum: Valuef32,
}

impl std::fmt::Display for StatSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Entries  {}", self.entries)?;
        writeln!(f, "Mean     {:.4}", self.mean)?;
        writeln!(f, "RMS      {:.4}", self.rms)?;
        writeln!(f, "Integral {:.4}", self.integral)?;
        write!  (f, "Maximum  {:.4}", self.maximum)
    }
}
