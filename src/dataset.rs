//! The narrow read surface through which generic plotting callers consume
//! datasets, without knowing whether they hold a grid or a point sequence.

use crate::attributes::DatasetAttributes;
use crate::types::{Coordf32, Index1_u};

pub trait Dataset {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: &str);

    /// Number of data points along `axis` (0 = x, anything else = y).
    fn data_size(&self, axis: usize) -> usize;

    /// x-coordinate of point `bin`
    fn data_x(&self, bin: Index1_u) -> Coordf32;
    /// y-coordinate of point `bin`
    fn data_y(&self, bin: Index1_u) -> Coordf32;
    /// Horizontal extent of point `bin`
    fn data_ex(&self, bin: Index1_u) -> Coordf32;
    /// Vertical extent of point `bin`
    fn data_ey(&self, bin: Index1_u) -> Coordf32;

    fn attributes(&self) -> &DatasetAttributes;
    fn attributes_mut(&mut self) -> &mut DatasetAttributes;
}
