//! Point-with-errors sequences: the target of the profile operations.

use serde::{Deserialize, Serialize};

use crate::attributes::{DatasetAttributes, DatasetKind};
use crate::dataset::Dataset;
use crate::types::{Coordf32, Index1_u, Valuef32};

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct GraphPoint {
    pub x: Coordf32,
    pub y: Valuef32,
    pub ex: Coordf32,
    pub ey: Valuef32,
}

/// An ordered sequence of `(x, y)` points with horizontal and vertical
/// extents. Points are kept in insertion order; nothing is binned.
#[derive(Clone, Debug)]
pub struct GraphErrors {
    name: String,
    points: Vec<GraphPoint>,
    attributes: DatasetAttributes,
}

impl GraphErrors {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            points: vec![],
            attributes: DatasetAttributes::new(DatasetKind::GraphErrors),
        }
    }

    pub fn add_point(&mut self, x: Coordf32, y: Valuef32, ex: Coordf32, ey: Valuef32) {
        self.points.push(GraphPoint { x, y, ex, ey });
    }

    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn points(&self) -> &[GraphPoint] { &self.points }

    pub fn iter(&self) -> impl Iterator<Item = &GraphPoint> { self.points.iter() }
}

impl Dataset for GraphErrors {
    fn name(&self) -> &str { &self.name }
    fn set_name(&mut self, name: &str) { self.name = name.to_string() }

    fn data_size(&self, _axis: usize) -> usize { self.points.len() }

    fn data_x (&self, bin: Index1_u) -> Coordf32 { self.points.get(bin).map_or(0.0, |p| p.x ) }
    fn data_y (&self, bin: Index1_u) -> Coordf32 { self.points.get(bin).map_or(0.0, |p| p.y ) }
    fn data_ex(&self, bin: Index1_u) -> Coordf32 { self.points.get(bin).map_or(0.0, |p| p.ex) }
    fn data_ey(&self, bin: Index1_u) -> Coordf32 { self.points.get(bin).map_or(0.0, |p| p.ey) }

    fn attributes(&self) -> &DatasetAttributes { &self.attributes }
    fn attributes_mut(&mut self) -> &mut DatasetAttributes { &mut self.attributes }
}

#[cfg(test)]
mod test_graph {
    use super::*;

    #[test]
    fn points_keep_insertion_order() {
        let mut g = GraphErrors::new("g");
        g.add_point(1.0, 10.0, 0.5, 1.0);
        g.add_point(2.0, 20.0, 0.5, 2.0);
        assert_eq!(g.len(), 2);
        assert_eq!(g.data_x(0), 1.0);
        assert_eq!(g.data_y(1), 20.0);
        assert_eq!(g.data_ey(1), 2.0);
    }

    #[test]
    fn out_of_range_reads_degrade_to_zero() {
        let mut g = GraphErrors::new("g");
        g.add_point(1.0, 10.0, 0.5, 1.0);
        assert_eq!(g.data_x(1), 0.0);
        assert_eq!(g.data_y(99), 0.0);
        assert_eq!(g.data_ex(1), 0.0);
        assert_eq!(g.data_ey(1), 0.0);
    }

    #[test]
    fn tagged_as_graph() {
        let g = GraphErrors::new("g");
        assert_eq!(g.attributes().kind, DatasetKind::GraphErrors);
    }
}
