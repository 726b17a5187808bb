//! Two axes, a flat buffer, and the derived views (projections, slices,
//! profiles, regions) built by re-binning accumulated content.

use itertools::iproduct;
use tracing::{error, warn};

use crate::attributes::{DatasetAttributes, DatasetKind};
use crate::axis::Axis;
use crate::dataset::Dataset;
use crate::error::{HistError, Result};
use crate::graph::GraphErrors;
use crate::hist1d::Hist1D;
use crate::index::MultiIndex;
use crate::stats::StatSummary;
use crate::types::{Coordf32, GridDim_u, Index1_u, Valuef32, Weightf32};

/// A 2D histogram over a uniform x/y grid.
///
/// Samples are binned per axis and accumulated in a flat buffer addressed
/// through a [MultiIndex] (x varies fastest). Ingestion is tolerant: if
/// either coordinate falls outside its axis the whole sample is dropped, with
/// no partial fill. The derived views re-bin accumulated content; the raw
/// samples are not retained.
#[derive(Clone, Debug)]
pub struct Hist2D {
    name: String,
    xaxis: Axis,
    yaxis: Axis,
    index: MultiIndex,
    buffer: Vec<Valuef32>,
    max_value: Valuef32,
    entries: u64,
    attributes: DatasetAttributes,
}

impl Hist2D {
    /// # Panics
    /// Panics if either axis has zero bins or an empty/reversed range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(name: &str,
               nx: usize, xmin: Coordf32, xmax: Coordf32,
               ny: usize, ymin: Coordf32, ymax: Coordf32) -> Self {
        let xaxis = Axis::new(nx, xmin, xmax);
        let yaxis = Axis::new(ny, ymin, ymax);
        let index = MultiIndex::new(&[nx, ny]);
        let buffer = vec![0.0; index.array_size()];
        Self {
            name: name.to_string(),
            xaxis, yaxis, index, buffer,
            max_value: 0.0,
            entries: 0,
            attributes: DatasetAttributes::new(DatasetKind::Hist2D),
        }
    }

    /// Replace both axes jointly and reallocate the buffer. Prior content,
    /// the entry count and the running maximum are lost.
    ///
    /// # Panics
    /// Panics under the same conditions as [Hist2D::new].
    #[allow(clippy::too_many_arguments)]
    pub fn set(&mut self,
               nx: usize, xmin: Coordf32, xmax: Coordf32,
               ny: usize, ymin: Coordf32, ymax: Coordf32) {
        self.xaxis.set(nx, xmin, xmax);
        self.yaxis.set(ny, ymin, ymax);
        self.index = MultiIndex::new(&[nx, ny]);
        self.buffer = vec![0.0; self.index.array_size()];
        self.max_value = 0.0;
        self.entries = 0;
    }

    pub fn xaxis(&self) -> &Axis { &self.xaxis }
    pub fn yaxis(&self) -> &Axis { &self.yaxis }

    /// Bin counts per axis, `[nx, ny]`
    pub fn dims(&self) -> GridDim_u { [self.xaxis.nbins(), self.yaxis.nbins()] }

    fn is_valid_bins(&self, bx: usize, by: usize) -> bool {
        bx < self.xaxis.nbins() && by < self.yaxis.nbins()
    }

    /// Linear buffer offset of the cell containing `(x, y)`; `None` when
    /// either coordinate is out of range. Strict callers use this to reject
    /// samples that `fill` would silently drop.
    pub fn find_bin(&self, x: Coordf32, y: Coordf32) -> Option<Index1_u> {
        let bx = self.xaxis.index(x)?;
        let by = self.yaxis.index(y)?;
        Some(self.index.array_index(&[bx, by]))
    }

    /// Add 1.0 to the cell containing `(x, y)`. Dropped entirely when either
    /// coordinate is out of range.
    pub fn fill(&mut self, x: Coordf32, y: Coordf32) { self.fill_with(x, y, 1.0) }

    /// Add `weight` to the cell containing `(x, y)`. Dropped entirely when
    /// either coordinate is out of range.
    pub fn fill_with(&mut self, x: Coordf32, y: Coordf32, weight: Weightf32) {
        if let Some(bin) = self.find_bin(x, y) {
            self.add_bin_content(bin, weight);
        }
    }

    fn add_bin_content(&mut self, bin: Index1_u, weight: Weightf32) {
        self.buffer[bin] += weight;
        self.entries += 1;
        if self.buffer[bin] > self.max_value {
            self.max_value = self.buffer[bin];
        }
    }

    /// Content of cell `(bx, by)`; 0.0 (with a logged warning) when either
    /// index is out of range.
    pub fn bin_content(&self, bx: usize, by: usize) -> Valuef32 {
        if self.is_valid_bins(bx, by) {
            self.buffer[self.index.array_index(&[bx, by])]
        } else {
            warn!(name = %self.name, bx, by, dims = ?self.dims(),
                  "bin content read out of range");
            0.0
        }
    }

    /// Overwrite cell `(bx, by)`; out-of-range writes are silently ignored.
    pub fn set_bin_content(&mut self, bx: usize, by: usize, value: Valuef32) {
        if self.is_valid_bins(bx, by) {
            let i = self.index.array_index(&[bx, by]);
            self.buffer[i] = value;
        }
    }

    /// Alias for [Hist2D::bin_content] used by generic plotting callers.
    pub fn data(&self, bx: usize, by: usize) -> Valuef32 { self.bin_content(bx, by) }

    /// Sum of all cell contents
    pub fn integral(&self) -> Valuef32 { self.buffer.iter().sum() }

    /// Largest cell content, by scanning the buffer.
    pub fn maximum(&self) -> Valuef32 {
        self.buffer.iter().cloned().fold(0.0, Valuef32::max)
    }

    /// Largest cell content ever reached by a fill. Cheaper than
    /// [Hist2D::maximum] but unaware of cells later lowered through
    /// `set_bin_content`.
    pub fn running_maximum(&self) -> Valuef32 { self.max_value }

    /// Number of samples accepted by `fill`/`fill_with`
    pub fn entries(&self) -> u64 { self.entries }

    /// Zero every cell, the entry count and the running maximum. Axis
    /// geometry is untouched.
    pub fn reset(&mut self) {
        self.buffer.iter_mut().for_each(|c| *c = 0.0);
        self.max_value = 0.0;
        self.entries = 0;
    }

    /// Elementwise sum of `other` into `self`, merging the entry counts and
    /// the running maximum. Requires matching bin counts on both axes (ranges
    /// are not compared); on mismatch logs a warning and leaves `self`
    /// unmodified.
    pub fn add(&mut self, other: &Hist2D) {
        if self.dims() != other.dims() {
            warn!(left = %self.name, right = %other.name,
                  left_dims = ?self.dims(), right_dims = ?other.dims(),
                  "cannot add histograms: inconsistent bin numbers");
            return;
        }
        for (a, b) in self.buffer.iter_mut().zip(&other.buffer) {
            *a += *b;
        }
        self.entries += other.entries;
        self.max_value = self.max_value.max(self.maximum());
    }

    /// Elementwise division of `self` by `other`; cells where `other` is zero
    /// become 0. Requires matching bin counts; on mismatch logs an error and
    /// leaves `self` unmodified.
    pub fn divide(&mut self, other: &Hist2D) {
        if self.dims() != other.dims() {
            error!(left = %self.name, right = %other.name,
                   left_dims = ?self.dims(), right_dims = ?other.dims(),
                   "cannot divide histograms: inconsistent bin numbers");
            return;
        }
        for (a, b) in self.buffer.iter_mut().zip(&other.buffer) {
            *a = if *b == 0.0 { 0.0 } else { *a / *b };
        }
    }

    /// Elementwise `h1 / h2` as a new histogram named `"{h1}_DIV"`, sized
    /// from `h1`'s axes. Cells where `h2` is zero become 0, the same policy
    /// as the in-place [Hist2D::divide]. Mismatched bin counts are an error.
    pub fn divided(h1: &Hist2D, h2: &Hist2D) -> Result<Hist2D> {
        if h1.dims() != h2.dims() {
            error!(left = %h1.name, right = %h2.name,
                   left_dims = ?h1.dims(), right_dims = ?h2.dims(),
                   "cannot divide histograms: inconsistent bin numbers");
            return Err(HistError::DimensionMismatch { left: h1.dims(), right: h2.dims() });
        }
        let mut out = h1.hist_clone(&format!("{}_DIV", h1.name));
        out.divide(h2);
        Ok(out)
    }

    /// 1D histogram over the x axis where each bin sums all y cells of the
    /// corresponding column.
    pub fn projection_x(&self) -> Hist1D {
        let [nx, ny] = self.dims();
        let mut proj = Hist1D::with_axis(&format!("{}_px", self.name), self.xaxis);
        for bx in 0..nx {
            let height = (0..ny).map(|by| self.bin_content(bx, by)).sum();
            proj.set_bin_content(bx, height);
        }
        proj
    }

    /// 1D histogram over the y axis where each bin sums all x cells of the
    /// corresponding row.
    pub fn projection_y(&self) -> Hist1D {
        let [nx, ny] = self.dims();
        let mut proj = Hist1D::with_axis(&format!("{}_py", self.name), self.yaxis);
        for by in 0..ny {
            let height = (0..nx).map(|bx| self.bin_content(bx, by)).sum();
            proj.set_bin_content(by, height);
        }
        proj
    }

    /// The y-distribution at fixed x bin `bx`: a single column extraction,
    /// not a sum. Transpose partner of [Hist2D::slice_y].
    pub fn slice_x(&self, bx: usize) -> Hist1D {
        let mut slice = Hist1D::with_axis(&format!("{}_x{}", self.name, bx), self.yaxis);
        for by in 0..self.yaxis.nbins() {
            slice.set_bin_content(by, self.bin_content(bx, by));
        }
        slice
    }

    /// The x-distribution at fixed y bin `by`: a single row extraction,
    /// not a sum. Transpose partner of [Hist2D::slice_x].
    pub fn slice_y(&self, by: usize) -> Hist1D {
        let mut slice = Hist1D::with_axis(&format!("{}_y{}", self.name, by), self.xaxis);
        for bx in 0..self.xaxis.nbins() {
            slice.set_bin_content(bx, self.bin_content(bx, by));
        }
        slice
    }

    /// All per-bin slices along x, in bin order.
    pub fn slices_x(&self) -> Vec<Hist1D> {
        (0..self.xaxis.nbins()).map(|bx| self.slice_x(bx)).collect()
    }

    /// All per-bin slices along y, in bin order.
    pub fn slices_y(&self) -> Vec<Hist1D> {
        (0..self.yaxis.nbins()).map(|by| self.slice_y(by)).collect()
    }

    /// Per x bin, the mean and RMS of the y-distribution in that column, as
    /// points `(bin centre, mean, half bin width, RMS)`. Columns whose
    /// integral does not exceed 1.0 carry too little content for a meaningful
    /// RMS and contribute no point.
    pub fn profile_x(&self) -> GraphErrors {
        let mut graph = GraphErrors::new(&format!("{}_pfx", self.name));
        for bx in 0..self.xaxis.nbins() {
            let slice = self.slice_x(bx);
            if slice.integral() > 1.0 {
                graph.add_point(self.xaxis.bin_center(bx), slice.mean(),
                                self.xaxis.bin_width(bx) / 2.0, slice.rms());
            }
        }
        graph
    }

    /// Per y bin, the mean and RMS of the x-distribution in that row; same
    /// minimum-statistics guard as [Hist2D::profile_x].
    pub fn profile_y(&self) -> GraphErrors {
        let mut graph = GraphErrors::new(&format!("{}_pfy", self.name));
        for by in 0..self.yaxis.nbins() {
            let slice = self.slice_y(by);
            if slice.integral() > 1.0 {
                graph.add_point(self.yaxis.bin_center(by), slice.mean(),
                                self.yaxis.bin_width(by) / 2.0, slice.rms());
            }
        }
        graph
    }

    /// Deep copy under a new name: no state is shared with the original.
    pub fn hist_clone(&self, name: &str) -> Hist2D {
        let mut clone = self.clone();
        clone.name = name.to_string();
        clone
    }

    /// Carve the rectangular sub-grid `[bx0, bx1) × [by0, by1)` into a new
    /// histogram whose axes are rescaled to the sub-range's physical extent.
    /// Region cell `(i, j)` holds the content of source cell `(bx0+i, by0+j)`.
    ///
    /// # Panics
    /// Panics if either range is empty (`bx1 <= bx0` or `by1 <= by0`).
    pub fn region(&self, name: &str, bx0: usize, bx1: usize, by0: usize, by1: usize) -> Hist2D {
        let xw = self.xaxis.bin_width(bx0);
        let new_xmin = self.xaxis.low() + xw * bx0 as Coordf32;
        let new_xmax = self.xaxis.low() + xw * bx1 as Coordf32;

        let yw = self.yaxis.bin_width(by0);
        let new_ymin = self.yaxis.low() + yw * by0 as Coordf32;
        let new_ymax = self.yaxis.low() + yw * by1 as Coordf32;

        let mut reg = Hist2D::new(name,
                                  bx1 - bx0, new_xmin, new_xmax,
                                  by1 - by0, new_ymin, new_ymax);
        for (by, bx) in iproduct!(by0..by1, bx0..bx1) {
            reg.set_bin_content(bx - bx0, by - by0, self.bin_content(bx, by));
        }
        reg
    }

    /// 2D copy-out of the grid (`buffer[bx][by]`) for plotting callers.
    pub fn content_buffer(&self) -> Vec<Vec<Valuef32>> {
        let [nx, ny] = self.dims();
        (0..nx)
            .map(|bx| (0..ny).map(|by| self.bin_content(bx, by)).collect())
            .collect()
    }

    /// Summary statistics with mean/RMS taken along x (from the x
    /// projection); entry count, integral and maximum cover the whole grid.
    pub fn stat_summary_x(&self) -> StatSummary { self.stat_summary(self.projection_x()) }

    /// Summary statistics with mean/RMS taken along y.
    pub fn stat_summary_y(&self) -> StatSummary { self.stat_summary(self.projection_y()) }

    fn stat_summary(&self, projection: Hist1D) -> StatSummary {
        StatSummary {
            entries: self.entries,
            mean: projection.mean(),
            rms: projection.rms(),
            integral: self.integral(),
            maximum: self.maximum(),
        }
    }

    pub fn title(&self) -> &str { &self.attributes.title }
    pub fn set_title(&mut self, title: &str) { self.attributes.title = title.to_string() }
    pub fn x_title(&self) -> &str { &self.attributes.x_title }
    pub fn set_x_title(&mut self, title: &str) { self.attributes.x_title = title.to_string() }
    pub fn y_title(&self) -> &str { &self.attributes.y_title }
    pub fn set_y_title(&mut self, title: &str) { self.attributes.y_title = title.to_string() }

    /// Whole-record replacement of the style metadata
    pub fn set_attributes(&mut self, attributes: DatasetAttributes) {
        self.attributes = attributes;
    }
}

impl Dataset for Hist2D {
    fn name(&self) -> &str { &self.name }
    fn set_name(&mut self, name: &str) { self.name = name.to_string() }

    fn data_size(&self, axis: usize) -> usize {
        if axis == 0 { self.xaxis.nbins() } else { self.yaxis.nbins() }
    }

    fn data_x (&self, bin: Index1_u) -> Coordf32 { self.xaxis.bin_center(bin) }
    fn data_y (&self, bin: Index1_u) -> Coordf32 { self.yaxis.bin_center(bin) }
    fn data_ex(&self, bin: Index1_u) -> Coordf32 { self.xaxis.bin_width(bin) }
    fn data_ey(&self, bin: Index1_u) -> Coordf32 { self.yaxis.bin_width(bin) }

    fn attributes(&self) -> &DatasetAttributes { &self.attributes }
    fn attributes_mut(&mut self) -> &mut DatasetAttributes { &mut self.attributes }
}




#[cfg(test)]
mod test_views {
    use super::*;
    use float_eq::assert_float_eq;
    use itertools::iproduct;
    use rstest::rstest;

    fn unit_grid(nx: usize, ny: usize) -> Hist2D {
        let mut h = Hist2D::new("h", nx, 0.0, nx as Coordf32, ny, 0.0, ny as Coordf32);
        for (bx, by) in iproduct!(0..nx, 0..ny) {
            h.set_bin_content(bx, by, 1.0);
        }
        h
    }

    #[rstest(/**/ nx, ny,
             case(3, 5),
             case(5, 3),
             case(4, 4),
    )]
    fn projections_of_a_unit_grid_sum_the_other_axis(nx: usize, ny: usize) {
        let h = unit_grid(nx, ny);
        let px = h.projection_x();
        let py = h.projection_y();
        assert_eq!(px.nbins(), nx);
        assert_eq!(py.nbins(), ny);
        for bx in 0..nx { assert_float_eq!(px.bin_content(bx), ny as Valuef32, ulps <= 1) }
        for by in 0..ny { assert_float_eq!(py.bin_content(by), nx as Valuef32, ulps <= 1) }
    }

    #[test]
    fn projection_keeps_the_source_axis() {
        let h = Hist2D::new("h", 10, -5.0, 5.0, 20, 0.0, 1.0);
        let px = h.projection_x();
        assert_eq!(px.xaxis(), h.xaxis());
        let py = h.projection_y();
        assert_eq!(py.xaxis(), h.yaxis());
    }

    #[test]
    fn slices_extract_rows_and_columns_without_summing() {
        let mut h = Hist2D::new("h", 4, 0.0, 4.0, 3, 0.0, 3.0);
        for (bx, by) in iproduct!(0..4, 0..3) {
            h.set_bin_content(bx, by, (10 * bx + by) as Valuef32);
        }
        let col = h.slice_x(2);
        assert_eq!(col.nbins(), 3);
        for by in 0..3 {
            assert_float_eq!(col.bin_content(by), h.bin_content(2, by), ulps <= 0);
        }
        let row = h.slice_y(1);
        assert_eq!(row.nbins(), 4);
        for bx in 0..4 {
            assert_float_eq!(row.bin_content(bx), h.bin_content(bx, 1), ulps <= 0);
        }
    }

    #[test]
    fn slice_pairs_are_transposes_of_each_other() {
        let mut h = Hist2D::new("h", 3, 0.0, 3.0, 3, 0.0, 3.0);
        for (bx, by) in iproduct!(0..3, 0..3) {
            h.set_bin_content(bx, by, (1 + bx * 3 + by) as Valuef32);
        }
        for k in 0..3 {
            let col = h.slice_x(k);
            for j in 0..3 {
                assert_float_eq!(col.bin_content(j), h.slice_y(j).bin_content(k), ulps <= 0);
            }
        }
    }

    #[test]
    fn all_slices_are_named_by_index() {
        let h = unit_grid(3, 2);
        let xs = h.slices_x();
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[0].name(), "h_x0");
        assert_eq!(xs[2].name(), "h_x2");
        let ys = h.slices_y();
        assert_eq!(ys.len(), 2);
        assert_eq!(ys[1].name(), "h_y1");
    }

    #[test]
    fn clone_shares_no_state_with_the_original() {
        let mut h = unit_grid(3, 3);
        let copy = h.hist_clone("copy");
        h.set_bin_content(1, 1, 99.0);
        h.set_name("renamed");
        assert_eq!(copy.name(), "copy");
        assert_float_eq!(copy.bin_content(1, 1), 1.0, ulps <= 1);
    }

    #[test]
    fn region_rescales_axes_and_preserves_content() {
        let mut h = Hist2D::new("h", 10, 0.0, 10.0, 10, 0.0, 10.0);
        for (bx, by) in iproduct!(0..10, 0..10) {
            h.set_bin_content(bx, by, (10 * bx + by) as Valuef32);
        }
        let r = h.region("r", 2, 5, 4, 8);
        assert_eq!(r.dims(), [3, 4]);
        assert_float_eq!(*r.xaxis().low(),  2.0, ulps <= 1);
        assert_float_eq!(*r.xaxis().high(), 5.0, ulps <= 1);
        assert_float_eq!(*r.yaxis().low(),  4.0, ulps <= 1);
        assert_float_eq!(*r.yaxis().high(), 8.0, ulps <= 1);
        for (i, j) in iproduct!(0..3, 0..4) {
            assert_float_eq!(r.bin_content(i, j), h.bin_content(2 + i, 4 + j), ulps <= 0);
        }
    }

    #[test]
    fn content_buffer_matches_cellwise_reads() {
        let h = unit_grid(3, 2);
        let buff = h.content_buffer();
        assert_eq!(buff.len(), 3);
        assert_eq!(buff[0].len(), 2);
        for (bx, by) in iproduct!(0..3, 0..2) {
            assert_float_eq!(buff[bx][by], h.bin_content(bx, by), ulps <= 0);
        }
    }
}
