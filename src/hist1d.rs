//! One axis, one flat buffer of weighted counts.

use tracing::warn;

use crate::attributes::{DatasetAttributes, DatasetKind};
use crate::axis::Axis;
use crate::dataset::Dataset;
use crate::stats::StatSummary;
use crate::types::{Coordf32, Index1_u, Valuef32, Weightf32};

/// A 1D histogram: a uniform [Axis] plus one weighted count per bin.
///
/// Ingestion is tolerant: a sample outside the axis range is dropped without
/// comment, and an out-of-range write is a no-op. Callers that need to reject
/// such samples instead should consult [Axis::index] before filling.
#[derive(Clone, Debug)]
pub struct Hist1D {
    name: String,
    xaxis: Axis,
    buffer: Vec<Valuef32>,
    max_value: Valuef32,
    entries: u64,
    attributes: DatasetAttributes,
}

impl Hist1D {
    /// # Panics
    /// Panics if `nbins == 0` or `low >= high`.
    pub fn new(name: &str, nbins: usize, low: Coordf32, high: Coordf32) -> Self {
        Self::with_axis(name, Axis::new(nbins, low, high))
    }

    pub fn with_axis(name: &str, xaxis: Axis) -> Self {
        Self {
            name: name.to_string(),
            xaxis,
            buffer: vec![0.0; xaxis.nbins()],
            max_value: 0.0,
            entries: 0,
            attributes: DatasetAttributes::new(DatasetKind::Hist1D),
        }
    }

    /// Replace the binning and reallocate the buffer. Prior content, the
    /// entry count and the running maximum are lost.
    ///
    /// # Panics
    /// Panics if `nbins == 0` or `low >= high`.
    pub fn set(&mut self, nbins: usize, low: Coordf32, high: Coordf32) {
        self.xaxis.set(nbins, low, high);
        self.buffer = vec![0.0; nbins];
        self.max_value = 0.0;
        self.entries = 0;
    }

    pub fn xaxis(&self) -> &Axis { &self.xaxis }

    pub fn nbins(&self) -> usize { self.xaxis.nbins() }

    /// Add 1.0 to the bin containing `x`. Out-of-range samples are dropped.
    pub fn fill(&mut self, x: Coordf32) { self.fill_with(x, 1.0) }

    /// Add `weight` to the bin containing `x`. Out-of-range samples are dropped.
    pub fn fill_with(&mut self, x: Coordf32, weight: Weightf32) {
        if let Some(bin) = self.xaxis.index(x) {
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

    /// Content of bin `i`; 0.0 (with a logged warning) when `i` is out of range.
    pub fn bin_content(&self, i: Index1_u) -> Valuef32 {
        if let Some(&content) = self.buffer.get(i) {
            content
        } else {
            warn!(name = %self.name, bin = i, nbins = self.nbins(),
                  "bin content read out of range");
            0.0
        }
    }

    /// Overwrite bin `i`; out-of-range writes are silently ignored.
    pub fn set_bin_content(&mut self, i: Index1_u, value: Valuef32) {
        if let Some(content) = self.buffer.get_mut(i) {
            *content = value;
        }
    }

    /// Alias for [Hist1D::bin_content] used by generic plotting callers.
    pub fn data(&self, i: Index1_u) -> Valuef32 { self.bin_content(i) }

    /// Sum of all bin contents
    pub fn integral(&self) -> Valuef32 { self.buffer.iter().sum() }

    /// Content-weighted mean of the bin centres; 0.0 for an empty histogram.
    pub fn mean(&self) -> Valuef32 {
        let total = self.integral();
        if total == 0.0 { return 0.0 }
        let weighted: Valuef32 = self.buffer.iter().enumerate()
            .map(|(i, &c)| self.xaxis.bin_center(i) * c)
            .sum();
        weighted / total
    }

    /// Content-weighted RMS about the mean; 0.0 for an empty histogram.
    pub fn rms(&self) -> Valuef32 {
        let total = self.integral();
        if total == 0.0 { return 0.0 }
        let mean = self.mean();
        let weighted: Valuef32 = self.buffer.iter().enumerate()
            .map(|(i, &c)| {
                let d = self.xaxis.bin_center(i) - mean;
                c * d * d
            })
            .sum();
        (weighted / total).sqrt()
    }

    /// Largest bin content, by scanning the buffer.
    pub fn maximum(&self) -> Valuef32 {
        self.buffer.iter().cloned().fold(0.0, Valuef32::max)
    }

    /// Largest bin content ever reached by a fill. Cheaper than [Hist1D::maximum]
    /// but unaware of bins later lowered through `set_bin_content`.
    pub fn running_maximum(&self) -> Valuef32 { self.max_value }

    /// Number of samples accepted by `fill`/`fill_with`
    pub fn entries(&self) -> u64 { self.entries }

    /// Zero every bin, the entry count and the running maximum. Axis geometry
    /// is untouched.
    pub fn reset(&mut self) {
        self.buffer.iter_mut().for_each(|c| *c = 0.0);
        self.max_value = 0.0;
        self.entries = 0;
    }

    /// Elementwise sum of `other` into `self`, merging the entry counts and
    /// the running maximum. Requires matching bin counts (axis ranges are not
    /// compared); on mismatch logs a warning and leaves `self` unmodified.
    pub fn add(&mut self, other: &Hist1D) {
        if self.nbins() != other.nbins() {
            warn!(left = %self.name, right = %other.name,
                  left_bins = self.nbins(), right_bins = other.nbins(),
                  "cannot add histograms: inconsistent bin numbers");
            return;
        }
        for (a, b) in self.buffer.iter_mut().zip(&other.buffer) {
            *a += *b;
        }
        self.entries += other.entries;
        self.max_value = self.max_value.max(self.maximum());
    }

    /// Elementwise division of `self` by `other`; bins where `other` is zero
    /// become 0. Requires matching bin counts; on mismatch logs an error and
    /// leaves `self` unmodified.
    pub fn divide(&mut self, other: &Hist1D) {
        if self.nbins() != other.nbins() {
            tracing::error!(left = %self.name, right = %other.name,
                            left_bins = self.nbins(), right_bins = other.nbins(),
                            "cannot divide histograms: inconsistent bin numbers");
            return;
        }
        for (a, b) in self.buffer.iter_mut().zip(&other.buffer) {
            *a = if *b == 0.0 { 0.0 } else { *a / *b };
        }
    }

    pub fn stat_summary(&self) -> StatSummary {
        StatSummary {
            entries: self.entries,
            mean: self.mean(),
            rms: self.rms(),
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

impl Dataset for Hist1D {
    fn name(&self) -> &str { &self.name }
    fn set_name(&mut self, name: &str) { self.name = name.to_string() }

    fn data_size(&self, _axis: usize) -> usize { self.nbins() }

    fn data_x (&self, bin: Index1_u) -> Coordf32 { self.xaxis.bin_center(bin) }
    fn data_y (&self, bin: Index1_u) -> Coordf32 { self.bin_content(bin) }
    fn data_ex(&self, bin: Index1_u) -> Coordf32 { self.xaxis.bin_width(bin) }
    fn data_ey(&self, _bin: Index1_u) -> Coordf32 { 0.0 }

    fn attributes(&self) -> &DatasetAttributes { &self.attributes }
    fn attributes_mut(&mut self) -> &mut DatasetAttributes { &mut self.attributes }
}





#[cfg(test)]
mod test_metadata {
    use super::*;
    use crate::attributes::DatasetKind;

    #[test]
    fn titles_live_in_the_attribute_record() {
        let mut h = Hist1D::new("h", 4, 0.0, 4.0);
        h.set_title("counts");
        h.set_x_title("x [mm]");
        h.set_y_title("entries");
        assert_eq!(h.title(), "counts");
        assert_eq!(h.attributes().x_title, "x [mm]");
        assert_eq!(h.y_title(), "entries");
        assert_eq!(h.attributes().kind, DatasetKind::Hist1D);
    }

    #[test]
    fn dataset_view_exposes_centres_and_contents() {
        let mut h = Hist1D::new("h", 10, 0.0, 10.0);
        h.fill(3.5);
        assert_eq!(h.data_size(0), 10);
        assert_eq!(h.data_x(3), 3.5);
        assert_eq!(h.data_y(3), 1.0);
        assert_eq!(h.data_ex(3), 1.0);
    }
}
