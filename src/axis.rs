use ndhistogram::axis::BinInterval;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::types::Coordf32;

/// A uniform axis with equal-sized bins.
///
/// An axis with `nbins` equally-spaced, equal-sized bins, in `[low, high)`.
/// Entries outside this interval belong to no bin: `index` reports them as
/// `None` and it is up to the caller to drop or reject them. There are no
/// underflow/overflow bins, so this axis has exactly `nbins` bins.
///
/// # Examples
/// ```
/// use histogrid::Axis;
/// let axis = Axis::new(10, 0.0, 1.0);
/// assert_eq!(axis.index( 0.25), Some(2));
/// assert_eq!(axis.index(-0.25), None);
/// assert_eq!(axis.bin_center(2), 0.25);
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Serialize, Deserialize)]
pub struct Axis<T = Coordf32> {
    nbins: usize,
    low: T,
    high: T,
    step: T,
}

impl<T: Float> Axis<T> {
    /// Create an axis with `nbins` uniformly-spaced bins in the range `[low, high)`.
    ///
    /// # Panics
    /// Panics if `nbins == 0` or `low >= high`.
    pub fn new(nbins: usize, low: T, high: T) -> Self {
        if nbins == 0  { panic!("Need more than zero bins on axis") }
        if low >= high { panic!("Axis range must satisfy low < high") }
        let step = (high - low) / T::from(nbins).expect("Failed to convert nbins to coordinate type");
        Self { nbins, low, high, step }
    }

    /// Atomically replace the partition: all three parameters change together
    /// and the step size is recomputed.
    ///
    /// # Panics
    /// Panics under the same conditions as [Axis::new].
    pub fn set(&mut self, nbins: usize, low: T, high: T) {
        *self = Self::new(nbins, low, high);
    }

    /// Bin index containing `value`: `None` when `value` lies outside `[low, high)`.
    #[inline]
    pub fn index(&self, value: T) -> Option<usize> {
        if value < self.low || value >= self.high { return None }
        let i = ((value - self.low) / self.step).to_usize()?;
        // (value - low) / step can round up to nbins when value is just below high
        Some(i.min(self.nbins - 1))
    }

    /// Centre of bin `i`. Defined for any `i`, including beyond the last bin.
    pub fn bin_center(&self, i: usize) -> T {
        self.low + self.step * (T::from(i).expect("Failed to convert bin number to coordinate type") + T::from(0.5).unwrap())
    }

    /// Width of bin `i`: uniform, so independent of `i`.
    pub fn bin_width(&self, _i: usize) -> T { self.step }

    /// Iterator over the centres of all bins, in order.
    pub fn centers(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.nbins).map(|i| self.bin_center(i))
    }
}

impl<T> Axis<T> {
    /// Number of bins on the axis
    pub fn nbins(&self) -> usize { self.nbins }
    /// Low edge of axis
    pub fn low (&self) -> &T { &self.low }
    /// High edge of axis
    pub fn high(&self) -> &T { &self.high }
    /// Bin width
    pub fn step(&self) -> &T { &self.step }
}

/// Single bin covering `[0, 1)`
impl<T: Float> Default for Axis<T> {
    fn default() -> Self { Self::new(1, T::zero(), T::one()) }
}

impl<T: Float> ndhistogram::axis::Axis for Axis<T> {
    type Coordinate = T;
    type BinInterval = BinInterval<T>;

    #[inline]
    fn index(&self, coordinate: &Self::Coordinate) -> Option<usize> {
        Axis::index(self, *coordinate)
    }

    fn num_bins(&self) -> usize { self.nbins }

    fn bin(&self, index: usize) -> Option<<Self as ndhistogram::axis::Axis>::BinInterval> {
        if index >= self.nbins { return None }
        let start = self.low + self.step * T::from(index)?;
        Some(BinInterval::new(start, start + self.step))
    }
}

#[cfg(test)]
mod test_index {
    use super::*;
    use rstest::rstest;

    #[rstest(/**/ value, expected,
             case( 0.0 , Some(0)),
             case( 0.09, Some(0)),
             case( 0.1 , Some(1)),
             case( 0.19, Some(1)),
             case( 0.2 , Some(2)),
             case( 0.99, Some(9)),
             case( 1.0 , None),
             case( 1.5 , None),
             case(-0.01, None),
             case(-5.0 , None),
    )]
    fn in_and_out_of_range(value: Coordf32, expected: Option<usize>) {
        let axis = Axis::new(10, 0.0, 1.0);
        assert_eq!(axis.index(value), expected);
    }

    #[test]
    fn value_just_below_high_lands_in_last_bin() {
        let axis = Axis::new(10, 0.0, 10.0);
        assert_eq!(axis.index(9.999_999), Some(9));
    }

    #[test]
    fn offset_range() {
        let axis = Axis::new(4, -2.0, 2.0);
        assert_eq!(axis.index(-2.0), Some(0));
        assert_eq!(axis.index(-0.5), Some(1));
        assert_eq!(axis.index( 0.5), Some(2));
        assert_eq!(axis.index( 1.9), Some(3));
    }
}

#[cfg(test)]
mod test_geometry {
    use super::*;
    use float_eq::assert_float_eq;
    use rstest::rstest;

    #[rstest(/**/ bin, expected_center,
             case(0, 0.5),
             case(1, 1.5),
             case(9, 9.5),
    )]
    fn centers(bin: usize, expected_center: Coordf32) {
        let axis = Axis::new(10, 0.0, 10.0);
        assert_float_eq!(axis.bin_center(bin), expected_center, ulps <= 1);
        assert_float_eq!(axis.bin_width(bin), 1.0, ulps <= 1);
    }

    #[test]
    fn set_replaces_whole_partition() {
        let mut axis = Axis::<Coordf32>::new(10, 0.0, 10.0);
        axis.set(5, -1.0, 1.0);
        assert_eq!(axis.nbins(), 5);
        assert_float_eq!(*axis.low (), -1.0, ulps <= 1);
        assert_float_eq!(*axis.high(),  1.0, ulps <= 1);
        assert_float_eq!(*axis.step(),  0.4, ulps <= 1);
    }

    #[test]
    fn default_is_single_unit_bin() {
        let axis = Axis::<Coordf32>::default();
        assert_eq!(axis.nbins(), 1);
        assert_eq!(axis.index(0.5), Some(0));
        assert_eq!(axis.index(1.0), None);
    }

    #[test]
    #[should_panic]
    fn zero_bins_rejected() { Axis::new(0, 0.0, 1.0); }

    #[test]
    #[should_panic]
    fn empty_range_rejected() { Axis::new(10, 1.0, 1.0); }

    #[test]
    #[should_panic]
    fn reversed_range_rejected() { Axis::new(10, 1.0, 0.0); }
}
