//! Mapping between multi-dimensional bin coordinates and flat buffer offsets.

use serde::{Deserialize, Serialize};

use crate::types::Index1_u;

// --------------------------------------------------------------------------------
//                  Conversion between 1d and 2d indices

use std::ops::{Add, Div, Mul, Rem};

/// First dimension varies fastest.
pub fn index2_to_1<T>([ix, iy]: [T; 2], [nx, _ny]: [T; 2]) -> T
where
    T: Mul<Output = T> + Add<Output = T>
{
    ix + iy * nx
}

pub fn index1_to_2<T>(i: T, [nx, _ny]: [T; 2]) -> [T; 2]
where
    T: Div<Output = T> +
    Rem<Output = T> +
    Copy
{
    let y = i / nx;
    let x = i % nx;
    [x, y]
}

// --------------------------------------------------------------------------------

/// Maps a tuple of per-dimension bin coordinates to a single offset into a
/// flat buffer, and reports the buffer capacity the grid needs.
///
/// `array_index` performs no bounds checking: callers must ensure each
/// coordinate lies in `[0, dims[i])` (the histogram containers do so through
/// their axis range checks) before using the result to address a buffer.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MultiIndex {
    dims: Vec<usize>,
}

impl MultiIndex {
    pub fn new(dims: &[usize]) -> Self {
        Self { dims: dims.to_vec() }
    }

    /// Required flat-buffer capacity: the product of all per-dimension bin counts.
    pub fn array_size(&self) -> Index1_u {
        self.dims.iter().product()
    }

    /// Linear offset of `coords`, first dimension varying fastest.
    #[inline]
    pub fn array_index(&self, coords: &[usize]) -> Index1_u {
        debug_assert_eq!(coords.len(), self.dims.len());
        coords.iter().zip(&self.dims).rev()
            .fold(0, |acc, (&c, &n)| acc * n + c)
    }

    /// Per-dimension bin counts, in axis order.
    pub fn dims(&self) -> &[usize] { &self.dims }
}
