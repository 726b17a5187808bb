mod exports;
pub use exports::*;

pub mod attributes;
pub mod axis;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod hist1d;
pub mod hist2d;
pub mod index;
pub mod stats;
pub mod types;
