//! Display metadata owned by datasets and interpreted only by rendering
//! collaborators.

use serde::{Deserialize, Serialize};

/// What sort of dataset an attribute record decorates.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DatasetKind {
    Hist1D,
    Hist2D,
    GraphErrors,
    Function,
}

/// Style and title metadata for one dataset.
///
/// A plain value: constructed once, copied field-for-field, and updated by
/// whole-record replacement. The owning dataset exposes it but never
/// interprets any of its fields.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DatasetAttributes {
    pub kind: DatasetKind,

    pub line_color: i32,
    pub line_width: i32,
    pub line_style: i32,

    pub marker_color: i32,
    pub marker_size: i32,
    pub marker_style: i32,

    pub fill_color: i32,
    pub fill_style: i32,

    /// Stat-box options code, opaque to the core
    pub opt_stat: i32,

    pub title: String,
    pub x_title: String,
    pub y_title: String,
}

impl DatasetAttributes {
    pub fn new(kind: DatasetKind) -> Self {
        Self {
            kind,
            line_color: 1,
            line_width: 1,
            line_style: 1,
            marker_color: 1,
            marker_size: 1,
            marker_style: 1,
            fill_color: 0,
            fill_style: 1,
            opt_stat: 0,
            title: String::new(),
            x_title: String::new(),
            y_title: String::new(),
        }
    }
}

impl Default for DatasetAttributes {
    fn default() -> Self { Self::new(DatasetKind::Hist1D) }
}

#[cfg(test)]
mod test_attributes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn copies_share_no_state() {
        let mut original = DatasetAttributes::new(DatasetKind::Hist2D);
        original.title = "before".into();
        let copy = original.clone();
        original.title = "after".into();
        original.line_color = 7;
        assert_eq!(copy.title, "before");
        assert_eq!(copy.line_color, 1);
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let attr = DatasetAttributes::default();
        assert_eq!(attr.kind, DatasetKind::Hist1D);
        assert_eq!((attr.line_color, attr.line_width, attr.line_style), (1, 1, 1));
        assert_eq!((attr.fill_color, attr.fill_style), (0, 1));
        assert_eq!(attr.opt_stat, 0);
        assert_eq!(attr.title, "");
    }
}
