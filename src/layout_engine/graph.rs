use serde::{Deserialize, Serialize};

use crate::model::Rect;

/// The axis along which a fork divides its area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Splits the width; children sit side by side.
    Horizontal,
    /// Splits the height; children are stacked.
    Vertical,
}

impl Orientation {
    /// Wide areas split side by side, tall or square ones split top to bottom.
    pub fn for_area(area: Rect) -> Self {
        if area.width > area.height {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}
