use std::fmt;

use serde::{Deserialize, Serialize};

/// A window-system rectangle in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn max_x(&self) -> i32 { self.x + self.width }

    pub fn max_y(&self) -> i32 { self.y + self.height }

    pub fn is_empty(&self) -> bool { self.width <= 0 || self.height <= 0 }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x, self.y, self.width, self.height)
    }
}
