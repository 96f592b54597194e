use crate::common::config::GapSettings;
use crate::model::Rect;

/// Shrinks a monitor work area by the configured outer gaps.
pub fn compute_tiling_area(screen: Rect, gaps: &GapSettings) -> Rect {
    let outer = &gaps.outer;
    if outer.is_zero() {
        return screen;
    }
    let (top, left, bottom, right) =
        (outer.top as i32, outer.left as i32, outer.bottom as i32, outer.right as i32);
    Rect {
        x: screen.x + left,
        y: screen.y + top,
        width: (screen.width - left - right).max(0),
        height: (screen.height - top - bottom).max(0),
    }
}
