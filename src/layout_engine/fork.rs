use serde::{Deserialize, Serialize};

use super::{AutoTiler, Orientation};
use crate::common::config::GapSettings;
use crate::ecs::Entity;
use crate::model::Rect;
use crate::sys::WindowFrames;

pub const MIN_RATIO: f32 = 0.05;
pub const MAX_RATIO: f32 = 0.95;

/// An edge of the tiling tree: either a sub-fork or a window leaf.
///
/// Both variants are plain handles. The fork lives in the [`AutoTiler`]'s
/// storage, the window belongs to whoever created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TilingNode {
    Fork(Entity),
    Window(Entity),
}

impl TilingNode {
    pub fn entity(self) -> Entity {
        match self {
            TilingNode::Fork(entity) | TilingNode::Window(entity) => entity,
        }
    }

    pub fn is_fork(self, fork: Entity) -> bool { self == TilingNode::Fork(fork) }

    pub fn is_window(self, window: Entity) -> bool { self == TilingNode::Window(window) }

    /// Moves a window into `area`, or recursively tiles a fork into it.
    pub fn tile(
        self,
        tiler: &mut AutoTiler,
        area: Rect,
        gaps: &GapSettings,
        windows: &mut impl WindowFrames,
    ) {
        match self {
            TilingNode::Fork(fork) => tiler.tile(fork, area, gaps, windows),
            TilingNode::Window(window) => windows.move_resize(window, area),
        }
    }

    /// The window's current frame, or the area a fork was last tiled into.
    pub fn area(self, tiler: &AutoTiler, windows: &impl WindowFrames) -> Option<Rect> {
        match self {
            TilingNode::Fork(fork) => tiler.fork(fork).and_then(|fork| fork.area),
            TilingNode::Window(window) => Some(windows.frame_rect(window)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    Left,
    Right,
}

/// An internal node of the tiling tree.
///
/// `left` is always present; a fork without a `right` branch passes its whole
/// area through to `left`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TilingFork {
    pub left: TilingNode,
    pub right: Option<TilingNode>,
    pub parent: Option<Entity>,
    pub orientation: Orientation,
    ratio: f32,
    /// The rectangle this fork was last tiled into.
    pub area: Option<Rect>,
}

impl TilingFork {
    pub fn new(left: TilingNode, right: Option<TilingNode>) -> Self {
        Self {
            left,
            right,
            parent: None,
            orientation: Orientation::Horizontal,
            ratio: 0.5,
            area: None,
        }
    }

    pub fn ratio(&self) -> f32 { self.ratio }

    /// Sets the share of the split axis given to `left`, clamped so that
    /// neither branch can vanish.
    pub fn set_ratio(&mut self, ratio: f32) -> &mut Self {
        self.ratio = if ratio.is_nan() { 0.5 } else { ratio.clamp(MIN_RATIO, MAX_RATIO) };
        self
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.orientation = orientation;
        self
    }

    pub fn set_parent(&mut self, parent: Option<Entity>) -> &mut Self {
        self.parent = parent;
        self
    }

    pub fn children(&self) -> impl Iterator<Item = TilingNode> {
        std::iter::once(self.left).chain(self.right)
    }

    pub fn branch(&self, branch: Branch) -> Option<TilingNode> {
        match branch {
            Branch::Left => Some(self.left),
            Branch::Right => self.right,
        }
    }

    pub(crate) fn set_branch(&mut self, branch: Branch, node: TilingNode) {
        match branch {
            Branch::Left => self.left = node,
            Branch::Right => self.right = Some(node),
        }
    }

    pub fn branch_of(&self, node: TilingNode) -> Option<Branch> {
        if self.left == node {
            Some(Branch::Left)
        } else if self.right == Some(node) {
            Some(Branch::Right)
        } else {
            None
        }
    }

    pub fn branch_of_window(&self, window: Entity) -> Option<Branch> {
        self.branch_of(TilingNode::Window(window))
    }

    /// Points the leaf holding window `a` at window `b` instead.
    pub fn replace_window(&mut self, a: Entity, b: Entity) -> bool {
        match self.branch_of_window(a) {
            Some(branch) => {
                self.set_branch(branch, TilingNode::Window(b));
                true
            }
            None => false,
        }
    }

    /// Exchanges the two branches. Ratio and orientation stay as they are.
    pub fn swap_branches(&mut self) -> bool {
        let Some(right) = self.right else {
            return false;
        };
        self.right = Some(std::mem::replace(&mut self.left, right));
        true
    }

    /// Divides `area` between the branches.
    ///
    /// The split axis is the width for horizontal forks and the height for
    /// vertical ones. `left` receives `round(length * ratio) - half_gap` and
    /// `right` starts `gap` pixels past the rounded split point.
    pub fn split(&self, area: Rect, gaps: &GapSettings) -> (Rect, Option<Rect>) {
        if self.right.is_none() {
            return (area, None);
        }
        let (gap, half_gap) = (gaps.gap(), gaps.half_gap());
        let (mut left, mut right) = (area, area);
        match self.orientation {
            Orientation::Horizontal => {
                let length = split_length(area.width, self.ratio);
                left.width = (length - half_gap).max(0);
                right.x = area.x + length + gap;
                right.width = (area.width - length - half_gap).max(0);
            }
            Orientation::Vertical => {
                let length = split_length(area.height, self.ratio);
                left.height = (length - half_gap).max(0);
                right.y = area.y + length + gap;
                right.height = (area.height - length - half_gap).max(0);
            }
        }
        (left, Some(right))
    }
}

/// Rounds half away from zero.
fn split_length(total: i32, ratio: f32) -> i32 { (f64::from(total) * f64::from(ratio)).round() as i32 }
