mod auto_tiler;
pub mod engine;
mod fork;
pub(crate) mod graph;
pub mod utils;

pub use auto_tiler::AutoTiler;
pub use engine::{Attached, LayoutEngine, WorkArea};
pub use fork::{Branch, MAX_RATIO, MIN_RATIO, TilingFork, TilingNode};
pub use graph::Orientation;
