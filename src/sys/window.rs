use crate::ecs::Entity;
use crate::model::Rect;

/// Frame access for windows the host knows about.
///
/// Both calls are infallible from the tree's point of view; a window that has
/// gone away on the host side is the host's problem.
pub trait WindowFrames {
    fn frame_rect(&self, window: Entity) -> Rect;

    fn move_resize(&mut self, window: Entity, rect: Rect);
}
