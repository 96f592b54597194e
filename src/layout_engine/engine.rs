use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::utils::compute_tiling_area;
use super::{AutoTiler, Orientation, TilingNode};
use crate::common::config::Settings;
use crate::ecs::{Entity, World};
use crate::model::Rect;
use crate::sys::WindowFrames;

/// The fork a window currently hangs off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attached(pub Entity);

/// The monitor work area a root fork was attached to, before outer gaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkArea(pub Rect);

/// Ties window entities to the tiling tree and drives re-tiling.
///
/// Windows are entities of the engine's own [`World`] and carry an
/// [`Attached`] component while they are tiled. Root forks carry a
/// [`WorkArea`] in the tiler's world so they can be re-tiled when the gaps
/// change.
pub struct LayoutEngine {
    world: World,
    tiler: AutoTiler,
    settings: Settings,
}

impl Default for LayoutEngine {
    fn default() -> Self { Self::new(Settings::default()) }
}

impl LayoutEngine {
    pub fn new(settings: Settings) -> Self {
        let mut world = World::new();
        world.register_storage::<Attached>();
        let mut tiler = AutoTiler::new(&settings.layout);
        tiler.world_mut().register_storage::<WorkArea>();
        Self { world, tiler, settings }
    }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn tiler(&self) -> &AutoTiler { &self.tiler }

    pub fn world(&self) -> &World { &self.world }

    pub fn display(&self) -> String { self.tiler.display() }

    pub fn create_window(&mut self) -> Entity { self.world.create_entity() }

    /// Detaches `window` if it is tiled, then forgets it entirely.
    pub fn delete_window(&mut self, window: Entity, windows: &mut impl WindowFrames) {
        self.detach_window(window, windows);
        self.world.delete_entity(window);
    }

    pub fn fork_of(&self, window: Entity) -> Option<Entity> {
        self.world.get::<Attached>(window).map(|attached| attached.0)
    }

    /// Tiled windows whose current frame contains the point.
    pub fn windows_at(&self, x: i32, y: i32, windows: &impl WindowFrames) -> Vec<Entity> {
        let Some(attached) = self.world.storage::<Attached>() else {
            return Vec::new();
        };
        attached
            .iter()
            .map(|(window, _)| window)
            .filter(|&window| windows.frame_rect(window).contains_point(x, y))
            .collect()
    }

    /// Starts a new tree holding only `window`, tiled into `work_area` minus
    /// the outer gaps. Returns the new root fork.
    pub fn attach_to_monitor(
        &mut self,
        window: Entity,
        work_area: Rect,
        windows: &mut impl WindowFrames,
    ) -> Entity {
        self.detach_window(window, windows);
        let (fork, _) = self.tiler.create_fork(TilingNode::Window(window), None);
        self.associate([(fork, window)]);
        if let Some(areas) = self.tiler.world_mut().storage_mut::<WorkArea>() {
            areas.insert(fork, WorkArea(work_area));
        }
        info!(%window, %fork, %work_area, "attached window to monitor");
        let area = compute_tiling_area(work_area, &self.settings.gaps);
        self.attach_update(fork, area, windows);
        fork
    }

    /// Tiles `new` next to `onto`, splitting the space `onto` occupies now.
    pub fn attach_to_window(
        &mut self,
        onto: Entity,
        new: Entity,
        windows: &mut impl WindowFrames,
    ) -> bool {
        if onto == new || self.fork_of(onto).is_none() {
            return false;
        }
        self.detach_window(new, windows);

        let area = windows.frame_rect(onto);
        let mut assocs = Vec::new();
        let Some(fork) = self
            .tiler
            .attach_window(onto, new, |fork, window| assocs.push((fork, window)))
            .map(|(fork, _)| fork)
        else {
            warn!(%onto, %new, "attached window is missing from the tree");
            return false;
        };
        self.associate(assocs);
        info!(%onto, %new, %fork, "attached window to window");
        self.attach_update(fork, area, windows);
        true
    }

    /// Removes `window` from its tree and re-tiles what is left in place.
    /// Returns the fork that was re-tiled, if any survived.
    pub fn detach_window(
        &mut self,
        window: Entity,
        windows: &mut impl WindowFrames,
    ) -> Option<Entity> {
        let Attached(fork) = self.world.storage_mut::<Attached>()?.remove(window)?;
        let mut assocs = Vec::new();
        let reflow = self
            .tiler
            .detach(fork, window, |fork, window| assocs.push((fork, window)))
            .map(|(fork, _)| fork);
        self.associate(assocs);
        info!(%window, %fork, ?reflow, "detached window");
        if let Some(reflow) = reflow {
            self.tiler.retile(reflow, &self.settings.gaps, windows);
        }
        reflow
    }

    /// Exchanges the positions of two tiled windows, across forks or trees.
    pub fn attach_swap(&mut self, a: Entity, b: Entity, windows: &mut impl WindowFrames) -> bool {
        let (Some(fork_a), Some(fork_b)) = (self.fork_of(a), self.fork_of(b)) else {
            return false;
        };
        if a == b {
            return false;
        }

        if fork_a == fork_b {
            let swapped = self.tiler.fork_mut(fork_a).is_some_and(|fork| fork.swap_branches());
            if swapped {
                self.tiler.retile(fork_a, &self.settings.gaps, windows);
            }
            return swapped;
        }

        let holds = |fork: Entity, window: Entity| {
            self.tiler.fork(fork).is_some_and(|fork| fork.branch_of_window(window).is_some())
        };
        if !holds(fork_a, a) || !holds(fork_b, b) {
            warn!(%a, %b, "swap target is not where it is recorded");
            return false;
        }
        for (fork, from, to) in [(fork_a, a, b), (fork_b, b, a)] {
            if let Some(fork) = self.tiler.fork_mut(fork) {
                fork.replace_window(from, to);
            }
        }
        self.associate([(fork_b, a), (fork_a, b)]);
        debug!(%a, %b, %fork_a, %fork_b, "swapped windows");
        self.tiler.retile(fork_a, &self.settings.gaps, windows);
        self.tiler.retile(fork_b, &self.settings.gaps, windows);
        true
    }

    /// Swaps `window` with `sibling` when both share a fork.
    pub fn swap_siblings(
        &mut self,
        window: Entity,
        sibling: Entity,
        windows: &mut impl WindowFrames,
    ) -> bool {
        match (self.fork_of(window), self.fork_of(sibling)) {
            (Some(a), Some(b)) if a == b => self.attach_swap(window, sibling, windows),
            _ => false,
        }
    }

    /// Re-tiles the fork holding `window` into its last area.
    pub fn retile(&mut self, window: Entity, windows: &mut impl WindowFrames) -> bool {
        match self.fork_of(window) {
            Some(fork) => self.tiler.retile(fork, &self.settings.gaps, windows),
            None => false,
        }
    }

    pub fn set_ratio(&mut self, fork: Entity, ratio: f32, windows: &mut impl WindowFrames) -> bool {
        let Some(tiling) = self.tiler.fork_mut(fork) else {
            return false;
        };
        tiling.set_ratio(ratio);
        self.tiler.retile(fork, &self.settings.gaps, windows);
        true
    }

    pub fn toggle_orientation(&mut self, fork: Entity, windows: &mut impl WindowFrames) -> bool {
        let Some(tiling) = self.tiler.fork_mut(fork) else {
            return false;
        };
        tiling.set_orientation(tiling.orientation.flip());
        self.tiler.retile(fork, &self.settings.gaps, windows);
        true
    }

    /// Applies new settings and re-tiles every tree into its work area.
    pub fn update_settings(&mut self, settings: Settings, windows: &mut impl WindowFrames) {
        self.tiler.set_defaults(&settings.layout);
        self.settings = settings;
        let roots: Vec<_> = self
            .tiler
            .roots()
            .filter_map(|root| self.tiler.world().get::<WorkArea>(root).map(|area| (root, area.0)))
            .collect();
        debug!(roots = roots.len(), "re-tiling after settings change");
        for (root, work_area) in roots {
            let area = compute_tiling_area(work_area, &self.settings.gaps);
            self.tiler.tile(root, area, &self.settings.gaps, windows);
        }
    }

    fn attach_update(&mut self, fork: Entity, area: Rect, windows: &mut impl WindowFrames) {
        if let Some(tiling) = self.tiler.fork_mut(fork) {
            tiling.set_orientation(Orientation::for_area(area));
        }
        self.tiler.tile(fork, area, &self.settings.gaps, windows);
    }

    fn associate(&mut self, assocs: impl IntoIterator<Item = (Entity, Entity)>) {
        let Some(attached) = self.world.storage_mut::<Attached>() else {
            return;
        };
        for (fork, window) in assocs {
            attached.insert(window, Attached(fork));
        }
    }
}
