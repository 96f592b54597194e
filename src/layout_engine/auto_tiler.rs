use tracing::{debug, trace, warn};

use super::fork::{Branch, TilingFork, TilingNode};
use super::Orientation;
use crate::common::config::{GapSettings, LayoutSettings};
use crate::ecs::{Entity, Storage, World};
use crate::model::Rect;
use crate::sys::WindowFrames;

/// Owns every tiling fork and restructures the forest as windows come and go.
///
/// Forks are entities of the tiler's own [`World`]; windows are entities of the
/// caller's world and are only ever referenced. Callers learn which fork a
/// window hangs off through the `assoc(fork, window)` callback passed to
/// [`attach_window`](Self::attach_window) and [`detach`](Self::detach).
pub struct AutoTiler {
    world: World,
    forks: Storage<TilingFork>,
    orientation: Orientation,
    ratio: f32,
}

impl Default for AutoTiler {
    fn default() -> Self { Self::new(&LayoutSettings::default()) }
}

impl AutoTiler {
    pub fn new(settings: &LayoutSettings) -> Self {
        Self {
            world: World::new(),
            forks: Storage::new(),
            orientation: settings.default_orientation,
            ratio: settings.default_ratio,
        }
    }

    /// Orientation and ratio given to forks created from now on.
    pub fn set_defaults(&mut self, settings: &LayoutSettings) {
        self.orientation = settings.default_orientation;
        self.ratio = settings.default_ratio;
    }

    /// The world fork entities are allocated from. Storages registered here
    /// are purged whenever a fork is deleted.
    pub fn world(&self) -> &World { &self.world }

    pub fn world_mut(&mut self) -> &mut World { &mut self.world }

    pub fn forks(&self) -> &Storage<TilingFork> { &self.forks }

    pub fn fork(&self, entity: Entity) -> Option<&TilingFork> { self.forks.get(entity) }

    pub fn fork_mut(&mut self, entity: Entity) -> Option<&mut TilingFork> {
        self.forks.get_mut(entity)
    }

    /// Forks without a parent, one per populated region.
    pub fn roots(&self) -> impl Iterator<Item = Entity> + '_ {
        self.forks.find(|fork| fork.parent.is_none())
    }

    pub fn root_of(&self, mut fork: Entity) -> Option<Entity> {
        loop {
            match self.forks.get(fork)?.parent {
                Some(parent) => fork = parent,
                None => return Some(fork),
            }
        }
    }

    /// The fork whose `left` or `right` leaf is `window`.
    pub fn fork_of_window(&self, window: Entity) -> Option<Entity> {
        self.forks.find(move |fork| fork.branch_of_window(window).is_some()).next()
    }

    /// Every window below `node`, left before right.
    pub fn windows_under(&self, node: TilingNode) -> Vec<Entity> {
        let mut out = Vec::new();
        self.collect_windows_under(node, &mut out);
        out
    }

    fn collect_windows_under(&self, node: TilingNode, out: &mut Vec<Entity>) {
        match node {
            TilingNode::Window(window) => out.push(window),
            TilingNode::Fork(fork) => {
                if let Some(fork) = self.forks.get(fork) {
                    for child in fork.children() {
                        self.collect_windows_under(child, out);
                    }
                }
            }
        }
    }

    pub fn create_fork(
        &mut self,
        left: TilingNode,
        right: Option<TilingNode>,
    ) -> (Entity, &TilingFork) {
        let entity = self.world.create_entity();
        let mut fork = TilingFork::new(left, right);
        fork.set_orientation(self.orientation).set_ratio(self.ratio);
        for child in fork.children() {
            if let TilingNode::Fork(child) = child {
                self.reparent(child, entity);
            }
        }
        debug!(fork = %entity, "created fork");
        (entity, &*self.forks.get_or_insert_with(entity, || fork))
    }

    /// Attaches window `new` next to window `onto`.
    ///
    /// If `onto` is the left leaf of a fork with an empty right branch, `new`
    /// fills that branch. Otherwise the leaf holding `onto` is split into a new
    /// child fork holding `onto` then `new`. Returns the fork to re-tile, or
    /// `None` without touching anything if no fork holds `onto`.
    pub fn attach_window(
        &mut self,
        onto: Entity,
        new: Entity,
        mut assoc: impl FnMut(Entity, Entity),
    ) -> Option<(Entity, &TilingFork)> {
        let (entity, branch) = self
            .forks
            .iter()
            .find_map(|(entity, fork)| fork.branch_of_window(onto).map(|branch| (entity, branch)))?;

        let node = TilingNode::Window(new);
        let fork = self.forks.get_mut(entity)?;
        if branch == Branch::Left && fork.right.is_none() {
            fork.right = Some(node);
            debug!(%onto, %new, fork = %entity, "attached into empty branch");
            assoc(entity, new);
            return self.fork_entry(entity);
        }

        let (child, _) = self.create_fork(TilingNode::Window(onto), Some(node));
        self.reparent(child, entity);
        if let Some(fork) = self.forks.get_mut(entity) {
            fork.set_branch(branch, TilingNode::Fork(child));
        }
        debug!(%onto, %new, parent = %entity, fork = %child, "split leaf into new fork");
        assoc(child, onto);
        assoc(child, new);
        self.fork_entry(child)
    }

    /// Removes `window` from `fork` and collapses what is left behind.
    ///
    /// The fork loses both branches: the window is dropped and its sibling is
    /// promoted into the branch of the nearest ancestor that pointed at the
    /// emptied fork. A root keeps its surviving sibling instead of being
    /// deleted, so the root entity of a region stays stable. Emptied forks are
    /// deleted from the world once propagation stops.
    ///
    /// Returns the lowest surviving fork that needs re-tiling, or `None` if
    /// the tree under that root is now empty. Detaching a window that `fork`
    /// does not hold changes nothing and returns `None`.
    pub fn detach(
        &mut self,
        fork: Entity,
        window: Entity,
        mut assoc: impl FnMut(Entity, Entity),
    ) -> Option<(Entity, &TilingFork)> {
        let detached = self.forks.get(fork)?;
        let branch = detached.branch_of_window(window)?;
        let mut retach = match branch {
            Branch::Left => detached.right,
            Branch::Right => Some(detached.left),
        };
        debug!(%window, %fork, ?retach, "detaching window");

        let mut removals = Vec::new();
        let mut pending = fork;
        let reflow = loop {
            let Some(parent) = self.forks.get(pending).map(|fork| fork.parent) else {
                break None;
            };
            let Some(parent) = parent else {
                match retach.take() {
                    Some(node) => {
                        self.promote_into_root(pending, node, &mut assoc, &mut removals);
                        break Some(pending);
                    }
                    None => {
                        trace!(fork = %pending, "root is empty");
                        removals.push(pending);
                        break None;
                    }
                }
            };

            removals.push(pending);
            let Some(parent_fork) = self.forks.get_mut(parent) else {
                debug_assert!(false, "fork {pending} has a missing parent {parent}");
                warn!(fork = %pending, %parent, "fork points at a missing parent");
                break None;
            };
            let Some(slot) = parent_fork.branch_of(TilingNode::Fork(pending)) else {
                debug_assert!(false, "fork {parent} does not hold its child {pending}");
                warn!(fork = %pending, %parent, "parent does not reference fork");
                break None;
            };

            match retach.take() {
                Some(node) => {
                    parent_fork.set_branch(slot, node);
                    self.adopt(parent, node, &mut assoc);
                    break Some(parent);
                }
                None => {
                    retach = match slot {
                        Branch::Left => parent_fork.right,
                        Branch::Right => Some(parent_fork.left),
                    };
                    pending = parent;
                }
            }
        };

        for entity in removals {
            self.delete_fork(entity);
        }

        reflow.and_then(|entity| self.fork_entry(entity))
    }

    /// Tiles every window below `fork` into `area`, caching the area on each
    /// fork along the way.
    pub fn tile(
        &mut self,
        fork: Entity,
        area: Rect,
        gaps: &GapSettings,
        windows: &mut impl WindowFrames,
    ) {
        let Some(tiling) = self.forks.get_mut(fork) else {
            warn!(%fork, "asked to tile a missing fork");
            return;
        };
        tiling.area = Some(area);
        let (left_area, right_area) = tiling.split(area, gaps);
        let (left, right) = (tiling.left, tiling.right);
        trace!(%fork, %area, %left_area, ?right_area, "tiling fork");

        left.tile(self, left_area, gaps, windows);
        if let (Some(right), Some(right_area)) = (right, right_area) {
            right.tile(self, right_area, gaps, windows);
        }
    }

    /// Re-tiles `fork` into the area it was last tiled into.
    pub fn retile(
        &mut self,
        fork: Entity,
        gaps: &GapSettings,
        windows: &mut impl WindowFrames,
    ) -> bool {
        match self.forks.get(fork).and_then(|fork| fork.area) {
            Some(area) => {
                self.tile(fork, area, gaps, windows);
                true
            }
            None => false,
        }
    }

    /// Renders the whole forest, one tree per root.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for root in self.roots() {
            let _ = ascii_tree::write_tree(&mut out, &self.ascii_tree(TilingNode::Fork(root)));
        }
        out
    }

    fn ascii_tree(&self, node: TilingNode) -> ascii_tree::Tree {
        match node {
            TilingNode::Window(window) => ascii_tree::Tree::Leaf(vec![format!("window {window}")]),
            TilingNode::Fork(entity) => match self.forks.get(entity) {
                Some(fork) => {
                    let area = fork.area.map(|area| format!(" {area}")).unwrap_or_default();
                    let desc =
                        format!("fork {entity} {:?} {:.2}{area}", fork.orientation, fork.ratio());
                    let children = fork.children().map(|child| self.ascii_tree(child)).collect();
                    ascii_tree::Tree::Node(desc, children)
                }
                None => ascii_tree::Tree::Leaf(vec![format!("missing fork {entity}")]),
            },
        }
    }

    fn fork_entry(&self, entity: Entity) -> Option<(Entity, &TilingFork)> {
        self.forks.get(entity).map(|fork| (entity, fork))
    }

    fn reparent(&mut self, child: Entity, parent: Entity) {
        if let Some(child) = self.forks.get_mut(child) {
            child.set_parent(Some(parent));
        }
    }

    /// Records that `node` now hangs directly off `parent`.
    fn adopt(&mut self, parent: Entity, node: TilingNode, assoc: &mut impl FnMut(Entity, Entity)) {
        match node {
            TilingNode::Window(window) => assoc(parent, window),
            TilingNode::Fork(child) => self.reparent(child, parent),
        }
    }

    /// Makes `node` the only content of `root`. A promoted fork is absorbed so
    /// the root never ends up as a pass-through for a single sub-fork.
    fn promote_into_root(
        &mut self,
        root: Entity,
        node: TilingNode,
        assoc: &mut impl FnMut(Entity, Entity),
        removals: &mut Vec<Entity>,
    ) {
        let absorbed = match node {
            TilingNode::Fork(child) => self.forks.get(child).cloned().map(|fork| (child, fork)),
            TilingNode::Window(_) => None,
        };
        let Some(fork) = self.forks.get_mut(root) else {
            return;
        };
        match absorbed {
            Some((child, absorbed)) => {
                fork.left = absorbed.left;
                fork.right = absorbed.right;
                fork.set_orientation(absorbed.orientation).set_ratio(absorbed.ratio());
                removals.push(child);
                trace!(%root, %child, "root absorbed promoted fork");
                for grandchild in absorbed.children() {
                    self.adopt(root, grandchild, assoc);
                }
            }
            None => {
                fork.left = node;
                fork.right = None;
                self.adopt(root, node, assoc);
            }
        }
    }

    fn delete_fork(&mut self, entity: Entity) {
        debug!(fork = %entity, "deleting fork");
        self.forks.remove(entity);
        self.world.delete_entity(entity);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::common::collections::HashMap;
    use crate::sys::window::testing::FakeWindows;

    /// Window handles come from a separate world than forks.
    struct Windows(World);

    impl Windows {
        fn new() -> Self { Self(World::new()) }

        fn spawn(&mut self) -> Entity { self.0.create_entity() }
    }

    #[derive(Default)]
    struct Assocs(HashMap<Entity, Entity>);

    impl Assocs {
        fn record(&mut self) -> impl FnMut(Entity, Entity) + '_ {
            move |fork, window| {
                self.0.insert(window, fork);
            }
        }

        fn of(&self, window: Entity) -> Option<Entity> { self.0.get(&window).copied() }
    }

    fn single_root(tiler: &mut AutoTiler, window: Entity, assocs: &mut Assocs) -> Entity {
        let (root, _) = tiler.create_fork(TilingNode::Window(window), None);
        assocs.0.insert(window, root);
        root
    }

    fn sorted(mut v: Vec<Entity>) -> Vec<Entity> {
        v.sort();
        v
    }

    fn check_invariants(tiler: &AutoTiler) {
        for (entity, fork) in tiler.forks().iter() {
            if let Some(parent) = fork.parent {
                let parent = tiler.fork(parent).expect("parent exists");
                assert!(parent.branch_of(TilingNode::Fork(entity)).is_some());
            }
            for child in fork.children() {
                if let TilingNode::Fork(child) = child {
                    assert_eq!(tiler.fork(child).and_then(|c| c.parent), Some(entity));
                }
            }
        }
    }

    #[test]
    fn attach_fills_empty_right_without_new_fork() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b) = (windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);

        let (fork, tiling) = tiler.attach_window(a, b, assocs.record()).unwrap();
        assert_eq!(fork, root);
        assert_eq!(tiling.right, Some(TilingNode::Window(b)));
        assert_eq!(tiler.forks().len(), 1);
        assert_eq!(assocs.of(b), Some(root));
    }

    #[test]
    fn attach_onto_occupied_branch_creates_one_fork() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b, c) = (windows.spawn(), windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();

        let (fork, tiling) = tiler.attach_window(a, c, assocs.record()).unwrap();
        assert_ne!(fork, root);
        assert_eq!(tiling.parent, Some(root));
        assert_eq!(tiler.forks().len(), 2);
        assert_eq!(sorted(tiler.windows_under(TilingNode::Fork(fork))), sorted(vec![a, c]));
        assert_eq!(tiler.fork(root).unwrap().left, TilingNode::Fork(fork));
        assert_eq!(assocs.of(a), Some(fork));
        assert_eq!(assocs.of(c), Some(fork));
        assert_eq!(assocs.of(b), Some(root));
        check_invariants(&tiler);
    }

    #[test]
    fn attach_onto_right_leaf_splits_right_branch() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b, c) = (windows.spawn(), windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();

        let (fork, _) = tiler.attach_window(b, c, assocs.record()).unwrap();
        let root_fork = tiler.fork(root).unwrap();
        assert_eq!(root_fork.left, TilingNode::Window(a));
        assert_eq!(root_fork.right, Some(TilingNode::Fork(fork)));
        assert_eq!(tiler.windows_under(TilingNode::Fork(root)), vec![a, b, c]);
        check_invariants(&tiler);
    }

    #[test]
    fn attach_onto_unknown_window_changes_nothing() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, stranger, b) = (windows.spawn(), windows.spawn(), windows.spawn());
        single_root(&mut tiler, a, &mut assocs);
        let before = tiler.display();

        assert!(tiler.attach_window(stranger, b, assocs.record()).is_none());
        assert_eq!(tiler.display(), before);
        assert_eq!(tiler.forks().len(), 1);
        assert_eq!(assocs.of(b), None);
    }

    #[test]
    fn detaching_last_window_deletes_root() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let a = windows.spawn();
        let root = single_root(&mut tiler, a, &mut assocs);

        assert!(tiler.detach(root, a, assocs.record()).is_none());
        assert_eq!(tiler.roots().count(), 0);
        assert!(tiler.fork(root).is_none());
        assert!(!tiler.world().is_alive(root));
    }

    #[test]
    fn detach_from_root_keeps_sibling() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b) = (windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();

        let (fork, tiling) = tiler.detach(root, a, assocs.record()).unwrap();
        assert_eq!(fork, root);
        assert_eq!(tiling.left, TilingNode::Window(b));
        assert_eq!(tiling.right, None);
        assert_eq!(assocs.of(b), Some(root));
    }

    #[test]
    fn attach_then_detach_round_trips() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b, c, d) = (windows.spawn(), windows.spawn(), windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();
        tiler.attach_window(b, c, assocs.record()).unwrap();

        let before = sorted(tiler.windows_under(TilingNode::Fork(root)));
        let forks_before = tiler.forks().len();

        let (fork, _) = tiler.attach_window(a, d, assocs.record()).unwrap();
        assert_eq!(tiler.forks().len(), forks_before + 1);

        let (reflow, _) = tiler.detach(fork, d, assocs.record()).unwrap();
        assert_eq!(reflow, root);
        assert_eq!(sorted(tiler.windows_under(TilingNode::Fork(root))), before);
        assert_eq!(tiler.forks().len(), forks_before);
        assert_eq!(tiler.fork(root).unwrap().left, TilingNode::Window(a));
        assert_eq!(assocs.of(a), Some(root));
        check_invariants(&tiler);
    }

    #[test]
    fn promoted_fork_is_reparented() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b, c, d) = (windows.spawn(), windows.spawn(), windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();
        // root(left: F1(a, c), right: b)
        let (f1, _) = tiler.attach_window(a, c, assocs.record()).unwrap();
        // F1(left: F2(a, d), right: c)
        let (f2, _) = tiler.attach_window(a, d, assocs.record()).unwrap();
        assert_eq!(tiler.fork(f2).unwrap().parent, Some(f1));

        // Removing c empties F1; F2 moves up into root's left branch.
        let (reflow, tiling) = tiler.detach(f1, c, assocs.record()).unwrap();
        assert_eq!(reflow, root);
        assert_eq!(tiling.left, TilingNode::Fork(f2));
        assert_eq!(tiler.fork(f2).unwrap().parent, Some(root));
        assert!(tiler.fork(f1).is_none());
        assert_eq!(tiler.windows_under(TilingNode::Fork(root)), vec![a, d, b]);
        check_invariants(&tiler);
    }

    #[test]
    fn root_absorbs_promoted_fork() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b, c) = (windows.spawn(), windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();
        let (child, _) = tiler.attach_window(a, c, assocs.record()).unwrap();
        tiler.fork_mut(child).unwrap().set_orientation(Orientation::Vertical).set_ratio(0.3);

        let (reflow, tiling) = tiler.detach(root, b, assocs.record()).unwrap();
        assert_eq!(reflow, root);
        assert_eq!(tiling.left, TilingNode::Window(a));
        assert_eq!(tiling.right, Some(TilingNode::Window(c)));
        assert_eq!(tiling.orientation, Orientation::Vertical);
        assert_eq!(tiling.ratio(), 0.3);
        assert!(tiler.fork(child).is_none());
        assert_eq!(tiler.forks().len(), 1);
        assert_eq!(assocs.of(a), Some(root));
        assert_eq!(assocs.of(c), Some(root));
    }

    #[test]
    fn detach_of_unknown_window_is_a_no_op() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b, stranger) = (windows.spawn(), windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();
        let before = tiler.display();

        assert!(tiler.detach(root, stranger, assocs.record()).is_none());
        assert!(tiler.detach(Entity::new(99, 0), a, assocs.record()).is_none());
        assert_eq!(tiler.display(), before);

        tiler.detach(root, a, assocs.record()).unwrap();
        assert!(tiler.detach(root, a, assocs.record()).is_none());
    }

    #[test]
    fn deleted_forks_do_not_resolve_after_reuse() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b) = (windows.spawn(), windows.spawn());
        let old_root = single_root(&mut tiler, a, &mut assocs);
        tiler.detach(old_root, a, assocs.record());

        let new_root = single_root(&mut tiler, b, &mut assocs);
        assert_eq!(new_root.index(), old_root.index());
        assert!(tiler.fork(old_root).is_none());
        assert_eq!(tiler.fork(new_root).unwrap().left, TilingNode::Window(b));
    }

    #[test]
    fn detach_everything_in_random_order_leaves_empty_forest() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let all: Vec<_> = (0..8).map(|_| windows.spawn()).collect();
        single_root(&mut tiler, all[0], &mut assocs);
        for (i, &w) in all.iter().enumerate().skip(1) {
            let onto = all[(i * 5 + 3) % i];
            tiler.attach_window(onto, w, assocs.record()).unwrap();
            check_invariants(&tiler);
        }
        assert_eq!(tiler.roots().count(), 1);

        for &w in [3, 0, 7, 5, 1, 6, 2, 4].iter().map(|&i| &all[i]) {
            let fork = assocs.0.remove(&w).unwrap();
            tiler.detach(fork, w, assocs.record());
            check_invariants(&tiler);
            for (window, fork) in &assocs.0 {
                assert!(tiler.fork(*fork).unwrap().branch_of_window(*window).is_some());
            }
        }
        assert_eq!(tiler.roots().count(), 0);
        assert!(tiler.forks().is_empty());
    }

    #[test]
    fn tile_assigns_every_window_and_caches_areas() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b, c) = (windows.spawn(), windows.spawn(), windows.spawn());
        let root = single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();
        let (child, _) = tiler.attach_window(b, c, assocs.record()).unwrap();
        tiler.fork_mut(child).unwrap().set_orientation(Orientation::Vertical);

        let gaps = GapSettings::default();
        let mut frames = FakeWindows::new();
        tiler.tile(root, Rect::new(0, 0, 1920, 1080), &gaps, &mut frames);

        let requests: HashMap<_, _> = frames.take_requests().into_iter().collect();
        assert_eq!(requests[&a], Rect::new(0, 0, 956, 1080));
        assert_eq!(requests[&b], Rect::new(968, 0, 956, 536));
        assert_eq!(requests[&c], Rect::new(968, 548, 956, 536));
        assert_eq!(tiler.fork(child).unwrap().area, Some(Rect::new(968, 0, 956, 1080)));
        assert_eq!(
            TilingNode::Fork(root).area(&tiler, &frames),
            Some(Rect::new(0, 0, 1920, 1080))
        );
        assert_eq!(TilingNode::Window(c).area(&tiler, &frames), Some(requests[&c]));

        assert!(tiler.retile(child, &gaps, &mut frames));
        assert_eq!(frames.take_requests().len(), 2);
    }

    #[test]
    fn display_lists_each_root() {
        let mut tiler = AutoTiler::default();
        let mut windows = Windows::new();
        let mut assocs = Assocs::default();
        let (a, b, c) = (windows.spawn(), windows.spawn(), windows.spawn());
        single_root(&mut tiler, a, &mut assocs);
        tiler.attach_window(a, b, assocs.record()).unwrap();
        single_root(&mut tiler, c, &mut assocs);

        let out = tiler.display();
        assert_eq!(out.matches("fork ").count(), 2);
        assert!(out.contains(&format!("window {a}")));
        assert!(out.contains(&format!("window {c}")));
        assert!(out.contains("Horizontal 0.50"));
    }
}
