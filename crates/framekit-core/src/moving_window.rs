//! Containment tracking of posed entities against a moving window volume.
//!
//! A [`MovingWindow`] holds a window shape plus a set of registered entities
//! (caller-supplied ids, shapes and poses) and reports which entities are
//! inside the window. A hysteresis margin keeps an entity `Inside` until it
//! leaves the window grown by that margin, so entities sitting on the
//! boundary do not flicker between states as the window moves.

use std::collections::HashSet;

use crate::aabb::AxisAlignedBox;
use crate::pose::Pose3;

/// Where an entity stands relative to the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContainmentState {
    /// Not checked yet.
    #[default]
    Uninitialized,
    Inside,
    Outside,
}

/// Per-entity result of a [`MovingWindow::check`] pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityState {
    /// The id supplied at registration.
    pub id: usize,
    pub state: ContainmentState,
}

/// Containment rule for one window/entity shape pairing.
pub trait WindowPolicy {
    type WindowShape;
    type EntityShape;

    /// Decide whether the entity is inside the window.
    ///
    /// `was_inside` enables hysteresis: policies should widen the window by
    /// `hysteresis` for entities that were inside on the previous check.
    fn contains(
        window: &Self::WindowShape,
        window_pose: &Pose3,
        hysteresis: f64,
        entity: &Self::EntityShape,
        entity_pose: &Pose3,
        was_inside: bool,
    ) -> bool;
}

/// Axis-aligned-box window over axis-aligned-box entities.
///
/// Only the positions of the two poses are used; orientations are ignored.
pub struct AxisAlignedBoxWindow;

impl WindowPolicy for AxisAlignedBoxWindow {
    type WindowShape = AxisAlignedBox;
    type EntityShape = AxisAlignedBox;

    fn contains(
        window: &AxisAlignedBox,
        window_pose: &Pose3,
        hysteresis: f64,
        entity: &AxisAlignedBox,
        entity_pose: &Pose3,
        was_inside: bool,
    ) -> bool {
        let mut win = window.translated(&window_pose.translation.vector);
        if was_inside {
            win = win.grown(hysteresis);
        }
        win.intersects(&entity.translated(&entity_pose.translation.vector))
    }
}

struct Tracked<S> {
    id: usize,
    shape: S,
    pose: Pose3,
    state: ContainmentState,
}

/// A window volume with a set of tracked entities.
pub struct MovingWindow<P: WindowPolicy> {
    shape: P::WindowShape,
    hysteresis: f64,
    pose: Pose3,
    // registration order; ids unique
    entities: Vec<Tracked<P::EntityShape>>,
}

impl<P: WindowPolicy> MovingWindow<P> {
    /// Window with the given shape and hysteresis margin, posed at identity.
    pub fn new(shape: P::WindowShape, hysteresis: f64) -> Self {
        Self::with_pose(shape, hysteresis, Pose3::identity())
    }

    /// Window with an explicit initial pose.
    pub fn with_pose(shape: P::WindowShape, hysteresis: f64, pose: Pose3) -> Self {
        Self {
            shape,
            hysteresis,
            pose,
            entities: Vec::new(),
        }
    }

    /// Register an entity for containment checks.
    ///
    /// Returns `false` (and changes nothing) when `id` is already taken.
    pub fn register_entity(&mut self, id: usize, shape: P::EntityShape, pose: Pose3) -> bool {
        if self.entities.iter().any(|e| e.id == id) {
            return false;
        }
        self.entities.push(Tracked {
            id,
            shape,
            pose,
            state: ContainmentState::Uninitialized,
        });
        true
    }

    /// Remove a registered entity. Returns `false` when `id` is unknown.
    pub fn unregister_entity(&mut self, id: usize) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        self.entities.len() != before
    }

    /// Number of registered entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Update an entity's pose. Returns `false` when `id` is unknown.
    pub fn set_entity_pose(&mut self, id: usize, pose: Pose3) -> bool {
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.pose = pose;
                true
            }
            None => false,
        }
    }

    /// Move the window itself.
    pub fn set_window_pose(&mut self, pose: Pose3) {
        self.pose = pose;
    }

    /// Check every registered entity against the window.
    ///
    /// Returns one [`EntityState`] per entity in registration order and
    /// remembers the states for the next pass's hysteresis.
    pub fn check(&mut self) -> Vec<EntityState> {
        let mut out = Vec::with_capacity(self.entities.len());
        for entity in &mut self.entities {
            let was_inside = entity.state == ContainmentState::Inside;
            let inside = P::contains(
                &self.shape,
                &self.pose,
                self.hysteresis,
                &entity.shape,
                &entity.pose,
                was_inside,
            );
            entity.state = if inside {
                ContainmentState::Inside
            } else {
                ContainmentState::Outside
            };
            out.push(EntityState {
                id: entity.id,
                state: entity.state,
            });
        }
        out
    }

    /// Ids of the entities currently inside, as of the last [`check`](Self::check).
    pub fn inside(&self) -> HashSet<usize> {
        self.entities
            .iter()
            .filter(|e| e.state == ContainmentState::Inside)
            .map(|e| e.id)
            .collect()
    }
}
