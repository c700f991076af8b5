//! The frame graph itself.

use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use framekit_core::{DisplayPose, Pose3};
use log::debug;

use crate::arena::{FrameArena, FrameId};
use crate::error::FrameError;
use crate::path::{is_valid_name, FramePath};
use crate::relative::RelativePose;

/// A tree of named coordinate frames, each posed relative to its parent.
///
/// The graph answers queries of the form "pose of frame A expressed in
/// frame B". Frames are addressed by `/`-separated paths; mutations and
/// queries are serialized by one reader/writer lock, so every query
/// observes a single consistent snapshot of local poses and all methods
/// take `&self`.
///
/// ```
/// use framekit_core::pose_from_xyz_rpy;
/// use framekit_graph::FrameGraph;
///
/// let graph = FrameGraph::new();
/// graph.add_frame("/", "base", pose_from_xyz_rpy(1.0, 0.0, 0.0, 0.0, 0.0, 0.0))?;
/// graph.add_frame("/base", "lidar", pose_from_xyz_rpy(0.5, 0.0, 0.0, 0.0, 0.0, 0.0))?;
///
/// let lidar_in_root = graph.pose("/base/lidar", "/")?;
/// assert!((lidar_in_root.translation.x - 1.5).abs() < 1e-12);
/// # Ok::<(), framekit_graph::FrameError>(())
/// ```
pub struct FrameGraph {
    inner: RwLock<FrameArena>,
}

impl Default for FrameGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameGraph {
    /// A graph holding only the root frame `/`.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(FrameArena::new()),
        }
    }

    // Add/delete keep the tree consistent before releasing the lock, so a
    // poisoned lock only reports a panic elsewhere and the arena itself is
    // still sound to hand out.
    fn read(&self) -> RwLockReadGuard<'_, FrameArena> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FrameArena> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Attach a new frame named `name` under the frame at `parent_path`.
    ///
    /// `parent_path` must be absolute and resolve to an existing frame;
    /// `name` must be a valid, unused sibling name. Returns a weak handle to
    /// the new frame.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self, local_pose)))]
    pub fn add_frame(
        &self,
        parent_path: &str,
        name: &str,
        local_pose: Pose3,
    ) -> Result<FrameId, FrameError> {
        let parsed = parse_absolute(parent_path)?;
        if !is_valid_name(name) {
            return Err(FrameError::invalid(name, "invalid frame name"));
        }

        let mut arena = self.write();
        let parent = resolve(&arena, arena.root(), &parsed, parent_path)?;
        if arena.child_by_name(parent, name).is_some() {
            return Err(FrameError::DuplicateFrame {
                parent: parent_path.to_owned(),
                name: name.to_owned(),
            });
        }
        let id = arena.attach(parent, name.to_owned(), local_pose);
        debug!("added frame `{name}` under `{parent_path}`");
        Ok(id)
    }

    /// Destroy the frame at `path` together with its whole subtree.
    ///
    /// `path` must be absolute and resolve to a non-root frame. Handles into
    /// the destroyed subtree fail on their next use.
    pub fn delete_frame(&self, path: &str) -> Result<(), FrameError> {
        let parsed = parse_absolute(path)?;
        let mut arena = self.write();
        let id = resolve(&arena, arena.root(), &parsed, path)?;
        if id == arena.root() {
            return Err(FrameError::RootWrite);
        }
        arena.remove_subtree(id);
        debug!("deleted frame `{path}` and its subtree");
        Ok(())
    }

    /// Weak handle to the frame at an absolute `path`.
    pub fn frame(&self, path: &str) -> Result<FrameId, FrameError> {
        let parsed = parse_absolute(path)?;
        let arena = self.read();
        resolve(&arena, arena.root(), &parsed, path)
    }

    /// Weak handle to the frame at `rel_path`, resolved from `origin`.
    ///
    /// An absolute `rel_path` resolves from the root instead. Fails when
    /// `origin` is stale or any hop is invalid.
    pub fn frame_from(&self, origin: FrameId, rel_path: &str) -> Result<FrameId, FrameError> {
        let parsed = FramePath::parse(rel_path)?;
        let arena = self.read();
        let start = if parsed.is_absolute() {
            arena.root()
        } else {
            origin
        };
        if arena.get(start).is_none() {
            return Err(FrameError::unknown(rel_path));
        }
        resolve(&arena, start, &parsed, rel_path)
    }

    /// Local pose of the frame at an absolute `path`.
    pub fn local_pose(&self, path: &str) -> Result<Pose3, FrameError> {
        let parsed = parse_absolute(path)?;
        let arena = self.read();
        let id = resolve(&arena, arena.root(), &parsed, path)?;
        Ok(node(&arena, id, path)?.local_pose)
    }

    /// Local pose of the frame behind a weak handle.
    pub fn local_pose_of(&self, frame: FrameId) -> Result<Pose3, FrameError> {
        let arena = self.read();
        Ok(node(&arena, frame, "<stale frame handle>")?.local_pose)
    }

    /// Replace the local pose of the frame at an absolute `path`.
    pub fn set_local_pose(&self, path: &str, local_pose: Pose3) -> Result<(), FrameError> {
        let parsed = parse_absolute(path)?;
        let mut arena = self.write();
        let id = resolve(&arena, arena.root(), &parsed, path)?;
        set_pose(&mut arena, id, local_pose, path)
    }

    /// Replace the local pose of the frame behind a weak handle.
    pub fn set_local_pose_of(&self, frame: FrameId, local_pose: Pose3) -> Result<(), FrameError> {
        let mut arena = self.write();
        set_pose(&mut arena, frame, local_pose, "<stale frame handle>")
    }

    /// Pose of the `target_path` frame expressed in the `reference_path`
    /// frame's coordinates.
    ///
    /// `target_path` must be absolute. `reference_path` may be absolute or
    /// relative; a relative reference resolves from the target frame, so
    /// `pose("/b", "..")` is `/b`'s local pose and `pose("/b", ".")` is the
    /// identity. Resolution and composition run under one lock acquisition.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self)))]
    pub fn pose(&self, target_path: &str, reference_path: &str) -> Result<Pose3, FrameError> {
        let arena = self.read();
        let rel = build_relative(&arena, target_path, reference_path)?;
        rel.compute(&arena)
    }

    /// Build a reusable [`RelativePose`] handle for the same query as
    /// [`pose`](Self::pose).
    ///
    /// Evaluating the handle later reflects local-pose mutations made in
    /// between; deleting any frame on either chain invalidates it.
    pub fn create_relative_pose(
        &self,
        target_path: &str,
        reference_path: &str,
    ) -> Result<RelativePose, FrameError> {
        let arena = self.read();
        build_relative(&arena, target_path, reference_path)
    }

    /// Evaluate a [`RelativePose`] handle against current local poses.
    pub fn pose_of(&self, relative: &RelativePose) -> Result<Pose3, FrameError> {
        let arena = self.read();
        relative.compute(&arena)
    }

    /// Name of the frame behind a handle; the root is named `/`.
    pub fn name_of(&self, frame: FrameId) -> Result<String, FrameError> {
        let arena = self.read();
        Ok(node(&arena, frame, "<stale frame handle>")?.name.clone())
    }

    /// Handle to the parent frame; `None` for the root.
    pub fn parent_of(&self, frame: FrameId) -> Result<Option<FrameId>, FrameError> {
        let arena = self.read();
        Ok(node(&arena, frame, "<stale frame handle>")?.parent)
    }

    /// `(name, handle)` pairs of the frame's children, in insertion order.
    pub fn children_of(&self, frame: FrameId) -> Result<Vec<(String, FrameId)>, FrameError> {
        let arena = self.read();
        let node = node(&arena, frame, "<stale frame handle>")?;
        Ok(node
            .children
            .iter()
            .filter_map(|&c| arena.get(c).map(|n| (n.name.clone(), c)))
            .collect())
    }

    /// True when the frame has a child with the given name.
    pub fn has_child(&self, frame: FrameId, name: &str) -> Result<bool, FrameError> {
        let arena = self.read();
        node(&arena, frame, "<stale frame handle>")?;
        Ok(arena.child_by_name(frame, name).is_some())
    }

    /// Attach a new child under the frame behind a handle.
    ///
    /// Handle-based variant of [`add_frame`](Self::add_frame); same naming
    /// and uniqueness rules.
    pub fn add_child(
        &self,
        frame: FrameId,
        name: &str,
        local_pose: Pose3,
    ) -> Result<FrameId, FrameError> {
        if !is_valid_name(name) {
            return Err(FrameError::invalid(name, "invalid frame name"));
        }
        let mut arena = self.write();
        let parent_path = arena
            .path_of(frame)
            .ok_or_else(|| FrameError::unknown("<stale frame handle>"))?;
        if arena.child_by_name(frame, name).is_some() {
            return Err(FrameError::DuplicateFrame {
                parent: parent_path,
                name: name.to_owned(),
            });
        }
        Ok(arena.attach(frame, name.to_owned(), local_pose))
    }

    /// Destroy the named child (and its subtree) of the frame behind a
    /// handle. `Ok(false)` when no child has that name.
    pub fn delete_child(&self, frame: FrameId, name: &str) -> Result<bool, FrameError> {
        let mut arena = self.write();
        node(&arena, frame, "<stale frame handle>")?;
        match arena.child_by_name(frame, name) {
            Some(child) => {
                arena.remove_subtree(child);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Depth-first, insertion-order dump: one `<path> [<pose>]` line per frame,
/// trailing newline after every line.
impl fmt::Display for FrameGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = self.read();
        let mut stack = vec![(arena.root(), "/".to_owned())];
        while let Some((id, path)) = stack.pop() {
            let Some(node) = arena.get(id) else { continue };
            writeln!(f, "{} [{}]", path, DisplayPose(&node.local_pose))?;
            // reversed so the first child is visited first
            for &child in node.children.iter().rev() {
                if let Some(child_node) = arena.get(child) {
                    let child_path = if path == "/" {
                        format!("/{}", child_node.name)
                    } else {
                        format!("{}/{}", path, child_node.name)
                    };
                    stack.push((child, child_path));
                }
            }
        }
        Ok(())
    }
}

/// Resolve both endpoints of a query and build the chain handle, all
/// against one locked view of the arena. The target must be absolute; a
/// relative reference resolves from the target frame.
fn build_relative(
    arena: &FrameArena,
    target_path: &str,
    reference_path: &str,
) -> Result<RelativePose, FrameError> {
    let target_parsed = parse_absolute(target_path)?;
    let reference_parsed = FramePath::parse(reference_path)?;

    let target = resolve(arena, arena.root(), &target_parsed, target_path)?;
    let start = if reference_parsed.is_absolute() {
        arena.root()
    } else {
        target
    };
    let reference = resolve(arena, start, &reference_parsed, reference_path)?;
    RelativePose::between(arena, target, reference)
}

fn parse_absolute(path: &str) -> Result<FramePath, FrameError> {
    let parsed = FramePath::parse(path)?;
    if !parsed.is_absolute() {
        return Err(FrameError::invalid(path, "path must be absolute"));
    }
    Ok(parsed)
}

/// Walk `path`'s elements from `start`: `..` moves to the parent (failing at
/// the root), anything else moves to the named child.
fn resolve(
    arena: &FrameArena,
    start: FrameId,
    path: &FramePath,
    text: &str,
) -> Result<FrameId, FrameError> {
    let mut cur = start;
    for elem in path.elements() {
        let node = arena
            .get(cur)
            .ok_or_else(|| FrameError::unknown(text))?;
        cur = if elem == ".." {
            node.parent.ok_or_else(|| FrameError::unknown(text))?
        } else {
            arena
                .child_by_name(cur, elem)
                .ok_or_else(|| FrameError::unknown(text))?
        };
    }
    Ok(cur)
}

fn node<'a>(
    arena: &'a FrameArena,
    id: FrameId,
    what: &str,
) -> Result<&'a crate::arena::FrameNode, FrameError> {
    arena.get(id).ok_or_else(|| FrameError::unknown(what))
}

fn set_pose(
    arena: &mut FrameArena,
    id: FrameId,
    local_pose: Pose3,
    what: &str,
) -> Result<(), FrameError> {
    if id == arena.root() {
        return Err(FrameError::RootWrite);
    }
    match arena.get_mut(id) {
        Some(node) => {
            node.local_pose = local_pose;
            Ok(())
        }
        None => Err(FrameError::unknown(what)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framekit_core::pose_from_xyz_rpy;

    fn xyz(x: f64, y: f64, z: f64) -> Pose3 {
        pose_from_xyz_rpy(x, y, z, 0.0, 0.0, 0.0)
    }

    #[test]
    fn children_keep_insertion_order() {
        let graph = FrameGraph::new();
        graph.add_frame("/", "a", xyz(1.0, 0.0, 0.0)).expect("add a");
        graph.add_frame("/a", "aa", xyz(0.0, 1.0, 0.0)).expect("add aa");
        graph
            .add_frame("/a/aa", "aaa", xyz(0.0, 0.0, 0.0))
            .expect("add aaa");
        graph
            .add_frame("/a/aa", "aaaa", xyz(0.0, 0.0, 1.0))
            .expect("add aaaa");

        let a = graph.frame("/a").expect("frame /a");
        assert_eq!(graph.children_of(a).expect("children").len(), 1);

        let aa = graph.frame("/a/aa").expect("frame /a/aa");
        let names: Vec<String> = graph
            .children_of(aa)
            .expect("children")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["aaa", "aaaa"]);

        assert!(graph.has_child(aa, "aaaa").expect("has_child"));
        assert!(!graph.has_child(aa, "a").expect("has_child"));
        assert!(graph.add_child(aa, "aaaa", xyz(0.0, 0.0, 0.0)).is_err());
        assert!(!graph.delete_child(aa, "nosuch").expect("delete_child"));
        assert!(graph.delete_child(aa, "aaaa").expect("delete_child"));
        assert!(!graph.has_child(aa, "aaaa").expect("has_child"));
    }

    #[test]
    fn frame_from_walks_dots_and_parents() {
        let graph = FrameGraph::new();
        graph.add_frame("/", "a", xyz(0.0, 0.0, 0.0)).expect("add a");
        let a = graph.frame("/a").expect("frame /a");

        let back_to_a = graph.frame_from(a, ".././a").expect("resolve");
        assert_eq!(back_to_a, a);

        // `..` from the root fails
        assert!(matches!(
            graph.frame_from(a, "../.."),
            Err(FrameError::UnknownFrame { .. })
        ));

        // absolute paths resolve from the root regardless of origin
        assert_eq!(graph.frame_from(a, "/a").expect("absolute"), a);
    }

    #[test]
    fn root_cannot_be_deleted_or_reposed() {
        let graph = FrameGraph::new();
        assert_eq!(graph.delete_frame("/"), Err(FrameError::RootWrite));
        assert_eq!(
            graph.set_local_pose("/", xyz(1.0, 0.0, 0.0)),
            Err(FrameError::RootWrite)
        );
        let root = graph.frame("/").expect("root");
        assert_eq!(
            graph.set_local_pose_of(root, xyz(1.0, 0.0, 0.0)),
            Err(FrameError::RootWrite)
        );
    }

    #[test]
    fn name_and_parent_accessors() {
        let graph = FrameGraph::new();
        graph.add_frame("/", "a", xyz(0.0, 0.0, 0.0)).expect("add a");
        let root = graph.frame("/").expect("root");
        let a = graph.frame("/a").expect("frame /a");

        assert_eq!(graph.name_of(root).expect("name"), "/");
        assert_eq!(graph.name_of(a).expect("name"), "a");
        assert_eq!(graph.parent_of(a).expect("parent"), Some(root));
        assert_eq!(graph.parent_of(root).expect("parent"), None);
    }
}
