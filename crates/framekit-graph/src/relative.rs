//! Reusable relative-pose query handles.

use framekit_core::Pose3;

use crate::arena::{FrameArena, FrameId};
use crate::error::FrameError;

/// A reusable handle for "pose of one frame in another's coordinates".
///
/// The handle stores the two upward chains that meet at the lowest common
/// ancestor of the target and reference frames, as weak [`FrameId`]s.
/// Evaluation ([`FrameGraph::pose_of`](crate::FrameGraph::pose_of)) re-walks
/// the stored ids under the graph lock, so a handle tracks later
/// `set_local_pose` mutations; deleting any frame on either chain makes
/// evaluation fail with [`FrameError::UnknownFrame`].
///
/// Handles are plain values: clone and reassign freely. A default handle is
/// empty and fails on evaluation.
#[derive(Clone, Debug, Default)]
pub struct RelativePose {
    /// Lowest common ancestor; `None` only for default-constructed handles.
    anchor: Option<FrameId>,
    /// Target side: endpoint first, child-of-ancestor last.
    target_chain: Vec<FrameId>,
    /// Reference side, same order; composed inverted during evaluation.
    reference_chain: Vec<FrameId>,
}

impl RelativePose {
    /// Build the chains between two live frames of one arena.
    pub(crate) fn between(
        arena: &FrameArena,
        target: FrameId,
        reference: FrameId,
    ) -> Result<Self, FrameError> {
        let mut target_chain = ancestry(arena, target)?;
        let mut reference_chain = ancestry(arena, reference)?;

        // Both chains end at the root; popping the shared tail leaves the
        // lowest common ancestor as the last frame popped.
        let mut anchor = None;
        while let (Some(&a), Some(&b)) = (target_chain.last(), reference_chain.last()) {
            if a != b {
                break;
            }
            anchor = Some(a);
            target_chain.pop();
            reference_chain.pop();
        }
        debug_assert!(anchor.is_some(), "frames of one tree share the root");

        Ok(Self {
            anchor,
            target_chain,
            reference_chain,
        })
    }

    /// Recompute the pose from current local poses.
    pub(crate) fn compute(&self, arena: &FrameArena) -> Result<Pose3, FrameError> {
        let anchor = self.anchor.ok_or_else(Self::stale)?;
        if arena.get(anchor).is_none() {
            return Err(Self::stale());
        }
        let target = fold_chain(arena, &self.target_chain)?;
        let reference = fold_chain(arena, &self.reference_chain)?;
        Ok(reference.inverse() * target)
    }

    fn stale() -> FrameError {
        FrameError::unknown("<stale relative pose>")
    }
}

/// Pose of the chain's endpoint in the ancestor's coordinates: local poses
/// composed parent-to-child from the ancestor side down to the endpoint.
fn fold_chain(arena: &FrameArena, chain: &[FrameId]) -> Result<Pose3, FrameError> {
    let mut pose = Pose3::identity();
    for &id in chain.iter().rev() {
        let node = arena
            .get(id)
            .ok_or_else(|| FrameError::unknown("<stale relative pose>"))?;
        pose *= node.local_pose;
    }
    Ok(pose)
}

/// Chain from `id` up to and including the root.
fn ancestry(arena: &FrameArena, id: FrameId) -> Result<Vec<FrameId>, FrameError> {
    let mut chain = Vec::new();
    let mut cur = Some(id);
    while let Some(c) = cur {
        let node = arena
            .get(c)
            .ok_or_else(|| FrameError::unknown("<stale frame handle>"))?;
        chain.push(c);
        cur = node.parent;
    }
    Ok(chain)
}
