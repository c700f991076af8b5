//! Helpers over [`nalgebra`] isometries.
//!
//! The rest of the workspace treats a pose as an opaque rigid-body transform
//! with composition (`*`), inversion and equality. The helpers here only add
//! the roll-pitch-yaw views used by callers and by the frame-graph printer.

use std::fmt;

use nalgebra::{Isometry3, Translation3, UnitQuaternion};

/// Rigid-body pose in 3-D: a rotation followed by a translation.
///
/// `a * b` applies `b` in `a`'s coordinate system, so the pose of a
/// grandchild frame in its grandparent is `parent_pose * child_pose`.
pub type Pose3 = Isometry3<f64>;

/// Build a pose from a translation and roll-pitch-yaw Euler angles.
pub fn pose_from_xyz_rpy(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Pose3 {
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

/// Decompose a pose into `[x, y, z, roll, pitch, yaw]`.
pub fn pose_to_xyz_rpy(pose: &Pose3) -> [f64; 6] {
    let t = &pose.translation;
    let (roll, pitch, yaw) = pose.rotation.euler_angles();
    [t.x, t.y, t.z, roll, pitch, yaw]
}

/// True when the two poses agree within `tol`: translation distance and
/// rotation angle are both at most `tol`.
pub fn pose_approx_eq(a: &Pose3, b: &Pose3, tol: f64) -> bool {
    let dt = (a.translation.vector - b.translation.vector).norm();
    let dr = a.rotation.angle_to(&b.rotation);
    dt <= tol && dr <= tol
}

/// Formats a pose as `x y z roll pitch yaw`, space separated.
///
/// Negative zeros produced by the Euler decomposition are normalized so an
/// identity rotation renders as `0 0 0`.
pub struct DisplayPose<'a>(pub &'a Pose3);

impl fmt::Display for DisplayPose<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in pose_to_xyz_rpy(self.0).into_iter().enumerate() {
            let v = if v == 0.0 { 0.0 } else { v };
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
