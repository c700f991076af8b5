//! Shared numerics for the `framekit-*` workspace.
//!
//! Value types and small helpers the frame graph and odometry crates lean
//! on: pose construction and formatting over [`nalgebra`] isometries,
//! radian angles, windowed means, axis-aligned boxes and a moving-window
//! containment tracker, plus logger setup. Nothing here knows about the
//! frame tree itself; types flow one way, into the higher crates.

mod aabb;
mod angle;
mod logger;
mod moving_window;
mod pose;
mod rolling_mean;

pub use aabb::AxisAlignedBox;
pub use angle::Angle;
#[cfg(feature = "tracing")]
pub use logger::init_tracing;
pub use logger::{init_from_env, init_with_level};
pub use moving_window::{
    AxisAlignedBoxWindow, ContainmentState, EntityState, MovingWindow, WindowPolicy,
};
pub use pose::{pose_approx_eq, pose_from_xyz_rpy, pose_to_xyz_rpy, DisplayPose, Pose3};
pub use rolling_mean::RollingMean;
