//! High-level facade crate for the `framekit-*` workspace.
//!
//! This crate provides stable, convenient re-exports of the underlying
//! crates:
//! - [`graph`] — the thread-safe frame tree and relative-pose handles
//! - [`core`] — shared numerics: poses, angles, boxes, windowed means
//! - [`odometry`] — diff-drive odometry
//!
//! Runnable demos live under this crate's `examples/` directory.

pub use framekit_core as core;
pub use framekit_graph as graph;
pub use framekit_odometry as odometry;

pub use framekit_core::{Angle, AxisAlignedBox, DisplayPose, Pose3};
pub use framekit_graph::{FrameError, FrameGraph, FrameId, FramePath, RelativePose};
pub use framekit_odometry::DiffDriveOdometry;
