//! Build a small robot frame tree, print it and run a few queries.
//!
//! Run with `cargo run --example frame_graph_tour`.

use framekit::core::{init_with_level, pose_from_xyz_rpy, DisplayPose};
use framekit::{FrameError, FrameGraph};
use log::{info, LevelFilter};

fn main() -> Result<(), FrameError> {
    init_with_level(LevelFilter::Debug).expect("install logger");

    let graph = FrameGraph::new();
    graph.add_frame("/", "base", pose_from_xyz_rpy(1.0, 0.0, 0.0, 0.0, 0.0, 0.0))?;
    graph.add_frame("/base", "lidar", pose_from_xyz_rpy(0.2, 0.0, 0.4, 0.0, 0.0, 0.0))?;
    graph.add_frame("/base", "camera", pose_from_xyz_rpy(0.3, 0.1, 0.2, 0.0, 0.0, 0.0))?;

    info!("frame tree:\n{graph}");

    let lidar_in_camera = graph.pose("/base/lidar", "/base/camera")?;
    info!("lidar in camera coordinates: [{}]", DisplayPose(&lidar_in_camera));

    // a reusable handle tracks the base as it drives forward
    let lidar_in_root = graph.create_relative_pose("/base/lidar", "/")?;
    for step in 0..4 {
        let x = 1.0 + step as f64 * 0.5;
        graph.set_local_pose("/base", pose_from_xyz_rpy(x, 0.0, 0.0, 0.0, 0.0, 0.0))?;
        let pose = graph.pose_of(&lidar_in_root)?;
        info!("step {step}: lidar at [{}]", DisplayPose(&pose));
    }

    Ok(())
}
