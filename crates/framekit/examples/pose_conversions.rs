//! Round-trip poses through quaternions and Euler angles.
//!
//! Run with `cargo run --example pose_conversions`.

use framekit::core::{pose_from_xyz_rpy, pose_to_xyz_rpy, DisplayPose, Pose3};

fn main() {
    let identity = Pose3::identity();
    let q = identity.rotation;
    println!("the identity rotation as a quaternion:");
    println!("\tw={} x={} y={} z={}", q.w, q.i, q.j, q.k);

    let yawed = pose_from_xyz_rpy(0.0, 0.0, 0.0, 0.0, 0.0, 3.14);
    let q = yawed.rotation;
    println!("a pose built from roll=0, pitch=0, yaw=3.14:");
    println!("\tw={} x={} y={} z={}", q.w, q.i, q.j, q.k);

    let [_, _, _, roll, pitch, yaw] = pose_to_xyz_rpy(&yawed);
    println!("and back to Euler angles:");
    println!("\troll={roll} pitch={pitch} yaw={yaw}");

    // composition folds a child pose into its parent's coordinates
    let parent = pose_from_xyz_rpy(1.0, 0.0, 0.0, 0.0, 0.0, 1.5707);
    let child = pose_from_xyz_rpy(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    println!("child folded into parent: [{}]", DisplayPose(&(parent * child)));
}
