//! End-to-end frame graph scenarios.

use std::f64::consts::PI;
use std::sync::Arc;
use std::thread;

use framekit_core::{pose_approx_eq, pose_from_xyz_rpy, DisplayPose, Pose3};
use framekit_graph::{FrameError, FrameGraph, RelativePose};

/// Tight tolerance for exact compositions.
const TOL: f64 = 1e-9;
/// Scenarios written with the truncated angle literal `1.5707` perturb
/// translations by about a millimeter at 10 m; compare loosely there.
const TOL_TRUNC: f64 = 5e-3;

fn xyz(x: f64, y: f64, z: f64) -> Pose3 {
    pose_from_xyz_rpy(x, y, z, 0.0, 0.0, 0.0)
}

fn assert_pose_close(actual: &Pose3, expected: &Pose3, tol: f64) {
    assert!(
        pose_approx_eq(actual, expected, tol),
        "expected [{}] ~ [{}] within {}",
        DisplayPose(actual),
        DisplayPose(expected),
        tol
    );
}

#[test]
fn absolute_paths() {
    let graph = FrameGraph::new();
    let pa = xyz(1.0, 0.0, 0.0);

    // parent paths must be absolute
    assert!(matches!(
        graph.add_frame("root", "x", pa),
        Err(FrameError::InvalidPath { .. })
    ));
    // `#` is not a valid name
    assert!(matches!(
        graph.add_frame("/", "#", pa),
        Err(FrameError::InvalidPath { .. })
    ));
    // neither is the empty string, as a path or as a name
    assert!(matches!(
        graph.add_frame("", "ho", pa),
        Err(FrameError::InvalidPath { .. })
    ));
    assert!(matches!(
        graph.add_frame("/", "", pa),
        Err(FrameError::InvalidPath { .. })
    ));
    // `..` disqualifies an absolute path
    assert!(matches!(
        graph.add_frame("/..", "x", pa),
        Err(FrameError::InvalidPath { .. })
    ));
    // well-formed but nonexistent parent
    assert!(matches!(
        graph.add_frame("/universe", "x", pa),
        Err(FrameError::UnknownFrame { .. })
    ));
    // queries against frames that do not exist
    assert!(matches!(
        graph.pose("/x", "/"),
        Err(FrameError::UnknownFrame { .. })
    ));
    assert!(matches!(
        graph.pose("/", "/x"),
        Err(FrameError::UnknownFrame { .. })
    ));

    graph.add_frame("/", "a", pa).expect("add /a");
    assert!(matches!(
        graph.add_frame("/", "a", pa),
        Err(FrameError::DuplicateFrame { .. })
    ));

    // property P1: the new frame resolves and reports the pose it was given
    assert_pose_close(&graph.pose("/a", "/").expect("pose"), &pa, TOL);
    assert_pose_close(&graph.local_pose("/a").expect("local pose"), &pa, TOL);

    assert!(matches!(
        graph.pose("/a", "/x"),
        Err(FrameError::UnknownFrame { .. })
    ));

    let pb = xyz(0.0, 1.0, 0.0);
    graph.add_frame("/", "b", pb).expect("add /b");

    // a relative reference resolves from the target frame
    assert_pose_close(&graph.pose("/b", "..").expect("pose"), &pb, TOL);
    assert_pose_close(
        &graph.pose("/b", ".").expect("pose"),
        &Pose3::identity(),
        TOL,
    );
    assert!(matches!(
        graph.pose("/b", ""),
        Err(FrameError::InvalidPath { .. })
    ));
    // `?` parses as a name but /b has no such child
    assert!(matches!(
        graph.pose("/b", "?"),
        Err(FrameError::UnknownFrame { .. })
    ));

    let b2a = graph.pose("/a", "/b").expect("pose");
    let b2a2 = graph.pose("/a", "../b").expect("pose");
    assert_pose_close(&b2a, &b2a2, TOL);
}

#[test]
fn two_siblings_and_rotation() {
    let graph = FrameGraph::new();
    graph.add_frame("/", "a", xyz(10.0, 0.0, 0.0)).expect("add /a");
    graph.add_frame("/", "b", xyz(0.0, 10.0, 0.0)).expect("add /b");

    assert_pose_close(
        &graph.pose("/a", "/b").expect("pose"),
        &xyz(10.0, -10.0, 0.0),
        TOL,
    );
    assert_pose_close(
        &graph.pose("/b", "/a").expect("pose"),
        &xyz(-10.0, 10.0, 0.0),
        TOL,
    );

    // rotate a 90 degrees (truncated) around z
    graph
        .set_local_pose("/a", pose_from_xyz_rpy(10.0, 0.0, 0.0, 0.0, 0.0, 1.5707))
        .expect("set pose");
    assert_pose_close(
        &graph.pose("/a", "/b").expect("pose"),
        &pose_from_xyz_rpy(10.0, -10.0, 0.0, 0.0, 0.0, 1.5707),
        TOL_TRUNC,
    );
    assert_pose_close(
        &graph.pose("/b", "/a").expect("pose"),
        &pose_from_xyz_rpy(10.0, 10.0, 0.0, 0.0, 0.0, -1.5707),
        TOL_TRUNC,
    );
}

#[test]
fn siblings_stay_fixed_under_parent_rotation() {
    let graph = FrameGraph::new();
    graph.add_frame("/", "a", xyz(10.0, 0.0, 0.0)).expect("add /a");
    graph.add_frame("/a", "aa", xyz(10.0, 0.0, 0.0)).expect("add /a/aa");
    graph
        .add_frame("/a/aa", "aaa", xyz(10.0, 0.0, 0.0))
        .expect("add /a/aa/aaa");
    graph.add_frame("/a", "ab", xyz(0.0, 10.0, 0.0)).expect("add /a/ab");

    let expected = xyz(10.0, -10.0, 0.0);
    let steps = 10;
    for i in 0..=steps {
        let angle = i as f64 * (2.0 * PI / steps as f64);
        graph
            .set_local_pose("/a", pose_from_xyz_rpy(10.0, 0.0, 0.0, 0.0, 0.0, angle))
            .expect("set pose");
        // the aa/ab relation does not involve a's pose at all
        assert_pose_close(&graph.pose("/a/aa", "/a/ab").expect("pose"), &expected, TOL);
    }
}

#[test]
fn pose_matches_parent_to_child_product() {
    // property P2: with the root as reference, the answer is the plain walk
    // of local poses from the root down to the target
    let graph = FrameGraph::new();
    let pa = pose_from_xyz_rpy(1.0, 2.0, 3.0, 0.0, 0.0, 0.5);
    let paa = pose_from_xyz_rpy(-2.0, 0.5, 0.0, 0.2, 0.0, 0.0);
    graph.add_frame("/", "a", pa).expect("add /a");
    graph.add_frame("/a", "aa", paa).expect("add /a/aa");

    assert_pose_close(&graph.pose("/a/aa", "/").expect("pose"), &(pa * paa), TOL);
}

#[test]
fn pose_inverts_and_cancels() {
    let graph = FrameGraph::new();
    graph
        .add_frame("/", "a", pose_from_xyz_rpy(10.0, 0.0, 0.0, 0.0, 0.0, 0.7))
        .expect("add /a");
    graph.add_frame("/a", "aa", xyz(1.0, 2.0, 3.0)).expect("add /a/aa");
    graph.add_frame("/", "b", xyz(0.0, 10.0, 0.0)).expect("add /b");

    // property P3
    let ab = graph.pose("/a/aa", "/b").expect("pose");
    let ba = graph.pose("/b", "/a/aa").expect("pose");
    assert_pose_close(&ab, &ba.inverse(), TOL);

    // property P4
    for path in ["/", "/a", "/a/aa", "/b"] {
        assert_pose_close(
            &graph.pose(path, path).expect("pose"),
            &Pose3::identity(),
            TOL,
        );
    }
}

#[test]
fn delete_frame_destroys_the_subtree() {
    let graph = FrameGraph::new();
    graph.add_frame("/", "a", xyz(1.0, 0.0, 0.0)).expect("add /a");
    graph.add_frame("/a", "aa", xyz(0.0, 1.0, 0.0)).expect("add /a/aa");
    graph
        .add_frame("/a/aa", "aaa", xyz(0.0, 0.0, 1.0))
        .expect("add /a/aa/aaa");

    // not absolute
    assert!(matches!(
        graph.delete_frame(".."),
        Err(FrameError::InvalidPath { .. })
    ));
    // not a real frame
    assert!(matches!(
        graph.delete_frame("/banana"),
        Err(FrameError::UnknownFrame { .. })
    ));

    let aa = graph.frame("/a/aa").expect("frame /a/aa");
    graph.delete_frame("/a").expect("delete /a");

    // property P5: everything under the deleted prefix is gone
    for path in ["/a", "/a/aa", "/a/aa/aaa"] {
        assert!(matches!(
            graph.frame(path),
            Err(FrameError::UnknownFrame { .. })
        ));
    }
    // stale handles fail on use instead of reaching freed frames
    assert!(matches!(
        graph.local_pose_of(aa),
        Err(FrameError::UnknownFrame { .. })
    ));
    // the subtree is not implicitly resurrected
    assert!(matches!(
        graph.add_frame("/a/aa", "aaa", xyz(0.0, 0.0, 1.0)),
        Err(FrameError::UnknownFrame { .. })
    ));
}

#[test]
fn relative_pose_handles_are_values() {
    let graph = FrameGraph::new();
    graph.add_frame("/", "a", xyz(1.0, 0.0, 0.0)).expect("add /a");
    graph.add_frame("/a", "aa", xyz(0.0, 1.0, 0.0)).expect("add /a/aa");

    let rel = graph.create_relative_pose("/a/aa", "/").expect("create");
    assert_pose_close(
        &graph.pose_of(&rel).expect("pose"),
        &xyz(1.0, 1.0, 0.0),
        TOL,
    );

    // clones evaluate identically
    let rel2 = rel.clone();
    assert_pose_close(
        &graph.pose_of(&rel2).expect("pose"),
        &graph.pose_of(&rel).expect("pose"),
        TOL,
    );

    // a default handle is empty and fails; assignment replaces it
    let mut rel3 = RelativePose::default();
    assert!(matches!(
        graph.pose_of(&rel3),
        Err(FrameError::UnknownFrame { .. })
    ));
    rel3 = rel2.clone();
    // self-assignment must not corrupt the handle
    rel3 = rel3.clone();
    assert_pose_close(
        &graph.pose_of(&rel3).expect("pose"),
        &graph.pose_of(&rel).expect("pose"),
        TOL,
    );

    // property P7: evaluation reflects later local-pose mutations
    graph.set_local_pose("/a", xyz(5.0, 0.0, 0.0)).expect("set pose");
    assert_pose_close(
        &graph.pose_of(&rel).expect("pose"),
        &xyz(5.0, 1.0, 0.0),
        TOL,
    );

    // deleting a chain frame invalidates the handle
    graph.delete_frame("/a").expect("delete /a");
    assert!(matches!(
        graph.pose_of(&rel),
        Err(FrameError::UnknownFrame { .. })
    ));
}

#[test]
fn relative_pose_between_cousins() {
    let graph = FrameGraph::new();
    graph.add_frame("/", "a", xyz(10.0, 0.0, 0.0)).expect("add /a");
    graph.add_frame("/a", "aa", xyz(10.0, 0.0, 0.0)).expect("add /a/aa");
    graph.add_frame("/a", "ab", xyz(0.0, 10.0, 0.0)).expect("add /a/ab");

    let rel = graph.create_relative_pose("/a/aa", "/a/ab").expect("create");
    assert_pose_close(
        &graph.pose_of(&rel).expect("pose"),
        &xyz(10.0, -10.0, 0.0),
        TOL,
    );
    // the common parent's pose cancels out of the evaluation
    graph
        .set_local_pose("/a", pose_from_xyz_rpy(10.0, 0.0, 0.0, 0.0, 0.0, 0.523599))
        .expect("set pose");
    assert_pose_close(
        &graph.pose_of(&rel).expect("pose"),
        &xyz(10.0, -10.0, 0.0),
        TOL,
    );
}

#[test]
fn concurrent_reader_observes_monotonic_x() {
    let graph = Arc::new(FrameGraph::new());
    graph.add_frame("/", "a", xyz(0.0, 0.0, 0.0)).expect("add /a");
    let rel = graph.create_relative_pose("/a", "/").expect("create");

    let writer = {
        let graph = Arc::clone(&graph);
        thread::spawn(move || {
            let frame = graph.frame("/a").expect("frame /a");
            for i in 0..1_000_000 {
                graph
                    .set_local_pose_of(frame, xyz(i as f64, 0.0, 0.0))
                    .expect("set pose");
            }
        })
    };

    let mut last = graph.pose_of(&rel).expect("pose").translation.x;
    for _ in 0..1000 {
        let x = graph.pose_of(&rel).expect("pose").translation.x;
        assert!(x >= last, "x went backwards: {last} -> {x}");
        last = x;
    }
    writer.join().expect("join writer");

    // after the writer drains, handle and string query agree
    assert_pose_close(
        &graph.pose_of(&rel).expect("pose"),
        &graph.pose("/a", "/").expect("pose"),
        TOL,
    );
}

#[test]
fn display_lists_frames_depth_first() {
    let graph = FrameGraph::new();
    graph.add_frame("/", "a1", xyz(0.0, 0.0, 0.0)).expect("add");
    graph.add_frame("/a1", "b1", xyz(0.0, 1.0, 0.0)).expect("add");
    graph.add_frame("/a1", "b2", xyz(0.0, 0.0, 1.0)).expect("add");
    graph.add_frame("/a1/b2", "c1", xyz(0.0, 0.0, 1.0)).expect("add");
    graph.add_frame("/a1/b2", "c2", xyz(1.0, 0.0, 0.0)).expect("add");
    graph.add_frame("/a1/b2/c1", "d1", xyz(0.0, 0.0, 0.0)).expect("add");
    graph.add_frame("/", "a2", xyz(0.0, 0.0, 2.0)).expect("add");

    let expected = "\
/ [0 0 0 0 0 0]
/a1 [0 0 0 0 0 0]
/a1/b1 [0 1 0 0 0 0]
/a1/b2 [0 0 1 0 0 0]
/a1/b2/c1 [0 0 1 0 0 0]
/a1/b2/c1/d1 [0 0 0 0 0 0]
/a1/b2/c2 [1 0 0 0 0 0]
/a2 [0 0 2 0 0 0]
";
    assert_eq!(graph.to_string(), expected);
}

#[test]
fn setting_a_pose_is_visible_in_queries() {
    let graph = FrameGraph::new();
    let pa = xyz(1.0, 0.0, 0.0);
    graph.add_frame("/", "a", pa).expect("add /a");
    assert_pose_close(&graph.pose("/a", "/").expect("pose"), &pa, TOL);

    let pb = xyz(2.0, 0.0, 0.0);
    graph.set_local_pose("/a", pb).expect("set pose");
    assert_pose_close(&graph.pose("/a", "/").expect("pose"), &pb, TOL);
}
