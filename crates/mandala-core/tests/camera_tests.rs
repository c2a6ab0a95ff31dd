// Camera path sampling and rig smoothing.

use glam::Vec3;
use mandala_core::{CameraPath, CameraRig};

#[test]
fn path_endpoints_match_keyframes() {
    let path = CameraPath::default();

    let at_start = path.target_at(0.0);
    assert_eq!(at_start.position, path.start.position);
    assert_eq!(at_start.fov_deg, path.start.fov_deg);

    let at_end = path.target_at(1.0);
    assert_eq!(at_end.position, path.end.position);
    assert_eq!(at_end.fov_deg, path.end.fov_deg);
    assert_eq!(at_end.look_at_y, path.end.look_at_y);
}

#[test]
fn path_is_continuous_at_the_mode_split() {
    let path = CameraPath::default();
    let below = path.target_at(0.5 - 1e-4);
    let at = path.target_at(0.5);

    assert!((below.position - at.position).length() < 0.01);
    assert!((below.fov_deg - at.fov_deg).abs() < 0.01);
    assert!((below.look_at_y - at.look_at_y).abs() < 0.01);
    // The split lands exactly on the middle keyframe.
    assert_eq!(at.position, path.mid.position);
}

#[test]
fn path_clamps_out_of_range_progress() {
    let path = CameraPath::default();
    assert_eq!(path.target_at(-2.0).position, path.start.position);
    assert_eq!(path.target_at(3.0).position, path.end.position);
}

#[test]
fn path_interpolates_halfway_through_the_first_leg() {
    let path = CameraPath::default();
    let quarter = path.target_at(0.25);
    let expected = (path.start.position + path.mid.position) * 0.5;
    assert!((quarter.position - expected).length() < 1e-5);
    assert!((quarter.fov_deg - 70.0).abs() < 1e-4);
}

#[test]
fn rig_starts_at_the_first_keyframe() {
    let path = CameraPath::default();
    let rig = CameraRig::new(&path, 16.0 / 9.0);
    assert_eq!(rig.position, path.start.position);
    assert_eq!(rig.fov_deg, path.start.fov_deg);
}

#[test]
fn rig_approaches_target_without_overshooting() {
    let path = CameraPath::default();
    let mut rig = CameraRig::new(&path, 1.0);
    let target = path.target_at(1.0);

    let mut prev_z = rig.position.z;
    for _ in 0..200 {
        rig.step(&target, 0.0, 0.0);
        assert!(rig.position.z >= prev_z); // moves toward z=15 monotonically
        assert!(rig.position.z <= target.position.z + 1e-4);
        prev_z = rig.position.z;
    }
    assert!((rig.position.z - target.position.z).abs() < 0.1);
    assert!((rig.fov_deg - target.fov_deg).abs() < 0.1);
    assert!((rig.look_at_y - target.look_at_y).abs() < 0.1);
}

#[test]
fn rig_settles_with_centered_mouse() {
    // With the pointer at the viewport center the parallax target is the
    // origin, so x stays pinned while y settles between the dive target and
    // zero (the parallax pull always competes with the scroll blend on y).
    let path = CameraPath::default();
    let mut rig = CameraRig::new(&path, 1.0);
    let target = path.target_at(1.0);

    for _ in 0..2000 {
        rig.step(&target, 0.0, 0.0);
    }
    assert!(rig.position.x.abs() < 1e-4);
    assert!(rig.position.y < 0.0);
    assert!(rig.position.y > target.position.y);

    // Steady state: another step barely moves it.
    let before = rig.position;
    rig.step(&target, 0.0, 0.0);
    assert!((rig.position - before).length() < 1e-4);
}

#[test]
fn mouse_offsets_the_settled_position() {
    let path = CameraPath::default();
    let mut centered = CameraRig::new(&path, 1.0);
    let mut offset = CameraRig::new(&path, 1.0);
    let target = path.target_at(0.0);

    for _ in 0..1000 {
        centered.step(&target, 0.0, 0.0);
        offset.step(&target, 400.0, -300.0);
    }
    // The parallax pull (gain 0.005) shares each tick with the scroll blend,
    // so the settled offset is a fraction of the raw 2.0 / 1.5 targets.
    assert!(offset.position.x > centered.position.x + 0.5);
    assert!(offset.position.y > centered.position.y + 0.5);
    assert!(offset.position.x < 2.0);
}

#[test]
fn invalid_aspect_is_ignored() {
    let path = CameraPath::default();
    let mut rig = CameraRig::new(&path, 2.0);
    rig.set_aspect(0.0);
    assert_eq!(rig.aspect, 2.0);
    rig.set_aspect(f32::NAN);
    assert_eq!(rig.aspect, 2.0);
    rig.set_aspect(1.5);
    assert_eq!(rig.aspect, 1.5);
}

#[test]
fn projection_tracks_fov_changes() {
    let path = CameraPath::default();
    let mut rig = CameraRig::new(&path, 1.0);
    let narrow = rig.projection_matrix();
    rig.fov_deg = 90.0;
    let wide = rig.projection_matrix();
    // Wider FOV shrinks the focal term.
    assert!(wide.x_axis.x < narrow.x_axis.x);
}

#[test]
fn view_matrix_centers_the_look_target() {
    let path = CameraPath::default();
    let rig = CameraRig::new(&path, 1.0);
    let looked_at = rig
        .view_matrix()
        .transform_point3(Vec3::new(0.0, rig.look_at_y, 0.0));
    // The look-at point lands on the view axis, in front of the camera.
    assert!(looked_at.x.abs() < 1e-5);
    assert!(looked_at.y.abs() < 1e-5);
    assert!(looked_at.z < 0.0);
}
