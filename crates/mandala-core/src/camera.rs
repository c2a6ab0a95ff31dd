//! Scrollytelling camera: a fixed three-keyframe path sampled by scroll
//! progress, followed by a damped rig that the frame loop steps every tick.

use glam::{Mat4, Vec3};

use crate::constants::{
    CAMERA_BLEND, CAMERA_ZFAR, CAMERA_ZNEAR, MOUSE_PARALLAX_BLEND, MOUSE_PARALLAX_GAIN,
    SCROLL_MODE_SPLIT,
};

/// A fixed camera pose used as an interpolation endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraKeyframe {
    pub position: Vec3,
    pub fov_deg: f32,
    pub look_at_y: f32,
}

/// The journey: sanctuary (crystals) -> descent -> golden dunes.
#[derive(Clone, Debug)]
pub struct CameraPath {
    pub start: CameraKeyframe,
    pub mid: CameraKeyframe,
    pub end: CameraKeyframe,
}

impl Default for CameraPath {
    fn default() -> Self {
        Self {
            start: CameraKeyframe {
                position: Vec3::new(0.0, 0.0, 4.0),
                fov_deg: 75.0,
                look_at_y: 0.0,
            },
            mid: CameraKeyframe {
                position: Vec3::new(0.0, -5.0, 12.0),
                fov_deg: 65.0,
                look_at_y: -10.0,
            },
            end: CameraKeyframe {
                position: Vec3::new(0.0, -12.0, 15.0),
                fov_deg: 90.0,
                look_at_y: -15.0,
            },
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_keyframe(a: &CameraKeyframe, b: &CameraKeyframe, t: f32) -> CameraKeyframe {
    CameraKeyframe {
        position: a.position.lerp(b.position, t),
        fov_deg: lerp(a.fov_deg, b.fov_deg, t),
        look_at_y: lerp(a.look_at_y, b.look_at_y, t),
    }
}

impl CameraPath {
    /// Piecewise-linear target pose for a scroll progress in `[0, 1]`.
    /// Continuous at the mode split: both halves meet at `mid`.
    pub fn target_at(&self, progress: f32) -> CameraKeyframe {
        let p = progress.clamp(0.0, 1.0);
        if p < SCROLL_MODE_SPLIT {
            lerp_keyframe(&self.start, &self.mid, p * 2.0)
        } else {
            lerp_keyframe(&self.mid, &self.end, (p - SCROLL_MODE_SPLIT) * 2.0)
        }
    }
}

/// Damped camera state. Every field approaches its target exponentially, so
/// the visible pose never snaps even when the target jumps.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub position: Vec3,
    pub fov_deg: f32,
    pub look_at_y: f32,
    pub aspect: f32,
}

impl CameraRig {
    /// Start at the path's first keyframe.
    pub fn new(path: &CameraPath, aspect: f32) -> Self {
        Self {
            position: path.start.position,
            fov_deg: path.start.fov_deg,
            look_at_y: path.start.look_at_y,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            },
        }
    }

    /// Applied synchronously on resize, before the next frame renders.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// One tick of smoothing: approach the scroll target at `CAMERA_BLEND`,
    /// then pull x/y toward the mouse-parallax target at the smaller
    /// `MOUSE_PARALLAX_BLEND`. Order matters; the parallax pull is applied
    /// after the scroll blend.
    pub fn step(&mut self, target: &CameraKeyframe, mouse_x: f32, mouse_y: f32) {
        self.position += (target.position - self.position) * CAMERA_BLEND;

        let parallax_x = mouse_x * MOUSE_PARALLAX_GAIN;
        let parallax_y = -mouse_y * MOUSE_PARALLAX_GAIN;
        self.position.x += (parallax_x - self.position.x) * MOUSE_PARALLAX_BLEND;
        self.position.y += (parallax_y - self.position.y) * MOUSE_PARALLAX_BLEND;

        self.fov_deg += (target.fov_deg - self.fov_deg) * CAMERA_BLEND;
        self.look_at_y += (target.look_at_y - self.look_at_y) * CAMERA_BLEND;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.position,
            Vec3::new(0.0, self.look_at_y, 0.0),
            Vec3::Y,
        )
    }

    /// Rebuilt from the current field of view on every query, so a smoothed
    /// FOV change always reaches the projection.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_deg.to_radians(),
            self.aspect,
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        )
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
