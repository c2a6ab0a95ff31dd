//! Falling copper leaves: a fixed-size instanced batch with per-leaf fall
//! speed, tumble, and sway. Leaves are recycled in place when they drop
//! below the kill plane; the batch never reallocates after construction.

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use crate::constants::{
    LEAF_BOTTOM_Y, LEAF_COUNT, LEAF_FALL_SPEED_MIN, LEAF_FALL_SPEED_SPAN, LEAF_FLATTEN_Z,
    LEAF_SCALE_MIN, LEAF_SCALE_SPAN, LEAF_SPAWN_X, LEAF_SWAY_STEP, LEAF_TOP_Y, LEAF_TUMBLE_MAX,
    LEAF_WIND_GAIN, LEAF_Z_MAX, LEAF_Z_MIN,
};

#[derive(Clone, Debug)]
pub struct LeafParticle {
    pub position: Vec3,
    pub rotation: Vec3, // accumulated euler angles
    pub fall_speed: f32,
    pub rot_speed_x: f32,
    pub rot_speed_y: f32,
    pub swing_phase: f32,
    pub scale: f32,
}

impl LeafParticle {
    fn spawn(rng: &mut impl Rng) -> Self {
        Self {
            position: Vec3::new(
                rng.gen_range(-LEAF_SPAWN_X..LEAF_SPAWN_X),
                rng.gen_range(LEAF_BOTTOM_Y..LEAF_TOP_Y),
                rng.gen_range(LEAF_Z_MIN..LEAF_Z_MAX),
            ),
            rotation: Vec3::new(
                rng.gen_range(0.0..std::f32::consts::PI),
                rng.gen_range(0.0..std::f32::consts::PI),
                rng.gen_range(0.0..std::f32::consts::PI),
            ),
            fall_speed: LEAF_FALL_SPEED_MIN + rng.gen::<f32>() * LEAF_FALL_SPEED_SPAN,
            rot_speed_x: rng.gen_range(-LEAF_TUMBLE_MAX..LEAF_TUMBLE_MAX),
            rot_speed_y: rng.gen_range(-LEAF_TUMBLE_MAX..LEAF_TUMBLE_MAX),
            swing_phase: rng.gen_range(0.0..std::f32::consts::TAU),
            scale: LEAF_SCALE_MIN + rng.gen::<f32>() * LEAF_SCALE_SPAN,
        }
    }
}

pub struct LeafField {
    leaves: Vec<LeafParticle>,
}

impl LeafField {
    pub fn new(rng: &mut impl Rng) -> Self {
        let leaves = (0..LEAF_COUNT).map(|_| LeafParticle::spawn(rng)).collect();
        Self { leaves }
    }

    pub fn leaves(&self) -> &[LeafParticle] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// One animation tick. Fall speed scales with scroll progress (wind),
    /// sway is a phase-shifted sine of elapsed time, and any leaf below the
    /// kill plane is reset to the top with a freshly sampled x.
    pub fn step(&mut self, elapsed: f32, scroll_progress: f32, rng: &mut impl Rng) {
        let wind = 1.0 + scroll_progress.clamp(0.0, 1.0) * LEAF_WIND_GAIN;
        for leaf in &mut self.leaves {
            leaf.position.y -= leaf.fall_speed * wind;
            leaf.position.x += (elapsed + leaf.swing_phase).sin() * LEAF_SWAY_STEP;
            leaf.rotation.x += leaf.rot_speed_x;
            leaf.rotation.y += leaf.rot_speed_y;

            if leaf.position.y < LEAF_BOTTOM_Y {
                leaf.position.y = LEAF_TOP_Y;
                leaf.position.x = rng.gen_range(-LEAF_SPAWN_X..LEAF_SPAWN_X);
            }
        }
    }

    /// Rewrite every instance transform into `out` (cleared first). Every
    /// leaf is written each tick regardless of whether it changed; the
    /// snapshot's dirty flag tells the uploader.
    pub fn write_matrices(&self, out: &mut Vec<Mat4>) {
        out.clear();
        for leaf in &self.leaves {
            out.push(Mat4::from_scale_rotation_translation(
                Vec3::new(leaf.scale, leaf.scale, LEAF_FLATTEN_Z),
                Quat::from_euler(
                    EulerRot::XYZ,
                    leaf.rotation.x,
                    leaf.rotation.y,
                    leaf.rotation.z,
                ),
                leaf.position,
            ));
        }
    }
}
