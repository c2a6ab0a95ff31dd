//! Per-frame animation: recomputes every transform in the scene from elapsed
//! time and the latest input sample, then hands the renderer a flat snapshot
//! of model matrices. Two scroll-driven modes share the 0.5 split with the
//! camera path: below it the crystal cluster lifts out of view, above it the
//! dunes rise into view.

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use crate::constants::*;
use crate::input::InputState;
use crate::leaves::LeafField;
use crate::scene::{crystal_ring, dust_poses, god_rays, light_positions, CrystalUnit, GodRay};

/// Flat per-frame output consumed by the renderer. Buffers are reused
/// across ticks; only their contents change.
#[derive(Default)]
pub struct FrameTransforms {
    pub crystals: Vec<Mat4>,
    pub insets: Vec<Mat4>,
    pub chains: Vec<Mat4>,
    pub rings: Vec<Mat4>,
    pub dust: Vec<Mat4>,
    pub leaves: Vec<Mat4>,
    pub god_rays: Vec<Mat4>,
    pub terrain: Mat4,
    pub light_positions: [Vec3; 3],
    /// Set every tick: the leaf batch is rewritten wholesale and needs upload.
    pub leaves_dirty: bool,
}

pub struct Animator {
    units: Vec<CrystalUnit>,
    dust: Vec<Mat4>,
    god_rays: Vec<GodRay>,
    leaves: LeafField,
    group_yaw: f32,
    frame: FrameTransforms,
}

impl Animator {
    /// Build the static scene once. Randomized placement comes from the
    /// injected generator; pass a seeded one for reproducible output.
    pub fn new(rng: &mut impl Rng) -> Self {
        let units = crystal_ring();
        let dust = dust_poses(rng);
        let god_rays = god_rays(rng);
        let leaves = LeafField::new(rng);
        log::debug!(
            "scene built: {} crystals, {} dust motes, {} leaves, {} god rays",
            units.len(),
            dust.len(),
            leaves.len(),
            god_rays.len()
        );

        let mut frame = FrameTransforms {
            crystals: Vec::with_capacity(units.len()),
            insets: Vec::with_capacity(units.len()),
            chains: Vec::with_capacity(units.len()),
            rings: Vec::with_capacity(units.len()),
            dust: Vec::with_capacity(dust.len()),
            leaves: Vec::with_capacity(leaves.len()),
            god_rays: god_rays.iter().map(|g| g.transform).collect(),
            terrain: Mat4::from_translation(Vec3::new(0.0, TERRAIN_BASE_Y, TERRAIN_Z)),
            light_positions: light_positions(0.0),
            leaves_dirty: true,
        };
        frame.leaves.resize(leaves.len(), Mat4::IDENTITY);

        Self {
            units,
            dust,
            god_rays,
            leaves,
            group_yaw: 0.0,
            frame,
        }
    }

    pub fn god_ray_opacities(&self) -> impl Iterator<Item = f32> + '_ {
        self.god_rays.iter().map(|g| g.opacity)
    }

    pub fn units(&self) -> &[CrystalUnit] {
        &self.units
    }

    pub fn frame(&self) -> &FrameTransforms {
        &self.frame
    }

    /// One animation tick. `elapsed` is seconds since startup; input is the
    /// latest sample (already clamped at the source).
    pub fn tick(&mut self, elapsed: f32, input: &InputState, rng: &mut impl Rng) {
        let scroll = input.scroll_progress.clamp(0.0, 1.0);
        let frame = &mut self.frame;

        // Group pose: yaw chases the mouse, pitch follows scroll directly.
        let yaw_target = input.mouse_x * GROUP_YAW_GAIN;
        self.group_yaw += (yaw_target - self.group_yaw) * GROUP_YAW_BLEND;
        let pitch = scroll * GROUP_PITCH_GAIN;
        // Mode A: cluster lifts out of view; lift holds at its peak in mode B.
        let lift = scroll.min(SCROLL_MODE_SPLIT) * GROUP_LIFT_GAIN;
        let group = Mat4::from_translation(Vec3::new(0.0, lift, 0.0))
            * Mat4::from_euler(EulerRot::XYZ, pitch, self.group_yaw, 0.0);

        // Mode B: dunes rise slowly from far below the viewport.
        let terrain_y = if scroll >= SCROLL_MODE_SPLIT {
            let t = (scroll - SCROLL_MODE_SPLIT) * 2.0;
            TERRAIN_LOW_Y + t * TERRAIN_RISE_GAIN
        } else {
            TERRAIN_BASE_Y
        };
        frame.terrain = Mat4::from_translation(Vec3::new(0.0, terrain_y, TERRAIN_Z));

        // Individual crystals: scroll-driven spin alternating by parity,
        // sinusoidal breathing, chains swaying in roll.
        let spin = scroll * CRYSTAL_SPIN_TURNS;
        frame.crystals.clear();
        frame.insets.clear();
        frame.chains.clear();
        frame.rings.clear();
        for (i, unit) in self.units.iter().enumerate() {
            let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
            let yaw = spin * dir + i as f32 * CRYSTAL_PHASE_STEP;
            let breathe = 1.0 + BREATH_AMPLITUDE * (elapsed * BREATH_RATE + i as f32).sin();
            let world = group
                * Mat4::from_scale_rotation_translation(
                    Vec3::splat(breathe),
                    Quat::from_rotation_y(yaw),
                    unit.offset,
                );
            let sway = CHAIN_SWAY_AMPLITUDE * (elapsed * CHAIN_SWAY_RATE + i as f32).sin();
            frame.crystals.push(world);
            frame.insets.push(world);
            frame.chains.push(world * Mat4::from_rotation_z(sway));
            frame.rings.push(
                world
                    * Mat4::from_rotation_translation(
                        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                        Vec3::new(0.0, CONNECTOR_RING_Y, 0.0),
                    ),
            );
        }

        // Dust batch: slow tumble plus vertical drift opposite the scroll.
        let batch = Mat4::from_translation(Vec3::new(0.0, -scroll * DUST_DRIFT_GAIN, 0.0))
            * Mat4::from_euler(
                EulerRot::XYZ,
                0.0,
                elapsed * DUST_ROT_Y_RATE,
                elapsed * DUST_ROT_Z_RATE,
            );
        frame.dust.clear();
        for pose in &self.dust {
            frame.dust.push(batch * *pose);
        }

        frame.light_positions = light_positions(elapsed);

        self.leaves.step(elapsed, scroll, rng);
        self.leaves.write_matrices(&mut frame.leaves);
        frame.leaves_dirty = true;
    }
}
