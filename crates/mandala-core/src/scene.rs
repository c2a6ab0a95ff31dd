//! Static scene description: the radial crystal arrangement, dust and
//! god-ray placement, lights, fog, and the terrain height field. Built once
//! at startup; per-frame motion lives in [`crate::animator`].

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use crate::constants::*;

/// Chain material variant, alternating by crystal index parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainVariant {
    Gold,
    Copper,
}

impl ChainVariant {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            ChainVariant::Gold
        } else {
            ChainVariant::Copper
        }
    }

    pub fn color(self) -> [f32; 3] {
        match self {
            ChainVariant::Gold => CHAIN_GOLD_COLOR,
            ChainVariant::Copper => CHAIN_COPPER_COLOR,
        }
    }
}

/// One crystal plus its suspension chain. All units share the crystal
/// material; only the chain variant differs.
#[derive(Clone, Debug)]
pub struct CrystalUnit {
    pub offset: Vec3,
    pub chain: ChainVariant,
}

/// One center unit plus six on a hexagonal ring in the XY plane.
/// Deterministic; no runtime input.
pub fn crystal_ring() -> Vec<CrystalUnit> {
    let mut units = Vec::with_capacity(CRYSTAL_COUNT);
    units.push(CrystalUnit {
        offset: Vec3::ZERO,
        chain: ChainVariant::for_index(0),
    });
    for i in 0..RING_CRYSTALS {
        let angle = i as f32 / RING_CRYSTALS as f32 * std::f32::consts::TAU;
        units.push(CrystalUnit {
            offset: Vec3::new(angle.cos() * RING_RADIUS, angle.sin() * RING_RADIUS, 0.0),
            chain: ChainVariant::for_index(i + 1),
        });
    }
    units
}

/// Randomized static poses for the dust batch: position within the spread
/// box, free orientation, uniform scale in `DUST_SCALE_MIN..=MIN+SPAN`.
pub fn dust_poses(rng: &mut impl Rng) -> Vec<Mat4> {
    (0..DUST_COUNT)
        .map(|_| {
            let position = Vec3::new(
                rng.gen_range(-DUST_SPREAD_XY..DUST_SPREAD_XY),
                rng.gen_range(-DUST_SPREAD_XY..DUST_SPREAD_XY),
                rng.gen_range(-DUST_SPREAD_Z..DUST_SPREAD_Z),
            );
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                rng.gen_range(0.0..std::f32::consts::PI),
                rng.gen_range(0.0..std::f32::consts::PI),
                rng.gen_range(0.0..std::f32::consts::PI),
            );
            let scale = DUST_SCALE_MIN + rng.gen::<f32>() * DUST_SCALE_SPAN;
            Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position)
        })
        .collect()
}

/// A volumetric-light stand-in: an open cone pointing down from above.
/// Opacity varies per cone, so each carries its own material state (the
/// crystals, by contrast, all share one).
#[derive(Clone, Debug)]
pub struct GodRay {
    pub transform: Mat4,
    pub opacity: f32,
}

pub fn god_rays(rng: &mut impl Rng) -> Vec<GodRay> {
    (0..GOD_RAY_COUNT)
        .map(|_| {
            let position = Vec3::new(
                rng.gen_range(-GOD_RAY_X_SPREAD..GOD_RAY_X_SPREAD),
                GOD_RAY_Y,
                rng.gen_range(-GOD_RAY_Z_SPREAD..GOD_RAY_Z_SPREAD),
            );
            // Flip to point down, with a slight roll for variety.
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                std::f32::consts::PI,
                0.0,
                rng.gen_range(-GOD_RAY_ROLL_SPREAD..GOD_RAY_ROLL_SPREAD),
            );
            GodRay {
                transform: Mat4::from_rotation_translation(rotation, position),
                opacity: GOD_RAY_OPACITY_MIN + rng.gen::<f32>() * GOD_RAY_OPACITY_SPAN,
            }
        })
        .collect()
}

/// Dune height field sampled by the terrain grid. Deliberately subtle.
#[inline]
pub fn terrain_height(x: f32, y: f32) -> f32 {
    0.3 * (0.2 * x).sin() + 0.3 * (0.3 * y).cos() + 0.1 * (0.5 * x + 0.5 * y).sin()
}

/// Studio point lights orbiting the cluster on independent sinusoids.
/// Index order: key (gold), fill (champagne), rim (moonlight).
pub fn light_positions(elapsed: f32) -> [Vec3; 3] {
    let key = Vec3::new(
        (elapsed * 0.3).cos() * 10.0,
        (elapsed * 0.5).sin() * 10.0,
        (elapsed * 0.3).sin() * 10.0,
    );
    let fill = Vec3::new(
        (elapsed * 0.2 + 2.0).cos() * 12.0,
        0.0,
        (elapsed * 0.2 + 2.0).sin() * 12.0,
    );
    let rim = Vec3::new(
        (elapsed * 0.4).cos() * 8.0,
        (elapsed * 0.4).sin() * 8.0,
        -5.0,
    );
    [key, fill, rim]
}

pub const LIGHT_COLORS: [[f32; 3]; 3] = [KEY_LIGHT_COLOR, FILL_LIGHT_COLOR, RIM_LIGHT_COLOR];
pub const LIGHT_INTENSITIES: [f32; 3] = [
    KEY_LIGHT_INTENSITY,
    FILL_LIGHT_INTENSITY,
    RIM_LIGHT_INTENSITY,
];
pub const LIGHT_RANGES: [f32; 3] = [KEY_LIGHT_RANGE, FILL_LIGHT_RANGE, RIM_LIGHT_RANGE];
