// Static scene construction: crystal layout, dust, god rays, lights,
// terrain height field.

use glam::Vec3;
use mandala_core::constants::*;
use mandala_core::{
    crystal_ring, dust_poses, god_rays, light_positions, terrain_height, ChainVariant,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn ring_has_a_center_and_six_satellites() {
    let units = crystal_ring();
    assert_eq!(units.len(), CRYSTAL_COUNT);
    assert_eq!(units[0].offset, Vec3::ZERO);
    for unit in &units[1..] {
        assert!((unit.offset.length() - RING_RADIUS).abs() < 1e-5);
        assert_eq!(unit.offset.z, 0.0); // ring lies in the XY plane
    }
}

#[test]
fn satellites_are_evenly_spaced() {
    let units = crystal_ring();
    for i in 1..units.len() {
        let j = if i == units.len() - 1 { 1 } else { i + 1 };
        let gap = (units[i].offset - units[j].offset).length();
        // Hexagon side equals the circumradius.
        assert!((gap - RING_RADIUS).abs() < 1e-4);
    }
}

#[test]
fn chain_variants_alternate_by_parity() {
    let units = crystal_ring();
    for (i, unit) in units.iter().enumerate() {
        let expected = if i % 2 == 0 {
            ChainVariant::Gold
        } else {
            ChainVariant::Copper
        };
        assert_eq!(unit.chain, expected);
    }
    assert_eq!(ChainVariant::Gold.color(), CHAIN_GOLD_COLOR);
    assert_eq!(ChainVariant::Copper.color(), CHAIN_COPPER_COLOR);
}

#[test]
fn dust_fills_the_spread_box() {
    let mut rng = StdRng::seed_from_u64(2);
    let poses = dust_poses(&mut rng);
    assert_eq!(poses.len(), DUST_COUNT);
    for pose in &poses {
        let p = pose.w_axis.truncate();
        assert!(p.x.abs() <= DUST_SPREAD_XY);
        assert!(p.y.abs() <= DUST_SPREAD_XY);
        assert!(p.z.abs() <= DUST_SPREAD_Z);
        // Uniform scale within the configured band.
        let s = pose.x_axis.truncate().length();
        assert!(s >= DUST_SCALE_MIN - 1e-4);
        assert!(s <= DUST_SCALE_MIN + DUST_SCALE_SPAN + 1e-4);
    }
}

#[test]
fn god_rays_hang_overhead_with_faint_opacity() {
    let mut rng = StdRng::seed_from_u64(4);
    let rays = god_rays(&mut rng);
    assert_eq!(rays.len(), GOD_RAY_COUNT);
    for ray in &rays {
        let p = ray.transform.w_axis.truncate();
        assert_eq!(p.y, GOD_RAY_Y);
        assert!(p.x.abs() <= GOD_RAY_X_SPREAD);
        assert!(p.z.abs() <= GOD_RAY_Z_SPREAD);
        assert!(ray.opacity >= GOD_RAY_OPACITY_MIN);
        assert!(ray.opacity <= GOD_RAY_OPACITY_MIN + GOD_RAY_OPACITY_SPAN);
        // Flipped to point down: local +Y maps to world -Y.
        let down = ray.transform.transform_vector3(Vec3::Y);
        assert!(down.y < 0.0);
    }
}

#[test]
fn terrain_height_matches_the_wave_sum() {
    assert!((terrain_height(0.0, 0.0) - 0.3).abs() < 1e-6);
    let x: f32 = 3.7;
    let y: f32 = -8.2;
    let expected = 0.3 * (0.2 * x).sin() + 0.3 * (0.3 * y).cos() + 0.1 * (0.5 * (x + y)).sin();
    assert!((terrain_height(x, y) - expected).abs() < 1e-6);
}

#[test]
fn terrain_height_stays_subtle() {
    for ix in -30..=30 {
        for iy in -30..=30 {
            let h = terrain_height(ix as f32, iy as f32);
            assert!(h.abs() <= 0.7 + 1e-6); // sum of amplitudes
        }
    }
}

#[test]
fn lights_orbit_on_their_configured_radii() {
    for step in 0..100 {
        let t = step as f32 * 0.3;
        let [key, fill, rim] = light_positions(t);
        // Key wanders inside a 10-unit box, fill orbits flat at radius 12.
        assert!(key.length() <= 10.0 * 3.0_f32.sqrt() + 1e-4);
        assert_eq!(fill.y, 0.0);
        assert!((Vec3::new(fill.x, 0.0, fill.z).length() - 12.0).abs() < 1e-4);
        assert_eq!(rim.z, -5.0);
        assert!((Vec3::new(rim.x, rim.y, 0.0).length() - 8.0).abs() < 1e-4);
    }
}

#[test]
fn light_positions_start_deterministic() {
    let [key, fill, rim] = light_positions(0.0);
    assert!((key - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    assert!((fill - Vec3::new(2.0_f32.cos() * 12.0, 0.0, 2.0_f32.sin() * 12.0)).length() < 1e-5);
    assert!((rim - Vec3::new(8.0, 0.0, -5.0)).length() < 1e-5);
}
