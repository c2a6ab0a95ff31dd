// Leaf particle lifecycle, driven by a seeded generator for reproducibility.

use mandala_core::constants::{LEAF_BOTTOM_Y, LEAF_COUNT, LEAF_TOP_Y};
use mandala_core::LeafField;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn field_has_the_configured_population() {
    let mut rng = StdRng::seed_from_u64(7);
    let field = LeafField::new(&mut rng);
    assert_eq!(field.len(), LEAF_COUNT);
    assert!(!field.is_empty());
}

#[test]
fn same_seed_same_field() {
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    let fa = LeafField::new(&mut a);
    let fb = LeafField::new(&mut b);
    for (la, lb) in fa.leaves().iter().zip(fb.leaves()) {
        assert_eq!(la.position, lb.position);
        assert_eq!(la.fall_speed, lb.fall_speed);
        assert_eq!(la.scale, lb.scale);
    }
}

#[test]
fn leaves_stay_inside_the_vertical_band() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = LeafField::new(&mut rng);

    // Enough ticks that every leaf recycles at least once.
    for tick in 0..3000 {
        field.step(tick as f32 * 0.016, 0.7, &mut rng);
        for leaf in field.leaves() {
            assert!(leaf.position.y >= LEAF_BOTTOM_Y);
            assert!(leaf.position.y <= LEAF_TOP_Y);
        }
    }
}

#[test]
fn recycled_leaves_restart_at_the_top() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut field = LeafField::new(&mut rng);

    let mut recycled = 0;
    let mut prev: Vec<f32> = field.leaves().iter().map(|l| l.position.y).collect();
    for tick in 0..3000 {
        field.step(tick as f32 * 0.016, 0.0, &mut rng);
        for (leaf, prev_y) in field.leaves().iter().zip(&prev) {
            if leaf.position.y > *prev_y {
                // y only ever jumps upward on a recycle, straight to the top
                assert_eq!(leaf.position.y, LEAF_TOP_Y);
                recycled += 1;
            }
        }
        prev = field.leaves().iter().map(|l| l.position.y).collect();
    }
    assert!(recycled > 0);
}

#[test]
fn scroll_wind_speeds_up_the_fall() {
    let mut ra = StdRng::seed_from_u64(5);
    let mut rb = StdRng::seed_from_u64(5);
    let mut calm = LeafField::new(&mut ra);
    let mut windy = LeafField::new(&mut rb);

    let before: Vec<f32> = calm.leaves().iter().map(|l| l.position.y).collect();
    calm.step(0.0, 0.0, &mut ra);
    windy.step(0.0, 1.0, &mut rb);

    for i in 0..calm.len() {
        let (ca, wa) = (calm.leaves()[i].position.y, windy.leaves()[i].position.y);
        if ca == LEAF_TOP_Y || wa == LEAF_TOP_Y {
            continue; // recycled this tick, delta is meaningless
        }
        let calm_drop = before[i] - ca;
        let windy_drop = before[i] - wa;
        assert!((windy_drop - calm_drop * 1.5).abs() < 1e-5);
    }
}

#[test]
fn write_matrices_rewrites_the_whole_batch() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = LeafField::new(&mut rng);

    // Stale content in the output buffer is discarded, not appended to.
    let mut out = vec![glam::Mat4::IDENTITY; 3];
    field.write_matrices(&mut out);
    assert_eq!(out.len(), LEAF_COUNT);

    field.step(0.016, 0.0, &mut rng);
    field.write_matrices(&mut out);
    assert_eq!(out.len(), LEAF_COUNT);
}

#[test]
fn instance_matrices_carry_the_leaf_positions() {
    let mut rng = StdRng::seed_from_u64(11);
    let field = LeafField::new(&mut rng);
    let mut out = Vec::new();
    field.write_matrices(&mut out);

    for (m, leaf) in out.iter().zip(field.leaves()) {
        let t = m.w_axis.truncate();
        assert!((t - leaf.position).length() < 1e-6);
    }
}
