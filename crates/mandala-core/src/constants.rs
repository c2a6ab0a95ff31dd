// Compiled-in tuning constants for the crystal mandala scene.
// Colors follow the "Deep Espresso" page palette; everything that looks like
// a magic number in the animation math lives here.

/// Convert a `0xRRGGBB` color to `[r, g, b]` in 0..1.
pub const fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

// Palette
pub const FOG_COLOR: [f32; 3] = hex_rgb(0x1A120B); // matches the page background
pub const AMBIENT_COLOR: [f32; 3] = hex_rgb(0x2C1B18);
pub const KEY_LIGHT_COLOR: [f32; 3] = hex_rgb(0xFFD700); // gold
pub const FILL_LIGHT_COLOR: [f32; 3] = hex_rgb(0xE8DCCA); // champagne
pub const RIM_LIGHT_COLOR: [f32; 3] = hex_rgb(0x89CFF0); // cold moonlight
pub const CRYSTAL_COLOR: [f32; 3] = [1.0, 1.0, 1.0]; // white base, lights do the coloring
pub const INSET_COLOR: [f32; 3] = hex_rgb(0xF3E5D8);
pub const CHAIN_GOLD_COLOR: [f32; 3] = hex_rgb(0xFFD700);
pub const CHAIN_COPPER_COLOR: [f32; 3] = hex_rgb(0xD4A373);
pub const DUST_COLOR: [f32; 3] = hex_rgb(0xD4A373);
pub const LEAF_COLOR: [f32; 3] = hex_rgb(0xB87333); // copper blade
pub const TERRAIN_COLOR: [f32; 3] = hex_rgb(0xC57B57); // terracotta dunes
pub const GOD_RAY_COLOR: [f32; 3] = hex_rgb(0xFFD700);

// Opacities
pub const CRYSTAL_OPACITY: f32 = 0.85;
pub const INSET_OPACITY: f32 = 0.05;
pub const DUST_OPACITY: f32 = 0.6;

// Fog (exponential-squared)
pub const FOG_DENSITY: f32 = 0.035;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const KEY_LIGHT_INTENSITY: f32 = 3.0;
pub const FILL_LIGHT_INTENSITY: f32 = 1.0;
pub const RIM_LIGHT_INTENSITY: f32 = 2.0;
pub const KEY_LIGHT_RANGE: f32 = 100.0;
pub const FILL_LIGHT_RANGE: f32 = 100.0;
pub const RIM_LIGHT_RANGE: f32 = 80.0;

// Radial arrangement: one center crystal plus a hexagonal ring
pub const RING_CRYSTALS: usize = 6;
pub const CRYSTAL_COUNT: usize = RING_CRYSTALS + 1;
pub const RING_RADIUS: f32 = 3.5;

// Crystal geometry: elongated octahedron (double-terminated quartz look)
pub const CRYSTAL_RADIUS: f32 = 1.0;
pub const INSET_RADIUS: f32 = 0.5;
pub const CRYSTAL_STRETCH: [f32; 3] = [0.8, 2.5, 0.8];

// Suspension chain: thin tube rising off-screen plus a connector ring
pub const CHAIN_RADIUS: f32 = 0.02;
pub const CHAIN_START_Y: f32 = 2.0;
pub const CHAIN_END_Y: f32 = 15.0;
pub const CONNECTOR_RING_RADIUS: f32 = 0.15;
pub const CONNECTOR_RING_TUBE: f32 = 0.03;
pub const CONNECTOR_RING_Y: f32 = 2.3;

// Dust motes (background instanced batch)
pub const DUST_COUNT: usize = 400;
pub const DUST_SPREAD_XY: f32 = 15.0; // half-extent
pub const DUST_SPREAD_Z: f32 = 10.0;
pub const DUST_SCALE_MIN: f32 = 0.2;
pub const DUST_SCALE_SPAN: f32 = 0.8;
pub const DUST_RADIUS: f32 = 0.08;
pub const DUST_ROT_Y_RATE: f32 = 0.01;
pub const DUST_ROT_Z_RATE: f32 = 0.02;
pub const DUST_DRIFT_GAIN: f32 = 5.0; // vertical parallax against scroll

// Falling leaves (foreground instanced batch)
pub const LEAF_COUNT: usize = 50;
pub const LEAF_SPAWN_X: f32 = 12.5; // half-extent of the respawn band
pub const LEAF_TOP_Y: f32 = 15.0;
pub const LEAF_BOTTOM_Y: f32 = -15.0;
pub const LEAF_Z_MIN: f32 = -2.0;
pub const LEAF_Z_MAX: f32 = 8.0;
pub const LEAF_FALL_SPEED_MIN: f32 = 0.02; // per tick
pub const LEAF_FALL_SPEED_SPAN: f32 = 0.03;
pub const LEAF_TUMBLE_MAX: f32 = 0.01; // radians per tick, per axis
pub const LEAF_SWAY_STEP: f32 = 0.01;
pub const LEAF_WIND_GAIN: f32 = 0.5; // fall speed scales to 1.5x at full scroll
pub const LEAF_SCALE_MIN: f32 = 0.5;
pub const LEAF_SCALE_SPAN: f32 = 0.5;
pub const LEAF_FLATTEN_Z: f32 = 0.1;
pub const LEAF_BLADE_SCALE: f32 = 0.5;

// God rays: open cones hanging from above, additive-blended
pub const GOD_RAY_COUNT: usize = 5;
pub const GOD_RAY_CONE_RADIUS: f32 = 3.0;
pub const GOD_RAY_CONE_HEIGHT: f32 = 25.0;
pub const GOD_RAY_Y: f32 = 15.0;
pub const GOD_RAY_X_SPREAD: f32 = 4.0; // half-extent
pub const GOD_RAY_Z_SPREAD: f32 = 2.5;
pub const GOD_RAY_ROLL_SPREAD: f32 = 0.15;
pub const GOD_RAY_OPACITY_MIN: f32 = 0.02;
pub const GOD_RAY_OPACITY_SPAN: f32 = 0.03;

// Terrain (procedural dunes)
pub const TERRAIN_SIZE: f32 = 60.0;
pub const TERRAIN_SEGMENTS: usize = 64;
pub const TERRAIN_BASE_Y: f32 = -15.0;
pub const TERRAIN_LOW_Y: f32 = -25.0;
pub const TERRAIN_RISE_GAIN: f32 = 3.0;
pub const TERRAIN_Z: f32 = -10.0;

// Scroll choreography
pub const SCROLL_MODE_SPLIT: f32 = 0.5; // mode A below, mode B above
pub const GROUP_LIFT_GAIN: f32 = 10.0; // cluster exits upward in mode A
pub const GROUP_PITCH_GAIN: f32 = 0.3;
pub const GROUP_YAW_GAIN: f32 = 2.0e-4; // mouse px -> yaw target
pub const GROUP_YAW_BLEND: f32 = 0.05;
pub const CRYSTAL_SPIN_TURNS: f32 = 3.0; // radians over the full scroll range
pub const CRYSTAL_PHASE_STEP: f32 = 0.5;

// Idle motion
pub const BREATH_AMPLITUDE: f32 = 0.05;
pub const BREATH_RATE: f32 = 0.5;
pub const CHAIN_SWAY_AMPLITUDE: f32 = 0.05;
pub const CHAIN_SWAY_RATE: f32 = 2.0;

// Camera smoothing
pub const CAMERA_BLEND: f32 = 0.05; // exponential approach per tick
pub const MOUSE_PARALLAX_BLEND: f32 = 0.03;
pub const MOUSE_PARALLAX_GAIN: f32 = 0.005; // mouse px -> world offset
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
