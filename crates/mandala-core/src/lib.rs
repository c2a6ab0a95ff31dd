//! Platform-free core of the crystal mandala background: scene
//! construction, camera choreography, and the per-frame animation math.
//! The web frontend consumes these types to drive a WebGPU renderer.

pub mod animator;
pub mod camera;
pub mod constants;
pub mod input;
pub mod leaves;
pub mod mesh;
pub mod scene;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use animator::*;
pub use camera::*;
pub use input::*;
pub use leaves::*;
pub use scene::{
    crystal_ring, dust_poses, god_rays, light_positions, terrain_height, ChainVariant,
    CrystalUnit, GodRay,
};
