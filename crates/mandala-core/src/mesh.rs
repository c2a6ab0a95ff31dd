//! Procedural geometry for every draw in the scene. Pure functions over the
//! constants module; the renderer uploads the results verbatim.

use glam::{Vec2, Vec3};

use crate::constants::*;
use crate::scene::terrain_height;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Flat-shade a triangle soup: one normal per face, vertices duplicated.
/// Normals are oriented away from the origin, which is correct for the
/// origin-centered convex solids built here.
fn flat_from_triangles(triangles: &[[Vec3; 3]]) -> MeshData {
    let mut mesh = MeshData::default();
    for tri in triangles {
        let [a, b, c] = *tri;
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        let centroid = (a + b + c) / 3.0;
        if normal.dot(centroid) < 0.0 {
            normal = -normal;
        }
        let base = mesh.vertices.len() as u32;
        for p in [a, b, c] {
            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: normal.to_array(),
            });
        }
        mesh.indices.extend([base, base + 1, base + 2]);
    }
    mesh
}

fn octahedron_corners(radius: f32, stretch: [f32; 3]) -> [Vec3; 6] {
    let s = Vec3::from(stretch);
    [
        Vec3::new(radius, 0.0, 0.0) * s,
        Vec3::new(-radius, 0.0, 0.0) * s,
        Vec3::new(0.0, radius, 0.0) * s,
        Vec3::new(0.0, -radius, 0.0) * s,
        Vec3::new(0.0, 0.0, radius) * s,
        Vec3::new(0.0, 0.0, -radius) * s,
    ]
}

/// Elongated octahedron, the double-terminated quartz silhouette.
pub fn octahedron(radius: f32, stretch: [f32; 3]) -> MeshData {
    let [px, nx, py, ny, pz, nz] = octahedron_corners(radius, stretch);
    let triangles = [
        [py, px, pz],
        [py, pz, nx],
        [py, nx, nz],
        [py, nz, px],
        [ny, pz, px],
        [ny, nx, pz],
        [ny, nz, nx],
        [ny, px, nz],
    ];
    flat_from_triangles(&triangles)
}

/// Edge list of the same octahedron, for the wireframe inset
/// (line-list topology; normals are placeholders).
pub fn octahedron_edges(radius: f32, stretch: [f32; 3]) -> MeshData {
    let corners = octahedron_corners(radius, stretch);
    let vertices = corners
        .iter()
        .map(|p| Vertex {
            position: p.to_array(),
            normal: p.normalize_or_zero().to_array(),
        })
        .collect();
    // Every corner pair except the three opposite pairs is an edge.
    let indices = vec![
        2, 0, 2, 4, 2, 1, 2, 5, // top fan
        3, 0, 3, 4, 3, 1, 3, 5, // bottom fan
        0, 4, 4, 1, 1, 5, 5, 0, // equator
    ];
    MeshData { vertices, indices }
}

/// Dust mote geometry.
pub fn tetrahedron(radius: f32) -> MeshData {
    let s = radius / 3.0_f32.sqrt();
    let a = Vec3::new(s, s, s);
    let b = Vec3::new(s, -s, -s);
    let c = Vec3::new(-s, s, -s);
    let d = Vec3::new(-s, -s, s);
    flat_from_triangles(&[[a, b, c], [a, c, d], [a, d, b], [b, d, c]])
}

/// Open-ended cone (side surface only), apex up, centered on the origin.
pub fn open_cone(radius: f32, height: f32, segments: usize) -> MeshData {
    let apex = Vec3::new(0.0, height * 0.5, 0.0);
    let mut triangles = Vec::with_capacity(segments);
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * std::f32::consts::TAU;
        let a1 = (i + 1) as f32 / segments as f32 * std::f32::consts::TAU;
        let p0 = Vec3::new(a0.cos() * radius, -height * 0.5, a0.sin() * radius);
        let p1 = Vec3::new(a1.cos() * radius, -height * 0.5, a1.sin() * radius);
        triangles.push([apex, p0, p1]);
    }
    flat_from_triangles(&triangles)
}

/// Thin vertical tube for the suspension chain, with smooth radial normals.
pub fn chain_tube(radius: f32, y_start: f32, y_end: f32, segments: usize) -> MeshData {
    let mut mesh = MeshData::default();
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let normal = [cos, 0.0, sin];
        mesh.vertices.push(Vertex {
            position: [cos * radius, y_start, sin * radius],
            normal,
        });
        mesh.vertices.push(Vertex {
            position: [cos * radius, y_end, sin * radius],
            normal,
        });
    }
    for i in 0..segments as u32 {
        let j = (i + 1) % segments as u32;
        let (b0, t0, b1, t1) = (i * 2, i * 2 + 1, j * 2, j * 2 + 1);
        mesh.indices.extend([b0, t0, b1, b1, t0, t1]);
    }
    mesh
}

/// Connector ring at the crystal tip. Ring lies in the XY plane.
pub fn torus(radius: f32, tube: f32, segments_u: usize, segments_v: usize) -> MeshData {
    let mut mesh = MeshData::default();
    for iu in 0..segments_u {
        let u = iu as f32 / segments_u as f32 * std::f32::consts::TAU;
        let (su, cu) = u.sin_cos();
        for iv in 0..segments_v {
            let v = iv as f32 / segments_v as f32 * std::f32::consts::TAU;
            let (sv, cv) = v.sin_cos();
            let ring = radius + tube * cv;
            mesh.vertices.push(Vertex {
                position: [ring * cu, ring * su, tube * sv],
                normal: [cv * cu, cv * su, sv],
            });
        }
    }
    let (nu, nv) = (segments_u as u32, segments_v as u32);
    for iu in 0..nu {
        let ju = (iu + 1) % nu;
        for iv in 0..nv {
            let jv = (iv + 1) % nv;
            let (a, b, c, d) = (
                iu * nv + iv,
                iu * nv + jv,
                ju * nv + iv,
                ju * nv + jv,
            );
            mesh.indices.extend([a, b, c, c, b, d]);
        }
    }
    mesh
}

fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Stylized leaf silhouette: two mirrored bezier lobes, fan-triangulated
/// about the blade center. Flat (z = 0); the batch transform flattens z
/// further and the shader shades both faces.
pub fn leaf_blade(scale: f32, samples_per_side: usize) -> MeshData {
    let tip = Vec2::new(0.0, 1.0);
    let root = Vec2::ZERO;
    let ctrl_a = Vec2::new(0.2, 0.2);
    let ctrl_b = Vec2::new(0.2, 0.6);

    // Outline runs root -> tip along the right lobe, tip -> root mirrored.
    let mut outline = Vec::with_capacity(samples_per_side * 2);
    for i in 0..=samples_per_side {
        let t = i as f32 / samples_per_side as f32;
        outline.push(cubic_bezier(root, ctrl_a, ctrl_b, tip, t));
    }
    for i in 1..samples_per_side {
        let t = 1.0 - i as f32 / samples_per_side as f32;
        let p = cubic_bezier(root, ctrl_a, ctrl_b, tip, t);
        outline.push(Vec2::new(-p.x, p.y));
    }

    // Center on the blade midpoint so rotation tumbles about the middle.
    let center = Vec2::new(0.0, 0.5);
    let mut mesh = MeshData::default();
    mesh.vertices.push(Vertex {
        position: [0.0, 0.0, 0.0],
        normal: [0.0, 0.0, 1.0],
    });
    for p in &outline {
        let q = (*p - center) * scale;
        mesh.vertices.push(Vertex {
            position: [q.x, q.y, 0.0],
            normal: [0.0, 0.0, 1.0],
        });
    }
    let rim = outline.len() as u32;
    for i in 0..rim {
        let j = (i + 1) % rim;
        mesh.indices.extend([0, 1 + i, 1 + j]);
    }
    mesh
}

/// Deformed plane laid flat in XZ, heights from [`terrain_height`], normals
/// by central differences. Centered on the origin; placement is a transform.
pub fn terrain_grid(size: f32, segments: usize) -> MeshData {
    let mut mesh = MeshData::default();
    let step = size / segments as f32;
    let half = size * 0.5;
    let eps = step * 0.5;
    for iz in 0..=segments {
        let z = -half + iz as f32 * step;
        for ix in 0..=segments {
            let x = -half + ix as f32 * step;
            let dhdx = (terrain_height(x + eps, z) - terrain_height(x - eps, z)) / (2.0 * eps);
            let dhdz = (terrain_height(x, z + eps) - terrain_height(x, z - eps)) / (2.0 * eps);
            let normal = Vec3::new(-dhdx, 1.0, -dhdz).normalize();
            mesh.vertices.push(Vertex {
                position: [x, terrain_height(x, z), z],
                normal: normal.to_array(),
            });
        }
    }
    let stride = segments as u32 + 1;
    for iz in 0..segments as u32 {
        for ix in 0..segments as u32 {
            let a = iz * stride + ix;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            mesh.indices.extend([a, c, b, b, c, d]);
        }
    }
    mesh
}

// Convenience builders at the scene's configured sizes.

pub fn crystal_mesh() -> MeshData {
    octahedron(CRYSTAL_RADIUS, CRYSTAL_STRETCH)
}

pub fn inset_mesh() -> MeshData {
    octahedron_edges(INSET_RADIUS, CRYSTAL_STRETCH)
}

pub fn dust_mesh() -> MeshData {
    tetrahedron(DUST_RADIUS)
}

pub fn chain_mesh() -> MeshData {
    chain_tube(CHAIN_RADIUS, CHAIN_START_Y, CHAIN_END_Y, 6)
}

pub fn connector_ring_mesh() -> MeshData {
    torus(CONNECTOR_RING_RADIUS, CONNECTOR_RING_TUBE, 16, 8)
}

pub fn leaf_mesh() -> MeshData {
    leaf_blade(LEAF_BLADE_SCALE, 8)
}

pub fn god_ray_mesh() -> MeshData {
    open_cone(GOD_RAY_CONE_RADIUS, GOD_RAY_CONE_HEIGHT, 8)
}

pub fn terrain_mesh() -> MeshData {
    terrain_grid(TERRAIN_SIZE, TERRAIN_SEGMENTS)
}
