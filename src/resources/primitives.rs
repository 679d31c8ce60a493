//! Procedural geometry for the primitive mesh kinds.
//!
//! Each generator returns CPU-side [`MeshData`]; the mesh library uploads
//! it once and draws it by kind. Shapes use unit dimensions so the scene
//! descriptors size them entirely through their scale transform: the plane
//! spans ±1 in XZ, the box is a unit cube centered on the origin, solids
//! of revolution stand on their base at y = 0 with height 1.

use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Vector3, vec3};

use crate::data_structures::mesh::{MeshData, MeshKind, ModelVertex};

/// Radial resolution of curved surfaces.
const SEGMENTS: u32 = 32;
/// Latitudinal/tube resolution of curved surfaces.
const RINGS: u32 = 16;

pub fn generate(kind: MeshKind) -> MeshData {
    match kind {
        MeshKind::Plane => plane(),
        MeshKind::Box => box_mesh(),
        MeshKind::Sphere => sphere(SEGMENTS, RINGS),
        MeshKind::Cylinder => frustum(1.0, 1.0, SEGMENTS),
        MeshKind::TaperedCylinder => frustum(1.0, 0.5, SEGMENTS),
        MeshKind::Cone => frustum(1.0, 0.0, SEGMENTS),
        MeshKind::Torus => torus(1.0, 0.25, SEGMENTS, RINGS),
        MeshKind::Prism => prism(),
    }
}

fn vertex(position: Vector3<f32>, tex_coords: [f32; 2], normal: Vector3<f32>) -> ModelVertex {
    ModelVertex {
        position: position.into(),
        tex_coords,
        normal: normal.into(),
    }
}

/// A 2x2 plane in XZ, facing +Y.
fn plane() -> MeshData {
    let normal = vec3(0.0, 1.0, 0.0);
    let vertices = vec![
        vertex(vec3(-1.0, 0.0, 1.0), [0.0, 0.0], normal),
        vertex(vec3(1.0, 0.0, 1.0), [1.0, 0.0], normal),
        vertex(vec3(1.0, 0.0, -1.0), [1.0, 1.0], normal),
        vertex(vec3(-1.0, 0.0, -1.0), [0.0, 1.0], normal),
    ];
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// A unit cube centered on the origin, four vertices per face.
fn box_mesh() -> MeshData {
    // face normal, u axis, v axis; u x v = normal keeps every face CCW
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let mut data = MeshData::default();
    for (normal, u_axis, v_axis) in FACES {
        let normal = Vector3::from(normal);
        let u_axis = Vector3::from(u_axis);
        let v_axis = Vector3::from(v_axis);
        let base = data.vertices.len() as u32;
        for (u, v) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let position = normal * 0.5 + u_axis * u + v_axis * v;
            data.vertices.push(vertex(position, [u + 0.5, v + 0.5], normal));
        }
        data.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    data
}

/// A unit sphere centered on the origin.
fn sphere(segments: u32, rings: u32) -> MeshData {
    let mut data = MeshData::default();
    for ring in 0..=rings {
        let theta = PI * ring as f32 / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for seg in 0..=segments {
            let phi = TAU * seg as f32 / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = vec3(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            let uv = [
                seg as f32 / segments as f32,
                1.0 - ring as f32 / rings as f32,
            ];
            data.vertices.push(vertex(normal, uv, normal));
        }
    }
    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            data.indices.extend([a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    data
}

/// A capped solid of revolution around +Y: radius `bottom` at y = 0,
/// radius `top` at y = 1. Covers the cylinder (1, 1), the tapered
/// cylinder (1, 0.5) and the cone (1, 0).
fn frustum(bottom: f32, top: f32, segments: u32) -> MeshData {
    let mut data = MeshData::default();
    let slope = bottom - top;
    for (y, radius) in [(0.0, bottom), (1.0, top)] {
        for seg in 0..=segments {
            let phi = TAU * seg as f32 / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = vec3(cos_phi, slope, sin_phi).normalize();
            data.vertices.push(vertex(
                vec3(radius * cos_phi, y, radius * sin_phi),
                [seg as f32 / segments as f32, y],
                normal,
            ));
        }
    }
    let stride = segments + 1;
    for seg in 0..segments {
        let a = seg;
        let b = seg + stride;
        data.indices.extend([a, b, a + 1, a + 1, b, b + 1]);
    }
    cap(&mut data, bottom, 0.0, false, segments);
    cap(&mut data, top, 1.0, true, segments);
    data
}

/// A triangle-fan disc at height `y`; `up` selects the +Y or -Y face.
/// Degenerate discs (the cone's apex) are skipped.
fn cap(data: &mut MeshData, radius: f32, y: f32, up: bool, segments: u32) {
    if radius <= 0.0 {
        return;
    }
    let normal = vec3(0.0, if up { 1.0 } else { -1.0 }, 0.0);
    let center = data.vertices.len() as u32;
    data.vertices.push(vertex(vec3(0.0, y, 0.0), [0.5, 0.5], normal));
    for seg in 0..=segments {
        let phi = TAU * seg as f32 / segments as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        data.vertices.push(vertex(
            vec3(radius * cos_phi, y, radius * sin_phi),
            [cos_phi * 0.5 + 0.5, sin_phi * 0.5 + 0.5],
            normal,
        ));
    }
    for seg in 0..segments {
        let v = center + 1 + seg;
        if up {
            data.indices.extend([center, v + 1, v]);
        } else {
            data.indices.extend([center, v, v + 1]);
        }
    }
}

/// A torus around the Y axis with the given ring and tube radii.
fn torus(ring_radius: f32, tube_radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut data = MeshData::default();
    for seg in 0..=segments {
        let u = TAU * seg as f32 / segments as f32;
        let (sin_u, cos_u) = u.sin_cos();
        for ring in 0..=rings {
            let v = TAU * ring as f32 / rings as f32;
            let (sin_v, cos_v) = v.sin_cos();
            let position = vec3(
                (ring_radius + tube_radius * cos_v) * cos_u,
                tube_radius * sin_v,
                (ring_radius + tube_radius * cos_v) * sin_u,
            );
            let normal = vec3(cos_v * cos_u, sin_v, cos_v * sin_u);
            let uv = [seg as f32 / segments as f32, ring as f32 / rings as f32];
            data.vertices.push(vertex(position, uv, normal));
        }
    }
    let stride = rings + 1;
    for seg in 0..segments {
        for ring in 0..rings {
            let a = seg * stride + ring;
            let b = a + stride;
            data.indices.extend([a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    data
}

/// A triangular prism: unit-height triangle cross-section in XY, extruded
/// along Z from -0.5 to 0.5.
fn prism() -> MeshData {
    let mut data = MeshData::default();
    let corners = [
        vec3(-0.5_f32, 0.0, 0.0),
        vec3(0.5, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
    ];
    let half = vec3(0.0, 0.0, 0.5);

    let front_normal = vec3(0.0, 0.0, 1.0);
    let base = data.vertices.len() as u32;
    for corner in corners {
        data.vertices
            .push(vertex(corner + half, [corner.x + 0.5, corner.y], front_normal));
    }
    data.indices.extend([base, base + 1, base + 2]);

    let back_normal = vec3(0.0, 0.0, -1.0);
    let base = data.vertices.len() as u32;
    for corner in corners {
        data.vertices
            .push(vertex(corner - half, [corner.x + 0.5, corner.y], back_normal));
    }
    data.indices.extend([base, base + 2, base + 1]);

    // the three sides, walking the triangle edges counterclockwise
    for (from, to) in [(0, 1), (1, 2), (2, 0)] {
        let start = corners[from];
        let end = corners[to];
        let edge = end - start;
        let normal = vec3(edge.y, -edge.x, 0.0).normalize();
        let base = data.vertices.len() as u32;
        for (corner, u) in [(start, 0.0), (end, 1.0)] {
            data.vertices.push(vertex(corner + half, [u, 1.0], normal));
            data.vertices.push(vertex(corner - half, [u, 0.0], normal));
        }
        // layout: start front, start back, end front, end back
        data.indices
            .extend([base, base + 3, base + 2, base, base + 1, base + 3]);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_generates_a_valid_triangle_list() {
        for kind in MeshKind::ALL {
            let data = generate(kind);
            assert!(!data.vertices.is_empty(), "{kind:?}");
            assert_eq!(data.indices.len() % 3, 0, "{kind:?}");
            let max = data.vertices.len() as u32;
            assert!(
                data.indices.iter().all(|&i| i < max),
                "{kind:?} has out-of-range indices"
            );
        }
    }

    #[test]
    fn plane_faces_up() {
        let data = generate(MeshKind::Plane);
        assert_eq!(data.vertices.len(), 4);
        for v in &data.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.position[1], 0.0);
        }
    }

    #[test]
    fn curved_surfaces_have_unit_normals() {
        for kind in [
            MeshKind::Sphere,
            MeshKind::Cylinder,
            MeshKind::Cone,
            MeshKind::TaperedCylinder,
            MeshKind::Torus,
        ] {
            let data = generate(kind);
            for v in &data.vertices {
                let n = Vector3::from(v.normal);
                assert!(
                    (n.magnitude() - 1.0).abs() < 1e-4,
                    "{kind:?} normal {:?}",
                    v.normal
                );
            }
        }
    }

    #[test]
    fn sphere_vertices_lie_on_the_unit_sphere() {
        let data = generate(MeshKind::Sphere);
        for v in &data.vertices {
            assert!((Vector3::from(v.position).magnitude() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn frustum_solids_stand_on_their_base() {
        for kind in [MeshKind::Cylinder, MeshKind::Cone, MeshKind::TaperedCylinder] {
            let data = generate(kind);
            let (mut lo, mut hi) = (f32::MAX, f32::MIN);
            for v in &data.vertices {
                lo = lo.min(v.position[1]);
                hi = hi.max(v.position[1]);
            }
            assert_eq!(lo, 0.0, "{kind:?}");
            assert_eq!(hi, 1.0, "{kind:?}");
        }
    }

    #[test]
    fn cone_skips_the_degenerate_top_cap() {
        let cone = generate(MeshKind::Cone).indices.len();
        let cylinder = generate(MeshKind::Cylinder).indices.len();
        assert!(cone < cylinder);
    }
}
