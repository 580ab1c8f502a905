use glam::Vec3;

use super::{MeshData, MeshError, MeshVertex};

/// Highest accepted subdivision level (20 * 4^5 = 20480 triangles).
pub const MAX_ICOSPHERE_SUBDIVISIONS: u32 = 5;

const X: f32 = 0.525_731_1;
const Z: f32 = 0.850_650_8;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-X, 0.0, Z], [X, 0.0, Z], [-X, 0.0, -Z], [X, 0.0, -Z],
    [0.0, Z, X], [0.0, Z, -X], [0.0, -Z, X], [0.0, -Z, -X],
    [Z, X, 0.0], [-Z, X, 0.0], [Z, -X, 0.0], [-Z, -X, 0.0],
];

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 4, 1], [0, 9, 4], [9, 5, 4], [4, 5, 8], [4, 8, 1],
    [8, 10, 1], [8, 3, 10], [5, 3, 8], [5, 2, 3], [2, 7, 3],
    [7, 10, 3], [7, 6, 10], [7, 11, 6], [11, 0, 6], [0, 1, 6],
    [6, 1, 10], [9, 0, 11], [9, 11, 2], [9, 2, 5], [7, 2, 11],
];

/// Geodesic unit sphere built by subdividing an icosahedron `subdivisions` times.
///
/// Each pass splits every triangle into four, pushing the three edge midpoints
/// out to the unit sphere. Midpoints are not shared between neighbouring
/// triangles, so the vertex count is `12 + 20 * (4^s - 1)`.
pub fn icosphere(subdivisions: u32) -> Result<MeshData, MeshError> {
    if subdivisions > MAX_ICOSPHERE_SUBDIVISIONS {
        return Err(MeshError::TooManySubdivisions {
            requested: subdivisions,
            max: MAX_ICOSPHERE_SUBDIVISIONS,
        });
    }

    let mut positions: Vec<Vec3> = ICOSAHEDRON_VERTICES.iter().map(|&p| Vec3::from(p)).collect();
    let mut indices: Vec<u32> = ICOSAHEDRON_FACES.iter().flatten().copied().collect();

    for _ in 0..subdivisions {
        let tri_count = indices.len() / 3;
        indices.reserve(tri_count * 9);

        for tri in 0..tri_count {
            let at = tri * 3;
            let (i0, i1, i2) = (indices[at], indices[at + 1], indices[at + 2]);
            let (p0, p1, p2) = (
                positions[i0 as usize],
                positions[i1 as usize],
                positions[i2 as usize],
            );

            let m0 = positions.len() as u32;
            let (m1, m2) = (m0 + 1, m0 + 2);
            positions.push(((p0 + p1) * 0.5).normalize());
            positions.push(((p1 + p2) * 0.5).normalize());
            positions.push(((p2 + p0) * 0.5).normalize());

            // Corner triangle at i0 stays in place; the other three are appended.
            indices[at + 1] = m0;
            indices[at + 2] = m2;
            indices.extend_from_slice(&[m0, i1, m1, m0, m1, m2, m2, m1, i2]);
        }
    }

    let vertices = positions
        .into_iter()
        .map(|p| MeshVertex::new(p.to_array(), spherical_uv(p)))
        .collect();

    Ok(MeshData { vertices, indices })
}

fn spherical_uv(p: Vec3) -> [f32; 2] {
    use std::f32::consts::{PI, TAU};
    let u = 0.5 + p.z.atan2(p.x) / TAU;
    let v = 0.5 - p.y.clamp(-1.0, 1.0).asin() / PI;
    [u, v]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_icosahedron() {
        let m = icosphere(0).unwrap();
        assert_eq!(m.vertices.len(), 12);
        assert_eq!(m.triangle_count(), 20);
    }

    #[test]
    fn subdivision_counts() {
        for s in 1..=3u32 {
            let m = icosphere(s).unwrap();
            let four_s = 4usize.pow(s);
            assert_eq!(m.triangle_count(), 20 * four_s);
            assert_eq!(m.vertices.len(), 12 + 20 * (four_s - 1));
        }
    }

    #[test]
    fn all_vertices_on_unit_sphere() {
        let m = icosphere(2).unwrap();
        for v in &m.vertices {
            let len = Vec3::from(v.position).length();
            assert!((len - 1.0).abs() < 1e-5, "vertex off sphere: {len}");
        }
    }

    #[test]
    fn indices_are_valid() {
        let m = icosphere(2).unwrap();
        assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    }

    #[test]
    fn too_many_subdivisions_is_rejected() {
        assert_eq!(
            icosphere(MAX_ICOSPHERE_SUBDIVISIONS + 1),
            Err(MeshError::TooManySubdivisions {
                requested: MAX_ICOSPHERE_SUBDIVISIONS + 1,
                max: MAX_ICOSPHERE_SUBDIVISIONS,
            })
        );
    }
}
