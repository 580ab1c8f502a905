use super::{MeshData, MeshVertex};

// Per-face corner order shared by every cube face: the two triangles are
// (1, 0, 3) and (1, 3, 2) relative to the face's first vertex.
const FACE_INDICES: [u32; 6] = [1, 0, 3, 1, 3, 2];
const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

const CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    // +Z
    [[-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, -0.5, 0.5]],
    // -Z
    [[-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5]],
    // +X
    [[0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5]],
    // -X
    [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
    // +Y
    [[-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5]],
    // -Y
    [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, -0.5, -0.5]],
];

/// Unit cube, edge length 1, four vertices per face so each face carries its own UVs.
pub fn cube() -> MeshData {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, corners) in CUBE_FACES.iter().enumerate() {
        let base = (face * 4) as u32;
        for (corner, uv) in corners.iter().zip(FACE_UVS) {
            vertices.push(MeshVertex::new(*corner, uv));
        }
        indices.extend(FACE_INDICES.iter().map(|i| base + i));
    }

    MeshData { vertices, indices }
}

/// Unit square in the z = 0 plane.
pub fn square() -> MeshData {
    let corners = [[-0.5, 0.5, 0.0], [0.5, 0.5, 0.0], [0.5, -0.5, 0.0], [-0.5, -0.5, 0.0]];
    let vertices = corners
        .iter()
        .map(|&[x, y, z]| MeshVertex::new([x, y, z], [x + 0.5, y + 0.5]))
        .collect();

    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 3, 2],
    }
}

/// Square-based pyramid: base at y = -0.5, apex at (0, 0.5, 0).
pub fn pyramid() -> MeshData {
    let vertices = vec![
        MeshVertex::new([-0.5, -0.5, -0.5], [0.0, 0.0]),
        MeshVertex::new([0.5, -0.5, -0.5], [1.0, 0.0]),
        MeshVertex::new([0.5, -0.5, 0.5], [1.0, 1.0]),
        MeshVertex::new([-0.5, -0.5, 0.5], [0.0, 1.0]),
        MeshVertex::new([0.0, 0.5, 0.0], [0.5, 0.5]),
    ];

    #[rustfmt::skip]
    let indices = vec![
        // base
        0, 1, 2,
        0, 2, 3,
        // sides
        0, 4, 1,
        1, 4, 2,
        2, 4, 3,
        3, 4, 0,
    ];

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit_cube(mesh: &MeshData) -> bool {
        mesh.vertices
            .iter()
            .all(|v| v.position.iter().all(|c| (-0.5..=0.5).contains(c)))
    }

    fn indices_in_range(mesh: &MeshData) -> bool {
        mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len())
    }

    #[test]
    fn cube_layout() {
        let c = cube();
        assert_eq!(c.vertices.len(), 24);
        assert_eq!(c.indices.len(), 36);
        assert!(in_unit_cube(&c));
        assert!(indices_in_range(&c));
    }

    #[test]
    fn cube_faces_are_planar() {
        let c = cube();
        for face in c.vertices.chunks_exact(4) {
            // Every face has one coordinate fixed at +-0.5.
            let planar = (0..3).any(|axis| {
                let first = face[0].position[axis];
                first.abs() == 0.5 && face.iter().all(|v| v.position[axis] == first)
            });
            assert!(planar);
        }
    }

    #[test]
    fn square_is_flat() {
        let s = square();
        assert_eq!(s.vertices.len(), 4);
        assert_eq!(s.triangle_count(), 2);
        assert!(s.vertices.iter().all(|v| v.position[2] == 0.0));
        assert!(indices_in_range(&s));
    }

    #[test]
    fn pyramid_apex_is_shared_by_all_sides() {
        let p = pyramid();
        assert_eq!(p.indices.len(), 18);
        assert_eq!(p.vertices[4].position, [0.0, 0.5, 0.0]);
        let apex_uses = p.indices.iter().filter(|&&i| i == 4).count();
        assert_eq!(apex_uses, 4);
        assert!(in_unit_cube(&p));
    }
}
