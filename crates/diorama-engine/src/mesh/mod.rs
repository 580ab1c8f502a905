//! Primitive mesh library.
//!
//! Static geometry for the shapes scenes are built from: a unit cube, a unit
//! square, a square-based pyramid, and a subdivided icosphere. All meshes are
//! centered at the origin and fit in the `[-0.5, 0.5]` cube, except the icosphere
//! which has unit radius.
//!
//! Geometry is CPU-side data; `render::MeshRenderer` uploads the packed
//! [`MeshLibrary`] once and draws ranges out of it.

mod error;
mod icosphere;
mod library;
mod primitives;
mod vertex;

pub use error::MeshError;
pub use icosphere::{icosphere, MAX_ICOSPHERE_SUBDIVISIONS};
pub use library::{MeshLibrary, MeshRange};
pub use primitives::{cube, pyramid, square};
pub use vertex::MeshVertex;

/// Identifies one of the library meshes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MeshId {
    Cube,
    Square,
    Pyramid,
    Icosphere,
}

impl MeshId {
    pub const ALL: [MeshId; 4] = [MeshId::Cube, MeshId::Square, MeshId::Pyramid, MeshId::Icosphere];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            MeshId::Cube => 0,
            MeshId::Square => 1,
            MeshId::Pyramid => 2,
            MeshId::Icosphere => 3,
        }
    }
}

/// Indexed triangle-list geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices tracing every triangle's three edges.
    ///
    /// Drawing these is equivalent to drawing each triangle as a closed line loop.
    pub fn outline_indices(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            out.extend_from_slice(&[a, b, b, c, c, a]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_traces_three_edges_per_triangle() {
        let sq = square();
        let lines = sq.outline_indices();
        assert_eq!(lines.len(), sq.triangle_count() * 6);
        assert_eq!(&lines[..6], &[0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn mesh_ids_index_densely() {
        for (i, id) in MeshId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}
