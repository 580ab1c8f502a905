use std::ops::Range;

use super::{cube, icosphere, pyramid, square, MeshData, MeshError, MeshId, MeshVertex};

/// Location of one mesh inside the packed library buffers.
///
/// Indices are local to the mesh; `base_vertex` is added by the draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshRange {
    pub base_vertex: i32,
    pub vertex_count: u32,
    /// Triangle-list range in [`MeshLibrary::indices`].
    pub fill: Range<u32>,
    /// Line-list range in [`MeshLibrary::indices`].
    pub outline: Range<u32>,
}

/// All primitive meshes packed into one vertex array and one index array.
///
/// Built once at startup; the renderer uploads it into a single vertex buffer and a
/// single index buffer and draws sub-ranges.
#[derive(Debug, Clone)]
pub struct MeshLibrary {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    ranges: [MeshRange; 4],
}

impl MeshLibrary {
    /// Builds the library with an icosphere of the given subdivision level.
    pub fn new(icosphere_subdivisions: u32) -> Result<Self, MeshError> {
        let meshes = [cube(), square(), pyramid(), icosphere(icosphere_subdivisions)?];

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        let ranges = meshes.map(|mesh| pack(&mesh, &mut vertices, &mut indices));

        log::debug!(
            "mesh library built: {} vertices, {} indices (icosphere level {})",
            vertices.len(),
            indices.len(),
            icosphere_subdivisions
        );

        Ok(Self {
            vertices,
            indices,
            ranges,
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn range(&self, id: MeshId) -> &MeshRange {
        &self.ranges[id.index()]
    }
}

fn pack(mesh: &MeshData, vertices: &mut Vec<MeshVertex>, indices: &mut Vec<u32>) -> MeshRange {
    let base_vertex = vertices.len() as i32;
    vertices.extend_from_slice(&mesh.vertices);

    let fill_start = indices.len() as u32;
    indices.extend_from_slice(&mesh.indices);
    let fill = fill_start..indices.len() as u32;

    let outline_start = indices.len() as u32;
    indices.extend(mesh.outline_indices());
    let outline = outline_start..indices.len() as u32;

    MeshRange {
        base_vertex,
        vertex_count: mesh.vertices.len() as u32,
        fill,
        outline,
    }
}
