use glam::Mat4;

use crate::mesh::MeshId;
use crate::paint::{Color, Material};

/// How a mesh is rasterized.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DrawMode {
    /// Filled triangles.
    #[default]
    Fill,
    /// Triangle edges as lines.
    Outline,
}

/// Renderer-agnostic draw command: one mesh, placed by `transform`.
///
/// `transform` is the full model-view matrix; the renderer only adds projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    pub mesh: MeshId,
    pub transform: Mat4,
    pub color: Color,
    pub mode: DrawMode,
    pub material: Material,
}

impl DrawCmd {
    /// Filled flat-shaded mesh.
    #[inline]
    pub fn fill(mesh: MeshId, transform: Mat4, color: Color) -> Self {
        Self {
            mesh,
            transform,
            color,
            mode: DrawMode::Fill,
            material: Material::Flat,
        }
    }

    /// Edge outline of a mesh.
    #[inline]
    pub fn outline(mesh: MeshId, transform: Mat4, color: Color) -> Self {
        Self {
            mode: DrawMode::Outline,
            ..Self::fill(mesh, transform, color)
        }
    }

    #[inline]
    pub fn with_material(self, material: Material) -> Self {
        Self { material, ..self }
    }
}
