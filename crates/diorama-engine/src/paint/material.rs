/// Surface treatment applied by the mesh shader.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Material {
    /// Solid color.
    #[default]
    Flat,
    /// Color modulated by a procedural block texture over the mesh UVs.
    Textured,
    /// Checkered ground that scrolls with scene time.
    Floor,
}

impl Material {
    /// Shader-side selector.
    #[inline]
    pub const fn shader_id(self) -> u32 {
        match self {
            Material::Flat => 0,
            Material::Textured => 1,
            Material::Floor => 2,
        }
    }
}
