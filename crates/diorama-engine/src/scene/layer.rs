use core::cmp::Ordering;

/// Paint layer for draw items.
///
/// Lower layers paint first. Translucent geometry goes on a higher layer than
/// opaque geometry so it blends over a complete depth buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Layer(pub i32);

impl Layer {
    pub const OPAQUE: Layer = Layer(0);
    pub const TRANSLUCENT: Layer = Layer(10);
}

impl Ord for Layer {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Layer {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
