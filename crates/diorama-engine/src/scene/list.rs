use glam::Mat4;

use crate::mesh::MeshId;
use crate::paint::{Color, Material};
use crate::transform::{uniform_scale, OUTLINE_EPSILON};

use super::{DrawCmd, Layer, SortKey};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Transform stack
///
/// Use [`push_transform`] / [`pop_transform`] to place a group of commands under a
/// parent transform. Each level composes with its parent (`parent * local`), and every
/// pushed command is pre-multiplied by the current top.
///
/// ```ignore
/// draw_list.push_transform(shoulder);
/// // ... push upper arm, elbow, forearm ...
/// draw_list.pop_transform();
/// ```
///
/// [`push_transform`]: DrawList::push_transform
/// [`pop_transform`]: DrawList::pop_transform
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Stack of composed transforms. The top is the current parent.
    transform_stack: Vec<Mat4>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the transform stack. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.transform_stack.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command on `layer`.
    ///
    /// The command's transform is pre-multiplied by the current transform stack top.
    #[inline]
    pub fn push(&mut self, layer: Layer, mut cmd: DrawCmd) {
        if let Some(parent) = self.transform_stack.last() {
            cmd.transform = *parent * cmd.transform;
        }

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(layer, order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Pushes an opaque mesh followed by its black edge outline.
    pub fn solid(&mut self, mesh: MeshId, transform: Mat4, color: Color) {
        self.push(Layer::OPAQUE, DrawCmd::fill(mesh, transform, color));
        self.outline(mesh, transform, Color::BLACK);
    }

    /// Pushes only the edge outline of a mesh, slightly inflated to avoid z-fighting.
    pub fn outline(&mut self, mesh: MeshId, transform: Mat4, color: Color) {
        self.push(
            Layer::OPAQUE,
            DrawCmd::outline(mesh, transform * uniform_scale(OUTLINE_EPSILON), color),
        );
    }

    /// Pushes an opaque mesh with a non-flat material and no outline.
    pub fn surface(&mut self, mesh: MeshId, transform: Mat4, color: Color, material: Material) {
        self.push(
            Layer::OPAQUE,
            DrawCmd::fill(mesh, transform, color).with_material(material),
        );
    }

    /// Begins a transform group composed with the current parent.
    ///
    /// Calls must be balanced with [`pop_transform`](DrawList::pop_transform).
    #[inline]
    pub fn push_transform(&mut self, local: Mat4) {
        let composed = self.current_transform() * local;
        self.transform_stack.push(composed);
    }

    /// Ends the most recent transform group.
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_transform`.
    #[inline]
    pub fn pop_transform(&mut self) {
        debug_assert!(
            !self.transform_stack.is_empty(),
            "pop_transform called without matching push_transform"
        );
        self.transform_stack.pop();
    }

    /// Current composed parent transform (identity when the stack is empty).
    #[inline]
    pub fn current_transform(&self) -> Mat4 {
        self.transform_stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}
