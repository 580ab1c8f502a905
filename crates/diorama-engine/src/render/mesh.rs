use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::device::DEPTH_FORMAT;
use crate::mesh::{MeshId, MeshLibrary, MeshVertex};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawList, DrawMode};

const MESH_SHADER: &str = include_str!("shaders/mesh.wgsl");

/// Mesh renderer for `DrawList` streams.
///
/// The whole [`MeshLibrary`] lives in one vertex buffer and one index buffer. Each
/// draw item becomes one instance (model matrix + color + material); consecutive
/// items sharing mesh and mode are drawn with a single instanced call.
///
/// Two pipelines share the shader: `Fill` rasterizes triangles, `Outline` draws the
/// library's line-list ranges. Both depth-test against the frame's depth attachment
/// and alpha-blend, so translucent items should be pushed on a later layer.
pub struct MeshRenderer {
    library: MeshLibrary,

    pipeline_format: Option<wgpu::TextureFormat>,
    fill_pipeline: Option<wgpu::RenderPipeline>,
    outline_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    globals_ubo: Option<wgpu::Buffer>,

    mesh_vbo: Option<wgpu::Buffer>,
    mesh_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    // Reused per frame.
    instances: Vec<MeshInstance>,
    batches: Vec<Batch>,
}

/// Consecutive instances drawn with one call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Batch {
    mesh: MeshId,
    mode: DrawMode,
    start: u32,
    end: u32,
}

impl MeshRenderer {
    pub fn new(library: MeshLibrary) -> Self {
        Self {
            library,
            pipeline_format: None,
            fill_pipeline: None,
            outline_pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            globals_ubo: None,
            mesh_vbo: None,
            mesh_ibo: None,
            instance_vbo: None,
            instance_capacity: 0,
            instances: Vec::new(),
            batches: Vec::new(),
        }
    }

    pub fn library(&self) -> &MeshLibrary {
        &self.library
    }

    /// Renders every item of `draw_list` into `target` in paint order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.ensure_pipelines(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        self.instances.clear();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            let cmd = &item.cmd;
            if !cmd.color.is_finite() || cmd.transform.is_nan() {
                log::trace!("skipping non-finite draw command for {:?}", cmd.mesh);
                continue;
            }

            let index = self.instances.len() as u32;
            self.instances.push(MeshInstance::new(
                cmd.transform,
                cmd.color.to_array(),
                cmd.material.shader_id(),
            ));
            push_batch(&mut self.batches, cmd.mesh, cmd.mode, index);
        }

        if self.instances.is_empty() {
            return;
        }

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        self.write_globals(ctx);
        self.ensure_instance_capacity(ctx, self.instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let Some(fill) = self.fill_pipeline.as_ref() else { return };
        let Some(outline) = self.outline_pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(mesh_vbo) = self.mesh_vbo.as_ref() else { return };
        let Some(mesh_ibo) = self.mesh_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("diorama mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, mesh_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(mesh_ibo.slice(..), wgpu::IndexFormat::Uint32);

        let mut bound: Option<DrawMode> = None;
        for batch in &self.batches {
            if bound != Some(batch.mode) {
                rpass.set_pipeline(match batch.mode {
                    DrawMode::Fill => fill,
                    DrawMode::Outline => outline,
                });
                bound = Some(batch.mode);
            }

            let range = self.library.range(batch.mesh);
            let indices = match batch.mode {
                DrawMode::Fill => range.fill.clone(),
                DrawMode::Outline => range.outline.clone(),
            };
            rpass.draw_indexed(indices, range.base_vertex, batch.start..batch.end);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.fill_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("diorama mesh shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_SHADER.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("diorama mesh bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<GlobalsUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("diorama mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let fill = create_pipeline(
            ctx,
            &shader,
            &pipeline_layout,
            "diorama mesh fill pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::CompareFunction::Less,
        );
        let outline = create_pipeline(
            ctx,
            &shader,
            &pipeline_layout,
            "diorama mesh outline pipeline",
            wgpu::PrimitiveTopology::LineList,
            wgpu::CompareFunction::LessEqual,
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.fill_pipeline = Some(fill);
        self.outline_pipeline = Some(outline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.globals_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.globals_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let globals_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("diorama mesh globals ubo"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("diorama mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ubo.as_entire_binding(),
            }],
        });

        self.globals_ubo = Some(globals_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.mesh_vbo.is_some() && self.mesh_ibo.is_some() {
            return;
        }

        self.mesh_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("diorama mesh vbo"),
            contents: bytemuck::cast_slice(self.library.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.mesh_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("diorama mesh ibo"),
            contents: bytemuck::cast_slice(self.library.indices()),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_globals(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.globals_ubo.as_ref() else { return };
        let u = GlobalsUniform {
            projection: ctx.projection.to_cols_array_2d(),
            time: ctx.time,
            _pad: [0.0; 3],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required_instances: usize) {
        if required_instances <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_instances.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<MeshInstance>()) as u64;

        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("diorama mesh instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    label: &str,
    topology: wgpu::PrimitiveTopology,
    depth_compare: wgpu::CompareFunction,
) -> wgpu::RenderPipeline {
    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[MeshVertex::layout(), MeshInstance::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Mesh winding is not consistent across primitives.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

/// Appends `index` to the last batch if it shares mesh and mode, else opens a new one.
fn push_batch(batches: &mut Vec<Batch>, mesh: MeshId, mode: DrawMode, index: u32) {
    if let Some(last) = batches.last_mut() {
        if last.mesh == mesh && last.mode == mode && last.end == index {
            last.end = index + 1;
            return;
        }
    }
    batches.push(Batch {
        mesh,
        mode,
        start: index,
        end: index + 1,
    });
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlobalsUniform {
    projection: [[f32; 4]; 4],
    time: f32,
    _pad: [f32; 3], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    material: u32,
    _pad: [u32; 3],
}

impl MeshInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4, // model column 0
        3 => Float32x4, // model column 1
        4 => Float32x4, // model column 2
        5 => Float32x4, // model column 3
        6 => Float32x4, // color
        7 => Uint32     // material
    ];

    fn new(model: Mat4, color: [f32; 4], material: u32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            material,
            _pad: [0; 3],
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_merge_consecutive_matching_items() {
        let mut batches = Vec::new();
        push_batch(&mut batches, MeshId::Cube, DrawMode::Fill, 0);
        push_batch(&mut batches, MeshId::Cube, DrawMode::Fill, 1);
        push_batch(&mut batches, MeshId::Cube, DrawMode::Outline, 2);
        push_batch(&mut batches, MeshId::Cube, DrawMode::Fill, 3);
        push_batch(&mut batches, MeshId::Icosphere, DrawMode::Fill, 4);

        assert_eq!(batches.len(), 4);
        assert_eq!((batches[0].start, batches[0].end), (0, 2));
        assert_eq!(batches[1].mode, DrawMode::Outline);
        assert_eq!(batches[3].mesh, MeshId::Icosphere);
    }

    #[test]
    fn gpu_structs_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<MeshInstance>(), 96);
    }

    #[test]
    fn checker_parity_wraps_negative_cells() {
        // Negative cell sums must alternate like positive ones.
        assert!(MESH_SHADER.contains("((s % 2) + 2) % 2 == 0"));
        assert!(!MESH_SHADER.contains("(i32(c.x) + i32(c.y)) % 2 == 0"));
    }
}
