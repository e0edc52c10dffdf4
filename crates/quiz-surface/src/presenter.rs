//! Puts a finished [`Canvas`] on screen.

use wgpu::util::DeviceExt;

use crate::canvas::Canvas;
use crate::shader::BLIT_WGSL;
use crate::texture::CanvasTexture;
use crate::SurfaceError;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

/// Full-viewport quad; UV origin is the canvas top-left.
fn vertex_data() -> ([Vertex; 4], [u16; 6]) {
    let vertices = [
        Vertex { pos: [-1.0, -1.0], uv: [0.0, 1.0] },
        Vertex { pos: [1.0, -1.0], uv: [1.0, 1.0] },
        Vertex { pos: [1.0, 1.0], uv: [1.0, 0.0] },
        Vertex { pos: [-1.0, 1.0], uv: [0.0, 0.0] },
    ];
    (vertices, [0, 1, 2, 0, 2, 3])
}

/// Uploads canvas pixels and draws them as a single textured quad.
pub struct FramePresenter {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    texture: CanvasTexture,
    bind_group: wgpu::BindGroup,
}

impl FramePresenter {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let bind_group_layout = CanvasTexture::create_bind_group_layout(device);
        let sampler = CanvasTexture::create_sampler(device);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quiz-blit-shader"),
            source: wgpu::ShaderSource::Wgsl(BLIT_WGSL.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quiz-blit-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quiz-blit-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // The canvas is opaque and covers every pixel.
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let (vertices, indices) = vertex_data();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quiz-blit-vb"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quiz-blit-ib"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let texture = CanvasTexture::new(device, width, height);
        let bind_group = texture.create_bind_group(device, &bind_group_layout, &sampler);

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            texture,
            bind_group,
        }
    }

    /// Upload `canvas` and draw it into `target`, resizing the texture to
    /// match the canvas first when needed.
    pub fn present(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        canvas: &Canvas,
    ) -> Result<(), SurfaceError> {
        if self.texture.resize(device, canvas.width(), canvas.height()) {
            self.bind_group = self.texture.create_bind_group(device, &self.bind_group_layout, &self.sampler);
        }
        self.texture.upload_rgba(queue, canvas.data())?;

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("quiz-frame-encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quiz-frame-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.index_count, 0, 0..1);
        }
        queue.submit(Some(encoder.finish()));
        Ok(())
    }
}
