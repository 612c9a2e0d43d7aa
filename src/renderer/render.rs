use crate::material::MaterialUniform;
use crate::renderer::camera::CameraState;
use crate::renderer::light::LightsUniform;
use crate::renderer::renderer::Renderer;
use nalgebra_glm as glm;

impl Renderer {
    /// Draw one frame. `node_matrices` holds the world matrix for every
    /// model node, staging transform already applied; `None` clears only.
    pub fn render(
        &mut self,
        camera: &CameraState,
        clear_color: [f32; 3],
        lights: &LightsUniform,
        node_matrices: Option<&[glm::Mat4]>,
    ) -> Result<(), wgpu::SurfaceError> {
        // Skip rendering while the window has no area (minimized, not ready)
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        let view_proj = camera.view_proj();
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(view_proj.as_slice()),
        );
        self.queue
            .write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[*lights]));

        if let Some(matrices) = node_matrices {
            for part in &self.parts {
                let model = matrices
                    .get(part.node)
                    .copied()
                    .unwrap_or_else(glm::Mat4::identity);
                let uniform = MaterialUniform::new(model, &part.material);
                self.queue.write_buffer(
                    &part.uniform_buffer,
                    0,
                    bytemuck::cast_slice(&[uniform]),
                );
            }
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color[0] as f64,
                            g: clear_color[1] as f64,
                            b: clear_color[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if node_matrices.is_some() && !self.parts.is_empty() {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                for part in &self.parts {
                    let texture_bind_group = self
                        .texture_bind_groups
                        .get(part.texture_binding)
                        .unwrap_or(&self.texture_bind_groups[0]);

                    render_pass.set_bind_group(1, texture_bind_group, &[]);
                    render_pass.set_bind_group(2, &part.bind_group, &[]);
                    render_pass.draw_indexed(
                        part.index_start..(part.index_start + part.index_count),
                        0,
                        0..1,
                    );
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
