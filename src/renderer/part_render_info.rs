use crate::material::Material;

/// Draw data for one model part: an index range into the shared buffers
/// plus the part's resolved material and per-part GPU bindings.
pub struct PartRenderInfo {
    pub index_start: u32,
    pub index_count: u32,
    pub node: usize,
    pub material: Material,
    pub texture_binding: usize,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}
