use bytemuck::{Pod, Zeroable};

use super::Material;

/// Per-part uniform: the part's world matrix plus its material factors.
///
/// Field packing matches the `PartUniform` struct in `shader.wgsl`:
/// emissive carries its intensity in `w`, `params` is
/// (roughness, metalness, has_texture, unused).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MaterialUniform {
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
    pub params: [f32; 4],
}

impl MaterialUniform {
    pub fn new(model: nalgebra_glm::Mat4, material: &Material) -> Self {
        let [r, g, b] = material.base_color;
        let [er, eg, eb] = material.emissive;
        let has_texture = if material.base_color_texture.is_some() {
            1.0
        } else {
            0.0
        };
        Self {
            model: model.into(),
            base_color: [r, g, b, 1.0],
            emissive: [er, eg, eb, material.emissive_intensity],
            params: [material.roughness, material.metalness, has_texture, 0.0],
        }
    }
}
