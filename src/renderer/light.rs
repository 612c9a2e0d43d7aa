use crate::scene::Lighting;

/// GPU-side copy of the scene lighting. Intensities ride in the fourth
/// component of each color so the struct keeps 16 byte spacing without
/// dedicated padding fields.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub directional_color: [f32; 3],
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
}

impl From<&Lighting> for LightsUniform {
    fn from(lighting: &Lighting) -> Self {
        Self {
            ambient_color: lighting.ambient_color,
            ambient_intensity: lighting.ambient_intensity,
            directional_color: lighting.directional_color,
            directional_intensity: lighting.directional_intensity,
            directional_position: [
                lighting.directional_position.x,
                lighting.directional_position.y,
                lighting.directional_position.z,
            ],
            _padding: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_has_16_byte_spacing() {
        assert_eq!(std::mem::size_of::<LightsUniform>() % 16, 0);
    }

    #[test]
    fn conversion_carries_scene_lighting() {
        let uniform = LightsUniform::from(&Lighting::default());
        assert_eq!(uniform.ambient_intensity, 0.2);
        assert_eq!(uniform.directional_intensity, 1.0);
        assert_eq!(uniform.directional_position, [5.0, 5.0, 5.0]);
    }
}
