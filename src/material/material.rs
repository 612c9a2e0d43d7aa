/// PBR metallic-roughness factors for one model part.
///
/// Colors are RGB triples in [0, 1], constructed from 24-bit hex values via
/// [`rgb`]. `base_color_texture` indexes into the owning asset's image list.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub base_color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub base_color_texture: Option<usize>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            base_color_texture: None,
        }
    }
}

/// Expands a 24-bit `0xRRGGBB` value into an RGB triple.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_expands_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0]);
        assert_eq!(rgb(0xffffff), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn rgb_skin_tone_components() {
        let [r, g, b] = rgb(0xfad0a1);
        assert!((r - 250.0 / 255.0).abs() < 1e-6);
        assert!((g - 208.0 / 255.0).abs() < 1e-6);
        assert!((b - 161.0 / 255.0).abs() < 1e-6);
    }
}
