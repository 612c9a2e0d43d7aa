use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl WindowSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "window").unwrap_or_else(|e| {
            log::warn!("Failed to load window settings: {e}");
            Self::default()
        })
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "window", self) {
            log::warn!("Failed to save window settings: {e}");
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    pub model_location: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            model_location: "public/franxx_girl.glb".to_string(),
        }
    }
}

impl ViewerSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "viewer").unwrap_or_else(|e| {
            log::warn!("Failed to load viewer settings: {e}");
            Self::default()
        })
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "viewer", self) {
            log::warn!("Failed to save viewer settings: {e}");
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub damping_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fovy_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            damping_factor: 0.25,
        }
    }
}

impl CameraSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "camera").unwrap_or_else(|e| {
            log::warn!("Failed to load camera settings: {e}");
            Self::default()
        })
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "camera", self) {
            log::warn!("Failed to save camera settings: {e}");
        }
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub window: WindowSettings,
    pub viewer: ViewerSettings,
    pub camera: CameraSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            window: WindowSettings::load(),
            viewer: ViewerSettings::load(),
            camera: CameraSettings::load(),
        }
    }

    pub fn save(&self) {
        self.window.save();
        self.viewer.save();
        self.camera.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults() {
        let w = WindowSettings::default();
        assert_eq!(w.width, 1280.0);
        assert_eq!(w.height, 720.0);
    }

    #[test]
    fn camera_defaults_match_documented_projection() {
        let c = CameraSettings::default();
        assert_eq!(c.fovy_degrees, 75.0);
        assert_eq!(c.znear, 0.1);
        assert_eq!(c.zfar, 1000.0);
        assert_eq!(c.damping_factor, 0.25);
    }

    #[test]
    fn viewer_default_points_at_bundled_model() {
        assert!(ViewerSettings::default().model_location.ends_with(".glb"));
    }
}
