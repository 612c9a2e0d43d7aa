use nalgebra_glm as glm;

/// Orbit camera state: spherical position around a target plus projection
/// parameters. Y-up; yaw 0 looks down the -Z axis from +Z.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: glm::Vec3,
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraState {
    /// Derives the spherical parameters from an explicit eye position.
    pub fn from_eye(
        eye: glm::Vec3,
        target: glm::Vec3,
        fovy: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let offset = eye - target;
        let distance = glm::length(&offset);
        let pitch = if distance > 0.0 {
            (offset.y / distance).asin()
        } else {
            0.0
        };
        let yaw = offset.x.atan2(offset.z);
        Self {
            yaw,
            pitch,
            distance,
            target,
            fovy,
            aspect,
            znear,
            zfar,
        }
    }

    pub fn eye(&self) -> glm::Vec3 {
        self.target
            + self.distance
                * glm::vec3(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view(&self) -> glm::Mat4 {
        glm::look_at(&self.eye(), &self.target, &glm::vec3(0.0, 1.0, 0.0))
    }

    /// Zero-to-one depth range, matching the surface depth convention.
    pub fn projection(&self) -> glm::Mat4 {
        glm::perspective_rh_zo(self.aspect, self.fovy, self.znear, self.zfar)
    }

    pub fn view_proj(&self) -> glm::Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CameraState {
        CameraState::from_eye(
            glm::vec3(0.0, 1.0, 5.0),
            glm::vec3(0.0, 0.0, 0.0),
            75.0_f32.to_radians(),
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }

    #[test]
    fn from_eye_round_trips() {
        let eye = state().eye();
        assert!((eye.x - 0.0).abs() < 1e-5);
        assert!((eye.y - 1.0).abs() < 1e-5);
        assert!((eye.z - 5.0).abs() < 1e-5);
    }

    #[test]
    fn set_aspect_is_width_over_height() {
        let mut cam = state();
        cam.set_aspect(1920, 1080);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_is_ignored() {
        let mut cam = state();
        let before = cam.aspect;
        cam.set_aspect(1920, 0);
        assert_eq!(cam.aspect, before);
    }

    #[test]
    fn view_proj_is_finite() {
        let vp = state().view_proj();
        assert!(vp.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = state();
        let clip = cam.view_proj() * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }
}
