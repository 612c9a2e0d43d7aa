use super::CameraState;
use nalgebra_glm as glm;

/// Handles orbit input: left drag rotates, right drag pans, wheel zooms.
///
/// Rotation and panning accumulate into deltas that `update` feeds into the
/// camera a damped fraction per frame, so motion eases out after the mouse
/// stops. Zoom applies immediately.
pub struct CameraController {
    state: CameraState,
    damping_factor: f32,
    yaw_delta: f32,
    pitch_delta: f32,
    pan_delta: glm::Vec2,
    left_mouse_pressed: bool,
    right_mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl CameraController {
    pub fn new(state: CameraState, damping_factor: f32) -> Self {
        Self {
            state,
            damping_factor,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            pan_delta: glm::vec2(0.0, 0.0),
            left_mouse_pressed: false,
            right_mouse_pressed: false,
            last_mouse_pos: None,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.state.set_aspect(width, height);
    }

    /// Handle mouse button press/release
    pub fn on_mouse_button(&mut self, button: winit::event::MouseButton, pressed: bool) {
        match button {
            winit::event::MouseButton::Left => {
                self.left_mouse_pressed = pressed;
                if !pressed {
                    self.last_mouse_pos = None;
                }
            }
            winit::event::MouseButton::Right => {
                self.right_mouse_pressed = pressed;
                if !pressed {
                    self.last_mouse_pos = None;
                }
            }
            _ => {}
        }
    }

    /// Handle mouse movement, accumulating rotation or pan deltas
    pub fn on_mouse_move(&mut self, position: (f64, f64)) -> bool {
        let mut handled = false;

        if self.left_mouse_pressed || self.right_mouse_pressed {
            if let Some(last_pos) = self.last_mouse_pos {
                let delta_x = (position.0 - last_pos.0) as f32;
                let delta_y = (position.1 - last_pos.1) as f32;
                if self.left_mouse_pressed {
                    self.rotate(delta_x, delta_y);
                } else {
                    self.pan(delta_x, delta_y);
                }
                handled = true;
            }
            self.last_mouse_pos = Some(position);
        } else {
            self.last_mouse_pos = None;
        }

        handled
    }

    /// Zoom along the view direction, keeping the target fixed
    pub fn on_mouse_wheel(&mut self, delta: f32) {
        let zoom_factor = 1.0 - delta * 0.1;
        self.state.distance = (self.state.distance * zoom_factor).clamp(0.5, 100.0);
    }

    /// Apply one damping step: integrate a fraction of the pending deltas
    /// and decay the remainder.
    pub fn update(&mut self) {
        let k = self.damping_factor;

        self.state.yaw += self.yaw_delta * k;
        self.state.pitch = (self.state.pitch + self.pitch_delta * k).clamp(-1.5, 1.5);
        let pan = self.pan_delta * k;
        self.apply_pan(pan);

        let decay = 1.0 - k;
        self.yaw_delta *= decay;
        self.pitch_delta *= decay;
        self.pan_delta *= decay;
    }

    fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw_delta -= delta_x * 0.01;
        self.pitch_delta += delta_y * 0.01;
    }

    fn pan(&mut self, delta_x: f32, delta_y: f32) {
        self.pan_delta.x += delta_x;
        self.pan_delta.y += delta_y;
    }

    /// Move the target on the ground plane; its height never changes.
    fn apply_pan(&mut self, delta: glm::Vec2) {
        if delta.x == 0.0 && delta.y == 0.0 {
            return;
        }

        let forward = self.state.target - self.state.eye();
        let right = glm::normalize(&glm::vec3(-forward.z, 0.0, forward.x));
        let ahead = glm::vec3(right.z, 0.0, -right.x);

        // Pan speed based on distance
        let pan_speed = self.state.distance * 0.001;

        self.state.target += (ahead * delta.y - right * delta.x) * pan_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton;

    fn controller() -> CameraController {
        let state = CameraState::from_eye(
            glm::vec3(0.0, 1.0, 5.0),
            glm::vec3(0.0, 0.0, 0.0),
            75.0_f32.to_radians(),
            16.0 / 9.0,
            0.1,
            1000.0,
        );
        CameraController::new(state, 0.25)
    }

    fn drag(ctl: &mut CameraController, button: MouseButton, from: (f64, f64), to: (f64, f64)) {
        ctl.on_mouse_button(button, true);
        ctl.on_mouse_move(from);
        ctl.on_mouse_move(to);
        ctl.on_mouse_button(button, false);
    }

    #[test]
    fn first_move_after_press_only_anchors() {
        let mut ctl = controller();
        ctl.on_mouse_button(MouseButton::Left, true);
        assert!(!ctl.on_mouse_move((100.0, 100.0)));
        assert!(ctl.on_mouse_move((110.0, 100.0)));
    }

    #[test]
    fn damping_applies_a_quarter_per_frame() {
        let mut ctl = controller();
        let start_yaw = ctl.state.yaw;
        drag(&mut ctl, MouseButton::Left, (100.0, 100.0), (110.0, 100.0));

        ctl.update();
        let full = -10.0 * 0.01;
        assert!((ctl.state.yaw - (start_yaw + full * 0.25)).abs() < 1e-6);
    }

    #[test]
    fn rotation_converges_to_full_delta() {
        let mut ctl = controller();
        let start_yaw = ctl.state.yaw;
        drag(&mut ctl, MouseButton::Left, (100.0, 100.0), (110.0, 100.0));

        for _ in 0..200 {
            ctl.update();
        }
        assert!((ctl.state.yaw - (start_yaw - 0.1)).abs() < 1e-4);
        assert!(ctl.yaw_delta.abs() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut ctl = controller();
        drag(&mut ctl, MouseButton::Left, (0.0, 0.0), (0.0, 10_000.0));
        for _ in 0..200 {
            ctl.update();
        }
        assert!(ctl.state.pitch <= 1.5);
    }

    #[test]
    fn zoom_clamps_distance() {
        let mut ctl = controller();
        for _ in 0..100 {
            ctl.on_mouse_wheel(1.0);
        }
        assert!(ctl.state.distance >= 0.5);

        for _ in 0..100 {
            ctl.on_mouse_wheel(-1.0);
        }
        assert!(ctl.state.distance <= 100.0);
    }

    #[test]
    fn panning_keeps_target_height() {
        let mut ctl = controller();
        let start_y = ctl.state.target.y;
        drag(&mut ctl, MouseButton::Right, (50.0, 50.0), (120.0, 90.0));
        for _ in 0..50 {
            ctl.update();
        }
        assert!((ctl.state.target.y - start_y).abs() < 1e-9);
        assert!(glm::length(&(ctl.state.target - glm::vec3(0.0, start_y, 0.0))) > 0.0);
    }
}
