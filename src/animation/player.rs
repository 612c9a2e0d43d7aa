use std::collections::HashMap;

use super::{AnimationClip, PartPose};

/// Plays one clip on a looping clock. The viewer binds the first clip of a
/// loaded asset; the advance step is a no-op only when no player exists, so
/// a constructed player always has a clip.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clip: AnimationClip,
    clip_index: usize,
    duration: f32,
    clock: f32,
}

impl AnimationPlayer {
    pub fn new(clip_index: usize, clip: AnimationClip) -> Self {
        let duration = clip.duration();
        Self {
            clip,
            clip_index,
            duration,
            clock: 0.0,
        }
    }

    /// Moves the playback clock forward, wrapping at the clip duration.
    /// A zero-length clip pins the clock at 0.
    pub fn advance(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            self.clock = 0.0;
            return;
        }
        self.clock += dt;
        if self.clock >= self.duration {
            self.clock %= self.duration;
        }
    }

    /// Samples every track at the current clock, keyed by node index.
    pub fn sample(&self) -> HashMap<usize, PartPose> {
        let mut poses: HashMap<usize, PartPose> = HashMap::new();
        for track in &self.clip.tracks {
            if let Some(property) = track.sample(self.clock) {
                poses.entry(track.node).or_default().set(property);
            }
        }
        poses
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn clip_index(&self) -> usize {
        self.clip_index
    }

    pub fn clip_name(&self) -> &str {
        &self.clip.name
    }
}
