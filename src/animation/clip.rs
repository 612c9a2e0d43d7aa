use nalgebra_glm as glm;

/// Keyframe values of one animated property.
#[derive(Debug, Clone)]
pub enum TrackValues {
    Translation(Vec<glm::Vec3>),
    Rotation(Vec<glm::Quat>),
    Scale(Vec<glm::Vec3>),
}

impl TrackValues {
    pub fn len(&self) -> usize {
        match self {
            TrackValues::Translation(v) | TrackValues::Scale(v) => v.len(),
            TrackValues::Rotation(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One animated property of one node: parallel timestamp/value arrays.
/// Timestamps are seconds, ascending.
#[derive(Debug, Clone)]
pub struct Track {
    pub node: usize,
    pub timestamps: Vec<f32>,
    pub values: TrackValues,
}

/// A single sampled property value.
#[derive(Debug, Clone, Copy)]
pub enum SampledProperty {
    Translation(glm::Vec3),
    Rotation(glm::Quat),
    Scale(glm::Vec3),
}

impl Track {
    /// Samples the track at `t` seconds. Clamps before the first keyframe
    /// and after the last; interpolates linearly in between (rotations
    /// spherically). Returns `None` for an empty track.
    pub fn sample(&self, t: f32) -> Option<SampledProperty> {
        if self.timestamps.is_empty() || self.values.is_empty() {
            return None;
        }
        let (lo, hi, f) = bracket(&self.timestamps, t);
        Some(match &self.values {
            TrackValues::Translation(v) => {
                SampledProperty::Translation(glm::lerp(&v[lo], &v[hi], f))
            }
            TrackValues::Rotation(v) => {
                SampledProperty::Rotation(glm::quat_normalize(&glm::quat_slerp(&v[lo], &v[hi], f)))
            }
            TrackValues::Scale(v) => SampledProperty::Scale(glm::lerp(&v[lo], &v[hi], f)),
        })
    }

    pub fn end_time(&self) -> f32 {
        self.timestamps.last().copied().unwrap_or(0.0)
    }
}

/// Animated property replacements for one node. Properties without a track
/// stay `None` and the node keeps its rest value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartPose {
    pub translation: Option<glm::Vec3>,
    pub rotation: Option<glm::Quat>,
    pub scale: Option<glm::Vec3>,
}

impl PartPose {
    pub fn set(&mut self, property: SampledProperty) {
        match property {
            SampledProperty::Translation(v) => self.translation = Some(v),
            SampledProperty::Rotation(q) => self.rotation = Some(q),
            SampledProperty::Scale(v) => self.scale = Some(v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Clip length in seconds: the latest keyframe across all tracks.
    pub fn duration(&self) -> f32 {
        self.tracks.iter().map(Track::end_time).fold(0.0, f32::max)
    }
}

/// Finds the keyframes surrounding `t` and the interpolation factor between
/// them. Linear scan, same as the keyframe lookup in the source viewers this
/// is modeled on; clip tracks are short.
fn bracket(timestamps: &[f32], t: f32) -> (usize, usize, f32) {
    if t <= timestamps[0] {
        return (0, 0, 0.0);
    }
    let last = timestamps.len() - 1;
    if t >= timestamps[last] {
        return (last, last, 0.0);
    }
    let mut hi = 1;
    while timestamps[hi] < t {
        hi += 1;
    }
    let lo = hi - 1;
    let span = timestamps[hi] - timestamps[lo];
    let f = if span > 0.0 {
        (t - timestamps[lo]) / span
    } else {
        0.0
    };
    (lo, hi, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation_track() -> Track {
        Track {
            node: 0,
            timestamps: vec![0.0, 1.0],
            values: TrackValues::Translation(vec![
                glm::vec3(0.0, 0.0, 0.0),
                glm::vec3(2.0, 0.0, 0.0),
            ]),
        }
    }

    #[test]
    fn bracket_clamps_outside_range() {
        let ts = [1.0, 2.0, 3.0];
        assert_eq!(bracket(&ts, 0.5), (0, 0, 0.0));
        assert_eq!(bracket(&ts, 9.0), (2, 2, 0.0));
    }

    #[test]
    fn bracket_finds_surrounding_keyframes() {
        let ts = [0.0, 1.0, 3.0];
        let (lo, hi, f) = bracket(&ts, 2.0);
        assert_eq!((lo, hi), (1, 2));
        assert!((f - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sample_lerps_translation() {
        let track = translation_track();
        match track.sample(0.5) {
            Some(SampledProperty::Translation(v)) => {
                assert!((v.x - 1.0).abs() < 1e-6);
                assert_eq!(v.y, 0.0);
            }
            other => panic!("unexpected sample: {other:?}"),
        }
    }

    #[test]
    fn sample_clamps_past_last_keyframe() {
        let track = translation_track();
        match track.sample(10.0) {
            Some(SampledProperty::Translation(v)) => assert!((v.x - 2.0).abs() < 1e-6),
            other => panic!("unexpected sample: {other:?}"),
        }
    }

    #[test]
    fn sampled_rotation_is_normalized() {
        let track = Track {
            node: 0,
            timestamps: vec![0.0, 1.0],
            values: TrackValues::Rotation(vec![
                glm::quat(0.0, 0.0, 0.0, 2.0),
                glm::quat(0.0, 2.0, 0.0, 0.0),
            ]),
        };
        match track.sample(0.5) {
            Some(SampledProperty::Rotation(q)) => {
                let norm = (q.i * q.i + q.j * q.j + q.k * q.k + q.w * q.w).sqrt();
                assert!((norm - 1.0).abs() < 1e-5);
            }
            other => panic!("unexpected sample: {other:?}"),
        }
    }

    #[test]
    fn empty_track_samples_none() {
        let track = Track {
            node: 0,
            timestamps: Vec::new(),
            values: TrackValues::Translation(Vec::new()),
        };
        assert!(track.sample(0.0).is_none());
    }

    #[test]
    fn duration_is_latest_keyframe() {
        let clip = AnimationClip {
            name: "walk".to_string(),
            tracks: vec![
                translation_track(),
                Track {
                    node: 1,
                    timestamps: vec![0.0, 2.5],
                    values: TrackValues::Scale(vec![
                        glm::vec3(1.0, 1.0, 1.0),
                        glm::vec3(2.0, 2.0, 2.0),
                    ]),
                },
            ],
        };
        assert!((clip.duration() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn empty_clip_duration_is_zero() {
        let clip = AnimationClip {
            name: "empty".to_string(),
            tracks: Vec::new(),
        };
        assert_eq!(clip.duration(), 0.0);
    }
}
