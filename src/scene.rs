use nalgebra_glm as glm;

use crate::animation::AnimationPlayer;
use crate::asset::{LoadOutcome, ModelAsset, global_transforms, progress_percent};
use crate::material::{apply_first_match, character_overrides, rgb};

/// Fixed staging transform for the loaded character.
pub const MODEL_SCALE: f32 = 2.0;
pub const MODEL_OFFSET: [f32; 3] = [0.0, -1.0, 0.0];
/// Y rotation applied at staging. Zero, kept explicit so the staging order
/// (scale, offset, rotation) stays visible.
pub const MODEL_YAW: f32 = 0.0;

/// The lighting rig: one ambient and one directional light with fixed
/// colors and intensities.
#[derive(Debug, Clone)]
pub struct Lighting {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub directional_color: [f32; 3],
    pub directional_intensity: f32,
    pub directional_position: glm::Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: rgb(0x404040),
            ambient_intensity: 0.2,
            directional_color: rgb(0xffffff),
            directional_intensity: 1.0,
            directional_position: glm::vec3(5.0, 5.0, 5.0),
        }
    }
}

/// Where the viewer is in its lifecycle. A failed load stays in
/// `AwaitingModel`; nothing transitions out of it on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bootstrapping,
    AwaitingModel,
    Rendering,
}

/// What applying one load outcome did to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneUpdate {
    Progress,
    ModelStaged,
    LoadFailed,
}

/// Everything the render loop reads each frame: clear color, lights, the
/// staged model and its animation player. Owned by the viewer controller;
/// mutated only on the main thread.
pub struct Scene {
    pub clear_color: [f32; 3],
    pub lighting: Lighting,
    model: Option<ModelAsset>,
    player: Option<AnimationPlayer>,
    phase: Phase,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            clear_color: rgb(0x000000),
            lighting: Lighting::default(),
            model: None,
            player: None,
            phase: Phase::Bootstrapping,
        }
    }

    pub fn begin_loading(&mut self) {
        self.phase = Phase::AwaitingModel;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn model(&self) -> Option<&ModelAsset> {
        self.model.as_ref()
    }

    pub fn player(&self) -> Option<&AnimationPlayer> {
        self.player.as_ref()
    }

    /// Consumes one loader outcome. Progress and failure only log; a loaded
    /// asset is staged and the scene enters `Rendering`.
    pub fn apply_outcome(&mut self, outcome: LoadOutcome) -> SceneUpdate {
        match outcome {
            LoadOutcome::Progress { loaded, total } => {
                log::info!("Loading: {:.0}%", progress_percent(loaded, total));
                SceneUpdate::Progress
            }
            LoadOutcome::Loaded(asset) => {
                self.stage(asset);
                SceneUpdate::ModelStaged
            }
            LoadOutcome::Failed(e) => {
                log::error!("Model load failed: {e}");
                SceneUpdate::LoadFailed
            }
        }
    }

    /// Stages a freshly loaded asset: applies the character material
    /// overrides, binds the first animation clip when one exists, and
    /// inserts the model.
    fn stage(&mut self, mut asset: ModelAsset) {
        let rules = character_overrides();
        for part in &mut asset.parts {
            if apply_first_match(&rules, &part.name, &mut part.material) {
                log::debug!("material override applied to part '{}'", part.name);
            }
        }

        self.player = asset.clips.first().map(|clip| {
            log::info!(
                "playing clip 0 '{}' ({} clip(s) in asset)",
                clip.name,
                asset.clips.len()
            );
            AnimationPlayer::new(0, clip.clone())
        });

        log::info!("staged model '{}' with {} parts", asset.name, asset.parts.len());
        self.model = Some(asset);
        self.phase = Phase::Rendering;
    }

    /// Advances the animation player. No-op while no model is staged.
    pub fn advance(&mut self, dt: f32) {
        if let Some(player) = &mut self.player {
            player.advance(dt);
        }
    }

    /// The fixed model staging matrix: offset, then the (zero) yaw, then
    /// uniform scale.
    pub fn model_transform() -> glm::Mat4 {
        let offset = glm::vec3(MODEL_OFFSET[0], MODEL_OFFSET[1], MODEL_OFFSET[2]);
        glm::translation(&offset)
            * glm::rotation(MODEL_YAW, &glm::vec3(0.0, 1.0, 0.0))
            * glm::scaling(&glm::vec3(MODEL_SCALE, MODEL_SCALE, MODEL_SCALE))
    }

    /// World matrix per model node at the player's current clock, staging
    /// transform applied. `None` while no model is staged.
    pub fn node_matrices(&self) -> Option<Vec<glm::Mat4>> {
        let model = self.model.as_ref()?;
        let poses = self
            .player
            .as_ref()
            .map(AnimationPlayer::sample)
            .unwrap_or_default();
        let staging = Self::model_transform();
        Some(
            global_transforms(&model.nodes, &poses)
                .into_iter()
                .map(|global| staging * global)
                .collect(),
        )
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationClip, Track, TrackValues};
    use crate::asset::{AssetError, MeshData, Node, Part, Transform};
    use crate::material::Material;

    fn part(name: &str, node: usize) -> Part {
        Part {
            name: name.to_string(),
            node,
            mesh: MeshData::default(),
            material: Material {
                base_color: [0.25, 0.5, 0.75],
                ..Material::default()
            },
        }
    }

    fn clip(name: &str) -> AnimationClip {
        AnimationClip {
            name: name.to_string(),
            tracks: vec![Track {
                node: 0,
                timestamps: vec![0.0, 1.0],
                values: TrackValues::Translation(vec![
                    glm::vec3(0.0, 0.0, 0.0),
                    glm::vec3(1.0, 0.0, 0.0),
                ]),
            }],
        }
    }

    fn character_asset() -> ModelAsset {
        ModelAsset {
            name: "character.glb".to_string(),
            nodes: vec![
                Node {
                    name: "Body_Outer".to_string(),
                    parent: None,
                    transform: Transform::identity(),
                },
                Node {
                    name: "Face_01".to_string(),
                    parent: None,
                    transform: Transform::identity(),
                },
                Node {
                    name: "Hair".to_string(),
                    parent: None,
                    transform: Transform::identity(),
                },
            ],
            parts: vec![part("Body_Outer", 0), part("Face_01", 1), part("Hair", 2)],
            clips: vec![clip("idle"), clip("walk")],
            images: Vec::new(),
        }
    }

    #[test]
    fn starts_bootstrapping_then_awaits_model() {
        let mut scene = Scene::new();
        assert_eq!(scene.phase(), Phase::Bootstrapping);
        scene.begin_loading();
        assert_eq!(scene.phase(), Phase::AwaitingModel);
    }

    #[test]
    fn progress_mutates_nothing() {
        let mut scene = Scene::new();
        scene.begin_loading();
        let update = scene.apply_outcome(LoadOutcome::Progress {
            loaded: 50,
            total: 200,
        });
        assert_eq!(update, SceneUpdate::Progress);
        assert!(scene.model().is_none());
        assert_eq!(scene.phase(), Phase::AwaitingModel);
    }

    #[test]
    fn staging_applies_overrides_and_binds_clip_zero() {
        let mut scene = Scene::new();
        scene.begin_loading();
        let update = scene.apply_outcome(LoadOutcome::Loaded(character_asset()));
        assert_eq!(update, SceneUpdate::ModelStaged);
        assert_eq!(scene.phase(), Phase::Rendering);

        let model = scene.model().expect("model staged");
        assert_eq!(model.parts[0].material.base_color, rgb(0xff0000));
        assert_eq!(model.parts[1].material.base_color, rgb(0xfad0a1));
        assert_eq!(model.parts[2].material.base_color, [0.25, 0.5, 0.75]);

        let player = scene.player().expect("clip bound");
        assert_eq!(player.clip_index(), 0);
        assert_eq!(player.clip_name(), "idle");
    }

    #[test]
    fn asset_without_clips_stages_without_player() {
        let mut scene = Scene::new();
        let mut asset = character_asset();
        asset.clips.clear();
        scene.apply_outcome(LoadOutcome::Loaded(asset));
        assert!(scene.player().is_none());
        assert_eq!(scene.phase(), Phase::Rendering);
        // advancing with no player must not panic
        scene.advance(0.016);
    }

    #[test]
    fn failed_load_leaves_scene_empty() {
        let mut scene = Scene::new();
        scene.begin_loading();
        let update = scene.apply_outcome(LoadOutcome::Failed(AssetError::NoParts));
        assert_eq!(update, SceneUpdate::LoadFailed);
        assert!(scene.model().is_none());
        assert_eq!(scene.phase(), Phase::AwaitingModel);
        assert!(scene.node_matrices().is_none());
        scene.advance(0.016);
    }

    #[test]
    fn staging_transform_scales_and_offsets() {
        let m = Scene::model_transform();
        let origin = m * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert_eq!((origin.x, origin.y, origin.z), (0.0, -1.0, 0.0));
        let unit_x = m * glm::vec4(1.0, 0.0, 0.0, 1.0);
        assert!((unit_x.x - 2.0).abs() < 1e-6);
        assert!((unit_x.y + 1.0).abs() < 1e-6);
        assert!(unit_x.z.abs() < 1e-6);
    }

    #[test]
    fn node_matrices_follow_the_player_clock() {
        let mut scene = Scene::new();
        scene.apply_outcome(LoadOutcome::Loaded(character_asset()));
        scene.advance(0.5);
        let matrices = scene.node_matrices().expect("model staged");
        assert_eq!(matrices.len(), 3);
        // node 0 is animated: lerped to x=0.5, then staged (scale 2, y-1)
        let origin = matrices[0] * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((origin.x - 1.0).abs() < 1e-5);
        assert!((origin.y + 1.0).abs() < 1e-5);
        // node 2 has no track: staging transform only
        let hair = matrices[2] * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!(hair.x.abs() < 1e-6);
        assert!((hair.y + 1.0).abs() < 1e-6);
    }
}
