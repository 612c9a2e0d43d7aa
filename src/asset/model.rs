use std::collections::HashMap;

use nalgebra_glm as glm;

use crate::animation::{AnimationClip, PartPose};
use crate::material::Material;

/// Decomposed local transform of one glTF node.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::quat(0.0, 0.0, 0.0, 1.0),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }

    pub fn matrix(&self) -> glm::Mat4 {
        self.posed_matrix(None)
    }

    /// Local matrix with animated properties substituted for rest values.
    /// Composition order is translate * rotate * scale.
    pub fn posed_matrix(&self, pose: Option<&PartPose>) -> glm::Mat4 {
        let (t, r, s) = match pose {
            Some(p) => (
                p.translation.unwrap_or(self.translation),
                p.rotation.unwrap_or(self.rotation),
                p.scale.unwrap_or(self.scale),
            ),
            None => (self.translation, self.rotation, self.scale),
        };
        glm::translation(&t) * rotation_matrix(&r) * glm::scaling(&s)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation matrix from a quaternion, normalized first.
pub fn rotation_matrix(q: &glm::Quat) -> glm::Mat4 {
    let q = glm::quat_normalize(q);

    let x2 = q.i + q.i;
    let y2 = q.j + q.j;
    let z2 = q.k + q.k;

    let xx = q.i * x2;
    let xy = q.i * y2;
    let xz = q.i * z2;
    let yy = q.j * y2;
    let yz = q.j * z2;
    let zz = q.k * z2;
    let wx = q.w * x2;
    let wy = q.w * y2;
    let wz = q.w * z2;

    glm::mat4(
        1.0 - (yy + zz),
        xy - wz,
        xz + wy,
        0.0,
        xy + wz,
        1.0 - (xx + zz),
        yz - wx,
        0.0,
        xz - wy,
        yz + wx,
        1.0 - (xx + yy),
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// One node of the asset's transform hierarchy. Indices match glTF node
/// indices, which is also what animation tracks target.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<usize>,
    pub transform: Transform,
}

/// CPU-side geometry of one mesh primitive. Positions, normals and UVs are
/// parallel arrays; indices are triangle-list.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// One renderable sub-part of the model: a named mesh primitive with its
/// material, attached to a node of the hierarchy.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub node: usize,
    pub mesh: MeshData,
    pub material: Material,
}

/// Decoded RGBA8 image embedded in the asset.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The parsed, GPU-independent result of loading one model file.
#[derive(Debug, Clone)]
pub struct ModelAsset {
    pub name: String,
    pub nodes: Vec<Node>,
    pub parts: Vec<Part>,
    pub clips: Vec<AnimationClip>,
    pub images: Vec<ImageData>,
}

/// Resolves every node's world matrix, substituting animated poses for rest
/// transforms where present.
pub fn global_transforms(nodes: &[Node], poses: &HashMap<usize, PartPose>) -> Vec<glm::Mat4> {
    let mut memo: Vec<Option<glm::Mat4>> = vec![None; nodes.len()];
    for i in 0..nodes.len() {
        resolve(nodes, poses, i, &mut memo);
    }
    memo.into_iter()
        .map(|m| m.unwrap_or_else(glm::Mat4::identity))
        .collect()
}

fn resolve(
    nodes: &[Node],
    poses: &HashMap<usize, PartPose>,
    index: usize,
    memo: &mut Vec<Option<glm::Mat4>>,
) -> glm::Mat4 {
    if let Some(m) = memo[index] {
        return m;
    }
    let local = nodes[index].transform.posed_matrix(poses.get(&index));
    let global = match nodes[index].parent {
        Some(parent) => resolve(nodes, poses, parent, memo) * local,
        None => local,
    };
    memo[index] = Some(global);
    global
}
