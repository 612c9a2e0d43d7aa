use nalgebra_glm as glm;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

use crate::animation::{AnimationClip, Track, TrackValues};
use crate::material::Material;

use super::model::{ImageData, MeshData, ModelAsset, Node, Part, Transform};

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Error type for asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse glTF data: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("Model contains no mesh parts")]
    NoParts,
}

/// The three continuations of one load request. `Progress` repeats;
/// exactly one of `Loaded` / `Failed` terminates the stream.
#[derive(Debug)]
pub enum LoadOutcome {
    Progress { loaded: u64, total: u64 },
    Loaded(ModelAsset),
    Failed(AssetError),
}

/// Loaded/total byte ratio as a percentage. A zero or unknown total
/// reports 0.
pub fn progress_percent(loaded: u64, total: u64) -> f32 {
    if total == 0 {
        0.0
    } else {
        loaded as f32 / total as f32 * 100.0
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn asset_name(location: &str) -> String {
    location
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(location)
        .to_string()
}

/// Starts the background load of one model. Outcomes arrive on the returned
/// channel; the task ends after sending `Loaded` or `Failed`.
pub fn spawn_load(
    runtime: &tokio::runtime::Handle,
    location: String,
) -> mpsc::UnboundedReceiver<LoadOutcome> {
    let (sender, receiver) = mpsc::unbounded_channel();
    runtime.spawn(async move {
        log::info!("Loading model: {location}");
        let outcome = match fetch_and_parse(&location, &sender).await {
            Ok(asset) => LoadOutcome::Loaded(asset),
            Err(e) => LoadOutcome::Failed(e),
        };
        let _ = sender.send(outcome);
    });
    receiver
}

async fn fetch_and_parse(
    location: &str,
    sender: &mpsc::UnboundedSender<LoadOutcome>,
) -> Result<ModelAsset, AssetError> {
    let bytes = if is_remote(location) {
        fetch_remote(location, sender).await?
    } else {
        read_local(location, sender).await?
    };
    parse_glb(&asset_name(location), &bytes)
}

/// Reads a local file in chunks so progress reflects real byte counts.
async fn read_local(
    path: &str,
    sender: &mpsc::UnboundedSender<LoadOutcome>,
) -> Result<Vec<u8>, AssetError> {
    let mut file = tokio::fs::File::open(path).await?;
    let total = file.metadata().await?.len();
    let mut bytes = Vec::with_capacity(total as usize);
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        let _ = sender.send(LoadOutcome::Progress {
            loaded: bytes.len() as u64,
            total,
        });
    }
    Ok(bytes)
}

/// Streams the response body; the total comes from Content-Length when the
/// server provides one.
async fn fetch_remote(
    url: &str,
    sender: &mpsc::UnboundedSender<LoadOutcome>,
) -> Result<Vec<u8>, AssetError> {
    let mut response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(AssetError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let total = response.content_length().unwrap_or(0);
    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        bytes.extend_from_slice(&chunk);
        let _ = sender.send(LoadOutcome::Progress {
            loaded: bytes.len() as u64,
            total,
        });
    }
    Ok(bytes)
}

/// Maps a binary glTF payload into a [`ModelAsset`]: node hierarchy, mesh
/// primitives with materials, animation clips, embedded images.
pub fn parse_glb(name: &str, bytes: &[u8]) -> Result<ModelAsset, AssetError> {
    let (document, buffers, images) = gltf::import_slice(bytes)?;

    let mut nodes: Vec<Node> = document
        .nodes()
        .map(|node| {
            let (t, r, s) = node.transform().decomposed();
            Node {
                name: node.name().unwrap_or("node").to_string(),
                parent: None,
                transform: Transform {
                    translation: glm::vec3(t[0], t[1], t[2]),
                    rotation: glm::quat(r[0], r[1], r[2], r[3]),
                    scale: glm::vec3(s[0], s[1], s[2]),
                },
            }
        })
        .collect();
    for node in document.nodes() {
        for child in node.children() {
            nodes[child.index()].parent = Some(node.index());
        }
    }

    let mut parts = Vec::new();
    for node in document.nodes() {
        let Some(mesh) = node.mesh() else { continue };
        let part_name = node.name().or(mesh.name()).unwrap_or("part").to_string();
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let Some(positions) = reader.read_positions() else {
                log::warn!("Skipping primitive of '{part_name}' without positions");
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();

            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_else(|| vec![[0.0, 0.0, 1.0]; positions.len()]);

            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect())
                .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

            let indices: Vec<u32> = reader
                .read_indices()
                .map(|iter| iter.into_u32().collect())
                .unwrap_or_else(|| (0..positions.len() as u32).collect());

            parts.push(Part {
                name: part_name.clone(),
                node: node.index(),
                mesh: MeshData {
                    positions,
                    normals,
                    uvs,
                    indices,
                },
                material: extract_material(&primitive),
            });
        }
    }
    if parts.is_empty() {
        return Err(AssetError::NoParts);
    }

    let clips = extract_clips(&document, &buffers);
    let images = images
        .into_iter()
        .map(|image| expand_to_rgba(&image.pixels, image.width, image.height, image.format))
        .collect();

    Ok(ModelAsset {
        name: name.to_string(),
        nodes,
        parts,
        clips,
        images,
    })
}

fn extract_material(primitive: &gltf::Primitive) -> Material {
    let material = primitive.material();
    let pbr = material.pbr_metallic_roughness();
    let base = pbr.base_color_factor();
    Material {
        base_color: [base[0], base[1], base[2]],
        emissive: material.emissive_factor(),
        emissive_intensity: 1.0,
        roughness: pbr.roughness_factor(),
        metalness: pbr.metallic_factor(),
        base_color_texture: pbr
            .base_color_texture()
            .map(|info| info.texture().source().index()),
    }
}

fn extract_clips(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Vec<AnimationClip> {
    document
        .animations()
        .map(|animation| {
            let mut tracks = Vec::new();
            for channel in animation.channels() {
                let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
                let Some(inputs) = reader.read_inputs() else {
                    continue;
                };
                let timestamps: Vec<f32> = match inputs {
                    gltf::accessor::Iter::Standard(times) => times.collect(),
                    gltf::accessor::Iter::Sparse(_) => {
                        log::warn!("Skipping channel with sparse animation inputs");
                        continue;
                    }
                };
                let Some(outputs) = reader.read_outputs() else {
                    continue;
                };
                // Cubic-spline samplers store in-tangent/value/out-tangent
                // triplets; only the value element is sampled.
                let cubic = channel.sampler().interpolation()
                    == gltf::animation::Interpolation::CubicSpline;
                let values = match outputs {
                    gltf::animation::util::ReadOutputs::Translations(iter) => {
                        TrackValues::Translation(restride(
                            iter.map(|t| glm::vec3(t[0], t[1], t[2])).collect(),
                            cubic,
                        ))
                    }
                    gltf::animation::util::ReadOutputs::Rotations(iter) => {
                        TrackValues::Rotation(restride(
                            iter.into_f32()
                                .map(|q| glm::quat_normalize(&glm::quat(q[0], q[1], q[2], q[3])))
                                .collect(),
                            cubic,
                        ))
                    }
                    gltf::animation::util::ReadOutputs::Scales(iter) => TrackValues::Scale(
                        restride(iter.map(|s| glm::vec3(s[0], s[1], s[2])).collect(), cubic),
                    ),
                    gltf::animation::util::ReadOutputs::MorphTargetWeights(_) => continue,
                };
                let count = timestamps.len().min(values.len());
                let mut timestamps = timestamps;
                timestamps.truncate(count);
                tracks.push(Track {
                    node: channel.target().node().index(),
                    timestamps,
                    values,
                });
            }
            AnimationClip {
                name: animation.name().unwrap_or("clip").to_string(),
                tracks,
            }
        })
        .collect()
}

fn restride<T: Copy>(values: Vec<T>, cubic: bool) -> Vec<T> {
    if cubic {
        values.into_iter().skip(1).step_by(3).collect()
    } else {
        values
    }
}

/// Expands a decoded glTF image into RGBA8. Formats outside the 8-bit family
/// become a white placeholder so image indices stay aligned.
fn expand_to_rgba(pixels: &[u8], width: u32, height: u32, format: gltf::image::Format) -> ImageData {
    use gltf::image::Format;
    let pixels = match format {
        Format::R8G8B8A8 => pixels.to_vec(),
        Format::R8G8B8 => pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        Format::R8 => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        Format::R8G8 => pixels
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[1], 0, 255])
            .collect(),
        other => {
            log::warn!("Unsupported embedded image format {other:?}; using placeholder");
            return ImageData {
                pixels: vec![255, 255, 255, 255],
                width: 1,
                height: 1,
            };
        }
    };
    ImageData {
        pixels,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_percent_is_byte_ratio() {
        assert_eq!(progress_percent(50, 200), 25.0);
        assert_eq!(progress_percent(200, 200), 100.0);
    }

    #[test]
    fn progress_percent_with_unknown_total_is_zero() {
        assert_eq!(progress_percent(50, 0), 0.0);
    }

    #[test]
    fn remote_locations_are_urls() {
        assert!(is_remote("https://example.com/model.glb"));
        assert!(is_remote("http://example.com/model.glb"));
        assert!(!is_remote("public/franxx_girl.glb"));
        assert!(!is_remote("C:\\models\\a.glb"));
    }

    #[test]
    fn asset_name_is_final_path_component() {
        assert_eq!(asset_name("public/franxx_girl.glb"), "franxx_girl.glb");
        assert_eq!(asset_name("https://host/a/b.glb"), "b.glb");
        assert_eq!(asset_name("plain.glb"), "plain.glb");
    }

    #[test]
    fn rgb_pixels_gain_opaque_alpha() {
        let image = expand_to_rgba(&[10, 20, 30, 40, 50, 60], 2, 1, gltf::image::Format::R8G8B8);
        assert_eq!(image.pixels, vec![10, 20, 30, 255, 40, 50, 60, 255]);
        assert_eq!((image.width, image.height), (2, 1));
    }

    #[test]
    fn gray_pixels_replicate_channels() {
        let image = expand_to_rgba(&[128], 1, 1, gltf::image::Format::R8);
        assert_eq!(image.pixels, vec![128, 128, 128, 255]);
    }

    #[test]
    fn unsupported_format_becomes_placeholder() {
        let image = expand_to_rgba(&[0, 0], 1, 1, gltf::image::Format::R16);
        assert_eq!(image.pixels, vec![255, 255, 255, 255]);
        assert_eq!((image.width, image.height), (1, 1));
    }

    #[test]
    fn cubic_restride_keeps_value_elements() {
        let values = vec![0, 1, 2, 3, 4, 5];
        assert_eq!(restride(values, true), vec![1, 4]);
        assert_eq!(restride(vec![7, 8], false), vec![7, 8]);
    }
}
