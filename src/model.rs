use crate::scene::{Bounds, SceneGraph, SceneNode};
use glam::Vec3;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct ModelManifest {
    pub meshes: Vec<MeshEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MeshEntry {
    pub name: String,
    #[serde(default)]
    pub center: [f32; 3],
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_radius() -> f32 {
    1.0
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("malformed model manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model manifest lists no meshes")]
    Empty,
}

/// Parse a fetched manifest body into a scene graph of named nodes.
pub fn parse_manifest(body: &str) -> Result<SceneGraph, ModelError> {
    let manifest: ModelManifest = serde_json::from_str(body)?;
    if manifest.meshes.is_empty() {
        return Err(ModelError::Empty);
    }
    let nodes = manifest
        .meshes
        .iter()
        .map(|m| {
            SceneNode::new(
                &m.name,
                Bounds {
                    center: Vec3::from_array(m.center),
                    radius: m.radius,
                },
            )
        })
        .collect();
    Ok(SceneGraph { nodes })
}
