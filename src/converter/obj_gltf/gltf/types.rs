//! Core glTF 1.0 structure types.
//!
//! All document tables are identifier-keyed maps that keep insertion order,
//! so the serialized JSON is deterministic for a given input model.

use indexmap::IndexMap;
use serde::Serialize;

use super::materials::{GltfImage, GltfMaterial, GltfSampler, GltfTexture};

/// Complete glTF 1.0 document.
#[derive(Debug, Clone, Serialize)]
pub struct GltfDocument {
    pub accessors: IndexMap<String, GltfAccessor>,
    pub asset: GltfAsset,
    pub buffers: IndexMap<String, GltfBuffer>,
    #[serde(rename = "bufferViews")]
    pub buffer_views: IndexMap<String, GltfBufferView>,
    pub images: IndexMap<String, GltfImage>,
    pub materials: IndexMap<String, GltfMaterial>,
    pub meshes: IndexMap<String, GltfMesh>,
    pub nodes: IndexMap<String, GltfNode>,
    pub samplers: IndexMap<String, GltfSampler>,
    /// Identifier of the single scene.
    pub scene: String,
    pub scenes: IndexMap<String, GltfScene>,
    pub textures: IndexMap<String, GltfTexture>,
}

/// Asset metadata
#[derive(Debug, Clone, Serialize)]
pub struct GltfAsset {
    pub generator: String,
    pub profile: GltfProfile,
    pub version: String,
}

/// Target API profile
#[derive(Debug, Clone, Serialize)]
pub struct GltfProfile {
    pub api: String,
    pub version: String,
}

/// Scene definition
#[derive(Debug, Clone, Serialize)]
pub struct GltfScene {
    pub nodes: Vec<String>,
}

/// Node in the scene graph
#[derive(Debug, Clone, Serialize)]
pub struct GltfNode {
    pub name: String,
    pub meshes: Vec<String>,
}

/// Mesh definition
#[derive(Debug, Clone, Serialize)]
pub struct GltfMesh {
    pub name: String,
    pub primitives: Vec<GltfPrimitive>,
}

/// Mesh primitive (geometry + material)
#[derive(Debug, Clone, Serialize)]
pub struct GltfPrimitive {
    /// Semantic name (POSITION, NORMAL, `TEXCOORD_0`) to accessor id.
    /// Absent attributes are simply omitted.
    pub attributes: IndexMap<String, String>,
    /// Accessor id of this primitive's index array.
    pub indices: String,
    /// Material id.
    pub material: String,
    /// Draw mode, always 4 (TRIANGLES).
    pub mode: u32,
}

/// Accessor for typed buffer data
#[derive(Debug, Clone, Serialize)]
pub struct GltfAccessor {
    #[serde(rename = "bufferView")]
    pub buffer_view: String,
    #[serde(rename = "byteOffset")]
    pub byte_offset: usize,
    #[serde(rename = "byteStride")]
    pub byte_stride: usize,
    #[serde(rename = "componentType")]
    pub component_type: u32,
    pub count: usize,
    /// Per-component minimum over all elements.
    pub min: Vec<f64>,
    /// Per-component maximum over all elements.
    pub max: Vec<f64>,
    #[serde(rename = "type")]
    pub accessor_type: String,
}

/// Buffer view (byte window into the single buffer)
#[derive(Debug, Clone, Serialize)]
pub struct GltfBufferView {
    pub buffer: String,
    #[serde(rename = "byteLength")]
    pub byte_length: usize,
    #[serde(rename = "byteOffset")]
    pub byte_offset: usize,
    pub target: u32,
}

/// Binary buffer
#[derive(Debug, Clone, Serialize)]
pub struct GltfBuffer {
    #[serde(rename = "byteLength")]
    pub byte_length: usize,
    #[serde(rename = "type")]
    pub buffer_type: String,
    /// Filled in by the output serialization stage (data URI or sidecar
    /// file); the builder itself leaves it unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}
