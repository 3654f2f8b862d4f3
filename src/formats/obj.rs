//! In-memory OBJ model types.
//!
//! This is the shape an OBJ parser hands to the converter: an ordered node
//! hierarchy with flat attribute arrays, a material table keyed by material
//! name, and an ordered image table. The converter never re-reads the source
//! files; everything it needs is carried here.

use indexmap::IndexMap;

use crate::formats::mtl::Material;

/// A parsed OBJ model plus its material and image tables.
#[derive(Debug, Clone, Default)]
pub struct ObjModel {
    /// Top-level objects, in file order.
    pub nodes: Vec<ObjNode>,
    /// Material name to material attributes, in declaration order.
    pub materials: IndexMap<String, Material>,
    /// Every image referenced by a material map. The parser owns image
    /// identity: duplicate entries stay duplicates.
    pub images: Vec<ObjImage>,
}

/// One `o` group: a named object owning a list of meshes.
#[derive(Debug, Clone)]
pub struct ObjNode {
    pub name: String,
    pub meshes: Vec<ObjMesh>,
}

/// A mesh with flat vertex attribute arrays shared by all of its primitives.
#[derive(Debug, Clone)]
pub struct ObjMesh {
    pub name: String,
    /// `x0 y0 z0 x1 y1 z1 ...`
    pub positions: Vec<f32>,
    /// `x0 y0 z0 ...`; empty when the source has no normals.
    pub normals: Vec<f32>,
    /// `u0 v0 ...`; empty when the source has no texture coordinates.
    pub uvs: Vec<f32>,
    pub primitives: Vec<ObjPrimitive>,
}

/// One triangle list drawn with a single material.
#[derive(Debug, Clone)]
pub struct ObjPrimitive {
    /// Triangle indices into the owning mesh's attribute arrays.
    pub indices: Vec<u32>,
    /// Material name, resolved against [`ObjModel::materials`].
    pub material: String,
}

/// An image referenced by one or more material texture maps.
#[derive(Debug, Clone)]
pub struct ObjImage {
    /// Source path as written in the material file. Texture map references
    /// are resolved against this.
    pub path: String,
    /// WebGL pixel format of the decoded image (6407 RGB, 6408 RGBA).
    pub format: u32,
    /// URI to emit in the glTF image entry (relative path or data URI).
    pub uri: String,
}
