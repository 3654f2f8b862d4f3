//! # obj2gltf
//!
//! A pure-Rust library for turning parsed Wavefront OBJ models into glTF 1.0
//! documents plus a packed binary geometry buffer.
//!
//! The crate takes the in-memory model produced by an OBJ parser (nodes,
//! meshes, primitives, a material table, an image table) and builds the full
//! accessor/bufferView/material/texture graph over a single byte buffer:
//! vertex attributes are packed as tightly-strided little-endian floats with
//! per-component bounds, triangle indices are packed at the narrowest safe
//! width, and every entry gets a unique, human-readable identifier.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use obj2gltf::prelude::*;
//!
//! let mut model = ObjModel::default();
//! model.nodes.push(ObjNode {
//!     name: "Cube".to_string(),
//!     meshes: Vec::new(),
//! });
//! model.materials = load_mtl(Path::new("cube.mtl"));
//!
//! // Writes cube.gltf with the geometry buffer embedded as a data URI.
//! convert_model_to_gltf(&model, Path::new("cube.gltf"))?;
//! # Ok::<(), obj2gltf::Error>(())
//! ```
//!
//! For callers that post-process the output (compression, quantization,
//! buffer embedding), [`converter::obj_gltf::build_gltf`] returns the
//! document and raw buffer without touching the file system.

pub mod converter;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::mtl::{Material, load_mtl};
    pub use crate::formats::obj::{ObjImage, ObjMesh, ObjModel, ObjNode, ObjPrimitive};

    pub use crate::converter::obj_gltf::{
        GltfBuilder, GltfDocument, build_gltf, convert_model_to_gltf, write_gltf,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
