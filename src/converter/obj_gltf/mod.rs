//! OBJ to glTF 1.0 model conversion.
//!
//! Takes the in-memory model from an OBJ parser and produces a glTF 1.0
//! document over one packed binary buffer:
//! - vertex attributes and triangle indices are packed into a vertex region
//!   followed by an index region, each exposed as one bufferView
//! - materials become `KHR_materials_common` PHONG/LAMBERT records
//! - every document entry gets a unique, human-readable identifier

pub mod convert;
pub mod gltf;

// Re-export conversion entry points
pub use convert::{build_gltf, convert_model_to_gltf, write_gltf};

// Re-export document model
pub use gltf::{GltfBuilder, GltfDocument};
