//! Format conversion modules.

pub mod obj_gltf;

pub use obj_gltf::{build_gltf, convert_model_to_gltf, write_gltf};
