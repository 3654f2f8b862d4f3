//! glTF 1.0 document model and builder.

pub mod builder;
pub mod ids;
pub mod materials;
pub mod types;

pub use builder::GltfBuilder;
pub use ids::IdAllocator;
pub use materials::{GltfMaterial, MaterialMapper, MaterialValue, Technique};
pub use types::{GltfAccessor, GltfBuffer, GltfBufferView, GltfDocument};
