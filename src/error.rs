//! Error types for `obj2gltf`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `obj2gltf` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Structural Errors ====================
    // These abort the whole build; a document missing geometry would be
    // internally inconsistent for downstream renderers.
    /// A mesh has no position data.
    #[error("mesh '{mesh}' has no position data")]
    MissingPositions {
        /// The mesh name from the input model.
        mesh: String,
    },

    /// A primitive has an empty index array.
    #[error("primitive in mesh '{mesh}' has an empty index array")]
    EmptyIndices {
        /// The mesh name from the input model.
        mesh: String,
    },

    /// A vertex attribute array cannot be divided into whole elements.
    #[error("mesh '{mesh}' has a malformed {semantic} array: length {length} is not a multiple of {components}")]
    MalformedAttribute {
        /// The mesh name from the input model.
        mesh: String,
        /// The attribute semantic (POSITION, NORMAL, `TEXCOORD_0`).
        semantic: &'static str,
        /// The offending array length.
        length: usize,
        /// Components per element for this semantic.
        components: usize,
    },

    // ==================== Output Errors ====================
    /// The output path has no usable file stem.
    #[error("invalid output path: {path}")]
    InvalidOutputPath {
        /// The offending path.
        path: PathBuf,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `obj2gltf` operations.
pub type Result<T> = std::result::Result<T, Error>;
