//! OBJ model to glTF conversion entry points and output serialization.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{Error, Result};
use crate::formats::obj::ObjModel;

use super::gltf::{GltfBuilder, GltfDocument};

/// Buffers above this size are written to a sidecar `.bin` file instead of
/// being embedded as a base64 data URI, which keeps the JSON document within
/// what downstream tooling can parse.
const MAX_EMBEDDED_BUFFER_BYTES: usize = 201326580;

/// Build the glTF document and packed geometry buffer for `model`.
///
/// Pure in-memory transform with fresh identifier and cursor state per call;
/// independent conversions can run in parallel.
///
/// # Errors
/// Returns an error if the model is structurally unusable (a mesh without
/// positions, a primitive without indices).
pub fn build_gltf(model: &ObjModel) -> Result<(GltfDocument, Vec<u8>)> {
    GltfBuilder::new().build(model)
}

/// Serialize a built document to `gltf_path`.
///
/// Small buffers are embedded in the JSON as a `data:` URI; large ones are
/// written next to the document as `<stem>.bin` and referenced by file name.
///
/// # Errors
/// Returns an error if the output path has no file stem or writing fails.
pub fn write_gltf(mut document: GltfDocument, buffer: &[u8], gltf_path: &Path) -> Result<()> {
    let stem = output_stem(gltf_path)?;

    let uri = if buffer.len() > MAX_EMBEDDED_BUFFER_BYTES {
        let bin_filename = format!("{stem}.bin");
        let bin_path = gltf_path.with_file_name(&bin_filename);
        tracing::debug!("writing {} byte geometry buffer to {}", buffer.len(), bin_path.display());
        std::fs::write(&bin_path, buffer)?;
        bin_filename
    } else {
        format!("data:application/octet-stream;base64,{}", BASE64.encode(buffer))
    };
    for buffer_record in document.buffers.values_mut() {
        buffer_record.uri = Some(uri.clone());
    }

    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(gltf_path, json)?;
    Ok(())
}

/// Convert an in-memory OBJ model to a glTF file.
///
/// # Errors
/// Returns an error if the output path is unusable, the model is
/// structurally unusable, or writing fails.
pub fn convert_model_to_gltf(model: &ObjModel, gltf_path: &Path) -> Result<()> {
    // Validate the output path before doing any build work.
    output_stem(gltf_path)?;

    tracing::info!("Converting OBJ model to glTF: {}", gltf_path.display());
    let (document, buffer) = build_gltf(model)?;
    write_gltf(document, &buffer, gltf_path)?;
    tracing::info!("Conversion complete");
    Ok(())
}

fn output_stem(gltf_path: &Path) -> Result<&str> {
    gltf_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidOutputPath {
            path: gltf_path.to_path_buf(),
        })
}
