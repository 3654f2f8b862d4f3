//! Material, texture, and sampler records plus the MTL to
//! `KHR_materials_common` mapping.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::formats::mtl::Material;
use crate::formats::obj::ObjImage;

use super::ids::IdAllocator;

/// Image entry referencing an external or embedded picture.
#[derive(Debug, Clone, Serialize)]
pub struct GltfImage {
    pub name: String,
    pub uri: String,
}

/// Texture entry tying an image to the document sampler.
#[derive(Debug, Clone, Serialize)]
pub struct GltfTexture {
    pub format: u32,
    #[serde(rename = "internalFormat")]
    pub internal_format: u32,
    pub sampler: String,
    pub source: String,
    pub target: u32,
    #[serde(rename = "type")]
    pub texel_type: u32,
}

/// Texture sampler. The document carries exactly one.
#[derive(Debug, Clone, Serialize)]
pub struct GltfSampler {
    #[serde(rename = "magFilter")]
    pub mag_filter: u32,
    #[serde(rename = "minFilter")]
    pub min_filter: u32,
    #[serde(rename = "wrapS")]
    pub wrap_s: u32,
    #[serde(rename = "wrapT")]
    pub wrap_t: u32,
}

impl Default for GltfSampler {
    fn default() -> Self {
        Self {
            mag_filter: 9729, // LINEAR
            min_filter: 9728, // NEAREST
            wrap_s: 33071,    // CLAMP_TO_EDGE
            wrap_t: 33071,    // CLAMP_TO_EDGE
        }
    }
}

/// Material entry carrying a `KHR_materials_common` shading technique.
#[derive(Debug, Clone, Serialize)]
pub struct GltfMaterial {
    pub name: String,
    pub extensions: GltfMaterialExtensions,
}

/// Vendor extension block of a material.
#[derive(Debug, Clone, Serialize)]
pub struct GltfMaterialExtensions {
    #[serde(rename = "KHR_materials_common")]
    pub khr_materials_common: KhrMaterialsCommon,
}

/// The `KHR_materials_common` technique and its channel values.
#[derive(Debug, Clone, Serialize)]
pub struct KhrMaterialsCommon {
    pub technique: Technique,
    pub values: MaterialValues,
}

/// Shading technique tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Technique {
    /// Diffuse plus specular highlights.
    #[serde(rename = "PHONG")]
    Phong,
    /// Diffuse only.
    #[serde(rename = "LAMBERT")]
    Lambert,
}

/// The four color-or-texture channels plus shininess.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialValues {
    pub ambient: MaterialValue,
    pub diffuse: MaterialValue,
    pub emission: MaterialValue,
    pub specular: MaterialValue,
    pub shininess: f64,
}

/// A channel value: either an RGBA color or a texture id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MaterialValue {
    Color([f64; 4]),
    Texture(String),
}

const OPAQUE_BLACK: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
const MID_GRAY: [f64; 4] = [0.5, 0.5, 0.5, 1.0];

/// Maps MTL material attributes onto `KHR_materials_common` records and
/// registers the image/texture entries their maps reference.
///
/// Built once per conversion over the model's image table: every table entry
/// yields one image and one texture record, duplicates included. The caller
/// owns image identity; the mapper never deduplicates entries on its own.
pub struct MaterialMapper {
    texture_ids: IndexMap<String, String>,
    images: IndexMap<String, GltfImage>,
    textures: IndexMap<String, GltfTexture>,
}

impl MaterialMapper {
    /// Register every image in the table and remember the path to texture id
    /// mapping for channel lookups.
    pub fn new(images: &[ObjImage], sampler_id: &str, ids: &mut IdAllocator) -> Self {
        let mut texture_ids = IndexMap::new();
        let mut gltf_images = IndexMap::new();
        let mut gltf_textures = IndexMap::new();

        for image in images {
            let image_id = ids.allocate(&image_stem(&image.path));
            let texture_id = ids.allocate(&format!("texture_{image_id}"));
            gltf_images.insert(
                image_id.clone(),
                GltfImage {
                    name: image_id.clone(),
                    uri: image.uri.clone(),
                },
            );
            gltf_textures.insert(
                texture_id.clone(),
                GltfTexture {
                    format: image.format,
                    internal_format: image.format,
                    sampler: sampler_id.to_string(),
                    source: image_id,
                    target: 3553,     // TEXTURE_2D
                    texel_type: 5121, // UNSIGNED_BYTE
                },
            );
            texture_ids.insert(image.path.clone(), texture_id);
        }

        Self {
            texture_ids,
            images: gltf_images,
            textures: gltf_textures,
        }
    }

    /// Map one material. Pure: same input, same record.
    ///
    /// Channel precedence is texture map, then explicit color (alpha forced
    /// to 1.0), then the channel default. PHONG is selected only when
    /// shininess is positive and the resolved specular channel is a color
    /// with a nonzero component; a specular texture alone stays LAMBERT.
    pub fn map(&self, name: &str, material: &Material) -> GltfMaterial {
        let ambient = self.channel(
            material.ambient_map.as_deref(),
            material.ambient_color,
            OPAQUE_BLACK,
        );
        let diffuse = self.channel(
            material.diffuse_map.as_deref(),
            material.diffuse_color,
            MID_GRAY,
        );
        let emission = self.channel(
            material.emission_map.as_deref(),
            material.emission_color,
            OPAQUE_BLACK,
        );
        let specular = self.channel(
            material.specular_map.as_deref(),
            material.specular_color,
            OPAQUE_BLACK,
        );
        let shininess = material.specular_shininess.unwrap_or(0.0);

        let has_specular = shininess > 0.0
            && matches!(&specular, MaterialValue::Color(c) if c[0] > 0.0 || c[1] > 0.0 || c[2] > 0.0);
        let technique = if has_specular {
            Technique::Phong
        } else {
            Technique::Lambert
        };

        GltfMaterial {
            name: name.to_string(),
            extensions: GltfMaterialExtensions {
                khr_materials_common: KhrMaterialsCommon {
                    technique,
                    values: MaterialValues {
                        ambient,
                        diffuse,
                        emission,
                        specular,
                        shininess,
                    },
                },
            },
        }
    }

    fn channel(
        &self,
        map_path: Option<&str>,
        color: Option<[f64; 4]>,
        default: [f64; 4],
    ) -> MaterialValue {
        if let Some(texture_id) = map_path.and_then(|path| self.texture_ids.get(path)) {
            return MaterialValue::Texture(texture_id.clone());
        }
        match color {
            Some([r, g, b, _]) => MaterialValue::Color([r, g, b, 1.0]),
            None => MaterialValue::Color(default),
        }
    }

    /// Hand the registered image and texture tables to the document.
    pub fn into_tables(self) -> (IndexMap<String, GltfImage>, IndexMap<String, GltfTexture>) {
        (self.images, self.textures)
    }
}

/// Base filename without extension, used to derive image ids.
fn image_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map_or_else(|| path.to_string(), |s| s.to_string_lossy().into_owned())
}
