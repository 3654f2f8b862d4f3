//! Line-oriented Wavefront MTL material file parser.
//!
//! Recognizes the directives the converter consumes: `newmtl`, the `K*`
//! color triples, `Ns`, `d`/`Tr`, and the `map_*` texture references.
//! Anything else is ignored. An unreadable file degrades to an empty
//! material table rather than failing the whole conversion.

use std::path::Path;

use indexmap::IndexMap;

/// Attributes of one `newmtl` block.
///
/// Every field is optional; the glTF material mapper supplies per-channel
/// defaults for whatever the file leaves unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// `Ka` - ambient color, alpha fixed at 1.0.
    pub ambient_color: Option<[f64; 4]>,
    /// `Ke` - emissive color.
    pub emission_color: Option<[f64; 4]>,
    /// `Kd` - diffuse color.
    pub diffuse_color: Option<[f64; 4]>,
    /// `Ks` - specular color.
    pub specular_color: Option<[f64; 4]>,
    /// `Ns` - specular shininess exponent.
    pub specular_shininess: Option<f64>,
    /// `d` or `Tr` - opacity.
    pub alpha: Option<f64>,
    /// `map_Ka`
    pub ambient_map: Option<String>,
    /// `map_Ke`
    pub emission_map: Option<String>,
    /// `map_Kd`
    pub diffuse_map: Option<String>,
    /// `map_Ks`
    pub specular_map: Option<String>,
    /// `map_Ns`
    pub shininess_map: Option<String>,
    /// `map_Bump`
    pub normal_map: Option<String>,
    /// `map_d`
    pub alpha_map: Option<String>,
}

/// Load a material table from an MTL file.
///
/// Never fails: an unreadable file logs a warning and yields an empty table,
/// letting the conversion continue with default materials.
pub fn load_mtl(path: &Path) -> IndexMap<String, Material> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_mtl(&text),
        Err(e) => {
            tracing::warn!(
                "could not read material file {}: {e}; using default materials",
                path.display()
            );
            IndexMap::new()
        }
    }
}

/// Parse MTL source text into a material table, in declaration order.
pub fn parse_mtl(text: &str) -> IndexMap<String, Material> {
    let mut materials: IndexMap<String, Material> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        let Some((directive, rest)) = line.split_once(char::is_whitespace) else {
            continue;
        };
        let rest = rest.trim();

        if directive.eq_ignore_ascii_case("newmtl") {
            materials.insert(rest.to_string(), Material::default());
            current = Some(rest.to_string());
            continue;
        }

        // Directives before the first newmtl have no material to attach to.
        let Some(material) = current.as_ref().and_then(|name| materials.get_mut(name)) else {
            continue;
        };

        match directive.to_ascii_lowercase().as_str() {
            "ka" => material.ambient_color = parse_color(rest),
            "ke" => material.emission_color = parse_color(rest),
            "kd" => material.diffuse_color = parse_color(rest),
            "ks" => material.specular_color = parse_color(rest),
            "ns" => material.specular_shininess = rest.parse().ok(),
            "d" | "tr" => material.alpha = rest.parse().ok(),
            "map_ka" => material.ambient_map = Some(rest.to_string()),
            "map_ke" => material.emission_map = Some(rest.to_string()),
            "map_kd" => material.diffuse_map = Some(rest.to_string()),
            "map_ks" => material.specular_map = Some(rest.to_string()),
            "map_ns" => material.shininess_map = Some(rest.to_string()),
            "map_bump" => material.normal_map = Some(rest.to_string()),
            "map_d" => material.alpha_map = Some(rest.to_string()),
            _ => {}
        }
    }

    materials
}

/// Parse an `r g b` triple; alpha is fixed at 1.0.
fn parse_color(values: &str) -> Option<[f64; 4]> {
    let mut parts = values.split_whitespace();
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    Some([r, g, b, 1.0])
}
