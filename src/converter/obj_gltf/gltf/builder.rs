//! glTF 1.0 document builder.
//!
//! Walks the node/mesh/primitive hierarchy of an [`ObjModel`], packs vertex
//! attributes and triangle indices into two byte regions, and assembles the
//! accessor/bufferView/buffer graph that references them. The whole build is
//! a pure in-memory transform: fresh builder state per document, no I/O.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::formats::obj::{ObjMesh, ObjModel};

use super::ids::IdAllocator;
use super::materials::{GltfSampler, MaterialMapper};
use super::types::{
    GltfAccessor, GltfAsset, GltfBuffer, GltfBufferView, GltfDocument, GltfMesh, GltfNode,
    GltfPrimitive, GltfProfile, GltfScene,
};

const BUFFER_ID: &str = "buffer";
const VERTEX_BUFFER_VIEW_ID: &str = "bufferView_vertex";
const INDEX_BUFFER_VIEW_ID: &str = "bufferView_index";

const SIZE_OF_FLOAT32: usize = 4;
const SIZE_OF_UINT32: usize = 4;
const SIZE_OF_UINT16: usize = 2;

/// Builder for constructing glTF 1.0 documents.
///
/// Vertex and index data accumulate in separate chunk lists with explicit
/// byte cursors; the final buffer is the vertex region followed by the index
/// region, each exposed through its own bufferView.
pub struct GltfBuilder {
    ids: IdAllocator,
    accessors: IndexMap<String, GltfAccessor>,
    vertex_chunks: Vec<Vec<u8>>,
    vertex_cursor: usize,
    index_chunks: Vec<Vec<u8>>,
    index_cursor: usize,
}

impl GltfBuilder {
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            accessors: IndexMap::new(),
            vertex_chunks: Vec::new(),
            vertex_cursor: 0,
            index_chunks: Vec::new(),
            index_cursor: 0,
        }
    }

    // ========================================================================
    // Attribute / Index Packing
    // ========================================================================

    /// Pack one vertex attribute array as tightly-strided little-endian
    /// floats, tracking per-component bounds.
    ///
    /// `values.len()` must be a multiple of `components` (2 or 3). An empty
    /// array produces no accessor and no bytes; the attribute is absent, not
    /// zero-length.
    fn add_vertex_attribute(&mut self, values: &[f32], components: usize) -> Option<String> {
        debug_assert!(components == 2 || components == 3);
        debug_assert_eq!(values.len() % components, 0);

        if values.is_empty() {
            return None;
        }

        let mut min = vec![f64::INFINITY; components];
        let mut max = vec![f64::NEG_INFINITY; components];
        let mut bytes = Vec::with_capacity(values.len() * SIZE_OF_FLOAT32);
        for element in values.chunks_exact(components) {
            for (j, &value) in element.iter().enumerate() {
                min[j] = min[j].min(f64::from(value));
                max[j] = max[j].max(f64::from(value));
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }

        let accessor_id = self.ids.allocate("accessor");
        self.accessors.insert(
            accessor_id.clone(),
            GltfAccessor {
                buffer_view: VERTEX_BUFFER_VIEW_ID.to_string(),
                byte_offset: self.vertex_cursor,
                byte_stride: 0,
                component_type: 5126, // FLOAT
                count: values.len() / components,
                min,
                max,
                accessor_type: if components == 3 { "VEC3" } else { "VEC2" }.to_string(),
            },
        );

        self.vertex_cursor += bytes.len();
        self.vertex_chunks.push(bytes);
        Some(accessor_id)
    }

    /// Pack a triangle index array at the narrowest safe width.
    ///
    /// Arrays whose maximum stays below 65535 are encoded as 16-bit unsigned
    /// integers; 65535 itself is reserved as the primitive-restart sentinel,
    /// so anything reaching it goes to 32 bits.
    fn add_index_array(&mut self, indices: &[u32]) -> String {
        debug_assert!(!indices.is_empty());

        let mut min = u32::MAX;
        let mut max = 0u32;
        for &index in indices {
            min = min.min(index);
            max = max.max(index);
        }

        let (component_type, bytes) = if max < 65535 {
            let mut bytes = Vec::with_capacity(indices.len() * SIZE_OF_UINT16);
            for &index in indices {
                bytes.extend_from_slice(&(index as u16).to_le_bytes());
            }
            (5123, bytes) // UNSIGNED_SHORT
        } else {
            let mut bytes = Vec::with_capacity(indices.len() * SIZE_OF_UINT32);
            for &index in indices {
                bytes.extend_from_slice(&index.to_le_bytes());
            }
            (5125, bytes) // UNSIGNED_INT
        };

        let accessor_id = self.ids.allocate("accessor");
        self.accessors.insert(
            accessor_id.clone(),
            GltfAccessor {
                buffer_view: INDEX_BUFFER_VIEW_ID.to_string(),
                byte_offset: self.index_cursor,
                byte_stride: 0,
                component_type,
                count: indices.len(),
                min: vec![f64::from(min)],
                max: vec![f64::from(max)],
                accessor_type: "SCALAR".to_string(),
            },
        );

        self.index_cursor += bytes.len();
        self.index_chunks.push(bytes);
        accessor_id
    }

    // ========================================================================
    // Scene Graph
    // ========================================================================

    /// Pack one mesh: attributes once, shared by every primitive, then one
    /// index accessor per primitive.
    fn add_mesh(&mut self, mesh: &ObjMesh) -> Result<GltfMesh> {
        // Ragged arrays would silently lose their trailing components during
        // packing; reject them up front.
        for (semantic, length, components) in [
            ("POSITION", mesh.positions.len(), 3),
            ("NORMAL", mesh.normals.len(), 3),
            ("TEXCOORD_0", mesh.uvs.len(), 2),
        ] {
            if length % components != 0 {
                return Err(Error::MalformedAttribute {
                    mesh: mesh.name.clone(),
                    semantic,
                    length,
                    components,
                });
            }
        }

        let position = self
            .add_vertex_attribute(&mesh.positions, 3)
            .ok_or_else(|| Error::MissingPositions {
                mesh: mesh.name.clone(),
            })?;
        let normal = self.add_vertex_attribute(&mesh.normals, 3);
        let uv = self.add_vertex_attribute(&mesh.uvs, 2);

        let mut attributes = IndexMap::new();
        attributes.insert("POSITION".to_string(), position);
        if let Some(normal) = normal {
            attributes.insert("NORMAL".to_string(), normal);
        }
        if let Some(uv) = uv {
            attributes.insert("TEXCOORD_0".to_string(), uv);
        }

        let mut primitives = Vec::with_capacity(mesh.primitives.len());
        for primitive in &mesh.primitives {
            if primitive.indices.is_empty() {
                return Err(Error::EmptyIndices {
                    mesh: mesh.name.clone(),
                });
            }
            let indices = self.add_index_array(&primitive.indices);
            primitives.push(GltfPrimitive {
                attributes: attributes.clone(),
                indices,
                material: primitive.material.clone(),
                mode: 4, // TRIANGLES
            });
        }

        Ok(GltfMesh {
            name: mesh.name.clone(),
            primitives,
        })
    }

    /// Build the complete document and packed buffer for `model`.
    ///
    /// Structural problems (a mesh without positions, a primitive without
    /// indices) abort the whole build; no partial document is returned.
    pub fn build(mut self, model: &ObjModel) -> Result<(GltfDocument, Vec<u8>)> {
        let scene_id = self.ids.allocate("scene");
        let sampler_id = self.ids.allocate("sampler");

        let mapper = MaterialMapper::new(&model.images, &sampler_id, &mut self.ids);
        let mut materials = IndexMap::new();
        for (name, material) in &model.materials {
            materials.insert(name.clone(), mapper.map(name, material));
        }

        let mut scene_nodes = Vec::with_capacity(model.nodes.len());
        let mut nodes = IndexMap::new();
        let mut meshes = IndexMap::new();
        for node in &model.nodes {
            let node_id = self.ids.allocate(&node.name);
            scene_nodes.push(node_id.clone());

            let mut node_meshes = Vec::with_capacity(node.meshes.len());
            for mesh in &node.meshes {
                let mesh_id = self.ids.allocate(&mesh.name);
                let gltf_mesh = self.add_mesh(mesh)?;
                node_meshes.push(mesh_id.clone());
                meshes.insert(mesh_id, gltf_mesh);
            }

            // Collisions are disambiguated in the table key only; the record
            // keeps the source name.
            nodes.insert(
                node_id,
                GltfNode {
                    name: node.name.clone(),
                    meshes: node_meshes,
                },
            );
        }

        // Buffer assembly: the vertex region, then the index region.
        let vertex_length = self.vertex_cursor;
        let index_length = self.index_cursor;
        let mut buffer = Vec::with_capacity(vertex_length + index_length);
        for chunk in &self.vertex_chunks {
            buffer.extend_from_slice(chunk);
        }
        for chunk in &self.index_chunks {
            buffer.extend_from_slice(chunk);
        }

        let mut buffers = IndexMap::new();
        buffers.insert(
            BUFFER_ID.to_string(),
            GltfBuffer {
                byte_length: buffer.len(),
                buffer_type: "arraybuffer".to_string(),
                uri: None,
            },
        );

        let mut buffer_views = IndexMap::new();
        buffer_views.insert(
            VERTEX_BUFFER_VIEW_ID.to_string(),
            GltfBufferView {
                buffer: BUFFER_ID.to_string(),
                byte_length: vertex_length,
                byte_offset: 0,
                target: 34962, // ARRAY_BUFFER
            },
        );
        buffer_views.insert(
            INDEX_BUFFER_VIEW_ID.to_string(),
            GltfBufferView {
                buffer: BUFFER_ID.to_string(),
                byte_length: index_length,
                byte_offset: vertex_length,
                target: 34963, // ELEMENT_ARRAY_BUFFER
            },
        );

        let (images, textures) = mapper.into_tables();

        let mut samplers = IndexMap::new();
        samplers.insert(sampler_id, GltfSampler::default());

        let mut scenes = IndexMap::new();
        scenes.insert(scene_id.clone(), GltfScene { nodes: scene_nodes });

        let document = GltfDocument {
            accessors: self.accessors,
            asset: GltfAsset {
                generator: "obj2gltf".to_string(),
                profile: GltfProfile {
                    api: "WebGL".to_string(),
                    version: "1.0.2".to_string(),
                },
                version: "1.1".to_string(),
            },
            buffers,
            buffer_views,
            images,
            materials,
            meshes,
            nodes,
            samplers,
            scene: scene_id,
            scenes,
            textures,
        };

        Ok((document, buffer))
    }
}

impl Default for GltfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::obj::{ObjNode, ObjPrimitive};
    use byteorder::{LittleEndian, ReadBytesExt};
    use pretty_assertions::assert_eq;

    fn single_mesh_model(mesh: ObjMesh) -> ObjModel {
        ObjModel {
            nodes: vec![ObjNode {
                name: "Node0".to_string(),
                meshes: vec![mesh],
            }],
            ..ObjModel::default()
        }
    }

    fn triangle_mesh() -> ObjMesh {
        ObjMesh {
            name: "Mesh0".to_string(),
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: Vec::new(),
            uvs: Vec::new(),
            primitives: vec![ObjPrimitive {
                indices: vec![0, 1, 2],
                material: "Default".to_string(),
            }],
        }
    }

    #[test]
    fn test_attribute_packer_bounds_and_length() {
        let mut builder = GltfBuilder::new();
        let id = builder
            .add_vertex_attribute(&[-1.0, 2.0, 0.5, 3.0, -4.0, 6.0], 3)
            .unwrap();

        let accessor = &builder.accessors[&id];
        assert_eq!(accessor.accessor_type, "VEC3");
        assert_eq!(accessor.count, 2);
        assert_eq!(accessor.min, vec![-1.0, -4.0, 0.5]);
        assert_eq!(accessor.max, vec![3.0, 2.0, 6.0]);
        assert_eq!(accessor.byte_stride, 0);
        assert_eq!(accessor.component_type, 5126);
        assert_eq!(builder.vertex_cursor, 6 * 4);
    }

    #[test]
    fn test_attribute_packer_two_component_type() {
        let mut builder = GltfBuilder::new();
        let id = builder.add_vertex_attribute(&[0.25, 0.75], 2).unwrap();
        assert_eq!(builder.accessors[&id].accessor_type, "VEC2");
    }

    #[test]
    fn test_empty_attribute_is_absent() {
        let mut builder = GltfBuilder::new();
        assert_eq!(builder.add_vertex_attribute(&[], 3), None);
        assert_eq!(builder.vertex_cursor, 0);
        assert!(builder.vertex_chunks.is_empty());
    }

    #[test]
    fn test_attribute_offsets_advance_sequentially() {
        let mut builder = GltfBuilder::new();
        let first = builder.add_vertex_attribute(&[1.0, 2.0, 3.0], 3).unwrap();
        let second = builder.add_vertex_attribute(&[0.0, 1.0], 2).unwrap();

        assert_eq!(builder.accessors[&first].byte_offset, 0);
        assert_eq!(builder.accessors[&second].byte_offset, 12);
    }

    #[test]
    fn test_vertex_round_trip_is_bit_exact() {
        let values = [0.1_f32, -2.75, 1.0e-8, 3.5e7, 0.0, -0.0];
        let mut builder = GltfBuilder::new();
        builder.add_vertex_attribute(&values, 3).unwrap();

        let bytes = &builder.vertex_chunks[0];
        let mut cursor = std::io::Cursor::new(bytes.as_slice());
        let mut decoded = Vec::new();
        while let Ok(v) = cursor.read_f32::<LittleEndian>() {
            decoded.push(v);
        }

        assert_eq!(decoded.len(), values.len());
        for (a, b) in decoded.iter().zip(values.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_index_width_16_bit_below_restart_sentinel() {
        let mut builder = GltfBuilder::new();
        let id = builder.add_index_array(&[0, 70, 65534]);

        let accessor = &builder.accessors[&id];
        assert_eq!(accessor.component_type, 5123);
        assert_eq!(accessor.min, vec![0.0]);
        assert_eq!(accessor.max, vec![65534.0]);
        assert_eq!(builder.index_cursor, 3 * 2);
    }

    #[test]
    fn test_index_width_32_bit_at_restart_sentinel() {
        let mut builder = GltfBuilder::new();
        let id = builder.add_index_array(&[0, 65535]);

        let accessor = &builder.accessors[&id];
        assert_eq!(accessor.component_type, 5125);
        assert_eq!(accessor.max, vec![65535.0]);
        assert_eq!(builder.index_cursor, 2 * 4);
    }

    #[test]
    fn test_index_bytes_are_little_endian() {
        let mut builder = GltfBuilder::new();
        builder.add_index_array(&[0x0102, 0x0304]);
        assert_eq!(builder.index_chunks[0], vec![0x02, 0x01, 0x04, 0x03]);
    }

    #[test]
    fn test_single_triangle_scenario() {
        let (document, buffer) = GltfBuilder::new()
            .build(&single_mesh_model(triangle_mesh()))
            .unwrap();

        // 3 VEC3 floats (36 bytes) + 3 u16 indices (6 bytes).
        assert_eq!(buffer.len(), 42);

        let mesh = &document.meshes["Mesh0"];
        let primitive = &mesh.primitives[0];
        assert_eq!(primitive.mode, 4);

        let position = &document.accessors[&primitive.attributes["POSITION"]];
        assert_eq!(position.accessor_type, "VEC3");
        assert_eq!(position.min, vec![0.0, 0.0, 0.0]);
        assert_eq!(position.max, vec![1.0, 1.0, 0.0]);

        let indices = &document.accessors[&primitive.indices];
        assert_eq!(indices.accessor_type, "SCALAR");
        assert_eq!(indices.component_type, 5123);
        assert_eq!(indices.min, vec![0.0]);
        assert_eq!(indices.max, vec![2.0]);

        assert_eq!(document.nodes["Node0"].meshes, vec!["Mesh0".to_string()]);
        assert_eq!(
            document.scenes[&document.scene].nodes,
            vec!["Node0".to_string()]
        );
    }

    #[test]
    fn test_buffer_views_partition_the_buffer() {
        let (document, buffer) = GltfBuilder::new()
            .build(&single_mesh_model(triangle_mesh()))
            .unwrap();

        let vertex_view = &document.buffer_views["bufferView_vertex"];
        let index_view = &document.buffer_views["bufferView_index"];

        assert_eq!(vertex_view.byte_offset, 0);
        assert_eq!(vertex_view.target, 34962);
        assert_eq!(index_view.byte_offset, vertex_view.byte_length);
        assert_eq!(index_view.target, 34963);
        assert_eq!(
            document.buffers["buffer"].byte_length,
            vertex_view.byte_length + index_view.byte_length
        );
        assert_eq!(buffer.len(), document.buffers["buffer"].byte_length);
    }

    #[test]
    fn test_accessors_stay_within_their_buffer_view() {
        let mut mesh = triangle_mesh();
        mesh.normals = vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        mesh.uvs = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        mesh.primitives.push(ObjPrimitive {
            indices: vec![2, 1, 0],
            material: "Default".to_string(),
        });

        let (document, _) = GltfBuilder::new()
            .build(&single_mesh_model(mesh))
            .unwrap();

        for accessor in document.accessors.values() {
            let view = &document.buffer_views[&accessor.buffer_view];
            let component_size = match accessor.component_type {
                5123 => 2,
                _ => 4,
            };
            let components = match accessor.accessor_type.as_str() {
                "VEC3" => 3,
                "VEC2" => 2,
                _ => 1,
            };
            let end = accessor.byte_offset + accessor.count * components * component_size;
            assert!(end <= view.byte_length);
        }
    }

    #[test]
    fn test_primitives_share_attributes_with_distinct_indices() {
        let mut mesh = triangle_mesh();
        mesh.primitives.push(ObjPrimitive {
            indices: vec![2, 1, 0],
            material: "Other".to_string(),
        });

        let (document, _) = GltfBuilder::new()
            .build(&single_mesh_model(mesh))
            .unwrap();

        let primitives = &document.meshes["Mesh0"].primitives;
        assert_eq!(primitives.len(), 2);
        assert_eq!(primitives[0].attributes, primitives[1].attributes);
        assert_ne!(primitives[0].indices, primitives[1].indices);
        assert_eq!(primitives[1].material, "Other");
    }

    #[test]
    fn test_empty_normals_and_uvs_are_omitted() {
        let (document, _) = GltfBuilder::new()
            .build(&single_mesh_model(triangle_mesh()))
            .unwrap();

        let attributes = &document.meshes["Mesh0"].primitives[0].attributes;
        assert!(attributes.contains_key("POSITION"));
        assert!(!attributes.contains_key("NORMAL"));
        assert!(!attributes.contains_key("TEXCOORD_0"));
    }

    #[test]
    fn test_missing_positions_aborts_the_build() {
        let mut mesh = triangle_mesh();
        mesh.positions = Vec::new();

        let result = GltfBuilder::new().build(&single_mesh_model(mesh));
        assert!(matches!(
            result,
            Err(Error::MissingPositions { mesh }) if mesh == "Mesh0"
        ));
    }

    #[test]
    fn test_empty_index_array_aborts_the_build() {
        let mut mesh = triangle_mesh();
        mesh.primitives[0].indices = Vec::new();

        let result = GltfBuilder::new().build(&single_mesh_model(mesh));
        assert!(matches!(
            result,
            Err(Error::EmptyIndices { mesh }) if mesh == "Mesh0"
        ));
    }

    #[test]
    fn test_ragged_attribute_array_aborts_the_build() {
        let mut mesh = triangle_mesh();
        mesh.positions.push(5.0);

        let result = GltfBuilder::new().build(&single_mesh_model(mesh));
        assert!(matches!(
            result,
            Err(Error::MalformedAttribute {
                semantic: "POSITION",
                length: 10,
                components: 3,
                ..
            })
        ));

        let mut mesh = triangle_mesh();
        mesh.uvs = vec![0.0, 0.0, 1.0];

        let result = GltfBuilder::new().build(&single_mesh_model(mesh));
        assert!(matches!(
            result,
            Err(Error::MalformedAttribute {
                semantic: "TEXCOORD_0",
                ..
            })
        ));
    }

    #[test]
    fn test_colliding_node_names_are_disambiguated() {
        let mesh_a = triangle_mesh();
        let mut mesh_b = triangle_mesh();
        mesh_b.name = "Mesh0".to_string();

        let model = ObjModel {
            nodes: vec![
                ObjNode {
                    name: "Node0".to_string(),
                    meshes: vec![mesh_a],
                },
                ObjNode {
                    name: "Node0".to_string(),
                    meshes: vec![mesh_b],
                },
            ],
            ..ObjModel::default()
        };

        let (document, _) = GltfBuilder::new().build(&model).unwrap();

        assert!(document.nodes.contains_key("Node0"));
        assert!(document.nodes.contains_key("Node0_1"));
        assert!(document.meshes.contains_key("Mesh0"));
        assert!(document.meshes.contains_key("Mesh0_1"));
        // Only the table keys are disambiguated; records keep the source name.
        assert_eq!(document.nodes["Node0_1"].name, "Node0");
        assert_eq!(document.meshes["Mesh0_1"].name, "Mesh0");
        assert_eq!(
            document.scenes[&document.scene].nodes,
            vec!["Node0".to_string(), "Node0_1".to_string()]
        );
    }

    #[test]
    fn test_document_has_one_scene_one_sampler_one_buffer() {
        let (document, _) = GltfBuilder::new()
            .build(&single_mesh_model(triangle_mesh()))
            .unwrap();

        assert_eq!(document.scenes.len(), 1);
        assert_eq!(document.samplers.len(), 1);
        assert_eq!(document.buffers.len(), 1);
        assert_eq!(document.buffer_views.len(), 2);
        assert_eq!(document.scene, "scene");
        assert!(document.samplers.contains_key("sampler"));
    }
}
