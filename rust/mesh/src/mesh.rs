// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structure: parallel vertex/UV arrays, a triangle index list,
//! sub-mesh ranges, and the city-object id table.

use nalgebra::{Point3, Vector2};

use crate::city_object::{CityObjectIndex, CityObjectList};
use crate::sub_mesh::SubMesh;

/// Policy flags for [`Mesh::merge`].
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    /// Keep the source sub-meshes' material references. When `false`,
    /// appended sub-meshes carry the default material.
    pub include_materials: bool,
    /// Offset appended sub-mesh ranges by the destination's previous index
    /// count. When `false`, ranges are copied verbatim.
    pub shift_sub_mesh_indices: bool,
}

impl Default for MergeOptions {
    /// The converter's fixed policy: drop materials, shift ranges.
    fn default() -> Self {
        Self {
            include_materials: false,
            shift_sub_mesh_indices: true,
        }
    }
}

/// Triangle mesh with city-object tagging.
///
/// `vertices`, `uv1` and `uv4` are parallel arrays: position, texture
/// coordinate, and encoded [`CityObjectIndex`] of each vertex. `indices` is
/// a flat triangle list into `vertices`, and `sub_meshes` partitions it into
/// material ranges.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Texture coordinates, one per vertex. Preserved, never interpreted.
    pub uv1: Vec<Vector2<f32>>,
    /// City-object tag channel, one per vertex. Every value decodes to a
    /// [`CityObjectIndex`] resolvable through `city_object_list`.
    pub uv4: Vec<Vector2<f32>>,
    /// Triangle list; length divisible by 3, each value < `vertices.len()`.
    pub indices: Vec<u32>,
    /// Material ranges over `indices`, in ascending order.
    pub sub_meshes: Vec<SubMesh>,
    /// Tag → gml-id resolution table.
    pub city_object_list: CityObjectList,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with reserved capacity.
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            uv1: Vec::with_capacity(vertex_count),
            uv4: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
            sub_meshes: Vec::new(),
            city_object_list: CityObjectList::new(),
        }
    }

    /// Appends one vertex with its texture coordinate and city-object tag.
    #[inline]
    pub fn push_vertex(&mut self, position: Point3<f64>, uv1: Vector2<f32>, tag: CityObjectIndex) {
        self.vertices.push(position);
        self.uv1.push(uv1);
        self.uv4.push(tag.to_uv());
    }

    /// Appends a triangle.
    #[inline]
    pub fn push_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Appends a sub-mesh range.
    pub fn add_sub_mesh(&mut self, sub_mesh: SubMesh) {
        self.sub_meshes.push(sub_mesh);
    }

    /// Decoded city-object tag of vertex `i`.
    #[inline]
    pub fn tag_at(&self, i: usize) -> CityObjectIndex {
        CityObjectIndex::from_uv(self.uv4[i])
    }

    /// Overwrites the whole `uv4` channel with one tag.
    pub fn set_uv4_all(&mut self, tag: CityObjectIndex) {
        let uv = tag.to_uv();
        for value in &mut self.uv4 {
            *value = uv;
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the mesh has at least one vertex.
    #[inline]
    pub fn has_vertices(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// Whether the mesh carries renderable polygons: vertices and indices
    /// both present.
    #[inline]
    pub fn has_polygons(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    /// Appends `other`'s geometry to this mesh.
    ///
    /// Vertices, UVs and indices are concatenated, with each appended index
    /// offset by the previous vertex count so it still references its own
    /// vertex. Sub-mesh handling follows `options`. The city-object list is
    /// left untouched: re-tagging appended vertices and registering their
    /// ids is the caller's responsibility.
    pub fn merge(&mut self, other: &Mesh, options: MergeOptions) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = self.vertices.len() as u32;
        let index_offset = self.indices.len();

        self.vertices.reserve(other.vertices.len());
        self.uv1.reserve(other.uv1.len());
        self.uv4.reserve(other.uv4.len());
        self.indices.reserve(other.indices.len());

        self.vertices.extend_from_slice(&other.vertices);
        self.uv1.extend_from_slice(&other.uv1);
        self.uv4.extend_from_slice(&other.uv4);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));

        self.sub_meshes.reserve(other.sub_meshes.len());
        for sm in &other.sub_meshes {
            let (start, end) = if options.shift_sub_mesh_indices {
                (sm.start_index + index_offset, sm.end_index + index_offset)
            } else {
                (sm.start_index, sm.end_index)
            };
            let material_id = if options.include_materials {
                sm.material_id
            } else {
                None
            };
            self.sub_meshes.push(SubMesh::new(start, end, material_id));
        }
    }
}
