// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tag filtering: extract the geometry of one city object from a mesh.

use citygml_lite_mesh::{CityObjectIndex, Mesh, SubMesh};

/// Builds a new mesh from exactly those vertices of `src` whose `uv4` tag
/// equals `filter_id`, with indices remapped onto the compacted vertex
/// array and sub-meshes eroded to their surviving spans. Every vertex of
/// the result is re-tagged `(0, replacement_atomic)`; the result's
/// city-object list is left empty for the caller to fill.
///
/// Precondition: all three vertices of any triangle share one tag (the
/// upstream pipeline assigns tags per primitive). A triangle spanning tags
/// would be split across outputs with broken index triples.
pub(crate) fn filter_by_city_obj_index(
    src: &Mesh,
    filter_id: CityObjectIndex,
    replacement_atomic: i32,
) -> Mesh {
    let mut dst = Mesh::with_capacity(src.vertex_count(), src.indices.len());
    let replacement = CityObjectIndex::new(0, replacement_atomic);

    // vert_remap[i]: index of source vertex i in the compacted vertex
    // array, or None when dropped.
    let mut vert_remap: Vec<Option<u32>> = Vec::with_capacity(src.vertex_count());
    for i in 0..src.vertex_count() {
        if src.tag_at(i) == filter_id {
            vert_remap.push(Some(dst.vertices.len() as u32));
            dst.push_vertex(src.vertices[i], src.uv1[i], replacement);
        } else {
            vert_remap.push(None);
        }
    }

    // idx_remap[j]: position of src.indices[j] in the compacted index
    // array, or None when its vertex was dropped.
    let mut idx_remap: Vec<Option<usize>> = Vec::with_capacity(src.indices.len());
    for &src_index in &src.indices {
        match vert_remap[src_index as usize] {
            Some(new_vertex) => {
                dst.indices.push(new_vertex);
                idx_remap.push(Some(dst.indices.len() - 1));
            }
            None => idx_remap.push(None),
        }
    }
    debug_assert!(
        dst.indices.len() % 3 == 0,
        "a triangle spanned multiple city-object tags"
    );

    // Erode each sub-mesh range to the span that survived; fully-deleted
    // ranges are skipped.
    for sm in &src.sub_meshes {
        let mut start = sm.start_index;
        let end_bound = sm.end_index;

        while start <= end_bound && idx_remap[start].is_none() {
            start += 1;
        }
        if start > end_bound {
            continue;
        }
        let mut end = end_bound;
        while idx_remap[end].is_none() {
            end -= 1;
        }

        let (Some(new_start), Some(new_end)) = (idx_remap[start], idx_remap[end]) else {
            continue;
        };
        dst.sub_meshes
            .push(SubMesh::new(new_start, new_end, sm.material_id));
    }

    dst
}
