// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subtree merging: fold a primary node and its descendants into one mesh.

use std::collections::VecDeque;

use citygml_lite_mesh::{CityObjectIndex, MergeOptions, Mesh, Node, GML_ID_NOT_FOUND};
use tracing::trace;

/// Appends the meshes of `src_root` and all its descendants to `dst_mesh`,
/// breadth-first.
///
/// Each appended mesh is re-tagged `(primary_id, atomic_id)`: `-1` for the
/// primary node itself, then `0, 1, 2, …` in BFS order for each subsequent
/// mesh-carrying descendant, and the tag's gml-id is registered in
/// `dst_mesh`'s city-object list. Source meshes are expected to be at
/// atomic granularity, so their own ids are looked up under `(0, 0)` first
/// and `(0, -1)` second.
pub(crate) fn merge_primary_and_children(src_root: &Node, dst_mesh: &mut Mesh, primary_id: i32) {
    let mut queue: VecDeque<&Node> = VecDeque::new();
    queue.push_back(src_root);
    let mut next_atomic_id = 0;

    while let Some(src_node) = queue.pop_front() {
        if let Some(src_mesh) = src_node.mesh() {
            let atomic_id = if src_node.is_primary() {
                CityObjectIndex::INVALID_INDEX
            } else {
                let id = next_atomic_id;
                next_atomic_id += 1;
                id
            };
            let tag = CityObjectIndex::new(primary_id, atomic_id);

            let appended_from = dst_mesh.vertex_count();
            dst_mesh.merge(src_mesh, MergeOptions::default());
            let uv = tag.to_uv();
            for value in &mut dst_mesh.uv4[appended_from..] {
                *value = uv;
            }

            let src_obj_list = &src_mesh.city_object_list;
            let gml_id = src_obj_list
                .atomic_gml_id(CityObjectIndex::new(0, 0))
                .or_else(|| src_obj_list.atomic_gml_id(CityObjectIndex::new(0, -1)))
                .unwrap_or(GML_ID_NOT_FOUND);
            dst_mesh.city_object_list.add(tag, gml_id);

            trace!(
                node = src_node.name(),
                %tag,
                vertices = src_mesh.vertex_count(),
                "merged node mesh"
            );
        }

        for i in 0..src_node.child_count() {
            queue.push_back(src_node.child_at(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citygml_lite_mesh::CityObjectList;
    use nalgebra::{Point3, Vector2};

    fn atomic_mesh(gml_id: &str, base: f64) -> Mesh {
        let mut mesh = Mesh::new();
        let tag = CityObjectIndex::new(0, 0);
        mesh.push_vertex(Point3::new(base, 0.0, 0.0), Vector2::zeros(), tag);
        mesh.push_vertex(Point3::new(base + 1.0, 0.0, 0.0), Vector2::zeros(), tag);
        mesh.push_vertex(Point3::new(base, 1.0, 0.0), Vector2::zeros(), tag);
        mesh.push_triangle(0, 1, 2);
        mesh.city_object_list = CityObjectList::from([(tag, gml_id)]);
        mesh
    }

    fn primary_mesh(gml_id: &str) -> Mesh {
        let mut mesh = atomic_mesh(gml_id, 100.0);
        mesh.set_uv4_all(CityObjectIndex::primary_only(0));
        mesh.city_object_list =
            CityObjectList::from([(CityObjectIndex::primary_only(0), gml_id)]);
        mesh
    }

    #[test]
    fn assigns_atomic_ids_in_bfs_order() {
        let mut primary = Node::with_mesh("p", primary_mesh("P"));
        primary.set_is_primary(true);
        primary.add_child(Node::with_mesh("a0", atomic_mesh("A0", 0.0)));
        primary.add_child(Node::with_mesh("a1", atomic_mesh("A1", 10.0)));

        let mut dst = Mesh::new();
        merge_primary_and_children(&primary, &mut dst, 4);

        assert_eq!(dst.vertex_count(), 9);
        assert_eq!(dst.tag_at(0), CityObjectIndex::new(4, -1));
        assert_eq!(dst.tag_at(3), CityObjectIndex::new(4, 0));
        assert_eq!(dst.tag_at(6), CityObjectIndex::new(4, 1));

        let list = &dst.city_object_list;
        assert_eq!(list.get(CityObjectIndex::new(4, -1)), Some("P"));
        assert_eq!(list.get(CityObjectIndex::new(4, 0)), Some("A0"));
        assert_eq!(list.get(CityObjectIndex::new(4, 1)), Some("A1"));
    }

    #[test]
    fn mesh_less_nodes_do_not_consume_atomic_ids() {
        let mut primary = Node::new("p");
        primary.set_is_primary(true);
        primary.add_empty_child("group").add_child(Node::with_mesh(
            "a0",
            atomic_mesh("A0", 0.0),
        ));

        let mut dst = Mesh::new();
        merge_primary_and_children(&primary, &mut dst, 0);

        assert_eq!(dst.vertex_count(), 3);
        assert_eq!(dst.tag_at(0), CityObjectIndex::new(0, 0));
        assert_eq!(dst.city_object_list.get(CityObjectIndex::new(0, 0)), Some("A0"));
    }

    #[test]
    fn unknown_source_id_falls_back_to_sentinel() {
        let mut mesh = atomic_mesh("ignored", 0.0);
        mesh.city_object_list = CityObjectList::new();
        let node = Node::with_mesh("a", mesh);

        let mut dst = Mesh::new();
        merge_primary_and_children(&node, &mut dst, 0);

        assert_eq!(
            dst.city_object_list.get(CityObjectIndex::new(0, 0)),
            Some(GML_ID_NOT_FOUND)
        );
    }
}
