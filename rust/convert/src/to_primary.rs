// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merge-up pass: atomic granularity to one mesh per primary feature.

use std::collections::VecDeque;

use citygml_lite_mesh::{Mesh, Model, Node};
use tracing::debug;

use crate::merge::merge_primary_and_children;
use crate::node_path::NodePath;

/// Converts an atomic-granularity model to primary granularity.
///
/// The destination mirrors the source's non-primary ancestors by name.
/// Each primary source node becomes a single mesh in its mirror node,
/// folding the whole subtree; its descendants are not walked further.
pub(crate) fn convert_from_atomic_to_primary(src: &Model) -> Model {
    debug!(
        root_count = src.root_count(),
        "converting atomic model to primary granularity"
    );

    let mut dst = Model::new();
    dst.reserve_roots(src.root_count());

    let mut queue: VecDeque<(NodePath, NodePath)> = VecDeque::new();
    for i in 0..src.root_count() {
        dst.add_node(Node::new(src.root_at(i).name()));
        queue.push_back((NodePath::root(i), NodePath::root(i)));
    }

    while let Some((src_path, dst_path)) = queue.pop_front() {
        let Some(src_node) = src_path.node(src) else {
            continue;
        };
        let Some(dst_node) = dst_path.node_mut(&mut dst) else {
            continue;
        };

        if src_node.is_primary() {
            let mut merged = Mesh::new();
            merge_primary_and_children(src_node, &mut merged, 0);
            dst_node.set_mesh(merged);
        } else {
            dst_node.reserve_children(src_node.child_count());
            for i in 0..src_node.child_count() {
                dst_node.add_child(Node::new(src_node.child_at(i).name()));
                queue.push_back((src_path.child(i), dst_path.child(i)));
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use citygml_lite_mesh::{CityObjectIndex, CityObjectList};
    use nalgebra::{Point3, Vector2};

    fn atomic_leaf(gml_id: &str) -> Node {
        let mut mesh = Mesh::new();
        let tag = CityObjectIndex::new(0, 0);
        mesh.push_vertex(Point3::origin(), Vector2::zeros(), tag);
        mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector2::zeros(), tag);
        mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector2::zeros(), tag);
        mesh.push_triangle(0, 1, 2);
        mesh.city_object_list = CityObjectList::from([(tag, gml_id)]);
        Node::with_mesh(gml_id, mesh)
    }

    #[test]
    fn folds_each_primary_subtree_into_one_mesh() {
        let mut src = Model::new();
        let lod = src.add_node(Node::new("lod"));
        let primary = lod.add_empty_child("P");
        primary.set_is_primary(true);
        primary.add_child(atomic_leaf("A0"));
        primary.add_child(atomic_leaf("A1"));

        let dst = convert_from_atomic_to_primary(&src);

        assert_eq!(dst.root_count(), 1);
        assert_eq!(dst.root_at(0).name(), "lod");
        let mirror = dst.root_at(0).child_at(0);
        assert_eq!(mirror.name(), "P");
        // The subtree is folded into one mesh; nothing below the primary
        // mirror.
        assert_eq!(mirror.child_count(), 0);
        let mesh = mirror.mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.tag_at(0), CityObjectIndex::new(0, 0));
        assert_eq!(mesh.tag_at(3), CityObjectIndex::new(0, 1));
        assert_eq!(mesh.city_object_list.get(CityObjectIndex::new(0, 0)), Some("A0"));
        assert_eq!(mesh.city_object_list.get(CityObjectIndex::new(0, 1)), Some("A1"));
    }

    #[test]
    fn mirrors_non_primary_structure() {
        let mut src = Model::new();
        let root = src.add_node(Node::new("gml"));
        root.add_empty_child("lod1");
        root.add_empty_child("lod2");

        let dst = convert_from_atomic_to_primary(&src);

        assert_eq!(dst.root_at(0).child_count(), 2);
        assert_eq!(dst.root_at(0).child_at(0).name(), "lod1");
        assert_eq!(dst.root_at(0).child_at(1).name(), "lod2");
    }
}
