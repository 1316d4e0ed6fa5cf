// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalization pass: split every mesh along its vertex tags into one
//! node per city object.

use std::collections::{BTreeSet, VecDeque};

use citygml_lite_mesh::{
    CityObjectIndex, CityObjectList, Mesh, Model, Node, GML_ID_NOT_FOUND,
};
use tracing::debug;

use crate::filter::filter_by_city_obj_index;
use crate::node_path::NodePath;

/// Converts a model of any granularity to atomic granularity.
///
/// Each mesh-carrying source node becomes, per primary id found in its
/// `uv4` channel, a primary node holding the primary-only vertices, with
/// one atomic child per atomic id. Mesh-less nodes are copied by name,
/// keeping the primary flag so that converting an already-atomic model is
/// idempotent. Empty nodes are left in place; the caller prunes them
/// afterwards.
pub(crate) fn convert_to_atomic(src: &Model) -> Model {
    debug!(
        root_count = src.root_count(),
        "converting model to atomic granularity"
    );

    let mut dst = Model::new();
    dst.reserve_roots(src.root_count());

    // Each entry pairs a source node with the destination image of its
    // parent; references are re-derived from the paths at point of use so
    // growth of either tree cannot invalidate them.
    let mut queue: VecDeque<(NodePath, NodePath)> = VecDeque::new();
    for i in 0..src.root_count() {
        queue.push_back((NodePath::root(i), NodePath::default()));
    }

    while let Some((src_path, dst_parent_path)) = queue.pop_front() {
        let Some(src_node) = src_path.node(src) else {
            continue;
        };

        let dst_image = match src_node.mesh() {
            Some(mesh) => split_mesh_node(mesh, &dst_parent_path, &mut dst),
            None => {
                let mut copy = Node::new(src_node.name());
                copy.set_is_primary(src_node.is_primary());
                dst_parent_path.add_child_node(&mut dst, copy)
            }
        };

        for i in 0..src_node.child_count() {
            queue.push_back((src_path.child(i), dst_image.clone()));
        }
    }

    dst
}

/// Splits one mesh into its per-object nodes under `dst_parent_path` and
/// returns the destination image of the source node: the primary node it
/// produced, or the reused primary parent.
fn split_mesh_node(mesh: &Mesh, dst_parent_path: &NodePath, dst: &mut Model) -> NodePath {
    // Enumerate the tags present, in ascending order.
    let mut all_ids = BTreeSet::new();
    let mut primary_ids = BTreeSet::new();
    for &uv in &mesh.uv4 {
        let id = CityObjectIndex::from_uv(uv);
        all_ids.insert(id);
        primary_ids.insert(id.primary);
    }

    let src_obj_list = &mesh.city_object_list;
    let parent_is_primary = dst_parent_path
        .node(dst)
        .is_some_and(Node::is_primary);

    let mut dst_image = dst_parent_path.clone();
    for &primary_id in &primary_ids {
        let primary_path = if parent_is_primary {
            // The enclosing source node was itself converted into a
            // primary; attach the atomic children to it directly. The
            // residual primary-only geometry of this mesh is dropped.
            dst_parent_path.clone()
        } else {
            let gml_id = src_obj_list
                .primary_gml_id(primary_id)
                .unwrap_or(GML_ID_NOT_FOUND)
                .to_string();
            let mut primary_node = Node::new(&gml_id);
            primary_node.set_is_primary(true);
            let mut primary_mesh = filter_by_city_obj_index(
                mesh,
                CityObjectIndex::primary_only(primary_id),
                CityObjectIndex::INVALID_INDEX,
            );
            if primary_mesh.has_vertices() {
                primary_mesh.city_object_list =
                    CityObjectList::from([(CityObjectIndex::primary_only(0), gml_id.as_str())]);
                primary_node.set_mesh(primary_mesh);
            }
            dst_parent_path.add_child_node(dst, primary_node)
        };

        for &id in &all_ids {
            if id.primary != primary_id || id.is_primary_only() {
                continue;
            }
            let gml_id = src_obj_list
                .atomic_gml_id(id)
                .unwrap_or(GML_ID_NOT_FOUND)
                .to_string();
            let mut atomic_node = Node::new(&gml_id);
            let mut atomic_mesh = filter_by_city_obj_index(mesh, id, 0);
            if atomic_mesh.has_vertices() {
                atomic_mesh.city_object_list =
                    CityObjectList::from([(CityObjectIndex::new(0, 0), gml_id.as_str())]);
                atomic_node.set_mesh(atomic_mesh);
            }
            primary_path.add_child_node(dst, atomic_node);
        }

        dst_image = primary_path;
    }

    dst_image
}
