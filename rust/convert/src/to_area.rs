// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flatten pass: atomic granularity to a single node and mesh.

use std::collections::VecDeque;

use citygml_lite_mesh::{Mesh, Model, Node};
use tracing::debug;

use crate::merge::merge_primary_and_children;
use crate::node_path::NodePath;

/// Name given to the sole output node when the source has more than one
/// root.
const COMBINED_NODE_NAME: &str = "combined";

/// Converts an atomic-granularity model to area granularity: one root
/// node, flagged primary, holding every primary subtree merged into a
/// single mesh.
///
/// Primaries are numbered `0, 1, 2, …` in BFS discovery order, keeping
/// distinct primaries distinguishable in the merged `uv4` channel and
/// city-object list.
pub(crate) fn convert_from_atomic_to_area(src: &Model) -> Model {
    debug!(
        root_count = src.root_count(),
        "converting atomic model to area granularity"
    );

    let root_name = if src.root_count() == 1 {
        src.root_at(0).name().to_string()
    } else {
        COMBINED_NODE_NAME.to_string()
    };

    // The merged mesh is built in a local before it is attached, so the
    // walk never holds a reference into the growing destination tree.
    let mut merged = Mesh::new();
    let mut primary_id = 0;

    let mut queue: VecDeque<NodePath> = VecDeque::new();
    for i in 0..src.root_count() {
        queue.push_back(NodePath::root(i));
    }

    while let Some(path) = queue.pop_front() {
        let Some(node) = path.node(src) else {
            continue;
        };
        if node.is_primary() {
            merge_primary_and_children(node, &mut merged, primary_id);
            primary_id += 1;
        } else {
            for i in 0..node.child_count() {
                queue.push_back(path.child(i));
            }
        }
    }

    let mut dst = Model::new();
    let mut root = Node::new(root_name);
    root.set_is_primary(true);
    root.set_mesh(merged);
    dst.add_node(root);
    dst
}
