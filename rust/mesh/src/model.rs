// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model: the root container of the scene-graph tree.

use crate::node::Node;

/// Owns the root nodes of a city-model scene graph.
#[derive(Debug, Default)]
pub struct Model {
    root_nodes: Vec<Node>,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a root node and returns a reference to it.
    pub fn add_node(&mut self, node: Node) -> &mut Node {
        self.root_nodes.push(node);
        let last = self.root_nodes.len() - 1;
        &mut self.root_nodes[last]
    }

    /// Number of root nodes.
    pub fn root_count(&self) -> usize {
        self.root_nodes.len()
    }

    /// The root node at `index`. Panics when out of range.
    pub fn root_at(&self, index: usize) -> &Node {
        &self.root_nodes[index]
    }

    /// Mutable access to the root node at `index`.
    pub fn root_at_mut(&mut self, index: usize) -> &mut Node {
        &mut self.root_nodes[index]
    }

    /// The root nodes in order.
    pub fn roots(&self) -> &[Node] {
        &self.root_nodes
    }

    /// Reserves capacity for `additional` more root nodes.
    pub fn reserve_roots(&mut self, additional: usize) {
        self.root_nodes.reserve(additional);
    }

    /// Recursively removes nodes that have neither children nor polygons,
    /// including roots.
    pub fn erase_empty_nodes(&mut self) {
        self.root_nodes.retain_mut(|root| {
            root.erase_empty_children();
            root.child_count() > 0 || root.has_polygons()
        });
    }

    /// Indented dump of the node hierarchy with mesh summaries.
    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        for root in &self.root_nodes {
            root.debug_string(&mut out, 0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_object::CityObjectIndex;
    use crate::mesh::Mesh;
    use nalgebra::{Point3, Vector2};

    fn polygon_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        let tag = CityObjectIndex::new(0, 0);
        mesh.push_vertex(Point3::origin(), Vector2::zeros(), tag);
        mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector2::zeros(), tag);
        mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector2::zeros(), tag);
        mesh.push_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn erase_empty_nodes_drops_bare_roots() {
        let mut model = Model::new();
        model.add_node(Node::new("empty_root"));
        model
            .add_node(Node::new("kept_root"))
            .add_child(Node::with_mesh("leaf", polygon_mesh()));

        model.erase_empty_nodes();

        assert_eq!(model.root_count(), 1);
        assert_eq!(model.root_at(0).name(), "kept_root");
    }

    #[test]
    fn debug_string_lists_hierarchy() {
        let mut model = Model::new();
        model
            .add_node(Node::new("root"))
            .add_child(Node::with_mesh("leaf", polygon_mesh()));

        let dump = model.debug_string();
        assert!(dump.contains("Node: root"));
        assert!(dump.contains("Node: leaf"));
        assert!(dump.contains("3 vertices"));
        assert!(dump.contains("No Mesh"));
    }
}
