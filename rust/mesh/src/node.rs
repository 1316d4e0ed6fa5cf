// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene-graph node: a named tree element optionally carrying a mesh.

use std::fmt::Write;

use crate::mesh::Mesh;

/// One element of the model hierarchy. Game engines interpret the name as
/// the game-object name and the mesh as its geometry.
///
/// A node exclusively owns its mesh and its ordered children; there is no
/// `Clone`, so sub-trees can only be moved, never shared.
#[derive(Debug)]
pub struct Node {
    name: String,
    mesh: Option<Mesh>,
    is_primary: bool,
    children: Vec<Node>,
}

impl Node {
    /// Creates a mesh-less node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            is_primary: false,
            children: Vec::new(),
        }
    }

    /// Creates a node carrying a mesh.
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            is_primary: false,
            children: Vec::new(),
        }
    }

    /// The node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's mesh, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Mutable access to the node's mesh, if any.
    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.mesh.as_mut()
    }

    /// Attaches a mesh, replacing any previous one.
    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = Some(mesh);
    }

    /// Detaches and returns the mesh.
    pub fn take_mesh(&mut self) -> Option<Mesh> {
        self.mesh.take()
    }

    /// Whether this node stands for a primary feature object.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Marks or unmarks this node as a primary feature object.
    pub fn set_is_primary(&mut self, is_primary: bool) {
        self.is_primary = is_primary;
    }

    /// Appends a child and returns a reference to it.
    pub fn add_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Appends a mesh-less child with the given name.
    pub fn add_empty_child(&mut self, name: impl Into<String>) -> &mut Node {
        self.add_child(Node::new(name))
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// The child at `index`. Panics when out of range; an invalid child
    /// index is a programmer error, not a domain error.
    pub fn child_at(&self, index: usize) -> &Node {
        &self.children[index]
    }

    /// Mutable access to the child at `index`.
    pub fn child_at_mut(&mut self, index: usize) -> &mut Node {
        &mut self.children[index]
    }

    /// The direct children in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Reserves capacity for `additional` more children.
    pub fn reserve_children(&mut self, additional: usize) {
        self.children.reserve(additional);
    }

    /// Whether this node carries a mesh with renderable polygons.
    pub fn has_polygons(&self) -> bool {
        self.mesh.as_ref().is_some_and(Mesh::has_polygons)
    }

    /// Recursively removes descendants that have neither children nor
    /// polygons.
    pub fn erase_empty_children(&mut self) {
        self.children.retain_mut(|child| {
            child.erase_empty_children();
            child.child_count() > 0 || child.has_polygons()
        });
    }

    pub(crate) fn debug_string(&self, out: &mut String, indent: usize) {
        let pad = "    ".repeat(indent);
        let _ = writeln!(out, "{pad}Node: {}", self.name);
        match &self.mesh {
            Some(mesh) => {
                let _ = writeln!(
                    out,
                    "{pad}    Mesh: {} vertices, {} triangles, {} sub-meshes",
                    mesh.vertex_count(),
                    mesh.triangle_count(),
                    mesh.sub_meshes.len()
                );
            }
            None => {
                let _ = writeln!(out, "{pad}    No Mesh");
            }
        }
        for child in &self.children {
            child.debug_string(out, indent + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_object::CityObjectIndex;
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
    fn polygons_require_vertices_and_indices() {
        let mut node = Node::new("n");
        assert!(!node.has_polygons());

        // A mesh with vertices but no indices does not count.
        let mut vertex_only = polygon_mesh();
        vertex_only.indices.clear();
        node.set_mesh(vertex_only);
        assert!(!node.has_polygons());

        node.set_mesh(polygon_mesh());
        assert!(node.has_polygons());
    }

    #[test]
    fn erase_empty_children_is_recursive() {
        let mut root = Node::new("root");
        root.add_empty_child("empty_parent").add_empty_child("empty_leaf");
        root.add_child(Node::with_mesh("kept", polygon_mesh()));

        root.erase_empty_children();

        assert_eq!(root.child_count(), 1);
        assert_eq!(root.child_at(0).name(), "kept");
    }

    #[test]
    fn erase_keeps_empty_ancestors_of_surviving_nodes() {
        let mut root = Node::new("root");
        root.add_empty_child("group")
            .add_child(Node::with_mesh("leaf", polygon_mesh()));

        root.erase_empty_children();

        assert_eq!(root.child_count(), 1);
        assert_eq!(root.child_at(0).child_count(), 1);
    }
}
