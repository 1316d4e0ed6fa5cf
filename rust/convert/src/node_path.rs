// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Path-vector node addressing.
//!
//! Conversion grows the destination tree while walking it, and growing a
//! `Vec` of children invalidates references into it. The traversal queues
//! therefore never hold node references; they hold a [`NodePath`], the
//! child indices from the model root, and re-derive a reference at the
//! point of use.

use citygml_lite_mesh::{Model, Node};

/// Addresses one node in a [`Model`] as the sequence of child indices from
/// the root. The empty path addresses the model's root container itself
/// and resolves to no node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NodePath {
    positions: Vec<usize>,
}

impl NodePath {
    /// Path to the root node at `index`.
    pub fn root(index: usize) -> Self {
        Self {
            positions: vec![index],
        }
    }

    /// Path to this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut positions = self.positions.clone();
        positions.push(index);
        Self { positions }
    }

    /// Resolves to a node reference. `None` for the empty path; panics on
    /// an out-of-range index, which is a programmer error.
    pub fn node<'a>(&self, model: &'a Model) -> Option<&'a Node> {
        let (&first, rest) = self.positions.split_first()?;
        let mut node = model.root_at(first);
        for &i in rest {
            node = node.child_at(i);
        }
        Some(node)
    }

    /// Mutable counterpart of [`Self::node`].
    pub fn node_mut<'a>(&self, model: &'a mut Model) -> Option<&'a mut Node> {
        let (&first, rest) = self.positions.split_first()?;
        let mut node = model.root_at_mut(first);
        for &i in rest {
            node = node.child_at_mut(i);
        }
        Some(node)
    }

    /// Appends `node` as a child of the addressed node (or as a model root
    /// for the empty path) and returns the new child's path.
    pub fn add_child_node(&self, model: &mut Model, node: Node) -> Self {
        match self.node_mut(model) {
            Some(parent) => {
                parent.add_child(node);
                self.child(parent.child_count() - 1)
            }
            None => {
                model.add_node(node);
                Self::root(model.root_count() - 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_walks_child_indices() {
        let mut model = Model::new();
        model.add_node(Node::new("r0"));
        let r1 = model.add_node(Node::new("r1"));
        r1.add_empty_child("a").add_empty_child("aa");
        r1.add_empty_child("b");

        assert_eq!(NodePath::root(1).node(&model).unwrap().name(), "r1");
        assert_eq!(NodePath::root(1).child(1).node(&model).unwrap().name(), "b");
        assert_eq!(
            NodePath::root(1).child(0).child(0).node(&model).unwrap().name(),
            "aa"
        );
        assert!(NodePath::default().node(&model).is_none());
    }

    #[test]
    fn add_child_node_returns_the_new_path() {
        let mut model = Model::new();
        let root_path = NodePath::default().add_child_node(&mut model, Node::new("root"));
        assert_eq!(root_path, NodePath::root(0));

        let child_path = root_path.add_child_node(&mut model, Node::new("child"));
        assert_eq!(child_path.node(&model).unwrap().name(), "child");

        // Paths stay valid while the tree grows around them.
        root_path.add_child_node(&mut model, Node::new("sibling"));
        assert_eq!(child_path.node(&model).unwrap().name(), "child");
    }
}
