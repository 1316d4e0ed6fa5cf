// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CityGML-Lite Polygon Mesh
//!
//! Scene-graph data model for 3D city models: a tree of named [`Node`]s,
//! each optionally carrying a triangle [`Mesh`] whose vertices are tagged
//! with the city object they belong to.
//!
//! ## City-object tagging
//!
//! Game engines consuming these meshes only see vertex attributes, so the
//! identity of the city object each vertex belongs to travels in the 4th
//! UV channel: a [`CityObjectIndex`], the pair `(primary, atomic)`, is
//! encoded into `uv4` per vertex, and the mesh's [`CityObjectList`] maps
//! each index back to its gml-id string.
//!
//! ```rust
//! use citygml_lite_mesh::CityObjectIndex;
//!
//! let idx = CityObjectIndex::new(2, 5);
//! assert_eq!(CityObjectIndex::from_uv(idx.to_uv()), idx);
//! ```
//!
//! ## Tree ownership
//!
//! A [`Node`] exclusively owns its mesh and its ordered children, and a
//! [`Model`] exclusively owns its roots. Nodes are move-only: there is no
//! `Clone`, mirroring the rule that trees never share sub-structure.

pub mod city_object;
pub mod mesh;
pub mod model;
pub mod node;
pub mod sub_mesh;

pub use city_object::{CityObjectIndex, CityObjectList, GML_ID_NOT_FOUND};
pub use mesh::{MergeOptions, Mesh};
pub use model::Model;
pub use node::Node;
pub use sub_mesh::SubMesh;
