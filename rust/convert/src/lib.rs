// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CityGML-Lite Granularity Converter
//!
//! Re-organizes a city-model scene graph at one of three granularities:
//!
//! - **atomic**: one leaf node per atomic city object,
//! - **primary**: one node per primary city object, with all its atomic
//!   children merged into that node's mesh,
//! - **area**: the entire model flattened into a single node and mesh.
//!
//! The input is a [`Model`](citygml_lite_mesh::Model) whose meshes tag each
//! vertex with a [`CityObjectIndex`](citygml_lite_mesh::CityObjectIndex) in
//! the `uv4` channel. Conversion first normalizes to atomic granularity by
//! splitting every mesh along its vertex tags, then merges back up to the
//! requested output, which keeps the conversion surface linear in the number
//! of granularities instead of quadratic in source/target pairs.
//!
//! ```rust,ignore
//! use citygml_lite_convert::{ConvertOption, GranularityConverter, MeshGranularity};
//!
//! let converted = GranularityConverter::convert(
//!     &model,
//!     ConvertOption { granularity: MeshGranularity::PerPrimaryFeatureObject },
//! )?;
//! ```
//!
//! The converter is pure on its inputs: the source model is only read, and
//! the returned model satisfies the same tagging invariants as the input.

pub mod converter;
pub mod error;
pub mod option;

mod filter;
mod merge;
mod node_path;
mod to_area;
mod to_atomic;
mod to_primary;

pub use converter::GranularityConverter;
pub use error::{Error, Result};
pub use option::{ConvertOption, MeshGranularity};
