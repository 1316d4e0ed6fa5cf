// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The conversion entry point.

use citygml_lite_mesh::Model;
use tracing::debug;

use crate::error::Result;
use crate::option::{ConvertOption, MeshGranularity};
use crate::to_area::convert_from_atomic_to_area;
use crate::to_atomic::convert_to_atomic;
use crate::to_primary::convert_from_atomic_to_primary;

/// Converts models between mesh granularities.
pub struct GranularityConverter;

impl GranularityConverter {
    /// Converts `src` to the granularity requested in `option`.
    ///
    /// The model is first normalized to atomic granularity (every mesh
    /// split along its vertex tags, empty nodes pruned) and then merged
    /// back up to the requested output. The source model is not modified.
    pub fn convert(src: &Model, option: ConvertOption) -> Result<Model> {
        debug!(granularity = %option.granularity, "starting granularity conversion");

        let mut atomic = convert_to_atomic(src);
        atomic.erase_empty_nodes();

        let dst = match option.granularity {
            MeshGranularity::PerAtomicFeatureObject => atomic,
            MeshGranularity::PerPrimaryFeatureObject => convert_from_atomic_to_primary(&atomic),
            MeshGranularity::PerCityModelArea => convert_from_atomic_to_area(&atomic),
        };
        Ok(dst)
    }
}
