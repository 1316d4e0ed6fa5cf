// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion options: the requested output granularity.

use std::fmt;

use crate::error::Error;

/// The grouping of geometry into nodes and meshes that a conversion
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeshGranularity {
    /// One leaf node per atomic feature object (e.g. one wall).
    PerAtomicFeatureObject,
    /// One node per primary feature object (e.g. one building), its atomic
    /// children merged into the node's mesh.
    PerPrimaryFeatureObject,
    /// The whole model flattened into a single node and mesh.
    PerCityModelArea,
}

impl fmt::Display for MeshGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PerAtomicFeatureObject => "per-atomic-feature-object",
            Self::PerPrimaryFeatureObject => "per-primary-feature-object",
            Self::PerCityModelArea => "per-city-model-area",
        };
        f.write_str(name)
    }
}

impl TryFrom<i32> for MeshGranularity {
    type Error = Error;

    /// Decodes the integer form the option takes when it crosses an
    /// FFI or configuration boundary.
    fn try_from(value: i32) -> Result<Self, Error> {
        match value {
            0 => Ok(Self::PerAtomicFeatureObject),
            1 => Ok(Self::PerPrimaryFeatureObject),
            2 => Ok(Self::PerCityModelArea),
            other => Err(Error::InvalidArgument(format!(
                "unknown mesh granularity: {other}"
            ))),
        }
    }
}

/// Options for [`GranularityConverter::convert`](crate::GranularityConverter::convert).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOption {
    /// The granularity of the output model.
    pub granularity: MeshGranularity,
}

impl Default for ConvertOption {
    fn default() -> Self {
        Self {
            granularity: MeshGranularity::PerPrimaryFeatureObject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_from_integer() {
        assert_eq!(
            MeshGranularity::try_from(0).unwrap(),
            MeshGranularity::PerAtomicFeatureObject
        );
        assert_eq!(
            MeshGranularity::try_from(2).unwrap(),
            MeshGranularity::PerCityModelArea
        );
        assert!(matches!(
            MeshGranularity::try_from(3),
            Err(Error::InvalidArgument(_))
        ));
    }
}
