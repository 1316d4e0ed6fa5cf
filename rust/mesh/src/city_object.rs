// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! City-object identity: the per-vertex `(primary, atomic)` tag and the
//! table resolving tags to gml-id strings.

use std::fmt;

use nalgebra::Vector2;
use rustc_hash::FxHashMap;

/// Sentinel gml-id substituted when a [`CityObjectList`] lookup misses.
pub const GML_ID_NOT_FOUND: &str = "gml_id_not_found";

/// Identifies one city object inside a mesh: the index of its primary
/// feature (e.g. a building) and the index of the atomic feature within it
/// (e.g. one wall). An atomic index of [`CityObjectIndex::INVALID_INDEX`]
/// marks geometry belonging to the primary feature itself.
///
/// The tag is carried per vertex in the mesh's `uv4` channel; [`Self::to_uv`]
/// and [`Self::from_uv`] convert between the two forms. Both components stay
/// in the small-integer range (−1 and small non-negative ids), well inside
/// the span where `f32` round-trips integers exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityObjectIndex {
    /// Index of the primary feature object.
    pub primary: i32,
    /// Index of the atomic feature object, or [`Self::INVALID_INDEX`].
    pub atomic: i32,
}

impl CityObjectIndex {
    /// Marks "no atomic child": geometry owned by the primary feature.
    pub const INVALID_INDEX: i32 = -1;

    /// Creates a tag from its two components.
    #[inline]
    pub fn new(primary: i32, atomic: i32) -> Self {
        Self { primary, atomic }
    }

    /// Creates the tag for a primary feature's own geometry.
    #[inline]
    pub fn primary_only(primary: i32) -> Self {
        Self {
            primary,
            atomic: Self::INVALID_INDEX,
        }
    }

    /// Decodes a tag from a `uv4` value, truncating to integers.
    #[inline]
    pub fn from_uv(uv: Vector2<f32>) -> Self {
        Self {
            primary: uv.x as i32,
            atomic: uv.y as i32,
        }
    }

    /// Encodes the tag as a `uv4` value.
    #[inline]
    pub fn to_uv(self) -> Vector2<f32> {
        Vector2::new(self.primary as f32, self.atomic as f32)
    }

    /// Whether this tag marks primary-feature geometry (no atomic child).
    #[inline]
    pub fn is_primary_only(self) -> bool {
        self.atomic == Self::INVALID_INDEX
    }
}

impl fmt::Display for CityObjectIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.primary, self.atomic)
    }
}

/// Maps each [`CityObjectIndex`] present in a mesh to the gml-id of the
/// city object it stands for. The list is authoritative: every `uv4` value
/// in a valid mesh decodes to a key of this table (or to a primary-only
/// tag whose primary entry is present).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityObjectList {
    ids: FxHashMap<CityObjectIndex, String>,
}

impl CityObjectList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `gml_id` for `index`, replacing any previous entry.
    pub fn add(&mut self, index: CityObjectIndex, gml_id: impl Into<String>) {
        self.ids.insert(index, gml_id.into());
    }

    /// Looks up the gml-id for an exact index.
    pub fn get(&self, index: CityObjectIndex) -> Option<&str> {
        self.ids.get(&index).map(String::as_str)
    }

    /// Looks up the gml-id of a primary feature, i.e. the entry keyed
    /// `(primary, -1)`.
    pub fn primary_gml_id(&self, primary: i32) -> Option<&str> {
        self.get(CityObjectIndex::primary_only(primary))
    }

    /// Looks up the gml-id of an atomic feature by its full index.
    pub fn atomic_gml_id(&self, index: CityObjectIndex) -> Option<&str> {
        self.get(index)
    }

    /// Whether an entry exists for `index`.
    pub fn contains(&self, index: CityObjectIndex) -> bool {
        self.ids.contains_key(&index)
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over `(index, gml_id)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (CityObjectIndex, &str)> {
        self.ids.iter().map(|(&k, v)| (k, v.as_str()))
    }
}

impl FromIterator<(CityObjectIndex, String)> for CityObjectList {
    fn from_iter<T: IntoIterator<Item = (CityObjectIndex, String)>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(CityObjectIndex, &str); N]> for CityObjectList {
    fn from(entries: [(CityObjectIndex, &str); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_round_trip() {
        for primary in [-1, 0, 1, 7, 1023] {
            for atomic in [-1, 0, 3, 255] {
                let idx = CityObjectIndex::new(primary, atomic);
                assert_eq!(CityObjectIndex::from_uv(idx.to_uv()), idx);
            }
        }
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = CityObjectIndex::new(0, 5);
        let b = CityObjectIndex::new(1, -1);
        let c = CityObjectIndex::new(1, 0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn primary_only_lookup() {
        let list = CityObjectList::from([
            (CityObjectIndex::primary_only(0), "bldg_a"),
            (CityObjectIndex::new(0, 0), "wall_a0"),
        ]);
        assert_eq!(list.primary_gml_id(0), Some("bldg_a"));
        assert_eq!(list.primary_gml_id(1), None);
        assert_eq!(list.atomic_gml_id(CityObjectIndex::new(0, 0)), Some("wall_a0"));
    }

    #[test]
    fn missing_lookup_yields_none() {
        let list = CityObjectList::new();
        assert!(list.is_empty());
        assert_eq!(list.get(CityObjectIndex::new(0, 0)), None);
    }
}
