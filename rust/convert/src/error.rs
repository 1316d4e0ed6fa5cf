// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for granularity conversion.

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during granularity conversion.
///
/// Conversion itself is total; the only failure surfaces at the API
/// boundary, when a caller hands over a granularity value this library
/// does not know.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
