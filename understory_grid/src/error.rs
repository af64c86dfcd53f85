// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while configuring a grid.

use crate::Priority;

/// A grid configuration that cannot produce a valid layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The band capacity was zero, which would put every element in one band.
    #[error("{priority:?}-priority grid needs at least one element per band")]
    ZeroCapacity {
        /// Priority the grid was being configured with.
        priority: Priority,
    },
}
