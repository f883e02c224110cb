// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Minimum host capability (major) version the adapter supports.
pub const MIN_HOST_VERSION: u32 = 2;

/// Failure to attach a [`ViewStateAdapter`](crate::ViewStateAdapter) to a
/// host viewer.
///
/// All variants are construction-time and fatal to adapter creation. A
/// failed attach leaves no partial state on the host: capability and
/// exclusivity are checked before the host is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AttachError {
    /// The builder was given no host viewer.
    #[error("no host viewer was supplied")]
    MissingHost,
    /// The host already owns a view-state adapter.
    #[error("host viewer already has a view-state adapter attached")]
    AlreadyAttached,
    /// The host's capability version is too old for this adapter.
    #[error("host capability version {found} is below the required version {required}")]
    UnsupportedHostVersion {
        /// The version the host reported.
        found: u32,
        /// The minimum version the adapter requires.
        required: u32,
    },
}
