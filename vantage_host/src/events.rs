// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Lifecycle notification kinds emitted by a host viewer.
///
/// Each kind is delivered as a bare trigger; any host-specific payload is
/// interpreted by the host itself, not by consumers of this contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// An image has been opened and its layers are available.
    Open,
    /// The current image has been closed.
    Close,
    /// A pan/zoom animation frame has been applied to the viewport.
    Animation,
    /// A pan/zoom animation has settled.
    AnimationFinish,
    /// The container element changed size.
    Resize,
    /// The viewer entered or left full-page mode.
    FullPage,
    /// The viewer entered or left full-screen mode.
    FullScreen,
}

impl HostEvent {
    /// All lifecycle kinds, in delivery-registration order.
    pub const ALL: [Self; 7] = [
        Self::Open,
        Self::Close,
        Self::Animation,
        Self::AnimationFinish,
        Self::Resize,
        Self::FullPage,
        Self::FullScreen,
    ];
}

/// Opaque handle for one live lifecycle subscription.
///
/// Returned by [`HostViewer::subscribe`](crate::HostViewer::subscribe) and
/// released with [`HostViewer::unsubscribe`](crate::HostViewer::unsubscribe).
/// Handles are only meaningful to the host that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a handle from a host-assigned raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the host-assigned raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}
