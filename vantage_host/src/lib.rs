// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vantage Host: the collaborator contract for deep-zoom host viewers.
//!
//! This crate defines the surface a deep-zoom viewer must expose so that a
//! [`vantage_view_state`] adapter can attach to it:
//!
//! - [`HostViewer`]: viewport queries (bounds, container pixel size),
//!   pan/zoom/resize commands, zoom clamping configuration, access to
//!   positioned image layers, and lifecycle subscription management.
//! - [`LayerTransform`]: one positioned image in the host's multi-image
//!   composition, with its native pixel dimensions and its own
//!   container-element → image-pixel coordinate transform.
//! - [`HostEvent`] and [`SubscriptionId`]: the lifecycle notification kinds
//!   the adapter listens for, and the explicit handles the host returns for
//!   each live subscription.
//!
//! The contract is deliberately headless and single-threaded. The host may
//! animate pan/zoom requests asynchronously on its own schedule; consumers
//! observe progress purely through [`HostEvent::Animation`] and
//! [`HostEvent::AnimationFinish`] notifications. Delivery is pull-based:
//! subscriptions tell the host which kinds a consumer wants, and the
//! embedder forwards the events it collects from its host integration.
//!
//! [`vantage_view_state`]: https://docs.rs/vantage_view_state
//!
//! This crate is `no_std`.

#![no_std]

mod events;
mod viewer;

pub use events::{HostEvent, SubscriptionId};
pub use viewer::{HostViewer, LayerTransform};
