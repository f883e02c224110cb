// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vantage View State: viewport tracking and coordinate conversion for
//! deep-zoom viewers.
//!
//! This crate provides [`ViewStateAdapter`], a small helper that attaches to
//! a deep-zoom host viewer (any [`HostViewer`] implementation) and maintains
//! an aspect-ratio-corrected snapshot of its viewport. On top of that
//! snapshot it offers:
//!
//! - Pure conversions between three coordinate spaces: **physical**
//!   (container pixels), **logical** (normalized, aspect-corrected viewport
//!   units), and **data** (native image pixels).
//! - Zoom and pan convenience operations that compute target viewport
//!   parameters and delegate to the host.
//! - One consolidated `view-changed` notification, re-broadcasting the
//!   host's scattered lifecycle events as a single snapshot stream.
//!
//! The adapter renders nothing and never schedules work of its own: all
//! recomputation happens synchronously as the embedder forwards host
//! lifecycle notifications to [`ViewStateAdapter::handle_notification`].
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Size};
//! use vantage_host_ref::{RefHost, RefLayer};
//! use vantage_view_state::ViewStateAdapter;
//!
//! let host = Rc::new(RefCell::new(RefHost::new()));
//! host.borrow_mut().set_container_pixel_size(Size::new(800.0, 400.0));
//!
//! let mut adapter = ViewStateAdapter::builder()
//!     .host(Rc::clone(&host))
//!     .attach()
//!     .expect("a fresh host accepts one adapter");
//!
//! // The embedder forwards host notifications to the adapter.
//! host.borrow_mut()
//!     .open_image(vec![RefLayer::new(Size::new(4000.0, 2000.0))]);
//! let events = host.borrow_mut().drain_events();
//! for event in events {
//!     adapter.handle_notification(event);
//! }
//!
//! // 800 px of container width showing the full 4000 px wide image.
//! assert_eq!(adapter.zoom_factor(), 0.2);
//!
//! // Logical space has unit aspect ratio: the image center is (0.5, 0.5).
//! let data = adapter.logical_to_data_point(Point::new(0.5, 0.5));
//! assert_eq!(data, Point::new(2000.0, 1000.0));
//! ```
//!
//! ## Coordinate spaces
//!
//! - **Physical**: pixel coordinates relative to the host's on-screen
//!   container element.
//! - **Logical**: unit-less coordinates relative to the visible viewport,
//!   with the Y axis scaled by the image's aspect ratio so that the image
//!   occupies the unit square.
//! - **Data**: native pixel coordinates of the source image.
//!
//! When no image is open, every conversion returns zero and every zoom/pan
//! operation is a silent no-op; a continuously polled UI helper prefers
//! robustness over strict validation.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod adapter;
mod convert;
mod emitter;
mod error;
mod snapshot;

pub use adapter::{SharedHost, ViewStateAdapter, ViewStateAdapterBuilder};
pub use emitter::ListenerId;
pub use error::{AttachError, MIN_HOST_VERSION};
pub use snapshot::{ImageMetadata, ViewChange, ViewportSnapshot, ZoomLimits};

// The host contract this adapter consumes, re-exported for convenience.
pub use vantage_host::{HostEvent, HostViewer, LayerTransform, SubscriptionId};
