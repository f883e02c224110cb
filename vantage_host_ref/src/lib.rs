// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vantage Host Reference Implementation.
//!
//! This crate provides a small, stateful implementation of
//! [`HostViewer`] for **command recording and notification replay**.
//!
//! It is intentionally *not* a viewer:
//! - It does **not** render, tile, or fetch anything.
//! - It does **not** animate; pan/zoom commands apply synchronously and then
//!   queue the `Animation`/`AnimationFinish` notifications a real host would
//!   deliver over time.
//! - It is intended primarily for tests and debugging that want to assert on
//!   the exact commands an adapter issues and drive the adapter with
//!   scripted lifecycle notifications.
//!
//! Notifications queue only for kinds with at least one live subscription;
//! the embedder collects them with [`RefHost::drain_events`] and forwards
//! them to whatever is attached.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::mem;

use kurbo::{Point, Rect, Size};
use vantage_host::{HostEvent, HostViewer, LayerTransform, SubscriptionId};

/// One positioned image layer with a simple uniform placement.
///
/// The layer occupies the container element starting at `element_origin`,
/// with `pixels_per_image_pixel` container pixels covering one image pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefLayer {
    native: Size,
    element_origin: Point,
    pixels_per_image_pixel: f64,
}

impl RefLayer {
    /// Creates a layer of the given native size, placed at the container
    /// origin with one container pixel per image pixel.
    #[must_use]
    pub fn new(native: Size) -> Self {
        Self {
            native,
            element_origin: Point::ZERO,
            pixels_per_image_pixel: 1.0,
        }
    }

    /// Creates a layer with an explicit placement.
    #[must_use]
    pub fn with_placement(native: Size, element_origin: Point, pixels_per_image_pixel: f64) -> Self {
        Self {
            native,
            element_origin,
            pixels_per_image_pixel,
        }
    }
}

impl LayerTransform for RefLayer {
    fn native_dimensions(&self) -> Size {
        self.native
    }

    fn element_to_image(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.element_origin.x) / self.pixels_per_image_pixel,
            (point.y - self.element_origin.y) / self.pixels_per_image_pixel,
        )
    }
}

/// A command issued against the reference host, recorded for assertions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostCommand {
    /// `zoom_to` with its host-native zoom level and optional anchor.
    ZoomTo {
        /// Requested host-native zoom level.
        level: f64,
        /// Anchor point in host-native logical coordinates, if any.
        about: Option<Point>,
        /// Whether animation suppression was requested.
        immediate: bool,
    },
    /// `pan_to` with its host-native target center.
    PanTo {
        /// Requested viewport center in host-native logical coordinates.
        point: Point,
        /// Whether animation suppression was requested.
        immediate: bool,
    },
    /// `resize_viewport` with the new container pixel size.
    ResizeViewport {
        /// Requested container pixel size.
        size: Size,
        /// Whether animation suppression was requested.
        immediate: bool,
    },
    /// `set_min_zoom_level` with the host-native level.
    SetMinZoomLevel(f64),
    /// `set_max_zoom_level` with the host-native level.
    SetMaxZoomLevel(f64),
}

/// In-memory reference host viewer.
///
/// Starts with capability version 2, viewport bounds `{0, 0, 1, 1}`, an
/// 800×600 container, auto-resize enabled, and no layers.
#[derive(Debug)]
pub struct RefHost {
    capability_version: u32,
    attached: bool,
    auto_resize: bool,
    bounds: Rect,
    container: Size,
    min_zoom_level: f64,
    max_zoom_level: f64,
    layers: Vec<RefLayer>,
    next_subscription: u64,
    subscriptions: Vec<(SubscriptionId, HostEvent)>,
    pending: Vec<HostEvent>,
    commands: Vec<HostCommand>,
}

impl Default for RefHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RefHost {
    /// Creates a reference host in its default state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            capability_version: 2,
            attached: false,
            auto_resize: true,
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
            container: Size::new(800.0, 600.0),
            min_zoom_level: 0.0,
            max_zoom_level: f64::INFINITY,
            layers: Vec::new(),
            next_subscription: 0,
            subscriptions: Vec::new(),
            pending: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Overrides the reported capability version.
    pub fn set_capability_version(&mut self, version: u32) {
        self.capability_version = version;
    }

    /// Sets the container element pixel size without queuing a notification.
    pub fn set_container_pixel_size(&mut self, size: Size) {
        self.container = size;
    }

    /// Sets the viewport bounds directly, in host-native logical units.
    pub fn set_viewport_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Enables or disables the host's own container-resize handling.
    pub fn set_auto_resize(&mut self, enabled: bool) {
        self.auto_resize = enabled;
    }

    /// Installs the given layers and queues an [`HostEvent::Open`].
    pub fn open_image(&mut self, layers: Vec<RefLayer>) {
        self.layers = layers;
        self.emit(HostEvent::Open);
    }

    /// Removes all layers and queues an [`HostEvent::Close`].
    pub fn close_image(&mut self) {
        self.layers.clear();
        self.emit(HostEvent::Close);
    }

    /// Queues a notification if any live subscription covers its kind.
    pub fn emit(&mut self, event: HostEvent) {
        if self.subscriptions.iter().any(|(_, kind)| *kind == event) {
            self.pending.push(event);
        }
    }

    /// Returns and clears the queued notifications, in delivery order.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        mem::take(&mut self.pending)
    }

    /// The commands recorded so far, in issue order.
    #[must_use]
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Clears the recorded command log.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// The host's current minimum zoom clamp, in host-native zoom units.
    #[must_use]
    pub fn min_zoom_level(&self) -> f64 {
        self.min_zoom_level
    }

    /// The host's current maximum zoom clamp, in host-native zoom units.
    #[must_use]
    pub fn max_zoom_level(&self) -> f64 {
        self.max_zoom_level
    }
}

impl HostViewer for RefHost {
    fn capability_version(&self) -> u32 {
        self.capability_version
    }

    fn adapter_attached(&self) -> bool {
        self.attached
    }

    fn set_adapter_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    fn viewport_bounds(&self, _constrained: bool) -> Rect {
        self.bounds
    }

    fn container_pixel_size(&self) -> Size {
        self.container
    }

    fn zoom_to(&mut self, level: f64, about: Option<Point>, immediate: bool) {
        self.commands.push(HostCommand::ZoomTo {
            level,
            about,
            immediate,
        });
        if level > 0.0 {
            let old = self.bounds;
            let new_width = 1.0 / level;
            let new_height = if old.width() > 0.0 {
                old.height() * (new_width / old.width())
            } else {
                new_width
            };
            // Keep the anchor at the same relative position inside the bounds.
            let anchor = about.unwrap_or_else(|| old.center());
            let fx = if old.width() > 0.0 {
                (anchor.x - old.x0) / old.width()
            } else {
                0.5
            };
            let fy = if old.height() > 0.0 {
                (anchor.y - old.y0) / old.height()
            } else {
                0.5
            };
            let x0 = anchor.x - fx * new_width;
            let y0 = anchor.y - fy * new_height;
            self.bounds = Rect::new(x0, y0, x0 + new_width, y0 + new_height);
        }
        self.emit(HostEvent::Animation);
        self.emit(HostEvent::AnimationFinish);
    }

    fn pan_to(&mut self, point: Point, immediate: bool) {
        self.commands.push(HostCommand::PanTo { point, immediate });
        self.bounds = Rect::from_center_size(point, self.bounds.size());
        self.emit(HostEvent::Animation);
        self.emit(HostEvent::AnimationFinish);
    }

    fn resize_viewport(&mut self, size: Size, immediate: bool) {
        self.commands.push(HostCommand::ResizeViewport { size, immediate });
        self.container = size;
    }

    fn auto_resize_enabled(&self) -> bool {
        self.auto_resize
    }

    fn set_min_zoom_level(&mut self, level: f64) {
        self.commands.push(HostCommand::SetMinZoomLevel(level));
        self.min_zoom_level = level;
    }

    fn set_max_zoom_level(&mut self, level: f64) {
        self.commands.push(HostCommand::SetMaxZoomLevel(level));
        self.max_zoom_level = level;
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer_at(&self, index: usize) -> Option<&dyn LayerTransform> {
        self.layers.get(index).map(|layer| layer as &dyn LayerTransform)
    }

    fn subscribe(&mut self, event: HostEvent) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push((id, event));
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.subscriptions.retain(|(id, _)| *id != subscription);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect, Size};
    use vantage_host::{HostEvent, HostViewer, LayerTransform};

    use super::{HostCommand, RefHost, RefLayer};

    #[test]
    fn notifications_require_a_subscription() {
        let mut host = RefHost::new();
        host.open_image(vec![RefLayer::new(Size::new(100.0, 100.0))]);
        assert!(host.drain_events().is_empty(), "nothing subscribed to Open");

        let open = host.subscribe(HostEvent::Open);
        host.open_image(vec![RefLayer::new(Size::new(100.0, 100.0))]);
        assert_eq!(host.drain_events(), vec![HostEvent::Open]);

        host.unsubscribe(open);
        host.open_image(vec![RefLayer::new(Size::new(100.0, 100.0))]);
        assert!(host.drain_events().is_empty(), "subscription was released");
    }

    #[test]
    fn zoom_to_sets_width_from_level_and_keeps_anchor() {
        let mut host = RefHost::new();
        host.set_viewport_bounds(Rect::new(0.0, 0.0, 1.0, 1.0));

        host.zoom_to(2.0, Some(Point::new(0.5, 0.5)), true);
        let bounds = host.viewport_bounds(true);
        assert!((bounds.width() - 0.5).abs() < 1e-12, "width is 1/level");
        let center = bounds.center();
        assert!((center.x - 0.5).abs() < 1e-12, "anchor stays centered");
        assert!((center.y - 0.5).abs() < 1e-12, "anchor stays centered");
        assert_eq!(
            host.commands(),
            &[HostCommand::ZoomTo {
                level: 2.0,
                about: Some(Point::new(0.5, 0.5)),
                immediate: true,
            }],
        );
    }

    #[test]
    fn pan_to_recenters_without_resizing() {
        let mut host = RefHost::new();
        host.set_viewport_bounds(Rect::new(0.0, 0.0, 0.5, 0.5));
        host.pan_to(Point::new(0.5, 0.5), false);
        let bounds = host.viewport_bounds(true);
        assert!((bounds.width() - 0.5).abs() < 1e-12, "size preserved");
        assert!((bounds.center().x - 0.5).abs() < 1e-12, "recentered");
    }

    #[test]
    fn layer_placement_maps_element_pixels_to_image_pixels() {
        let layer =
            RefLayer::with_placement(Size::new(400.0, 300.0), Point::new(100.0, 50.0), 0.5);
        let image = layer.element_to_image(Point::new(150.0, 100.0));
        assert!((image.x - 100.0).abs() < 1e-12, "x placement applied");
        assert!((image.y - 100.0).abs() < 1e-12, "y placement applied");
    }
}
