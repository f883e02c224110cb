// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

use crate::events::{HostEvent, SubscriptionId};

/// One positioned image in the host's multi-image composition.
///
/// A layer knows its source image's native pixel dimensions and how to map a
/// point in container-element pixels onto that image's own pixel grid. The
/// layer transform accounts for the layer's placement, which may differ from
/// the overall viewport transform once more than one layer is present.
pub trait LayerTransform {
    /// The source image's native size in pixels.
    fn native_dimensions(&self) -> Size;

    /// Maps a container-element pixel coordinate to this layer's native
    /// image pixel coordinates.
    fn element_to_image(&self, point: Point) -> Point;
}

/// The contract a deep-zoom host viewer exposes to an attached adapter.
///
/// The host owns rendering, tiling, and animation; this trait only surfaces
/// the viewport state those produce, plus the commands that steer it. All
/// coordinates handed across this boundary are in the host's native logical
/// units, where the full image width spans `1.0` and the Y axis is *not*
/// corrected for the image's aspect ratio.
///
/// Pan/zoom commands may be animated by the host; `immediate` suppresses the
/// animation. The host reports progress through [`HostEvent::Animation`] and
/// [`HostEvent::AnimationFinish`] notifications rather than by blocking.
pub trait HostViewer {
    /// The host's capability (major) version.
    fn capability_version(&self) -> u32;

    /// Whether an adapter is already attached to this host.
    ///
    /// Hosts accept at most one adapter; the attach sequence checks this
    /// flag before claiming the slot with [`Self::set_adapter_attached`].
    fn adapter_attached(&self) -> bool;

    /// Claims or releases the host's single adapter slot.
    fn set_adapter_attached(&mut self, attached: bool);

    /// The current viewport bounds in host-native logical units.
    ///
    /// `constrained` asks for the bounds after the host applies its own
    /// panning/zooming constraints, which is what view tracking wants.
    fn viewport_bounds(&self, constrained: bool) -> Rect;

    /// The pixel size of the host's on-screen container element.
    fn container_pixel_size(&self) -> Size;

    /// Requests a zoom to `level` (host-native zoom units), optionally about
    /// a fixed point in host-native logical coordinates.
    fn zoom_to(&mut self, level: f64, about: Option<Point>, immediate: bool);

    /// Requests a pan centering the viewport on a host-native logical point.
    fn pan_to(&mut self, point: Point, immediate: bool);

    /// Resizes the host viewport to a new container pixel size.
    fn resize_viewport(&mut self, size: Size, immediate: bool);

    /// Whether the host itself adjusts the viewport when its container
    /// element is resized.
    fn auto_resize_enabled(&self) -> bool;

    /// Sets the host's own minimum zoom clamp, in host-native zoom units.
    fn set_min_zoom_level(&mut self, level: f64);

    /// Sets the host's own maximum zoom clamp, in host-native zoom units.
    fn set_max_zoom_level(&mut self, level: f64);

    /// Number of image layers currently managed by the host.
    fn layer_count(&self) -> usize;

    /// The layer at `index`, if present.
    fn layer_at(&self, index: usize) -> Option<&dyn LayerTransform>;

    /// Registers interest in a lifecycle notification kind.
    ///
    /// The returned handle stays live until passed to [`Self::unsubscribe`].
    fn subscribe(&mut self, event: HostEvent) -> SubscriptionId;

    /// Releases a subscription handle.
    ///
    /// Unknown or already-released handles are ignored.
    fn unsubscribe(&mut self, subscription: SubscriptionId);
}
