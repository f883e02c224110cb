// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::{Point, Size, Vec2};
use log::{debug, trace};
use vantage_host::{HostEvent, HostViewer, SubscriptionId};

use crate::emitter::{Emitter, ListenerId};
use crate::error::{AttachError, MIN_HOST_VERSION};
use crate::snapshot::{ImageMetadata, ViewChange, ViewportSnapshot, ZoomLimits};

/// Shared, single-threaded handle to a host viewer.
///
/// The embedder keeps its own handle to the host; the adapter only borrows
/// it for the duration of each operation. There is no concurrent mutation
/// path: everything runs synchronously inside the embedder's event loop.
pub type SharedHost<H> = Rc<RefCell<H>>;

/// Tracks a host viewer's viewport and converts between its coordinate
/// spaces.
///
/// An adapter binds exactly once to a given host (enforced through the
/// host's single adapter slot) and holds subscription handles for the
/// host's lifecycle notifications until [`detach`](Self::detach). The
/// embedder forwards each notification it collects from the host to
/// [`handle_notification`](Self::handle_notification); the adapter reacts by
/// refreshing its cached [`ViewportSnapshot`] and emitting one consolidated
/// `view-changed` notification.
///
/// Operation only has effect while an image is open. Without one, every
/// conversion returns zero and every zoom/pan request is a silent no-op.
pub struct ViewStateAdapter<H: HostViewer> {
    host: SharedHost<H>,
    world_index: usize,
    subscriptions: Vec<SubscriptionId>,
    emitter: Emitter<ViewChange>,
    pub(crate) image: ImageMetadata,
    pub(crate) has_image: bool,
    limits: ZoomLimits,
    pub(crate) snapshot: ViewportSnapshot,
    last_container_size: Option<Size>,
}

/// Builder for [`ViewStateAdapter`].
///
/// Obtained from [`ViewStateAdapter::builder`]; [`attach`](Self::attach)
/// performs the capability and exclusivity checks and claims the host.
pub struct ViewStateAdapterBuilder<H: HostViewer> {
    host: Option<SharedHost<H>>,
    world_index: usize,
    on_view_changed: Option<Box<dyn FnMut(&ViewChange)>>,
}

impl<H: HostViewer> Default for ViewStateAdapterBuilder<H> {
    fn default() -> Self {
        Self {
            host: None,
            world_index: 0,
            on_view_changed: None,
        }
    }
}

impl<H: HostViewer> ViewStateAdapterBuilder<H> {
    /// Sets the host viewer to attach to.
    #[must_use]
    pub fn host(mut self, host: SharedHost<H>) -> Self {
        self.host = Some(host);
        self
    }

    /// Selects which host layer provides the image metadata and the
    /// delegated physical→data transform. Defaults to `0`.
    #[must_use]
    pub fn world_index(mut self, index: usize) -> Self {
        self.world_index = index;
        self
    }

    /// Registers a `view-changed` listener before the first notification
    /// can fire.
    #[must_use]
    pub fn on_view_changed(mut self, listener: impl FnMut(&ViewChange) + 'static) -> Self {
        self.on_view_changed = Some(Box::new(listener));
        self
    }

    /// Attaches to the host, claiming its single adapter slot and
    /// subscribing to all lifecycle notifications.
    ///
    /// # Errors
    ///
    /// - [`AttachError::MissingHost`] if no host was supplied.
    /// - [`AttachError::UnsupportedHostVersion`] if the host's capability
    ///   version is below [`MIN_HOST_VERSION`].
    /// - [`AttachError::AlreadyAttached`] if the host already owns an
    ///   adapter.
    ///
    /// All checks run before the host is mutated, so a failed attach leaves
    /// the host untouched.
    pub fn attach(self) -> Result<ViewStateAdapter<H>, AttachError> {
        let host = self.host.ok_or(AttachError::MissingHost)?;
        {
            let shared = host.borrow();
            let found = shared.capability_version();
            if found < MIN_HOST_VERSION {
                return Err(AttachError::UnsupportedHostVersion {
                    found,
                    required: MIN_HOST_VERSION,
                });
            }
            if shared.adapter_attached() {
                return Err(AttachError::AlreadyAttached);
            }
        }

        let subscriptions = {
            let mut shared = host.borrow_mut();
            shared.set_adapter_attached(true);
            HostEvent::ALL
                .iter()
                .map(|&event| shared.subscribe(event))
                .collect()
        };

        let mut emitter = Emitter::new();
        if let Some(listener) = self.on_view_changed {
            emitter.add(listener);
        }

        debug!(
            "view-state adapter attached (world index {})",
            self.world_index
        );
        Ok(ViewStateAdapter {
            host,
            world_index: self.world_index,
            subscriptions,
            emitter,
            image: ImageMetadata::default(),
            has_image: false,
            limits: ZoomLimits::default(),
            snapshot: ViewportSnapshot::default(),
            last_container_size: None,
        })
    }
}

impl<H: HostViewer> ViewStateAdapter<H> {
    /// Starts building an adapter.
    #[must_use]
    pub fn builder() -> ViewStateAdapterBuilder<H> {
        ViewStateAdapterBuilder::default()
    }

    /// Detaches from the host: releases every lifecycle subscription and
    /// frees the host's adapter slot.
    ///
    /// Consumes the adapter, so detaching twice is unrepresentable.
    pub fn detach(mut self) {
        let mut host = self.host.borrow_mut();
        for subscription in self.subscriptions.drain(..) {
            host.unsubscribe(subscription);
        }
        host.set_adapter_attached(false);
        debug!("view-state adapter detached");
    }

    /// Whether an image is currently open.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.has_image
    }

    /// Native dimensions of the open image; zeroed when none is open.
    #[must_use]
    pub fn image_metadata(&self) -> ImageMetadata {
        self.image
    }

    /// The current aspect-corrected viewport snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ViewportSnapshot {
        self.snapshot
    }

    /// The current zoom factor (displayed size over native size).
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.snapshot.zoom_factor
    }

    /// The configured zoom limits and step.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        self.limits
    }

    /// The layer index this adapter was configured with.
    #[must_use]
    pub fn world_index(&self) -> usize {
        self.world_index
    }

    /// The host container's current pixel size.
    #[must_use]
    pub fn container_pixel_size(&self) -> Size {
        self.host.borrow().container_pixel_size()
    }

    pub(crate) fn host(&self) -> &SharedHost<H> {
        &self.host
    }

    /// Registers a `view-changed` listener.
    pub fn on_view_changed(&mut self, listener: impl FnMut(&ViewChange) + 'static) -> ListenerId {
        self.emitter.add(Box::new(listener))
    }

    /// Removes a `view-changed` listener, returning whether the id was
    /// still registered.
    pub fn remove_view_changed_listener(&mut self, id: ListenerId) -> bool {
        self.emitter.remove(id)
    }

    /// Reacts to one host lifecycle notification.
    ///
    /// `Open` installs the image metadata from the configured layer and
    /// recomputes; `Close` clears it. Animation, full-page, and full-screen
    /// notifications recompute the snapshot while an image is open. `Resize`
    /// recomputes only when the host handles container resizes itself; pair
    /// hosts with auto-resize disabled with [`notify_resize`](Self::notify_resize).
    pub fn handle_notification(&mut self, event: HostEvent) {
        match event {
            HostEvent::Open => self.on_open(),
            HostEvent::Close => self.on_close(),
            HostEvent::Animation
            | HostEvent::AnimationFinish
            | HostEvent::FullPage
            | HostEvent::FullScreen => {
                if self.has_image {
                    self.recompute();
                }
            }
            HostEvent::Resize => {
                if self.has_image && self.host.borrow().auto_resize_enabled() {
                    self.recompute();
                }
            }
        }
    }

    /// Sets the zoom factor, keeping the current logical center fixed.
    ///
    /// No-op without an image, for non-positive values, and for values equal
    /// to the current zoom factor (so repeated calls issue no redundant host
    /// commands).
    pub fn set_zoom_factor(&mut self, value: f64, immediate: bool) {
        if !self.has_image || value <= 0.0 || value == self.snapshot.zoom_factor {
            return;
        }
        let level = self.zoom_factor_to_level(value);
        let about = self.to_native_point(self.snapshot.center);
        self.host.borrow_mut().zoom_to(level, Some(about), immediate);
    }

    /// Zooms in by one step of `step_percent`, clamped to the maximum.
    pub fn zoom_in(&mut self, immediate: bool) {
        let stepped = self.stepped_in();
        self.set_zoom_factor(stepped, immediate);
    }

    /// Zooms out by one step of `step_percent`, clamped to the minimum.
    pub fn zoom_out(&mut self, immediate: bool) {
        let stepped = self.stepped_out();
        self.set_zoom_factor(stepped, immediate);
    }

    /// Sets the zoom factor, keeping an arbitrary logical point fixed in
    /// its current displayed position.
    pub fn zoom_about_logical_point(&mut self, value: f64, point: Point, immediate: bool) {
        if !self.has_image || value <= 0.0 || value == self.snapshot.zoom_factor {
            return;
        }
        let level = self.zoom_factor_to_level(value);
        let about = self.to_native_point(point);
        self.host.borrow_mut().zoom_to(level, Some(about), immediate);
    }

    /// Zooms in by one step, keeping the logical point fixed.
    pub fn zoom_in_about_logical_point(&mut self, point: Point, immediate: bool) {
        let stepped = self.stepped_in();
        self.zoom_about_logical_point(stepped, point, immediate);
    }

    /// Zooms out by one step, keeping the logical point fixed.
    pub fn zoom_out_about_logical_point(&mut self, point: Point, immediate: bool) {
        let stepped = self.stepped_out();
        self.zoom_about_logical_point(stepped, point, immediate);
    }

    /// Pans so the given logical point becomes the viewport center.
    ///
    /// No-op without an image or when the point already is the center.
    pub fn center_about_logical_point(&mut self, point: Point, immediate: bool) {
        if !self.has_image || point == self.snapshot.center {
            return;
        }
        let native = self.to_native_point(point);
        self.host.borrow_mut().pan_to(native, immediate);
    }

    /// Zooms and/or pans to the given viewport width and center.
    ///
    /// Zoom and pan are requested independently, each only when it differs
    /// from the current snapshot, to avoid redundant host commands.
    /// `height` has no independent effect: the host preserves the native
    /// aspect ratio, so the effective height follows from `width`.
    pub fn set_view(&mut self, width: f64, height: f64, center: Point, immediate: bool) {
        if !self.has_image {
            return;
        }
        if width > 0.0 && (self.snapshot.width != width || self.snapshot.height != height) {
            self.host.borrow_mut().zoom_to(1.0 / width, None, immediate);
        }
        if center != self.snapshot.center {
            let native = self.to_native_point(center);
            self.host.borrow_mut().pan_to(native, immediate);
        }
    }

    /// The minimum zoom factor used by the stepped zoom operations.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.limits.min
    }

    /// Sets the minimum zoom factor and pushes the equivalent host-native
    /// level into the host's own clamping configuration.
    pub fn set_min_zoom(&mut self, value: f64) {
        self.limits.min = value;
        let level = self.zoom_factor_to_level(value);
        self.host.borrow_mut().set_min_zoom_level(level);
    }

    /// The maximum zoom factor used by the stepped zoom operations.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.limits.max
    }

    /// Sets the maximum zoom factor and pushes the equivalent host-native
    /// level into the host's own clamping configuration.
    pub fn set_max_zoom(&mut self, value: f64) {
        self.limits.max = value;
        let level = self.zoom_factor_to_level(value);
        self.host.borrow_mut().set_max_zoom_level(level);
    }

    /// The percentage applied per stepped zoom-in/out.
    #[must_use]
    pub fn zoom_step_percent(&self) -> f64 {
        self.limits.step_percent
    }

    /// Sets the percentage applied per stepped zoom-in/out.
    pub fn set_zoom_step_percent(&mut self, value: f64) {
        self.limits.step_percent = value;
    }

    /// Preserves zoom factor and logical center across a container resize,
    /// for hosts with auto-resize disabled.
    ///
    /// Compares the container's current pixel size to the last-known size;
    /// when unchanged this is a no-op issuing no host commands and emitting
    /// nothing. Otherwise the host viewport is resized, the pre-resize zoom
    /// factor is re-derived against the new container width, the logical
    /// center is re-applied, and one `view-changed` fires with the preserved
    /// snapshot.
    pub fn notify_resize(&mut self) {
        if !self.has_image {
            return;
        }
        let new_size = self.container_pixel_size();
        if self.last_container_size == Some(new_size) {
            return;
        }
        self.last_container_size = Some(new_size);

        let center = self.to_native_point(self.snapshot.center);
        let level = (self.snapshot.zoom_factor * self.image.width) / new_size.width;
        {
            let mut host = self.host.borrow_mut();
            host.resize_viewport(new_size, true);
            host.zoom_to(level, None, true);
            host.pan_to(center, false);
        }
        debug!(
            "container resized to {}x{} px, view preserved",
            new_size.width, new_size.height
        );
        self.emit_view_changed();
    }

    fn on_open(&mut self) {
        let native = {
            let host = self.host.borrow();
            host.layer_at(self.world_index)
                .map(|layer| layer.native_dimensions())
        };
        // A missing layer leaves the adapter imageless rather than failing.
        let Some(native) = native else {
            return;
        };
        self.image = ImageMetadata::from_native(native);
        self.has_image = true;
        debug!("image opened: {}x{} px", native.width, native.height);
        self.recompute();
    }

    fn on_close(&mut self) {
        self.has_image = false;
        self.image = ImageMetadata::default();
        debug!("image closed");
    }

    /// Refreshes the cached snapshot from the host's current viewport and
    /// emits `view-changed`. Callers guarantee an image is open.
    fn recompute(&mut self) {
        let (bounds, container) = {
            let host = self.host.borrow();
            (host.viewport_bounds(true), host.container_pixel_size())
        };
        let aspect = self.image.aspect_ratio;
        let width = bounds.width();
        let height = bounds.height() * aspect;
        let origin = Point::new(bounds.x0, bounds.y0 * aspect);
        let center = origin + Vec2::new(width / 2.0, height / 2.0);
        let zoom_factor = container.width / (width * self.image.width);
        self.snapshot = ViewportSnapshot {
            width,
            height,
            origin,
            center,
            zoom_factor,
        };
        self.last_container_size = Some(container);
        trace!(
            "viewport snapshot: origin ({}, {}), {}x{}, zoom {}",
            origin.x, origin.y, width, height, zoom_factor
        );
        self.emit_view_changed();
    }

    fn emit_view_changed(&mut self) {
        let event = ViewChange {
            viewport_width: self.snapshot.width,
            viewport_height: self.snapshot.height,
            viewport_origin: self.snapshot.origin,
            viewport_center: self.snapshot.center,
            zoom_factor: self.snapshot.zoom_factor,
        };
        self.emitter.emit(&event);
    }

    /// Converts a logical point to host-native coordinates (un-scales Y).
    fn to_native_point(&self, logical: Point) -> Point {
        Point::new(logical.x, logical.y / self.image.aspect_ratio)
    }

    /// Translates a zoom factor into the host's native zoom level.
    fn zoom_factor_to_level(&self, factor: f64) -> f64 {
        (factor * self.image.width) / self.container_pixel_size().width
    }

    fn stepped_in(&self) -> f64 {
        let stepped = self.snapshot.zoom_factor * (1.0 + self.limits.step_percent / 100.0);
        stepped.min(self.limits.max)
    }

    fn stepped_out(&self) -> f64 {
        let stepped = self.snapshot.zoom_factor / (1.0 + self.limits.step_percent / 100.0);
        stepped.max(self.limits.min)
    }
}

impl<H: HostViewer> fmt::Debug for ViewStateAdapter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStateAdapter")
            .field("world_index", &self.world_index)
            .field("has_image", &self.has_image)
            .field("image", &self.image)
            .field("limits", &self.limits)
            .field("snapshot", &self.snapshot)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

impl<H: HostViewer> fmt::Debug for ViewStateAdapterBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStateAdapterBuilder")
            .field("has_host", &self.host.is_some())
            .field("world_index", &self.world_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use vantage_host::HostViewer;
    use vantage_host_ref::RefHost;

    use super::ViewStateAdapter;
    use crate::error::{AttachError, MIN_HOST_VERSION};

    #[test]
    fn attach_without_host_is_rejected() {
        let result = ViewStateAdapter::<RefHost>::builder().attach();
        assert_eq!(result.unwrap_err(), AttachError::MissingHost);
    }

    #[test]
    fn attach_rejects_old_hosts_without_touching_them() {
        let host = Rc::new(RefCell::new(RefHost::new()));
        host.borrow_mut().set_capability_version(1);

        let result = ViewStateAdapter::builder().host(Rc::clone(&host)).attach();
        assert_eq!(
            result.unwrap_err(),
            AttachError::UnsupportedHostVersion {
                found: 1,
                required: MIN_HOST_VERSION,
            },
        );
        assert!(!host.borrow().adapter_attached(), "slot left free");
        assert_eq!(host.borrow().subscription_count(), 0, "no subscriptions");
    }

    #[test]
    fn attach_claims_the_slot_and_subscribes_to_every_event() {
        let host = Rc::new(RefCell::new(RefHost::new()));
        let adapter = ViewStateAdapter::builder()
            .host(Rc::clone(&host))
            .attach()
            .unwrap();

        assert!(host.borrow().adapter_attached(), "slot claimed");
        assert_eq!(
            host.borrow().subscription_count(),
            7,
            "one subscription per lifecycle kind"
        );
        assert!(!adapter.has_image(), "starts without an image");
    }

    #[test]
    fn detach_releases_subscriptions_and_the_slot() {
        let host = Rc::new(RefCell::new(RefHost::new()));
        let adapter = ViewStateAdapter::builder()
            .host(Rc::clone(&host))
            .attach()
            .unwrap();
        adapter.detach();

        assert!(!host.borrow().adapter_attached(), "slot released");
        assert_eq!(host.borrow().subscription_count(), 0, "handles released");

        // A detached host accepts a fresh adapter again.
        assert!(
            ViewStateAdapter::builder()
                .host(Rc::clone(&host))
                .attach()
                .is_ok(),
            "reattach succeeds after detach"
        );
    }

    #[test]
    fn second_adapter_is_rejected_and_first_keeps_its_state() {
        let host = Rc::new(RefCell::new(RefHost::new()));
        let first = ViewStateAdapter::builder()
            .host(Rc::clone(&host))
            .attach()
            .unwrap();

        let second = ViewStateAdapter::builder().host(Rc::clone(&host)).attach();
        assert_eq!(second.unwrap_err(), AttachError::AlreadyAttached);
        assert_eq!(
            host.borrow().subscription_count(),
            7,
            "first adapter's subscriptions intact"
        );
        assert_eq!(first.zoom_factor(), 1.0, "first adapter undisturbed");
    }
}
