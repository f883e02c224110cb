// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};

/// Cached, aspect-ratio-corrected view of the host viewport.
///
/// All fields are in logical units: X spans the image width as `0.0..1.0`,
/// and Y is the host-native Y scaled by the image aspect ratio, so logical
/// space has unit aspect ratio matching the image. The snapshot is mutated
/// only when the adapter recomputes it from host state; consumers read it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSnapshot {
    /// Viewport width in logical units.
    pub width: f64,
    /// Viewport height in logical units (aspect-corrected).
    pub height: f64,
    /// Top-left corner of the viewport in logical units.
    pub origin: Point,
    /// Center of the viewport in logical units.
    pub center: Point,
    /// Ratio of displayed size to the image's native size.
    pub zoom_factor: f64,
}

impl Default for ViewportSnapshot {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            origin: Point::ZERO,
            center: Point::ZERO,
            zoom_factor: 1.0,
        }
    }
}

/// Native dimensions of the currently open image.
///
/// Zeroed whenever no image is open; `aspect_ratio` is `width / height` and
/// likewise zero when unavailable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImageMetadata {
    /// Native image width in pixels.
    pub width: f64,
    /// Native image height in pixels.
    pub height: f64,
    /// `width / height`, or zero when undefined.
    pub aspect_ratio: f64,
}

impl ImageMetadata {
    pub(crate) fn from_native(native: Size) -> Self {
        let aspect_ratio = if native.height > 0.0 {
            native.width / native.height
        } else {
            0.0
        };
        Self {
            width: native.width,
            height: native.height,
            aspect_ratio,
        }
    }
}

/// Zoom-factor limits and the step used by the convenience zoom operations.
///
/// `step_percent` only drives [`zoom_in`]/[`zoom_out`] and their
/// about-a-point variants; it is not enforced on direct
/// [`set_zoom_factor`] calls.
///
/// [`zoom_in`]: crate::ViewStateAdapter::zoom_in
/// [`zoom_out`]: crate::ViewStateAdapter::zoom_out
/// [`set_zoom_factor`]: crate::ViewStateAdapter::set_zoom_factor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    /// Minimum zoom factor allowed by the stepped operations.
    pub min: f64,
    /// Maximum zoom factor allowed by the stepped operations.
    pub max: f64,
    /// Percentage applied per stepped zoom-in/out.
    pub step_percent: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.001,
            max: 10.0,
            step_percent: 30.0,
        }
    }
}

/// Payload of the consolidated `view-changed` notification.
///
/// Carries the full viewport snapshot current at emission time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewChange {
    /// Viewport width in logical units.
    pub viewport_width: f64,
    /// Viewport height in logical units (aspect-corrected).
    pub viewport_height: f64,
    /// Top-left corner of the viewport in logical units.
    pub viewport_origin: Point,
    /// Center of the viewport in logical units.
    pub viewport_center: Point,
    /// Ratio of displayed size to the image's native size.
    pub zoom_factor: f64,
}
