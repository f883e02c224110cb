// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate conversions between physical, logical, and data space.
//!
//! All conversions are pure functions of the adapter's cached snapshot, the
//! image metadata, and the live container size. They return zero (or a zero
//! point) whenever no image is open or an input dimension is degenerate.

use kurbo::Point;
use vantage_host::HostViewer;

use crate::adapter::ViewStateAdapter;

/// Which transform serves physical→data conversions for the current call.
///
/// Selected per call from the live layer count: with a single layer the
/// adapter's own aspect-corrected snapshot composes the conversion, but once
/// several independently positioned layers exist that snapshot no longer
/// describes the configured layer, so the host's own layer transform is
/// consulted instead. The choice is never cached; the layer count can change
/// between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LayerStrategy {
    SingleLayer,
    Delegated(usize),
}

impl<H: HostViewer> ViewStateAdapter<H> {
    fn layer_strategy(&self) -> LayerStrategy {
        if self.host().borrow().layer_count() == 1 {
            LayerStrategy::SingleLayer
        } else {
            LayerStrategy::Delegated(self.world_index())
        }
    }

    /// Converts a physical (container pixel) X coordinate to logical space.
    #[must_use]
    pub fn physical_to_logical_x(&self, x: f64) -> f64 {
        if !self.has_image {
            return 0.0;
        }
        self.snapshot.origin.x + (x / self.container_pixel_size().width) * self.snapshot.width
    }

    /// Converts a physical (container pixel) Y coordinate to logical space.
    #[must_use]
    pub fn physical_to_logical_y(&self, y: f64) -> f64 {
        if !self.has_image {
            return 0.0;
        }
        self.snapshot.origin.y + (y / self.container_pixel_size().height) * self.snapshot.height
    }

    /// Converts a physical point to logical space.
    #[must_use]
    pub fn physical_to_logical_point(&self, point: Point) -> Point {
        Point::new(
            self.physical_to_logical_x(point.x),
            self.physical_to_logical_y(point.y),
        )
    }

    /// Converts a logical X coordinate to physical (container pixel) space.
    #[must_use]
    pub fn logical_to_physical_x(&self, x: f64) -> f64 {
        if !self.has_image {
            return 0.0;
        }
        ((x - self.snapshot.origin.x) / self.snapshot.width) * self.container_pixel_size().width
    }

    /// Converts a logical Y coordinate to physical (container pixel) space.
    #[must_use]
    pub fn logical_to_physical_y(&self, y: f64) -> f64 {
        if !self.has_image {
            return 0.0;
        }
        ((y - self.snapshot.origin.y) / self.snapshot.height) * self.container_pixel_size().height
    }

    /// Converts a logical point to physical space.
    #[must_use]
    pub fn logical_to_physical_point(&self, point: Point) -> Point {
        Point::new(
            self.logical_to_physical_x(point.x),
            self.logical_to_physical_y(point.y),
        )
    }

    /// Converts a physical distance to logical units (X-axis scale, no
    /// origin offset).
    #[must_use]
    pub fn physical_to_logical_distance(&self, distance: f64) -> f64 {
        if !self.has_image {
            return 0.0;
        }
        (distance / self.container_pixel_size().width) * self.snapshot.width
    }

    /// Converts a logical distance to physical units (X-axis scale, no
    /// origin offset).
    #[must_use]
    pub fn logical_to_physical_distance(&self, distance: f64) -> f64 {
        if !self.has_image {
            return 0.0;
        }
        (distance / self.snapshot.width) * self.container_pixel_size().width
    }

    /// Converts a logical X coordinate to data (native image pixel) space.
    #[must_use]
    pub fn logical_to_data_x(&self, x: f64) -> f64 {
        if !self.has_image {
            return 0.0;
        }
        x * self.image.width
    }

    /// Converts a logical Y coordinate to data (native image pixel) space.
    #[must_use]
    pub fn logical_to_data_y(&self, y: f64) -> f64 {
        if !self.has_image {
            return 0.0;
        }
        y * self.image.height
    }

    /// Converts a logical point to data space.
    #[must_use]
    pub fn logical_to_data_point(&self, point: Point) -> Point {
        Point::new(
            self.logical_to_data_x(point.x),
            self.logical_to_data_y(point.y),
        )
    }

    /// Converts a data X coordinate to logical space.
    #[must_use]
    pub fn data_to_logical_x(&self, x: f64) -> f64 {
        if self.has_image && self.image.width > 0.0 {
            x / self.image.width
        } else {
            0.0
        }
    }

    /// Converts a data Y coordinate to logical space.
    #[must_use]
    pub fn data_to_logical_y(&self, y: f64) -> f64 {
        if self.has_image && self.image.height > 0.0 {
            y / self.image.height
        } else {
            0.0
        }
    }

    /// Converts a data point to logical space.
    #[must_use]
    pub fn data_to_logical_point(&self, point: Point) -> Point {
        Point::new(
            self.data_to_logical_x(point.x),
            self.data_to_logical_y(point.y),
        )
    }

    /// Converts a physical X coordinate to data space.
    ///
    /// With more than one host layer this delegates to the configured
    /// layer's own element→image transform.
    #[must_use]
    pub fn physical_to_data_x(&self, x: f64) -> f64 {
        match self.layer_strategy() {
            LayerStrategy::SingleLayer => {
                let container = self.container_pixel_size();
                if self.has_image && container.width > 0.0 {
                    (self.snapshot.origin.x + (x / container.width) * self.snapshot.width)
                        * self.image.width
                } else {
                    0.0
                }
            }
            LayerStrategy::Delegated(index) => {
                let host = self.host().borrow();
                host.layer_at(index)
                    .map_or(0.0, |layer| layer.element_to_image(Point::new(x, 0.0)).x)
            }
        }
    }

    /// Converts a physical Y coordinate to data space.
    ///
    /// With more than one host layer this delegates to the configured
    /// layer's own element→image transform.
    #[must_use]
    pub fn physical_to_data_y(&self, y: f64) -> f64 {
        match self.layer_strategy() {
            LayerStrategy::SingleLayer => {
                let container = self.container_pixel_size();
                if self.has_image && container.height > 0.0 {
                    (self.snapshot.origin.y + (y / container.height) * self.snapshot.height)
                        * self.image.height
                } else {
                    0.0
                }
            }
            LayerStrategy::Delegated(index) => {
                let host = self.host().borrow();
                host.layer_at(index)
                    .map_or(0.0, |layer| layer.element_to_image(Point::new(0.0, y)).y)
            }
        }
    }

    /// Converts a physical point to data space.
    #[must_use]
    pub fn physical_to_data_point(&self, point: Point) -> Point {
        match self.layer_strategy() {
            LayerStrategy::SingleLayer => Point::new(
                self.physical_to_data_x(point.x),
                self.physical_to_data_y(point.y),
            ),
            LayerStrategy::Delegated(index) => {
                let host = self.host().borrow();
                host.layer_at(index)
                    .map_or(Point::ZERO, |layer| layer.element_to_image(point))
            }
        }
    }

    /// Converts a data X coordinate to physical space.
    #[must_use]
    pub fn data_to_physical_x(&self, x: f64) -> f64 {
        if self.has_image && self.image.width > 0.0 {
            ((x / self.image.width - self.snapshot.origin.x) / self.snapshot.width)
                * self.container_pixel_size().width
        } else {
            0.0
        }
    }

    /// Converts a data Y coordinate to physical space.
    #[must_use]
    pub fn data_to_physical_y(&self, y: f64) -> f64 {
        if self.has_image && self.image.height > 0.0 {
            ((y / self.image.height - self.snapshot.origin.y) / self.snapshot.height)
                * self.container_pixel_size().height
        } else {
            0.0
        }
    }

    /// Converts a data point to physical space.
    #[must_use]
    pub fn data_to_physical_point(&self, point: Point) -> Point {
        Point::new(
            self.data_to_physical_x(point.x),
            self.data_to_physical_y(point.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use kurbo::{Point, Rect, Size};
    use vantage_host_ref::{RefHost, RefLayer};

    use crate::adapter::ViewStateAdapter;

    fn attached_with_image(
        container: Size,
        image: Size,
    ) -> (Rc<RefCell<RefHost>>, ViewStateAdapter<RefHost>) {
        let host = Rc::new(RefCell::new(RefHost::new()));
        {
            let mut host = host.borrow_mut();
            host.set_container_pixel_size(container);
            host.set_viewport_bounds(Rect::new(0.0, 0.0, 1.0, 1.0));
        }
        let mut adapter = ViewStateAdapter::builder()
            .host(Rc::clone(&host))
            .attach()
            .unwrap();
        host.borrow_mut().open_image(vec![RefLayer::new(image)]);
        let events = host.borrow_mut().drain_events();
        for event in events {
            adapter.handle_notification(event);
        }
        (host, adapter)
    }

    #[test]
    fn everything_is_zero_without_an_image() {
        let host = Rc::new(RefCell::new(RefHost::new()));
        let adapter = ViewStateAdapter::builder()
            .host(Rc::clone(&host))
            .attach()
            .unwrap();

        let point = Point::new(123.0, 456.0);
        assert_eq!(adapter.physical_to_logical_point(point), Point::ZERO);
        assert_eq!(adapter.logical_to_physical_point(point), Point::ZERO);
        assert_eq!(adapter.logical_to_data_point(point), Point::ZERO);
        assert_eq!(adapter.data_to_logical_point(point), Point::ZERO);
        assert_eq!(adapter.data_to_physical_point(point), Point::ZERO);
        assert_eq!(adapter.physical_to_logical_distance(10.0), 0.0);
        assert_eq!(adapter.logical_to_physical_distance(10.0), 0.0);
    }

    #[test]
    fn physical_logical_round_trip() {
        let (_host, adapter) =
            attached_with_image(Size::new(800.0, 400.0), Size::new(4000.0, 2000.0));

        for &(x, y) in &[(0.0, 0.0), (0.25, 0.5), (0.7, 0.1), (1.0, 1.0)] {
            let logical = Point::new(x, y);
            let physical = adapter.logical_to_physical_point(logical);
            let back = adapter.physical_to_logical_point(physical);
            assert!((back.x - logical.x).abs() < 1e-9, "x round trip at {x}");
            assert!((back.y - logical.y).abs() < 1e-9, "y round trip at {y}");
        }
    }

    #[test]
    fn data_logical_round_trip() {
        let (_host, adapter) =
            attached_with_image(Size::new(800.0, 400.0), Size::new(4000.0, 2000.0));

        for &(x, y) in &[(0.0, 0.0), (1000.0, 250.0), (4000.0, 2000.0)] {
            let data = Point::new(x, y);
            let logical = adapter.data_to_logical_point(data);
            let back = adapter.logical_to_data_point(logical);
            assert!((back.x - data.x).abs() < 1e-9, "x round trip at {x}");
            assert!((back.y - data.y).abs() < 1e-9, "y round trip at {y}");
        }
    }

    #[test]
    fn distances_use_the_horizontal_scale() {
        let (_host, adapter) =
            attached_with_image(Size::new(800.0, 400.0), Size::new(4000.0, 2000.0));

        // Viewport width 1.0 over 800 px of container.
        assert!((adapter.physical_to_logical_distance(400.0) - 0.5).abs() < 1e-12);
        assert!((adapter.logical_to_physical_distance(0.5) - 400.0).abs() < 1e-12);
    }

    #[test]
    fn single_layer_physical_to_data_composes_the_snapshot() {
        let (_host, adapter) =
            attached_with_image(Size::new(800.0, 400.0), Size::new(4000.0, 2000.0));

        // Full-width viewport: container center maps to the image's
        // horizontal midpoint.
        let data = adapter.physical_to_data_point(Point::new(400.0, 100.0));
        assert!((data.x - 2000.0).abs() < 1e-9, "x composed via snapshot");
        assert!((data.y - 1000.0).abs() < 1e-9, "y composed via snapshot");
    }

    #[test]
    fn multi_layer_physical_to_data_delegates_to_the_layer() {
        let (host, adapter) =
            attached_with_image(Size::new(800.0, 400.0), Size::new(4000.0, 2000.0));
        host.borrow_mut().open_image(vec![
            RefLayer::with_placement(Size::new(4000.0, 2000.0), Point::new(100.0, 50.0), 0.1),
            RefLayer::new(Size::new(640.0, 480.0)),
        ]);

        let data = adapter.physical_to_data_point(Point::new(300.0, 150.0));
        assert!((data.x - 2000.0).abs() < 1e-9, "x from the layer transform");
        assert!((data.y - 1000.0).abs() < 1e-9, "y from the layer transform");

        assert!(
            (adapter.physical_to_data_x(300.0) - 2000.0).abs() < 1e-9,
            "scalar x delegates too"
        );
        assert!(
            (adapter.physical_to_data_y(150.0) - 1000.0).abs() < 1e-9,
            "scalar y delegates too"
        );
    }

    #[test]
    fn data_physical_round_trip_with_a_single_layer() {
        let (_host, adapter) =
            attached_with_image(Size::new(800.0, 400.0), Size::new(4000.0, 2000.0));

        let data = Point::new(1500.0, 500.0);
        let physical = adapter.data_to_physical_point(data);
        let back = adapter.physical_to_data_point(physical);
        assert!((back.x - data.x).abs() < 1e-9, "x round trip");
        assert!((back.y - data.y).abs() < 1e-9, "y round trip");
    }
}
