use crate::point::MetricPoint;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in metric coordinates.
///
/// Wraps `geo::Rect`, which normalises its corners, so `min_*` is never
/// greater than `max_*` regardless of argument order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBBox {
    pub rect: Rect,
}

impl MetricBBox {
    /// Create a bounding box from corner coordinates.
    ///
    /// ```
    /// use forage_types::bbox::MetricBBox;
    ///
    /// let bbox = MetricBBox::new(10.0, 10.0, -10.0, -10.0);
    /// assert_eq!(bbox.min_x(), -10.0);
    /// assert_eq!(bbox.max_y(), 10.0);
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
        }
    }

    /// The square `[cx - r, cx + r] x [cy - r, cy + r]` circumscribing a
    /// circle of radius `r` around `center`.
    pub fn around(center: MetricPoint, radius: f64) -> Self {
        Self::new(
            center.x() - radius,
            center.y() - radius,
            center.x() + radius,
            center.y() + radius,
        )
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    /// True when every bound is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.min_x(), self.min_y(), self.max_x(), self.max_y()]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Closed containment: points on the boundary are inside.
    pub fn contains(&self, point: &MetricPoint) -> bool {
        point.x() >= self.min_x()
            && point.x() <= self.max_x()
            && point.y() >= self.min_y()
            && point.y() <= self.max_y()
    }
}
