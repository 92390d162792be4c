use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box over longitude/latitude degrees.
///
/// This is a wrapper around `geo::Rect`. `geo` normalises the corners on
/// construction, so `min` is always (min-lon, min-lat) and `max` is
/// (max-lon, max-lat).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl BoundingBox2D {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Arguments
    ///
    /// * `min_x` - Minimum longitude
    /// * `min_y` - Minimum latitude
    /// * `max_x` - Maximum longitude
    /// * `max_y` - Maximum latitude
    ///
    /// # Examples
    ///
    /// ```
    /// use geofacility_types::BoundingBox2D;
    ///
    /// let bbox = BoundingBox2D::new(-74.0, 40.7, -73.9, 40.8);
    /// assert_eq!(bbox.min_y(), 40.7);
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
        }
    }

    /// Degenerate box covering a single point.
    pub fn from_point(point: &Point) -> Self {
        Self::new(point.x(), point.y(), point.x(), point.y())
    }

    /// Smallest box enclosing every point yielded by `points`, or `None` when
    /// the iterator is empty.
    pub fn enclosing_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = Self::from_point(iter.next()?);
        Some(iter.fold(first, |acc, p| acc.union(&Self::from_point(p))))
    }

    /// Smallest box enclosing every box yielded by `boxes`, or `None` when
    /// the iterator is empty.
    pub fn enclosing_boxes<'a, I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a BoundingBox2D>,
    {
        let mut iter = boxes.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(b)))
    }

    /// Get the minimum x coordinate (longitude).
    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    /// Get the minimum y coordinate (latitude).
    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    /// Get the maximum x coordinate (longitude).
    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    /// Get the maximum y coordinate (latitude).
    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    /// The (min-lat, min-lon) corner as a point.
    pub fn lower_left(&self) -> Point {
        Point::new(self.min_x(), self.min_y())
    }

    /// Check if a point is contained within this bounding box. Edges count
    /// as inside.
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x() >= self.min_x()
            && point.x() <= self.max_x()
            && point.y() >= self.min_y()
            && point.y() <= self.max_y()
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox2D) -> Self {
        Self::new(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalises_corners() {
        let bbox = BoundingBox2D::new(-73.9, 40.8, -74.0, 40.7);
        assert_eq!(bbox.min_x(), -74.0);
        assert_eq!(bbox.min_y(), 40.7);
        assert_eq!(bbox.max_x(), -73.9);
        assert_eq!(bbox.max_y(), 40.8);
    }

    #[test]
    fn test_contains_point_edges() {
        let bbox = BoundingBox2D::new(-74.0, 40.7, -73.9, 40.8);

        assert!(bbox.contains_point(&Point::new(-73.95, 40.75)));
        assert!(bbox.contains_point(&Point::new(-74.0, 40.7)));
        assert!(bbox.contains_point(&Point::new(-73.9, 40.8)));
        assert!(!bbox.contains_point(&Point::new(-73.85, 40.75)));
    }

    #[test]
    fn test_enclosing_points() {
        let points = vec![
            Point::new(-74.0, 40.7),
            Point::new(-73.9, 40.8),
            Point::new(-73.95, 40.75),
        ];

        let bbox = BoundingBox2D::enclosing_points(&points).unwrap();
        assert_eq!(bbox.lower_left(), Point::new(-74.0, 40.7));
        assert_eq!(bbox.max_x(), -73.9);
        assert_eq!(bbox.max_y(), 40.8);

        let empty: Vec<Point> = Vec::new();
        assert!(BoundingBox2D::enclosing_points(&empty).is_none());
    }

    #[test]
    fn test_enclosing_boxes_and_union() {
        let a = BoundingBox2D::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox2D::new(2.0, -1.0, 3.0, 0.5);

        let both = BoundingBox2D::enclosing_boxes([&a, &b]).unwrap();
        assert_eq!(both, BoundingBox2D::new(0.0, -1.0, 3.0, 1.0));
        assert_eq!(a.union(&b), both);
        assert!(BoundingBox2D::enclosing_boxes(std::iter::empty::<&BoundingBox2D>()).is_none());
    }

    #[test]
    fn test_degenerate_box_from_point() {
        let p = Point::new(12.5, -3.25);
        let bbox = BoundingBox2D::from_point(&p);
        assert_eq!(bbox.lower_left(), p);
        assert_eq!(bbox.max_x(), 12.5);
        assert_eq!(bbox.max_y(), -3.25);
        assert!(bbox.contains_point(&p));
    }
}
