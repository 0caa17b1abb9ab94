//! Geometry primitives
//!
//! Points, rectangles and colors in page space. Page space is measured in
//! points with the origin at the top-left corner and y growing downward;
//! output sinks flip to their own conventions.

use serde::{Deserialize, Serialize};

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Pre-blend this color at `alpha` over a white page.
    ///
    /// Both sinks draw the blended color instead of real transparency.
    pub fn over_white(self, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |c: u8| -> u8 { (c as f32 * a + 255.0 * (1.0 - a)).round() as u8 };
        Rgb(mix(self.0), mix(self.1), mix(self.2))
    }

    /// Channels as fractions in [0, 1]
    pub fn fractions(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// A point in page space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in page space (top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn corners(&self) -> Vec<Point> {
        vec![
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }
}

// ============================================================================
// Curve Flattening
// ============================================================================

const SEGMENTS_PER_TURN: f32 = 72.0;

/// Points along an arc, angles in degrees, clockwise on the page.
///
/// 0 degrees points right and -90 points up because y grows downward.
pub fn arc_points(center: Point, radius: f32, start_deg: f32, sweep_deg: f32) -> Vec<Point> {
    let steps = ((sweep_deg.abs() / 360.0) * SEGMENTS_PER_TURN).ceil().max(2.0) as usize;
    (0..=steps)
        .map(|i| {
            let deg = start_deg + sweep_deg * i as f32 / steps as f32;
            let rad = deg.to_radians();
            Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
        })
        .collect()
}

/// Closed outline of a full circle
pub fn circle_outline(center: Point, radius: f32) -> Vec<Point> {
    let mut points = arc_points(center, radius, 0.0, 360.0);
    points.pop();
    points
}

/// Closed outline of a pie wedge: center, then the arc
pub fn wedge_outline(center: Point, radius: f32, start_deg: f32, sweep_deg: f32) -> Vec<Point> {
    let mut points = vec![center];
    points.extend(arc_points(center, radius, start_deg, sweep_deg));
    points
}

/// Closed outline of a rectangle with rounded corners
pub fn rounded_rect_outline(rect: &Rect, radius: f32) -> Vec<Point> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    if r == 0.0 {
        return rect.corners();
    }
    let mut points = Vec::new();
    points.extend(arc_points(Point::new(rect.right() - r, rect.y + r), r, -90.0, 90.0));
    points.extend(arc_points(Point::new(rect.right() - r, rect.bottom() - r), r, 0.0, 90.0));
    points.extend(arc_points(Point::new(rect.x + r, rect.bottom() - r), r, 90.0, 90.0));
    points.extend(arc_points(Point::new(rect.x + r, rect.y + r), r, 180.0, 90.0));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_white_extremes() {
        assert_eq!(Rgb(0, 176, 80).over_white(1.0), Rgb(0, 176, 80));
        assert_eq!(Rgb(0, 176, 80).over_white(0.0), Rgb::WHITE);
    }

    #[test]
    fn test_arc_points_start_at_top() {
        let pts = arc_points(Point::new(100.0, 100.0), 10.0, -90.0, 90.0);
        let first = pts[0];
        assert!((first.x - 100.0).abs() < 1e-4);
        assert!((first.y - 90.0).abs() < 1e-4);
        let last = pts[pts.len() - 1];
        assert!((last.x - 110.0).abs() < 1e-4);
        assert!((last.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_rounded_rect_stays_inside_bounds() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        for p in rounded_rect_outline(&rect, 8.0) {
            assert!(p.x >= rect.x - 1e-3 && p.x <= rect.right() + 1e-3);
            assert!(p.y >= rect.y - 1e-3 && p.y <= rect.bottom() + 1e-3);
        }
    }
}
