//! Curved tile outline construction.
//!
//! A tile's outline is built from one symmetric curved-edge template per
//! side. The template is six cubic-Bezier segments expressed in a 0-100
//! reference coordinate space: the first component runs along the edge, the
//! second is the perpendicular displacement that forms the tab. Scaling the
//! perpendicular component by the side's tab value (-1, 0, +1) flips the
//! bump inward, collapses it flat, or leaves it protruding, so two edges
//! with inverse tabs produce exactly complementary curves.
//!
//! The walk starts slightly outside the nominal tile square (the corner
//! overscan) so a neighbor's protrusion is not clipped, and visits the sides
//! in top, right, bottom, left order, each side starting from the previous
//! side's ending corner. The result is one continuous closed path of 24
//! cubic segments, used downstream both as a clip mask and as a stroked
//! border.

use glam::Vec2;

use crate::shape::TileShape;

/// How far outside the nominal square the walk starts, in reference units.
pub const CORNER_OVERSCAN: f32 = 4.0;

/// Curved-edge template: six cubic segments per side, each row holding the
/// two control points and the endpoint as (along, across) pairs in 0-100
/// reference space.
const EDGE_TEMPLATE: [[f32; 6]; 6] = [
    [0.0, 0.0, 35.0, 15.0, 37.0, 5.0],
    [37.0, 5.0, 40.0, 0.0, 38.0, -5.0],
    [38.0, -5.0, 20.0, -20.0, 50.0, -20.0],
    [50.0, -20.0, 80.0, -20.0, 62.0, -5.0],
    [62.0, -5.0, 60.0, 0.0, 63.0, 5.0],
    [63.0, 5.0, 65.0, 15.0, 100.0, 0.0],
];

/// One cubic-Bezier segment: two control points and the endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub to: Vec2,
}

/// A closed curved outline: a start point followed by cubic segments whose
/// last endpoint returns to the start.
#[derive(Clone, Debug, PartialEq)]
pub struct TileOutline {
    pub start: Vec2,
    pub segments: Vec<CubicSegment>,
}

/// Builds the closed outline for one tile shape at the given edge length.
///
/// `edge_len / 100` scales the reference template to pixels.
pub fn tile_outline(shape: &TileShape, edge_len: f32) -> TileOutline {
    let ratio = edge_len / 100.0;
    let top_left = Vec2::new(-CORNER_OVERSCAN, CORNER_OVERSCAN);
    let top_right = top_left + Vec2::new(edge_len, 0.0);
    let bottom_right = top_right + Vec2::new(0.0, edge_len);
    let bottom_left = bottom_right - Vec2::new(edge_len, 0.0);

    let mut segments = Vec::with_capacity(EDGE_TEMPLATE.len() * 4);

    // top: along runs +x from the top-left corner, across displaces in y
    push_side(&mut segments, |along, across| {
        top_left + Vec2::new(along * ratio, shape.top as f32 * across * ratio)
    });
    // right: along runs +y from the top-right corner
    push_side(&mut segments, |along, across| {
        top_right + Vec2::new(-(shape.right as f32) * across * ratio, along * ratio)
    });
    // bottom: walked backwards (-x) from the bottom-right corner
    push_side(&mut segments, |along, across| {
        bottom_right - Vec2::new(along * ratio, shape.bottom as f32 * across * ratio)
    });
    // left: walked backwards (-y) from the bottom-left corner, closing the path
    push_side(&mut segments, |along, across| {
        bottom_left - Vec2::new(-(shape.left as f32) * across * ratio, along * ratio)
    });

    TileOutline { start: top_left, segments }
}

/// Appends one side's six segments, mapping template (along, across) pairs
/// into canvas space.
fn push_side(segments: &mut Vec<CubicSegment>, map: impl Fn(f32, f32) -> Vec2) {
    for row in &EDGE_TEMPLATE {
        segments.push(CubicSegment {
            ctrl1: map(row[0], row[1]),
            ctrl2: map(row[2], row[3]),
            to: map(row[4], row[5]),
        });
    }
}

impl TileOutline {
    /// Flattens the outline into a closed polygon, sampling each cubic
    /// segment at `steps` evenly spaced parameter values.
    ///
    /// The first vertex is the outline's start point; the final sample of
    /// the last segment coincides with it and is omitted.
    pub fn flatten(&self, steps: usize) -> Vec<Vec2> {
        let steps = steps.max(1);
        let mut polygon = Vec::with_capacity(self.segments.len() * steps);
        polygon.push(self.start);

        let mut from = self.start;
        for segment in &self.segments {
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                polygon.push(cubic_point(from, segment, t));
            }
            from = segment.to;
        }

        // drop the duplicated closing vertex
        polygon.pop();
        polygon
    }
}

/// Evaluates a cubic Bezier at parameter `t` in [0, 1].
fn cubic_point(from: Vec2, segment: &CubicSegment, t: f32) -> Vec2 {
    let u = 1.0 - t;
    from * (u * u * u)
        + segment.ctrl1 * (3.0 * u * u * t)
        + segment.ctrl2 * (3.0 * u * t * t)
        + segment.to * (t * t * t)
}

/// Even-odd point-in-polygon test against a flattened outline.
pub fn point_in_polygon(polygon: &[Vec2], point: Vec2) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TOLERANCE: f32 = 1e-4;

    fn shape(top: i8, right: i8, bottom: i8, left: i8) -> TileShape {
        TileShape {
            top,
            right,
            bottom,
            left,
        }
    }

    #[test]
    fn test_outline_has_24_segments_and_closes() {
        let outline = tile_outline(&shape(1, -1, 1, -1), 50.0);
        assert_eq!(outline.segments.len(), 24);

        let end = outline.segments.last().unwrap().to;
        assert_abs_diff_eq!(end.x, outline.start.x, epsilon = TOLERANCE);
        assert_abs_diff_eq!(end.y, outline.start.y, epsilon = TOLERANCE);
    }

    #[test]
    fn test_flat_shape_is_a_square() {
        let edge = 100.0;
        let outline = tile_outline(&TileShape::FLAT, edge);
        let polygon = outline.flatten(8);

        let min_x = -CORNER_OVERSCAN;
        let max_x = min_x + edge;
        let min_y = CORNER_OVERSCAN;
        let max_y = min_y + edge;

        // every sampled point must lie on the square's boundary
        for point in &polygon {
            let on_vertical = (point.x - min_x).abs() < TOLERANCE
                || (point.x - max_x).abs() < TOLERANCE;
            let on_horizontal = (point.y - min_y).abs() < TOLERANCE
                || (point.y - max_y).abs() < TOLERANCE;
            assert!(
                on_vertical || on_horizontal,
                "point {point:?} is off the square boundary"
            );
            assert!(point.x >= min_x - TOLERANCE && point.x <= max_x + TOLERANCE);
            assert!(point.y >= min_y - TOLERANCE && point.y <= max_y + TOLERANCE);
        }
    }

    #[test]
    fn test_tab_negation_mirrors_across_the_edge() {
        let edge = 64.0;
        let protruding = tile_outline(&shape(1, 0, 0, 0), edge);
        let indented = tile_outline(&shape(-1, 0, 0, 0), edge);
        let edge_y = CORNER_OVERSCAN;

        // top side segments are the first six; compare reflected y, equal x
        for (a, b) in protruding.segments[..6].iter().zip(&indented.segments[..6]) {
            for (p, q) in [(a.ctrl1, b.ctrl1), (a.ctrl2, b.ctrl2), (a.to, b.to)] {
                assert_abs_diff_eq!(p.x, q.x, epsilon = TOLERANCE);
                assert_abs_diff_eq!(p.y - edge_y, -(q.y - edge_y), epsilon = TOLERANCE);
            }
        }
    }

    #[test]
    fn test_scale_ratio_follows_edge_length() {
        let small = tile_outline(&shape(0, 1, 0, 0), 50.0);
        let large = tile_outline(&shape(0, 1, 0, 0), 100.0);

        // the protrusion's maximum x displacement doubles with the edge length
        let max_x = |outline: &TileOutline| {
            outline
                .flatten(16)
                .iter()
                .map(|p| p.x)
                .fold(f32::MIN, f32::max)
        };
        let small_bump = max_x(&small) - (50.0 - CORNER_OVERSCAN);
        let large_bump = max_x(&large) - (100.0 - CORNER_OVERSCAN);
        assert_abs_diff_eq!(large_bump, 2.0 * small_bump, epsilon = 1e-2);
    }

    #[test]
    fn test_point_in_polygon_on_flat_tile() {
        let outline = tile_outline(&TileShape::FLAT, 50.0);
        let polygon = outline.flatten(8);

        assert!(point_in_polygon(&polygon, Vec2::new(20.0, 25.0)));
        assert!(!point_in_polygon(&polygon, Vec2::new(60.0, 25.0)));
        assert!(!point_in_polygon(&polygon, Vec2::new(20.0, -10.0)));
    }
}
