// File: crates/chart-core/src/geometry.rs
// Summary: Hit-test geometry: rectangle/path shapes, rectangle fast paths and pixel clamping.

use skia_safe as skia;

/// Screen-space area of a rendered item.
#[derive(Clone, Debug)]
pub enum Shape {
    Rect(skia::Rect),
    Path(skia::Path),
}

impl Shape {
    pub fn bounds(&self) -> skia::Rect {
        match self {
            Shape::Rect(r) => normalized(*r),
            Shape::Path(p) => *p.bounds(),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Shape::Rect(r) => rect_contains_point(r, x, y),
            Shape::Path(p) => p.contains((x, y)),
        }
    }

    /// Areas without positive width and height (zero-value bars, zero-size
    /// markers, empty paths, non-finite rectangles) cannot be hit.
    pub fn is_degenerate(&self) -> bool {
        if let Shape::Path(p) = self {
            if p.is_empty() {
                return true;
            }
        }
        let b = self.bounds();
        let finite = b.left.is_finite() && b.top.is_finite() && b.right.is_finite() && b.bottom.is_finite();
        !finite || b.width() <= 0.0 || b.height() <= 0.0
    }

    pub fn to_path(&self) -> skia::Path {
        match self {
            Shape::Rect(r) => rect_path(r),
            Shape::Path(p) => p.clone(),
        }
    }
}

/// Closed clockwise path tracing `r`.
pub fn rect_path(r: &skia::Rect) -> skia::Path {
    let r = normalized(*r);
    let mut path = skia::Path::new();
    path.move_to((r.left, r.top));
    path.line_to((r.right, r.top));
    path.line_to((r.right, r.bottom));
    path.line_to((r.left, r.bottom));
    path.close();
    path
}

pub fn circle_path(cx: f32, cy: f32, radius: f32) -> skia::Path {
    let mut path = skia::Path::new();
    path.add_circle((cx, cy), radius, skia::PathDirection::CW);
    path
}

/// Rectangle spanning two corner points, in either order.
pub fn rect_from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> skia::Rect {
    skia::Rect::from_ltrb(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
}

pub fn normalized(r: skia::Rect) -> skia::Rect {
    rect_from_points(r.left, r.top, r.right, r.bottom)
}

/// Edges count as inside.
pub fn rect_contains_point(r: &skia::Rect, x: f32, y: f32) -> bool {
    let r = normalized(*r);
    x >= r.left && x <= r.right && y >= r.top && y <= r.bottom
}

pub fn rect_contains_rect(outer: &skia::Rect, inner: &skia::Rect) -> bool {
    let (o, i) = (normalized(*outer), normalized(*inner));
    i.left >= o.left && i.right <= o.right && i.top >= o.top && i.bottom <= o.bottom
}

/// Overlap with positive area; touching edges do not count.
pub fn rects_intersect(a: &skia::Rect, b: &skia::Rect) -> bool {
    let (a, b) = (normalized(*a), normalized(*b));
    a.left < b.right && b.left < a.right && a.top < b.bottom && b.top < a.bottom
}

/// Divide a rectangle by per-axis scale factors.
pub fn unscale_rect(r: &skia::Rect, sx: f32, sy: f32) -> skia::Rect {
    skia::Rect::from_ltrb(r.left / sx, r.top / sy, r.right / sx, r.bottom / sy)
}

pub fn scale_rect(r: &skia::Rect, sx: f32, sy: f32) -> skia::Rect {
    skia::Rect::from_ltrb(r.left * sx, r.top * sy, r.right * sx, r.bottom * sy)
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Pull a point onto the closest position inside `r`.
pub fn clamp_point(r: &skia::Rect, x: f32, y: f32) -> (f32, f32) {
    let r = normalized(*r);
    (clamp(x, r.left, r.right), clamp(y, r.top, r.bottom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_inclusive_but_intersection_needs_area() {
        let outer = skia::Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let touching = skia::Rect::from_ltrb(10.0, 0.0, 20.0, 10.0);
        assert!(rect_contains_rect(&outer, &outer));
        assert!(!rects_intersect(&outer, &touching));
        assert!(rects_intersect(&outer, &skia::Rect::from_ltrb(9.0, 9.0, 11.0, 11.0)));
    }

    #[test]
    fn clamp_point_snaps_to_edges() {
        let r = skia::Rect::from_ltrb(10.0, 10.0, 20.0, 20.0);
        assert_eq!(clamp_point(&r, 0.0, 15.0), (10.0, 15.0));
        assert_eq!(clamp_point(&r, 25.0, 25.0), (20.0, 20.0));
    }

    #[test]
    fn zero_extent_shapes_are_degenerate() {
        assert!(Shape::Rect(skia::Rect::from_ltrb(300.0, 250.0, 320.0, 250.0)).is_degenerate());
        assert!(Shape::Rect(skia::Rect::from_ltrb(f32::NAN, 0.0, 1.0, 1.0)).is_degenerate());
        assert!(Shape::Path(skia::Path::new()).is_degenerate());
        assert!(Shape::Path(circle_path(5.0, 5.0, 0.0)).is_degenerate());
        assert!(!Shape::Rect(skia::Rect::from_ltrb(0.0, 0.0, 1.0, 1.0)).is_degenerate());
        assert!(!Shape::Path(circle_path(5.0, 5.0, 2.0)).is_degenerate());
    }
}
