// File: crates/chart-core/src/axis.rs
// Summary: Linear value axis with label, range and value-to-pixel mapping.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    /// Axis covering `range` plus a 2% margin on each side. Degenerate or
    /// missing ranges widen to a unit span.
    pub fn auto(label: impl Into<String>, range: Option<(f64, f64)>) -> Self {
        let Some((mut lo, mut hi)) = range.filter(|(lo, hi)| lo.is_finite() && hi.is_finite()) else {
            return Self::new(label, 0.0, 1.0);
        };
        if (hi - lo).abs() < 1e-9 {
            lo -= 0.5;
            hi += 0.5;
        }
        let m = (hi - lo) * 0.02;
        Self::new(label, lo - m, hi + m)
    }

    /// Map `v` linearly so that `min` lands on `lo_px` and `max` on `hi_px`.
    #[inline]
    pub fn to_px(&self, v: f64, lo_px: f32, hi_px: f32) -> f32 {
        let span = (self.max - self.min).max(1e-12);
        lo_px + ((v - self.min) / span) as f32 * (hi_px - lo_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_range_adds_margin_and_widens_flat_data() {
        let a = Axis::auto("y", Some((0.0, 100.0)));
        assert!((a.min + 2.0).abs() < 1e-9 && (a.max - 102.0).abs() < 1e-9);
        let flat = Axis::auto("y", Some((3.0, 3.0)));
        assert!(flat.max > flat.min);
        assert_eq!(Axis::auto("y", None), Axis::new("y", 0.0, 1.0));
    }

    #[test]
    fn to_px_maps_inverted_ranges() {
        let a = Axis::new("y", 0.0, 10.0);
        assert_eq!(a.to_px(0.0, 100.0, 0.0), 100.0);
        assert_eq!(a.to_px(10.0, 100.0, 0.0), 0.0);
    }
}
