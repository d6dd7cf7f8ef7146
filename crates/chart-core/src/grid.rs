// File: crates/chart-core/src/grid.rs
// Summary: Grid line and axis tick layout helpers.

/// `steps` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Round tick values (1, 2 or 5 times a power of ten) inside `[min, max]`,
/// aiming for about `target` of them.
pub fn ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return Vec::new();
    }
    let raw = span / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = match raw / mag {
        r if r <= 1.0 => mag,
        r if r <= 2.0 => 2.0 * mag,
        r if r <= 5.0 => 5.0 * mag,
        _ => 10.0 * mag,
    };
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_land_on_round_values() {
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let small = ticks(-0.3, 0.3, 3);
        assert_eq!(small.len(), 3);
        for (got, want) in small.iter().zip([-0.2, 0.0, 0.2]) {
            assert!((got - want).abs() < 1e-12);
        }
        assert!(ticks(1.0, 1.0, 5).is_empty());
    }
}
