//! Normalization and circular operations on angles in degrees.

/// Resultant-vector magnitude below which the circular mean is undefined.
const UNDEFINED_DIRECTION_EPS: f64 = 1e-12;

/// Normalize an angle to [0, 360) degrees.
///
/// Exact multiples of 360 (including negative ones) map to 0, never 360.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 + 360.0 rounds to 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Minimal arc between two angles, in [0, 180].
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// Result of a circular (vector) mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularMean {
    /// Mean direction in degrees [0, 360). Zero when undefined.
    pub mean_deg: f64,
    /// Length of the summed unit-vector resultant.
    pub resultant: f64,
    /// False when the inputs cancel (empty input or antipodal pairs).
    pub defined: bool,
}

/// Circular mean of a set of angles via their sine/cosine resultant.
///
/// Empty input, or input whose unit vectors cancel, yields a mean of 0
/// with `defined == false`.
pub fn circular_mean(angles: &[f64]) -> CircularMean {
    if angles.is_empty() {
        return CircularMean {
            mean_deg: 0.0,
            resultant: 0.0,
            defined: false,
        };
    }

    let (sum_sin, sum_cos) = angles.iter().fold((0.0_f64, 0.0_f64), |(s, c), &a| {
        let r = a.to_radians();
        (s + r.sin(), c + r.cos())
    });
    let resultant = sum_sin.hypot(sum_cos);

    if resultant < UNDEFINED_DIRECTION_EPS {
        return CircularMean {
            mean_deg: 0.0,
            resultant,
            defined: false,
        };
    }

    CircularMean {
        mean_deg: normalize_360(sum_sin.atan2(sum_cos).to_degrees()),
        resultant,
        defined: true,
    }
}

/// Reduce a magnitude modulo `period`, result in [0, period).
///
/// Used to shrink very large elapsed-day counts before they are multiplied
/// by a daily rate.
pub fn reduce_magnitude(value: f64, period: f64) -> f64 {
    let r = value.rem_euclid(period);
    if r >= period { 0.0 } else { r }
}

/// Degrees to arc-minutes.
pub fn deg_to_arcmin(deg: f64) -> f64 {
    deg * 60.0
}

/// Arc-minutes to degrees.
pub fn arcmin_to_deg(arcmin: f64) -> f64 {
    arcmin / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero() {
        assert_eq!(normalize_360(0.0), 0.0);
    }

    #[test]
    fn normalize_wraps_positive() {
        assert!((normalize_360(361.5) - 1.5).abs() < 1e-12);
        assert_eq!(normalize_360(720.0), 0.0);
    }

    #[test]
    fn normalize_negative() {
        assert_eq!(normalize_360(-45.0), 315.0);
        assert_eq!(normalize_360(-180.0), 180.0);
        assert_eq!(normalize_360(-360.0), 0.0);
    }

    #[test]
    fn normalize_tiny_negative_never_360() {
        let r = normalize_360(-1e-17);
        assert!((0.0..360.0).contains(&r), "got {r}");
    }

    #[test]
    fn normalize_idempotent() {
        for &x in &[-1234.5, -0.25, 0.0, 17.0, 359.999, 360.0, 98765.4321] {
            let once = normalize_360(x);
            assert!((0.0..360.0).contains(&once), "x={x}: {once}");
            assert_eq!(normalize_360(once), once);
        }
    }

    #[test]
    fn pm180_basic() {
        assert!((normalize_to_pm180(270.0) - (-90.0)).abs() < 1e-10);
        assert!((normalize_to_pm180(-180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_to_pm180(450.0) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn circular_distance_straddles_zero() {
        assert_eq!(circular_distance(350.0, 10.0), 20.0);
        assert_eq!(circular_distance(10.0, 350.0), 20.0);
    }

    #[test]
    fn circular_distance_extremes() {
        assert_eq!(circular_distance(90.0, 270.0), 180.0);
        assert_eq!(circular_distance(0.0, 0.0), 0.0);
    }

    #[test]
    fn circular_distance_symmetric_and_bounded() {
        let samples = [-725.0, -90.0, 0.0, 33.3, 179.9, 180.0, 271.0, 359.0, 1000.0];
        for &a in &samples {
            for &b in &samples {
                let d1 = circular_distance(a, b);
                let d2 = circular_distance(b, a);
                assert_eq!(d1, d2, "a={a} b={b}");
                assert!((0.0..=180.0).contains(&d1), "a={a} b={b}: {d1}");
            }
        }
    }

    #[test]
    fn circular_mean_empty() {
        let m = circular_mean(&[]);
        assert_eq!(m.mean_deg, 0.0);
        assert!(!m.defined);
    }

    #[test]
    fn circular_mean_wraps_zero() {
        let m = circular_mean(&[350.0, 10.0]);
        assert!(m.defined);
        assert!(m.mean_deg < 1e-9 || (360.0 - m.mean_deg) < 1e-9, "got {}", m.mean_deg);
    }

    #[test]
    fn circular_mean_simple() {
        let m = circular_mean(&[80.0, 90.0, 100.0]);
        assert!((m.mean_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn circular_mean_antipodal_undefined() {
        let m = circular_mean(&[0.0, 180.0]);
        assert_eq!(m.mean_deg, 0.0);
        assert!(!m.defined);
    }

    #[test]
    fn reduce_magnitude_positive_and_negative() {
        assert!((reduce_magnitude(370.0, 360.0) - 10.0).abs() < 1e-12);
        assert!((reduce_magnitude(-10.0, 365.25) - 355.25).abs() < 1e-12);
    }

    #[test]
    fn arcmin_roundtrip() {
        for &deg in &[0.0, 1.0, 45.5, 90.0, 180.0, 360.0] {
            let back = arcmin_to_deg(deg_to_arcmin(deg));
            assert!((deg - back).abs() < 1e-10, "{deg} -> {back}");
        }
    }
}
