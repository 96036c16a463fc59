//! Three-point extremum refinement.
//!
//! Given separations sampled at three instants, fits the parabola through
//! them in Lagrange form and returns the time of its minimum. Times are
//! taken relative to the middle sample before any products are formed, so
//! day counts of several million lose no precision to cancellation.

/// Relative curvature below which the three samples are treated as collinear.
///
/// Scaled by the sample magnitudes and the time span in
/// [`refine_extremum_time`].
pub const DEGENERACY_EPS: f64 = 1e-12;

/// Time of the minimum of the parabola through `(times[i], values[i])`.
///
/// Falls back to the time of the smallest sampled value when the samples
/// are near-collinear, when two times coincide, or when the fitted parabola
/// opens downward and so has no minimum.
pub fn refine_extremum_time(times: [f64; 3], values: [f64; 3]) -> f64 {
    let [t0, t1, t2] = times;
    let [s0, s1, s2] = values;

    let u0 = t0 - t1;
    let u2 = t2 - t1;

    // Centred at t1, so the u1 terms vanish.
    let a = u0 * (s2 - s1) + u2 * (s1 - s0);
    let b = u0 * u0 * (s1 - s2) + u2 * u2 * (s0 - s1);

    // Product of the pairwise time differences; the leading coefficient of
    // the parabola is -a / denom.
    let denom = u0 * u2 * (u0 - u2);

    let span = u0.abs().max(u2.abs());
    let scale = (s0.abs() + s1.abs() + s2.abs()) * span;
    if denom == 0.0 || a.abs() <= DEGENERACY_EPS * scale {
        return sampled_minimum_time(times, values);
    }
    if a / denom >= 0.0 {
        return sampled_minimum_time(times, values);
    }

    t1 - b / (2.0 * a)
}

fn sampled_minimum_time(times: [f64; 3], values: [f64; 3]) -> f64 {
    let mut best = 0;
    for i in 1..3 {
        if values[i] < values[best] {
            best = i;
        }
    }
    times[best]
}
