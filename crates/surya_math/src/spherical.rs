//! Great-circle separation on the ecliptic sphere.

/// Exact angular separation between two ecliptic points, in degrees [0, 180].
///
/// Haversine form, which stays well-conditioned for small separations.
/// Identical points give exactly 0; antipodal points give 180.
pub fn great_circle_separation_deg(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = phi2 - phi1;
    let dlambda = (lon2 - lon1).to_radians();

    let half_dphi = (dphi / 2.0).sin();
    let half_dlambda = (dlambda / 2.0).sin();
    let a = (half_dphi * half_dphi + phi1.cos() * phi2.cos() * half_dlambda * half_dlambda)
        .clamp(0.0, 1.0);

    (2.0 * a.sqrt().atan2((1.0 - a).sqrt())).to_degrees()
}
