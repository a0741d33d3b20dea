use crate::core::puckering::PolarAngles;

/// Great-circle distance, in radians, between two directions given in degrees.
///
/// `theta` is a polar angle measured from the pole, not a latitude, so the formula uses
/// `sin θ` where the geographic form uses `cos(latitude)`. At either pole `sin θ = 0` and
/// the azimuth drops out, as it should.
///
/// The result always lies in `[0, π]`.
pub fn angular_distance(a: &PolarAngles, b: &PolarAngles) -> f64 {
    let (theta1, theta2) = (a.theta.to_radians(), b.theta.to_radians());
    let d_theta = theta1 - theta2;
    let d_phi = (a.phi - b.phi).to_radians();

    let h = (d_theta / 2.0).sin().powi(2)
        + theta1.sin() * theta2.sin() * (d_phi / 2.0).sin().powi(2);
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}
