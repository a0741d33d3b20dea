use crate::core::conformation::{ClassificationResult, Conformation, classify_angles};
use crate::core::error::PuckerError;
use crate::core::geometry::MeanPlane;
use crate::core::models::ring::RingCoordinates;
use crate::core::puckering::{PolarAngles, PuckeringDescriptor, compute_puckering};
use nalgebra::{Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Everything the pipeline derives from one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingAnalysis {
    pub normal: Unit<Vector3<f64>>,
    pub descriptor: PuckeringDescriptor,
    pub angles: PolarAngles,
    pub classification: ClassificationResult,
}

impl RingAnalysis {
    pub fn amplitude(&self) -> f64 {
        self.descriptor.amplitude()
    }

    pub fn conformation(&self) -> Conformation {
        self.classification.label
    }

    pub fn to_record(&self) -> PuckeringRecord {
        PuckeringRecord {
            amplitude: self.descriptor.amplitude(),
            theta: self.angles.theta,
            phi: self.angles.phi,
            conformation: self.classification.label,
        }
    }
}

/// The per-structure output record: amplitude in Å, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PuckeringRecord {
    #[serde(rename = "Amplitude")]
    pub amplitude: f64,
    pub theta: f64,
    pub phi: f64,
    pub conformation: Conformation,
}

/// Runs mean plane, puckering coordinates and classification for one ring.
///
/// The normal follows the right-hand rule of the ring's traversal order.
///
/// # Errors
///
/// - [`PuckerError::DegenerateRing`] if no mean plane can be defined.
/// - [`PuckerError::DegenerateAmplitude`] if the ring is planar, so `θ`/`φ` are undefined.
pub fn analyze_ring(ring: &RingCoordinates) -> Result<RingAnalysis, PuckerError> {
    let plane = MeanPlane::from_ring(ring)?;
    analyze_plane(&plane)
}

/// Like [`analyze_ring`], but with the normal flipped to point towards `reference`.
///
/// Holding the normal fixed makes `θ` and `φ` comparable across traversal orders and
/// across a series of conformers of the same ring.
pub fn analyze_ring_oriented(
    ring: &RingCoordinates,
    reference: &Vector3<f64>,
) -> Result<RingAnalysis, PuckerError> {
    let plane = MeanPlane::from_ring(ring)?.oriented_towards(reference);
    analyze_plane(&plane)
}

fn analyze_plane(plane: &MeanPlane) -> Result<RingAnalysis, PuckerError> {
    let descriptor = compute_puckering(plane.displacements());
    let angles = descriptor.angles()?;
    let classification = classify_angles(&angles);

    Ok(RingAnalysis {
        normal: plane.normal(),
        descriptor,
        angles,
        classification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Rotation3};
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;
    const RADIUS: f64 = 1.45;

    /// Ring atoms on a circle in the xy-plane, counter-clockwise from +x, lifted by `heights`.
    fn ring_with_heights(heights: [f64; 6]) -> RingCoordinates {
        let mut points = [Point3::origin(); 6];
        for (j, point) in points.iter_mut().enumerate() {
            let angle = PI * j as f64 / 3.0;
            *point = Point3::new(RADIUS * angle.cos(), RADIUS * angle.sin(), heights[j]);
        }
        RingCoordinates::new(points).unwrap()
    }

    fn ideal_chair(amplitude: f64) -> RingCoordinates {
        let h = amplitude / 6f64.sqrt();
        ring_with_heights([h, -h, h, -h, h, -h])
    }

    /// Heights producing pure mode-2 puckering at phase `phi_deg` (before the normal flip).
    fn mode_two_ring(amplitude: f64, phi_deg: f64) -> RingCoordinates {
        let scale = amplitude * (2.0 / 6.0f64).sqrt();
        let mut heights = [0.0; 6];
        for (j, h) in heights.iter_mut().enumerate() {
            *h = scale * (phi_deg.to_radians() + 2.0 * PI * 2.0 * j as f64 / 6.0).cos();
        }
        ring_with_heights(heights)
    }

    fn irregular_ring() -> RingCoordinates {
        RingCoordinates::new([
            Point3::new(0.512, 1.336, 0.211),
            Point3::new(1.783, 0.604, -0.347),
            Point3::new(1.401, -0.852, 0.262),
            Point3::new(0.017, -1.226, -0.094),
            Point3::new(-1.268, -0.493, 0.418),
            Point3::new(-0.902, 0.917, -0.301),
        ])
        .unwrap()
    }

    fn angle_difference(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn ideal_chair_end_to_end() {
        let analysis = analyze_ring(&ideal_chair(0.5)).unwrap();
        assert!((analysis.amplitude() - 0.5).abs() < TOLERANCE);
        // Counter-clockwise traversal with atom 0 up: the normal points to -z, so q3 < 0.
        assert!((analysis.angles.theta - 180.0).abs() < 1e-6);
        assert_eq!(analysis.conformation(), Conformation::Chair);
        assert!(analysis.classification.distance < 1e-6);
    }

    #[test]
    fn ideal_chair_oriented_upwards_sits_at_north_pole() {
        let analysis =
            analyze_ring_oriented(&ideal_chair(0.5), &Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert!(analysis.angles.theta.abs() < 1e-6);
        assert!(analysis.normal.z > 0.0);
        assert_eq!(analysis.conformation(), Conformation::Chair);
    }

    #[test]
    fn chair_result_is_invariant_under_rigid_motion() {
        let rotation = Rotation3::from_euler_angles(0.3, -1.1, 2.4);
        let shift = Vector3::new(4.0, -7.0, 1.5);
        let ring = ideal_chair(0.55);
        let moved = RingCoordinates::new(ring.points().map(|p| rotation * p + shift)).unwrap();

        let a = analyze_ring(&ring).unwrap();
        let b = analyze_ring(&moved).unwrap();
        assert!((a.amplitude() - b.amplitude()).abs() < TOLERANCE);
        assert!((a.angles.theta - b.angles.theta).abs() < 1e-6);
        assert_eq!(a.conformation(), b.conformation());
    }

    #[test]
    fn mode_two_rings_land_on_the_equator() {
        // The -z normal negates heights, shifting phase by 180 degrees.
        let boat = analyze_ring(&mode_two_ring(0.7, 0.0)).unwrap();
        assert!((boat.amplitude() - 0.7).abs() < TOLERANCE);
        assert!((boat.angles.theta - 90.0).abs() < 1e-6);
        assert!(angle_difference(boat.angles.phi, 180.0) < 1e-6);
        assert_eq!(boat.conformation(), Conformation::Boat);

        let twist = analyze_ring(&mode_two_ring(0.7, 30.0)).unwrap();
        assert!(angle_difference(twist.angles.phi, 210.0) < 1e-6);
        assert_eq!(twist.conformation(), Conformation::TwistBoat);
    }

    #[test]
    fn planar_hexagon_reports_degenerate_amplitude() {
        let result = analyze_ring(&ring_with_heights([0.0; 6]));
        assert!(matches!(
            result,
            Err(PuckerError::DegenerateAmplitude { amplitude }) if amplitude < 1e-12
        ));
    }

    #[test]
    fn collinear_ring_reports_degenerate_ring() {
        let points = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0].map(|x| Point3::new(x, 2.0 * x, -x));
        let ring = RingCoordinates::new(points).unwrap();
        assert!(matches!(
            analyze_ring(&ring),
            Err(PuckerError::DegenerateRing { .. })
        ));
    }

    #[test]
    fn reversal_with_fixed_normal_negates_phi() {
        let ring = irregular_ring();
        let forward = analyze_ring(&ring).unwrap();
        let reference = forward.normal.into_inner();
        let backward = analyze_ring_oriented(&ring.reversed(), &reference).unwrap();

        assert!((forward.amplitude() - backward.amplitude()).abs() < TOLERANCE);
        assert!((forward.angles.theta - backward.angles.theta).abs() < 1e-7);
        assert!(angle_difference(backward.angles.phi, 360.0 - forward.angles.phi) < 1e-7);
    }

    #[test]
    fn reversal_under_right_handed_convention_flips_the_normal() {
        let ring = irregular_ring();
        let forward = analyze_ring(&ring).unwrap();
        let backward = analyze_ring(&ring.reversed()).unwrap();

        assert!((forward.normal.into_inner() + backward.normal.into_inner()).norm() < TOLERANCE);
        assert!((forward.amplitude() - backward.amplitude()).abs() < TOLERANCE);
        assert!((backward.angles.theta - (180.0 - forward.angles.theta)).abs() < 1e-7);
        assert!(angle_difference(backward.angles.phi, 180.0 - forward.angles.phi) < 1e-7);
    }

    #[test]
    fn record_uses_output_field_names() {
        let record = analyze_ring(&ideal_chair(0.5)).unwrap().to_record();
        let json = serde_json::to_value(record).unwrap();
        assert!(json.get("Amplitude").is_some());
        assert!(json.get("theta").is_some());
        assert!(json.get("phi").is_some());
        assert_eq!(json["conformation"], "Chair");
    }
}
