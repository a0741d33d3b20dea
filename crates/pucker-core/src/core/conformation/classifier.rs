use super::haversine::angular_distance;
use super::reference::{CONFORMATION_REFERENCE, Conformation, ReferencePoint};
use crate::core::puckering::PolarAngles;

/// Distances (radians) closer than this are treated as ties and resolved by
/// [`Conformation`] priority.
pub const TIE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub label: Conformation,
    /// Great-circle distance to the matched reference point, in radians (`[0, π]`).
    pub distance: f64,
    /// The reference point that was matched.
    pub reference: PolarAngles,
}

impl ClassificationResult {
    pub fn distance_degrees(&self) -> f64 {
        self.distance.to_degrees()
    }
}

/// Classifies shape angles (degrees) against [`CONFORMATION_REFERENCE`].
///
/// Pure function of its inputs and the static table. The amplitude `Q` plays no part;
/// only the direction on the sphere determines the conformational family.
pub fn classify(theta: f64, phi: f64) -> ClassificationResult {
    classify_angles(&PolarAngles::new(theta, phi))
}

pub fn classify_angles(angles: &PolarAngles) -> ClassificationResult {
    let [first, rest @ ..] = &CONFORMATION_REFERENCE;
    nearest(angles, first, rest)
}

/// Finds the nearest point of an arbitrary reference table, or `None` if it is empty.
///
/// Ties within [`TIE_TOLERANCE`] go to the higher-priority [`Conformation`]; table
/// order never decides the outcome.
pub fn classify_against(
    angles: &PolarAngles,
    table: &[ReferencePoint],
) -> Option<ClassificationResult> {
    table
        .split_first()
        .map(|(first, rest)| nearest(angles, first, rest))
}

fn nearest(
    angles: &PolarAngles,
    first: &ReferencePoint,
    rest: &[ReferencePoint],
) -> ClassificationResult {
    let measure = |reference: &ReferencePoint| ClassificationResult {
        label: reference.conformation,
        distance: angular_distance(angles, &reference.angles),
        reference: reference.angles,
    };

    rest.iter().map(measure).fold(measure(first), |best, candidate| {
        let closer = candidate.distance < best.distance - TIE_TOLERANCE;
        let tied = (candidate.distance - best.distance).abs() <= TIE_TOLERANCE;
        if closer || (tied && candidate.label < best.label) {
            candidate
        } else {
            best
        }
    })
}
