use crate::core::puckering::PolarAngles;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical six-membered ring conformations.
///
/// Declaration order is the tie-break priority of the classifier: when two reference
/// points are equally close, the variant declared first wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Conformation {
    #[serde(rename = "Chair")]
    Chair,
    #[serde(rename = "Boat")]
    Boat,
    #[serde(rename = "Twist-Boat")]
    TwistBoat,
    #[serde(rename = "Half-Chair")]
    HalfChair,
    #[serde(rename = "Half-Boat")]
    HalfBoat,
}

impl Conformation {
    pub const ALL: [Conformation; 5] = [
        Conformation::Chair,
        Conformation::Boat,
        Conformation::TwistBoat,
        Conformation::HalfChair,
        Conformation::HalfBoat,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Conformation::Chair => "Chair",
            Conformation::Boat => "Boat",
            Conformation::TwistBoat => "Twist-Boat",
            Conformation::HalfChair => "Half-Chair",
            Conformation::HalfBoat => "Half-Boat",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Conformation::Chair => "C",
            Conformation::Boat => "B",
            Conformation::TwistBoat => "TB",
            Conformation::HalfChair => "HC",
            Conformation::HalfBoat => "HB",
        }
    }
}

impl fmt::Display for Conformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named canonical point on the puckering sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub conformation: Conformation,
    pub angles: PolarAngles,
}

const fn point(conformation: Conformation, theta: f64, phi: f64) -> ReferencePoint {
    ReferencePoint {
        conformation,
        angles: PolarAngles::new(theta, phi),
    }
}

use Conformation::{Boat, Chair, HalfBoat, HalfChair, TwistBoat};

/// Canonical conformations of a six-membered ring on the `(θ, φ)` sphere, in degrees.
///
/// - Chairs sit at the poles, where `φ` is meaningless.
/// - Boats and twist-boats alternate every 30° along the equator.
/// - Half-chairs (`θ = 30°/150°`) follow the twist-boat azimuths and half-boats
///   (`θ = 60°/120°`) follow the boat azimuths.
pub static CONFORMATION_REFERENCE: [ReferencePoint; 38] = [
    point(Chair, 0.0, 0.0),
    point(Chair, 180.0, 0.0),
    point(Boat, 90.0, 0.0),
    point(Boat, 90.0, 60.0),
    point(Boat, 90.0, 120.0),
    point(Boat, 90.0, 180.0),
    point(Boat, 90.0, 240.0),
    point(Boat, 90.0, 300.0),
    point(TwistBoat, 90.0, 30.0),
    point(TwistBoat, 90.0, 90.0),
    point(TwistBoat, 90.0, 150.0),
    point(TwistBoat, 90.0, 210.0),
    point(TwistBoat, 90.0, 270.0),
    point(TwistBoat, 90.0, 330.0),
    point(HalfChair, 30.0, 30.0),
    point(HalfChair, 30.0, 90.0),
    point(HalfChair, 30.0, 150.0),
    point(HalfChair, 30.0, 210.0),
    point(HalfChair, 30.0, 270.0),
    point(HalfChair, 30.0, 330.0),
    point(HalfChair, 150.0, 30.0),
    point(HalfChair, 150.0, 90.0),
    point(HalfChair, 150.0, 150.0),
    point(HalfChair, 150.0, 210.0),
    point(HalfChair, 150.0, 270.0),
    point(HalfChair, 150.0, 330.0),
    point(HalfBoat, 60.0, 0.0),
    point(HalfBoat, 60.0, 60.0),
    point(HalfBoat, 60.0, 120.0),
    point(HalfBoat, 60.0, 180.0),
    point(HalfBoat, 60.0, 240.0),
    point(HalfBoat, 60.0, 300.0),
    point(HalfBoat, 120.0, 0.0),
    point(HalfBoat, 120.0, 60.0),
    point(HalfBoat, 120.0, 120.0),
    point(HalfBoat, 120.0, 180.0),
    point(HalfBoat, 120.0, 240.0),
    point(HalfBoat, 120.0, 300.0),
];
