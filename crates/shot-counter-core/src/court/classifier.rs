//! 2-point / 3-point shot classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::arc::{ArcSolver, BisectionSolver, ThreePointArc};
use super::CourtPoint;

/// Point value of a field-goal attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShotType {
    #[serde(rename = "2pt")]
    TwoPoint,
    #[serde(rename = "3pt")]
    ThreePoint,
}

impl ShotType {
    /// All shot types in display order
    pub const ALL: [ShotType; 2] = [ShotType::TwoPoint, ShotType::ThreePoint];

    /// Points awarded when a shot of this type is made
    pub fn points(&self) -> u32 {
        match self {
            ShotType::TwoPoint => 2,
            ShotType::ThreePoint => 3,
        }
    }

    /// Stored label ("2pt" / "3pt")
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::TwoPoint => "2pt",
            ShotType::ThreePoint => "3pt",
        }
    }

    /// Label used in reports and tables
    pub fn display_name(&self) -> &'static str {
        match self {
            ShotType::TwoPoint => "2-Point",
            ShotType::ThreePoint => "3-Point",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2pt" => Ok(ShotType::TwoPoint),
            "3pt" => Ok(ShotType::ThreePoint),
            other => Err(format!("unknown shot type '{}'", other)),
        }
    }
}

/// Key area (free-throw lane): x range and depth from the baseline
const KEY_MIN_X: f64 = 200.0;
const KEY_MAX_X: f64 = 300.0;
const KEY_DEPTH: f64 = 120.0;

/// Classifies court positions against the three-point arc
#[derive(Debug, Clone)]
pub struct ShotClassifier<S = BisectionSolver> {
    arc: ThreePointArc,
    solver: S,
}

impl Default for ShotClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ShotClassifier {
    /// Classifier for the standard arc with the default bisection solver
    pub fn new() -> Self {
        Self {
            arc: ThreePointArc::STANDARD,
            solver: BisectionSolver::default(),
        }
    }
}

impl<S: ArcSolver> ShotClassifier<S> {
    /// Classifier for the standard arc using a custom curve solver
    pub fn with_solver(solver: S) -> ShotClassifier<S> {
        ShotClassifier {
            arc: ThreePointArc::STANDARD,
            solver,
        }
    }

    /// The arc this classifier compares against
    pub fn arc(&self) -> &ThreePointArc {
        &self.arc
    }

    /// Classify a court position.
    ///
    /// Rules, in order:
    /// 1. at or beyond the arc's baseline corners horizontally: 3pt
    /// 2. inside the key: 2pt
    /// 3. strictly nearer the baseline than the arc: 2pt, otherwise 3pt
    pub fn classify(&self, x: f64, y: f64) -> ShotType {
        if x <= self.arc.min_x() || x >= self.arc.max_x() {
            return ShotType::ThreePoint;
        }

        if (KEY_MIN_X..=KEY_MAX_X).contains(&x) && y <= KEY_DEPTH {
            return ShotType::TwoPoint;
        }

        let arc_y = self.arc.height_at(x, &self.solver);
        if y < arc_y {
            ShotType::TwoPoint
        } else {
            ShotType::ThreePoint
        }
    }

    /// Classify a [`CourtPoint`]
    pub fn classify_point(&self, point: CourtPoint) -> ShotType {
        self.classify(point.x, point.y)
    }
}

/// Classify a court position with the standard classifier
pub fn classify(x: f64, y: f64) -> ShotType {
    ShotClassifier::new().classify(x, y)
}

/// Classify a [`CourtPoint`] with the standard classifier
pub fn classify_point(point: CourtPoint) -> ShotType {
    classify(point.x, point.y)
}
