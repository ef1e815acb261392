//! Court geometry and shot classification
//!
//! All positions live in a fixed 500x470 court space with the origin on the
//! baseline corner. `y` grows away from the baseline toward center court.

mod arc;
mod classifier;

pub use arc::{ArcSolver, BisectionSolver, ThreePointArc};
pub use classifier::{classify, classify_point, ShotClassifier, ShotType};

use serde::{Deserialize, Serialize};

/// Width of the court diagram in court units
pub const COURT_WIDTH: f64 = 500.0;

/// Height of the court diagram in court units
pub const COURT_HEIGHT: f64 = 470.0;

/// A position in court space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CourtPoint {
    pub x: f64,
    pub y: f64,
}

impl CourtPoint {
    /// Create a new point from court coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert a tap on a rendered court into court space.
    ///
    /// `client_x`/`client_y` are relative to the rendered court's top-left
    /// corner and `rendered_width`/`rendered_height` are its on-screen size.
    /// A zero-sized render falls back to a 1:1 mapping.
    pub fn from_display(
        client_x: f64,
        client_y: f64,
        rendered_width: f64,
        rendered_height: f64,
    ) -> Self {
        let scale_x = if rendered_width > 0.0 {
            COURT_WIDTH / rendered_width
        } else {
            1.0
        };
        let scale_y = if rendered_height > 0.0 {
            COURT_HEIGHT / rendered_height
        } else {
            1.0
        };

        Self {
            x: client_x * scale_x,
            y: client_y * scale_y,
        }
    }

    /// Whether the point lies inside the court diagram
    pub fn in_bounds(&self) -> bool {
        (0.0..=COURT_WIDTH).contains(&self.x) && (0.0..=COURT_HEIGHT).contains(&self.y)
    }

    /// The point reflected across the center line of the court
    pub fn mirrored(&self) -> Self {
        Self {
            x: COURT_WIDTH - self.x,
            y: self.y,
        }
    }
}
