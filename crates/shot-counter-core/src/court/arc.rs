//! Three-point line geometry

use super::CourtPoint;

/// The three-point line as a cubic Bézier curve in court space.
///
/// The curve starts and ends on the baseline corners and bows away from the
/// baseline between them. Its x-coordinate is monotonic in `t`, which is what
/// makes inverting it by bisection reliable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePointArc {
    pub p0: CourtPoint,
    pub p1: CourtPoint,
    pub p2: CourtPoint,
    pub p3: CourtPoint,
}

impl Default for ThreePointArc {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl ThreePointArc {
    /// The arc drawn on the standard court diagram
    pub const STANDARD: Self = Self {
        p0: CourtPoint { x: 50.0, y: 0.0 },
        p1: CourtPoint { x: 100.0, y: 270.0 },
        p2: CourtPoint { x: 400.0, y: 270.0 },
        p3: CourtPoint { x: 450.0, y: 0.0 },
    };

    /// Leftmost x of the arc (its left baseline corner)
    pub fn min_x(&self) -> f64 {
        self.p0.x
    }

    /// Rightmost x of the arc (its right baseline corner)
    pub fn max_x(&self) -> f64 {
        self.p3.x
    }

    /// x-coordinate of the curve at parameter `t`
    pub fn x_at(&self, t: f64) -> f64 {
        bezier(self.p0.x, self.p1.x, self.p2.x, self.p3.x, t)
    }

    /// y-coordinate of the curve at parameter `t`
    pub fn y_at(&self, t: f64) -> f64 {
        bezier(self.p0.y, self.p1.y, self.p2.y, self.p3.y, t)
    }

    /// Height of the arc above the baseline at court x, using `solver` to
    /// invert the curve's x-coordinate
    pub fn height_at<S: ArcSolver + ?Sized>(&self, x: f64, solver: &S) -> f64 {
        let t = solver.solve(self, x);
        self.y_at(t)
    }
}

fn bezier(a: f64, b: f64, c: f64, d: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    a * u * u * u + 3.0 * b * u * u * t + 3.0 * c * u * t * t + d * t * t * t
}

/// Finds the curve parameter whose x-coordinate matches a court x.
///
/// Implementations must always return a value in `[0, 1]` and must terminate
/// for any input, including x outside the arc's span.
pub trait ArcSolver: Send + Sync {
    /// Parameter `t` such that `arc.x_at(t)` is as close as possible to `x`
    fn solve(&self, arc: &ThreePointArc, x: f64) -> f64;

    /// Human-readable name for this solver
    fn name(&self) -> &'static str;
}

/// Inverts the arc by bisection over a fixed number of iterations.
///
/// Starts at `t = 0.5` and stops early once the curve's x is within
/// `tolerance` of the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionSolver {
    pub iterations: u32,
    pub tolerance: f64,
}

impl Default for BisectionSolver {
    fn default() -> Self {
        Self {
            iterations: 20,
            tolerance: 0.01,
        }
    }
}

impl BisectionSolver {
    /// Create a solver with a custom iteration count and the default tolerance
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }
}

impl ArcSolver for BisectionSolver {
    fn solve(&self, arc: &ThreePointArc, x: f64) -> f64 {
        let mut low = 0.0;
        let mut high = 1.0;
        let mut t = 0.5;

        for _ in 0..self.iterations {
            let x_at_t = arc.x_at(t);
            if (x_at_t - x).abs() < self.tolerance {
                break;
            }

            if x_at_t < x {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }

        t
    }

    fn name(&self) -> &'static str {
        "bisection"
    }
}
