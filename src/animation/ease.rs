/// A CSS/SMIL-style cubic Bézier timing curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicBezierEase {
    /// First control point, x in `[0, 1]`.
    pub x1: f64,
    /// First control point, y.
    pub y1: f64,
    /// Second control point, x in `[0, 1]`.
    pub x2: f64,
    /// Second control point, y.
    pub y2: f64,
}

impl CubicBezierEase {
    /// Symmetric ease-in-out used on both halves of every loader oscillator.
    pub const LOADER: Self = Self::new(0.4, 0.0, 0.6, 1.0);

    /// Build a curve from its two control points.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Control points formatted as a SMIL `keySplines` entry, e.g. `0.4 0 0.6 1`.
    pub fn key_spline(&self) -> String {
        format!("{} {} {} {}", self.x1, self.y1, self.x2, self.y2)
    }

    /// Map normalized progress `p` in `[0, 1]` through the curve.
    pub fn apply(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        if p == 0.0 || p == 1.0 {
            return p;
        }
        let s = self.solve_param(p);
        bezier_1d(self.y1, self.y2, s)
    }

    fn solve_param(&self, p: f64) -> f64 {
        const EPS: f64 = 1e-12;

        let mut s = p;
        for _ in 0..8 {
            let err = bezier_1d(self.x1, self.x2, s) - p;
            if err.abs() < EPS {
                return s;
            }
            let d = bezier_1d_deriv(self.x1, self.x2, s);
            if d.abs() < 1e-9 {
                break;
            }
            s -= err / d;
        }

        // Newton stalled near a flat tangent; x(s) is monotonic for x1,x2 in [0,1].
        let (mut lo, mut hi) = (0.0, 1.0);
        s = p;
        for _ in 0..64 {
            let x = bezier_1d(self.x1, self.x2, s);
            if (x - p).abs() < EPS {
                break;
            }
            if x < p {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }
}

fn bezier_1d(c1: f64, c2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * c1 + 3.0 * inv * s * s * c2 + s * s * s
}

fn bezier_1d_deriv(c1: f64, c2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * c1 + 6.0 * inv * s * (c2 - c1) + 3.0 * s * s * (1.0 - c2)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
