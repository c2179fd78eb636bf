//! Triangular membership functions
//!
//! Every fuzzy set in the employability model is a triangle `(a, b, c)` with
//! `a <= b <= c`. Shoulders are expressed as degenerate triangles: `a == b`
//! gives a left shoulder that is fully true at `a`, `b == c` a right shoulder
//! that is fully true at `c`.

use serde::Serialize;

/// Evaluate a triangular membership function at `x`.
///
/// Returns 0 outside `[a, c]`, rises linearly over `[a, b]` and falls linearly
/// over `[b, c]`. Zero-width segments are treated as steps, so no division by
/// zero can occur. The result is always in `[0, 1]`.
pub fn trimf(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x < a || x > c {
        return 0.0;
    }
    let degree = if x < b {
        (x - a) / (b - a)
    } else if x > b {
        (c - x) / (c - b)
    } else {
        1.0
    };
    degree.clamp(0.0, 1.0)
}

/// Triangular membership function with control points `a <= b <= c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Triangular {
    /// Left foot
    pub a: f64,
    /// Peak
    pub b: f64,
    /// Right foot
    pub c: f64,
}

impl Triangular {
    /// Create a triangle from its three control points.
    ///
    /// The points are compiled-in literals, so ordering is a programming
    /// error rather than a runtime condition.
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Membership degree of `x`
    pub fn membership(&self, x: f64) -> f64 {
        trimf(x, self.a, self.b, self.c)
    }

    /// Points where this triangle crosses the horizontal line `level`.
    ///
    /// Used by defuzzification to add the corners of a clipped term to the
    /// sampled universe. Returns nothing for levels outside `(0, 1]`.
    pub fn cut_points(&self, level: f64) -> Option<(f64, f64)> {
        if level <= 0.0 || level > 1.0 {
            return None;
        }
        Some((
            self.a + level * (self.b - self.a),
            self.c - level * (self.c - self.b),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangular_membership() {
        let mf = Triangular::new(0.0, 50.0, 100.0);

        assert_eq!(mf.membership(-1.0), 0.0);
        assert_eq!(mf.membership(0.0), 0.0);
        assert_eq!(mf.membership(25.0), 0.5);
        assert_eq!(mf.membership(50.0), 1.0);
        assert_eq!(mf.membership(75.0), 0.5);
        assert_eq!(mf.membership(100.0), 0.0);
        assert_eq!(mf.membership(101.0), 0.0);
    }

    #[test]
    fn test_left_shoulder_is_a_step_at_a() {
        let low = Triangular::new(0.0, 0.0, 50.0);

        assert_eq!(low.membership(0.0), 1.0);
        assert_eq!(low.membership(10.0), 0.8);
        assert_eq!(low.membership(50.0), 0.0);
        assert_eq!(low.membership(-0.5), 0.0);
    }

    #[test]
    fn test_right_shoulder_is_a_step_at_c() {
        let high = Triangular::new(50.0, 100.0, 100.0);

        assert_eq!(high.membership(100.0), 1.0);
        assert_eq!(high.membership(90.0), 0.8);
        assert_eq!(high.membership(50.0), 0.0);
        assert_eq!(high.membership(100.5), 0.0);
    }

    #[test]
    fn test_singleton_triangle() {
        let spike = Triangular::new(30.0, 30.0, 30.0);
        assert_eq!(spike.membership(30.0), 1.0);
        assert_eq!(spike.membership(30.1), 0.0);
    }

    #[test]
    fn test_degree_stays_in_unit_interval() {
        let mf = Triangular::new(20.0, 50.0, 80.0);
        for i in -50..150 {
            let degree = mf.membership(i as f64 * 0.7);
            assert!((0.0..=1.0).contains(&degree));
        }
    }

    #[test]
    fn test_cut_points() {
        let average = Triangular::new(20.0, 50.0, 80.0);
        assert_eq!(average.cut_points(0.5), Some((35.0, 65.0)));
        assert_eq!(average.cut_points(1.0), Some((50.0, 50.0)));
        assert_eq!(average.cut_points(0.0), None);

        let poor = Triangular::new(0.0, 0.0, 40.0);
        assert_eq!(poor.cut_points(0.25), Some((0.0, 30.0)));
    }
}
