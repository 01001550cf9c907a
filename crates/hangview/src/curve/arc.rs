use nalgebra::Vector2;

/// Prefix sums of segment lengths; `cum[0] = 0`, `cum.len() == points.len()`.
pub fn build_cumulative(points: &[Vector2<f64>]) -> Vec<f64> {
    let mut cum = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    for (k, p) in points.iter().enumerate() {
        if k > 0 {
            acc += (p - points[k - 1]).norm();
        }
        cum.push(acc);
    }
    cum
}

/// Point at arc length `s` (clamped to `[0, total]`).
///
/// Linear scan: point counts are tens to low hundreds.
pub fn sample_at(points: &[Vector2<f64>], cum: &[f64], s: f64) -> Vector2<f64> {
    let (Some(first), Some(&total)) = (points.first(), cum.last()) else {
        return Vector2::zeros();
    };
    if points.len() == 1 || total <= 0.0 {
        return *first;
    }
    let s = s.clamp(0.0, total);
    let n = points.len().min(cum.len());
    for k in 1..n {
        if s <= cum[k] {
            let seg = cum[k] - cum[k - 1];
            if seg <= 0.0 {
                return points[k];
            }
            let t = (s - cum[k - 1]) / seg;
            return points[k - 1] + (points[k] - points[k - 1]) * t;
        }
    }
    points[n - 1]
}

/// Polyline together with its cumulative arc-length table.
#[derive(Clone, Debug, Default)]
pub struct Polyline {
    pub points: Vec<Vector2<f64>>,
    pub cum: Vec<f64>,
}

impl Polyline {
    pub fn new(points: Vec<Vector2<f64>>) -> Self {
        let cum = build_cumulative(&points);
        Self { points, cum }
    }
    #[inline]
    pub fn total(&self) -> f64 {
        self.cum.last().copied().unwrap_or(0.0)
    }
    #[inline]
    pub fn sample(&self, s: f64) -> Vector2<f64> {
        sample_at(&self.points, &self.cum, s)
    }
    /// Largest y (lowest point in the y-down preview frame).
    pub fn max_y(&self) -> Option<f64> {
        self.points.iter().map(|p| p.y).reduce(f64::max)
    }
}
