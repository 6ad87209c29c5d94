//! Small 2D vector helpers over `[f64; 2]`.

pub type Vec2 = [f64; 2];

#[inline]
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] - b[0], a[1] - b[1]]
}

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] + b[0], a[1] + b[1]]
}

#[inline]
pub fn scale(v: Vec2, s: f64) -> Vec2 {
    [v[0] * s, v[1] * s]
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
pub fn norm_sq(v: Vec2) -> f64 {
    dot(v, v)
}

#[inline]
pub fn norm(v: Vec2) -> f64 {
    norm_sq(v).sqrt()
}

#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f64 {
    norm_sq(sub(a, b))
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    norm(sub(a, b))
}

/// Unit vector along `v`, or `None` when `v` has zero length.
pub fn normalize(v: Vec2) -> Option<Vec2> {
    let n = norm(v);
    if n == 0.0 {
        None
    } else {
        Some([v[0] / n, v[1] / n])
    }
}

/// Rotate `v` counter-clockwise by `angle` radians.
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    [v[0] * cos - v[1] * sin, v[0] * sin + v[1] * cos]
}

/// Offset from `r1` to the foot of the perpendicular dropped from `p` onto
/// the segment `r1 -> r2`.
///
/// Returns `None` for a zero-length segment, and when `p` lies outside the
/// slab bounded by the segment's endpoints (both endpoint projections on the
/// same side).
pub fn project_onto_segment(r1: Vec2, r2: Vec2, p: Vec2) -> Option<Vec2> {
    let n = normalize(sub(r2, r1))?;
    let pa_dot_n = dot(sub(r1, p), n);
    let pb_dot_n = dot(sub(r2, p), n);
    if pa_dot_n * pb_dot_n > 0.0 {
        return None;
    }
    Some(scale(n, -pa_dot_n))
}

/// Perpendicular distance from `p` to the segment `r1 -> r2`, restricted to
/// points whose projection falls on the segment.
pub fn distance_to_segment(r1: Vec2, r2: Vec2, p: Vec2) -> Option<f64> {
    let proj = project_onto_segment(r1, r2, p)?;
    Some(norm(sub(proj, sub(p, r1))))
}
