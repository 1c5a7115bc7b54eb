/// Calculate the shortest rotation between two angles on a circle.
///
/// The angular distance is in degrees and the result is normalized to
/// `(-180, 180]`.
pub fn shortest_rotation(distance: f32) -> f32 {
    let dist_normal = distance.rem_euclid(360.0);

    if dist_normal > 180.0 {
        dist_normal - 360.0
    } else {
        dist_normal
    }
}

/// Calculate the angle of a triangle using the law of cosines.
///
/// Returns the angle in radians opposite of side `c`. The cosine ratio is
/// clamped to `[-1, 1]` so sides which do not form a proper triangle yield
/// the nearest degenerate angle instead of NaN.
pub fn law_of_cosines(a: f32, b: f32, c: f32) -> f32 {
    let a2 = a.powi(2);
    let b2 = b.powi(2);
    let c2 = c.powi(2);

    let numerator = a2 + b2 - c2;
    let denominator = 2.0 * a * b;

    (numerator / denominator).clamp(-1.0, 1.0).acos()
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
