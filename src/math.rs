use crate::{Num, Vec3};

/// Exponential smoothing step: moves `current` the fraction `alpha` of the
/// remaining distance towards `target`.
///
/// Repeated application converges geometrically; after `n` steps the
/// remaining distance is `(1 - alpha)^n` of the initial distance.
#[inline]
pub fn lerp_toward(current: Vec3, target: Vec3, alpha: Num) -> Vec3 {
    current + (target - current) * alpha
}

/// Number of [`lerp_toward`] steps needed to bring a point `distance` away
/// from its target closer than `epsilon`.
///
/// ```text
/// n = ceil(ln(epsilon / distance) / ln(1 - alpha))
/// ```
///
/// Returns 0 when already within `epsilon`, and `u32::MAX` when `alpha`
/// can never close the gap.
pub fn frames_to_converge(distance: Num, alpha: Num, epsilon: Num) -> u32 {
    if distance < epsilon {
        return 0;
    }

    if alpha >= 1.0 {
        return 1;
    }

    if alpha <= 0.0 {
        return u32::MAX;
    }

    let n = (epsilon / distance).ln() / (1.0 - alpha).ln();

    n.ceil() as u32
}
