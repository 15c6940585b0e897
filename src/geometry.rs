use std::f64::consts::{FRAC_PI_4, PI, TAU};

use rand::Rng;

/// Map any finite angle into `[0, 2π)`.
pub fn normalize_angle(radian: f64) -> f64 {
    let normalized = radian.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if normalized >= TAU {
        0.0
    } else {
        normalized
    }
}

/// Bounce off a vertical paddle surface.
///
/// `amplifier` is the signed touch offset; an off-center hit skews the exit
/// angle by up to a quarter turn. This is a tuned approximation, not a
/// physical reflection.
pub fn reflect_horizontal(radian: f64, amplifier: f64) -> f64 {
    normalize_angle(PI - radian + FRAC_PI_4 * amplifier)
}

/// Bounce off the top or bottom table edge.
pub fn reflect_vertical(radian: f64) -> f64 {
    normalize_angle(TAU - radian)
}

/// Pick a serve direction in `[-max_deviation, max_deviation]` or
/// `[π - max_deviation, π + max_deviation]`.
///
/// The result is not normalized.
pub fn random_launch_angle<R: Rng + ?Sized>(rng: &mut R, max_deviation: f64) -> f64 {
    let magnitude = rng.random::<f64>() * max_deviation;
    let sign = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
    let base = if rng.random_bool(0.5) { PI } else { 0.0 };
    magnitude * sign + base
}

/// Clamp without asserting `lo <= hi`; a degenerate range resolves to `hi`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
