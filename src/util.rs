/// Linear interpolation from `a` to `b`, with `t` clamped to [0, 1].
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Where `value` sits between `min` and `max`, clamped to [0, 1].
pub fn inverse_lerp(min: f64, max: f64, value: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// True when `value` is a finite, non-negative number.
pub fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
