//! Easing curves for animations

/// Cubic ease-out, `1 - (1 - t)^3`. Input is clamped to `[0, 1]`; NaN maps to 0.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    1.0 - (1.0 - t).powi(3)
}
