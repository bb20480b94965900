//! Default number formatting for ticks, data labels and tooltips.

pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    format!("{value:.decimals$}")
}

/// Up to three decimals, trailing zeros removed (`0.300` -> `0.3`, `12.0` -> `12`).
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return format_fixed(value, 0);
    }
    let s = trim_trailing_zeroes(format!("{value:.3}"));
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Short labels for axis ticks: `12400` -> `12.4K`.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return format_fixed(value, 0);
    }
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        return format_with_suffix(value / 1_000_000_000.0, "B");
    }
    if abs >= 1_000_000.0 {
        return format_with_suffix(value / 1_000_000.0, "M");
    }
    if abs >= 10_000.0 {
        return format_with_suffix(value / 1_000.0, "K");
    }
    format_number(value)
}

fn format_with_suffix(value: f64, suffix: &str) -> String {
    format!("{}{}", trim_trailing_zeroes(format!("{value:.2}")), suffix)
}

fn trim_trailing_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.len() == dot + 1 {
            s.pop();
        }
    }
    s
}
