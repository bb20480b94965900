//! "Nice" value-axis bounds.

/// Upper bound on generated ticks, guards against pathological steps.
const MAX_TICKS: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub ticks: Vec<f64>,
}

impl AxisBounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Replace `min`/`max` with explicit axis limits and regenerate ticks.
    pub fn with_limits(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if let Some(min) = min.filter(|v| v.is_finite()) {
            self.min = min;
        }
        if let Some(max) = max.filter(|v| v.is_finite()) {
            self.max = max;
        }
        if self.max <= self.min {
            self.max = self.min + self.step;
        }
        self.ticks = ticks_between(self.min, self.max, self.step);
        self
    }
}

/// Compute round bounds and an evenly spaced tick sequence covering `values`.
///
/// `step` overrides the derived step when positive and finite. Non-finite
/// values are ignored; an empty input covers `0..1`.
pub fn compute_bounds(values: &[f64], step: Option<f64>) -> AxisBounds {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.iter().copied().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        lo = 0.0;
        hi = 1.0;
    }

    let range = if hi - lo > 0.0 { hi - lo } else { 1.0 };
    let step = match step {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => nice_step(range),
    };

    let mut min = round3((lo / step).floor() * step);
    let mut max = round3((hi / step).ceil() * step);
    if min > lo {
        min -= step;
    }
    if max < hi {
        max += step;
    }
    if max <= min {
        max = min + step;
    }

    AxisBounds {
        min,
        max,
        step,
        ticks: ticks_between(min, max, step),
    }
}

fn nice_step(range: f64) -> f64 {
    let magnitude = 10f64.powf(range.log10().floor());
    let residual = range / magnitude;
    let factor = if residual <= 1.5 {
        0.2
    } else if residual <= 3.0 {
        0.5
    } else if residual <= 7.0 {
        1.0
    } else {
        2.0
    };
    factor * magnitude
}

/// Ticks at `min + i * step` up to `max`. An explicit limit that is not a
/// step multiple gets no tick of its own.
fn ticks_between(min: f64, max: f64, step: f64) -> Vec<f64> {
    // Tolerance absorbs float noise such as 0.2 / 0.05 = 3.9999999999999996.
    let count = ((max - min) / step + 1e-6)
        .floor()
        .clamp(0.0, MAX_TICKS as f64) as usize;
    let mut ticks: Vec<f64> = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let t = round3(min + i as f64 * step);
        if t > max + 1e-9 {
            break;
        }
        if ticks.last().map_or(true, |last| (t - last).abs() > 1e-9) {
            ticks.push(t);
        }
    }
    ticks
}

/// Round to three decimals to scrub float noise (`0.30000000000000004` -> `0.3`).
fn round3(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}
