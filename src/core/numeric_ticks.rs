use smallvec::SmallVec;

use crate::core::types::DataRange;

/// Hard cap on numeric ticks produced by one pass.
pub const MAX_NUMERIC_TICKS: usize = 10_000;

const EXPONENT_SEARCH_SPAN: i32 = 64;
// Covers every normal and subnormal f64 magnitude in radix 2..=36.
const MIN_EXPONENT: i32 = -1100;
const MAX_EXPONENT: i32 = 1030;

/// Major ticks chosen for a numeric range.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTicks {
    /// Distance between neighbouring majors; `0.0` for a degenerate range.
    pub step: f64,
    pub positions: Vec<f64>,
}

/// "Nice" mantissas for `radix`: `{1, 2, 5}` for decimal, power-of-two
/// divisors of the radix otherwise.
#[must_use]
pub fn nice_multipliers(radix: u32) -> SmallVec<[f64; 6]> {
    if radix == 10 {
        return SmallVec::from_slice(&[1.0, 2.0, 5.0]);
    }
    let mut multipliers = SmallVec::new();
    let mut candidate = 1u32;
    while candidate < radix {
        if radix % candidate == 0 {
            multipliers.push(f64::from(candidate));
        }
        candidate *= 2;
    }
    multipliers
}

/// Number of multiples of `step` inside `range`, saturating at
/// `MAX_NUMERIC_TICKS + 1`.
#[must_use]
pub fn count_ticks_in_range(range: DataRange, step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    let (first, last) = index_bounds(range, step);
    let count = last - first + 1.0;
    if !count.is_finite() || count <= 0.0 {
        0
    } else {
        count.min((MAX_NUMERIC_TICKS + 1) as f64) as usize
    }
}

/// Smallest nice spacing whose tick count inside `range` is `<= max_tick_count`.
#[must_use]
pub fn major_ticks(range: DataRange, max_tick_count: usize, radix: u32) -> NumericTicks {
    if range.is_degenerate() {
        return NumericTicks {
            step: 0.0,
            positions: vec![range.min],
        };
    }

    let max_tick_count = max_tick_count.clamp(1, MAX_NUMERIC_TICKS);
    let radix = radix.clamp(2, 36);
    let base = f64::from(radix);
    let multipliers = nice_multipliers(radix);

    let ideal = range.span() / max_tick_count as f64;
    if !(ideal.is_finite() && ideal > 0.0) {
        // Span overflowed f64 or is too small to divide.
        return endpoint_ticks(range, max_tick_count);
    }
    let mut exponent =
        ((ideal.ln() / base.ln()).floor() as i32).clamp(MIN_EXPONENT, MAX_EXPONENT) - 1;
    if radix != 10 {
        // Non-decimal axes label whole numbers only.
        exponent = exponent.max(0);
    }

    let mut previous: Option<f64> = None;
    for exponent in exponent..exponent.saturating_add(EXPONENT_SEARCH_SPAN) {
        for &multiplier in &multipliers {
            let step = multiplier * base.powi(exponent);
            let count = count_ticks_in_range(range, step);
            if count == 0 {
                // Overshot: no multiple of `step` lands in range any more.
                if let Some(previous) = previous {
                    return closest_to_centre(range, previous, max_tick_count);
                }
                return NumericTicks {
                    step,
                    positions: vec![range.min],
                };
            }
            if count <= max_tick_count {
                return NumericTicks {
                    step,
                    positions: positions_for_step(range, step),
                };
            }
            previous = Some(step);
        }
    }

    endpoint_ticks(range, max_tick_count)
}

fn endpoint_ticks(range: DataRange, max_tick_count: usize) -> NumericTicks {
    let positions = if max_tick_count >= 2 {
        vec![range.min, range.max]
    } else {
        vec![range.min]
    };
    NumericTicks {
        step: range.span(),
        positions,
    }
}

/// Ascending multiples of `step` inside `range`.
#[must_use]
pub fn positions_for_step(range: DataRange, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) {
        return vec![range.min];
    }
    let (first, last) = index_bounds(range, step);
    let mut positions = Vec::new();
    let mut index = first;
    while index <= last && positions.len() < MAX_NUMERIC_TICKS {
        let position = index * step;
        // Avoid "-0" labels and keep exact zero.
        positions.push(if position == 0.0 { 0.0 } else { position });
        index += 1.0;
    }
    positions
}

/// Minor ticks between (and just outside) the majors, clipped to `range`.
///
/// Linear distribution splits each major step into five; log distribution
/// places minors at `log10(2..=9)` fractions of the step.
#[must_use]
pub fn minor_positions(
    range: DataRange,
    majors: &[f64],
    step: f64,
    log_distribution: bool,
) -> Vec<f64> {
    let (Some(&first), Some(&last)) = (majors.first(), majors.last()) else {
        return Vec::new();
    };
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }

    let fractions: SmallVec<[f64; 8]> = if log_distribution {
        (2..=9).map(|k| f64::from(k).log10()).collect()
    } else {
        (1..5).map(|k| f64::from(k) / 5.0).collect()
    };

    let mut minors = Vec::new();
    let mut major = first - step;
    while major <= last && minors.len() < MAX_NUMERIC_TICKS {
        for fraction in &fractions {
            let position = major + step * fraction;
            if range.contains(position) {
                minors.push(position);
            }
        }
        major += step;
    }
    minors
}

fn index_bounds(range: DataRange, step: f64) -> (f64, f64) {
    const EPSILON: f64 = 1e-9;
    let first = (range.min / step - EPSILON).ceil();
    let last = (range.max / step + EPSILON).floor();
    (first, last)
}

fn closest_to_centre(range: DataRange, step: f64, keep: usize) -> NumericTicks {
    let centre = range.min / 2.0 + range.max / 2.0;
    let mut positions = positions_for_step(range, step);
    positions.sort_by(|a, b| (a - centre).abs().total_cmp(&(b - centre).abs()));
    positions.truncate(keep);
    positions.sort_by(f64::total_cmp);
    NumericTicks { step, positions }
}
