//! Numeric helpers shared by the indicator modules.
//!
//! Series helpers return one value per input element so that callers can index
//! the last and second-to-last readings directly.

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Rolling SMA. Positions before the first full window are `None`.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= period {
            sum -= values[i - period];
        }
        out.push(if i + 1 >= period {
            Some(sum / period as f64)
        } else {
            None
        });
    }
    out
}

/// One EMA step with `alpha = 2 / (period + 1)`.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let alpha = 2.0 / (period as f64 + 1.0);
    alpha * value + (1.0 - alpha) * previous
}

/// Span EMA series seeded with the first value.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return out;
    };
    out.push(first);
    let mut prev = first;
    for &v in iter {
        prev = ema_from_previous(v, prev, period);
        out.push(prev);
    }
    out
}

/// Last value of [`ema_series`].
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 {
        return None;
    }
    ema_series(values, period).last().copied()
}

/// Wilder smoothing (`alpha = 1 / period`) seeded with the first value.
pub fn wilder_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 1.0 / period.max(1) as f64;
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        let next = match prev {
            Some(p) => alpha * v + (1.0 - alpha) * p,
            None => v,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Ordering for floats that treats NaN as equal, for sorting price levels.
pub fn cmp_f64(a: &f64, b: &f64) -> std::cmp::Ordering {
    a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
}
