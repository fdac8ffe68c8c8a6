//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::models::{AdxIndicator, Candle};

/// Calculate ADX indicator
///
/// ADX measures trend strength regardless of direction. TR, +DM, -DM, DX and ADX
/// all use Wilder smoothing.
pub fn calculate_adx(candles: &[Candle], period: u32) -> Option<AdxIndicator> {
    if period == 0 || candles.len() < period as usize * 2 {
        return None;
    }

    let n = candles.len() - 1;
    let mut tr_values = Vec::with_capacity(n);
    let mut plus_dm_values = Vec::with_capacity(n);
    let mut minus_dm_values = Vec::with_capacity(n);

    for pair in candles.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        tr_values.push(math::true_range(cur.high, cur.low, prev.close));

        let up = cur.high - prev.high;
        let down = prev.low - cur.low;
        plus_dm_values.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm_values.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let period = period as usize;
    let atr = math::wilder_series(&tr_values, period);
    let plus_dm = math::wilder_series(&plus_dm_values, period);
    let minus_dm = math::wilder_series(&minus_dm_values, period);

    let mut plus_di = Vec::with_capacity(n);
    let mut minus_di = Vec::with_capacity(n);
    let mut dx = Vec::with_capacity(n);
    for i in 0..n {
        let (p, m) = if atr[i] > 0.0 {
            (100.0 * plus_dm[i] / atr[i], 100.0 * minus_dm[i] / atr[i])
        } else {
            (0.0, 0.0)
        };
        let sum = p + m;
        dx.push(if sum > 0.0 { 100.0 * (p - m).abs() / sum } else { 0.0 });
        plus_di.push(p);
        minus_di.push(m);
    }

    let adx = math::wilder_series(&dx, period);

    Some(AdxIndicator {
        value: *adx.last()?,
        plus_di: *plus_di.last()?,
        minus_di: *minus_di.last()?,
        period: period as u32,
    })
}

/// Calculate ADX with default period (14)
pub fn calculate_adx_default(candles: &[Candle]) -> Option<AdxIndicator> {
    calculate_adx(candles, 14)
}
