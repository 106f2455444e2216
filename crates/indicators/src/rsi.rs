use crate::Indicator;
use rust_decimal::Decimal;

/// Relative Strength Index (RSI), TradingView-compatible.
///
/// Gains and losses are smoothed with a finite-history exponentially
/// weighted average over the entire series since inception
/// (`pandas ewm(alpha = 1/period)` with adjusted weights):
///
/// ```text
/// avg_x(t) = sum((1 - a)^(t-i) * x_i) / sum((1 - a)^(t-i)),  a = 1/period
/// RSI      = 0                         if avg_gain == 0
///          = 100                       if avg_loss == 0
///          = 100 - 100 / (1 + avg_gain / avg_loss)  otherwise
/// ```
///
/// rounded to 2 decimal places. The weight normalization makes early
/// outputs averages over the few terms that actually exist, so the series
/// start differs from a zero-seeded recursive EMA; the recurrence below
/// (`s' = decay * s + x` for both sums and the shared weight) reproduces
/// the finite-sum form exactly.
///
/// Unlike a fixed-window indicator, every price since inception (or since a
/// full [`reset`](Indicator::reset)) influences the output.
#[derive(Debug, Clone)]
pub struct Rsi {
    len: usize,
    /// 1 - 1/period
    decay: Decimal,
    prev_price: Option<Decimal>,
    /// Decay-weighted sum of up-moves.
    gain_sum: Decimal,
    /// Decay-weighted sum of down-move magnitudes.
    loss_sum: Decimal,
    /// Decay-weighted count of terms; both averages share it.
    weight_sum: Decimal,
    /// Price differences observed so far.
    changes: usize,
    current: Option<Decimal>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be > 0");
        Self {
            len: period,
            decay: Decimal::from(period - 1) / Decimal::from(period),
            prev_price: None,
            gain_sum: Decimal::ZERO,
            loss_sum: Decimal::ZERO,
            weight_sum: Decimal::ZERO,
            changes: 0,
            current: None,
        }
    }

    /// Get the current RSI value without feeding new data.
    pub fn value(&self) -> Option<Decimal> {
        self.current
    }

    fn rsi_from_sums(&self) -> Decimal {
        let up = self.gain_sum / self.weight_sum;
        let down = self.loss_sum / self.weight_sum;

        let rsi = if up.is_zero() {
            Decimal::ZERO
        } else if down.is_zero() {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / (Decimal::ONE + up / down)
        };

        rsi.round_dp(2)
    }
}

impl Indicator for Rsi {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        if let Some(prev) = self.prev_price {
            let change = value - prev;
            let gain = if change > Decimal::ZERO { change } else { Decimal::ZERO };
            let loss = if change < Decimal::ZERO { -change } else { Decimal::ZERO };

            self.gain_sum = self.decay * self.gain_sum + gain;
            self.loss_sum = self.decay * self.loss_sum + loss;
            self.weight_sum = self.decay * self.weight_sum + Decimal::ONE;
            self.changes += 1;
        }

        self.prev_price = Some(value);

        if self.changes >= self.len {
            self.current = Some(self.rsi_from_sums());
        }

        self.current
    }

    fn reset(&mut self) {
        self.prev_price = None;
        self.gain_sum = Decimal::ZERO;
        self.loss_sum = Decimal::ZERO;
        self.weight_sum = Decimal::ZERO;
        self.changes = 0;
        self.current = None;
    }

    fn period(&self) -> usize {
        self.len + 1 // need one extra data point for the first change
    }

    fn is_ready(&self) -> bool {
        self.current.is_some()
    }
}

/// Closed-form finite-sum RSI, used to validate the incremental recurrence.
#[cfg(test)]
fn closed_form_rsi(prices: &[Decimal], period: usize) -> Option<Decimal> {
    if prices.len() < period + 1 {
        return None;
    }

    let decay = Decimal::from(period - 1) / Decimal::from(period);
    let diffs: Vec<Decimal> = prices.windows(2).map(|pair| pair[1] - pair[0]).collect();

    // Newest difference carries weight 1, each older one an extra decay factor.
    let mut gain_sum = Decimal::ZERO;
    let mut loss_sum = Decimal::ZERO;
    let mut weight_sum = Decimal::ZERO;
    let mut weight = Decimal::ONE;
    for &d in diffs.iter().rev() {
        if d > Decimal::ZERO {
            gain_sum += weight * d;
        } else {
            loss_sum += weight * -d;
        }
        weight_sum += weight;
        weight *= decay;
    }

    let up = gain_sum / weight_sum;
    let down = loss_sum / weight_sum;
    let rsi = if up.is_zero() {
        Decimal::ZERO
    } else if down.is_zero() {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / (Decimal::ONE + up / down)
    };
    Some(rsi.round_dp(2))
}
