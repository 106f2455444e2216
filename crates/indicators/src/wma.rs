use crate::Indicator;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Weighted Moving Average (WMA).
///
/// Linear weights over a trailing window: the oldest value gets weight 1,
/// the newest weight `period`, divided by `period * (period + 1) / 2`.
/// Updated in O(1) with a rolling plain sum and a rolling weighted sum.
#[derive(Debug, Clone)]
pub struct Wma {
    len: usize,
    buffer: VecDeque<Decimal>,
    /// Plain sum of the window.
    sum: Decimal,
    /// Sum of `weight * value` with weights 1 (oldest) ..= len (newest).
    weighted_sum: Decimal,
    /// 1 + 2 + ... + len
    weight_total: Decimal,
}

impl Wma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "WMA period must be > 0");
        Self {
            len: period,
            buffer: VecDeque::with_capacity(period),
            sum: Decimal::ZERO,
            weighted_sum: Decimal::ZERO,
            weight_total: Decimal::from(period * (period + 1) / 2),
        }
    }

    /// Get the current WMA value without feeding new data.
    pub fn value(&self) -> Option<Decimal> {
        if self.buffer.len() == self.len {
            Some(self.weighted_sum / self.weight_total)
        } else {
            None
        }
    }
}

impl Indicator for Wma {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        if self.buffer.len() == self.len {
            // Dropping the oldest value (weight 1) shifts every remaining
            // weight down by one, which subtracts the old window sum.
            if let Some(removed) = self.buffer.pop_front() {
                self.weighted_sum -= self.sum;
                self.sum -= removed;
            }
        }

        self.buffer.push_back(value);
        self.sum += value;
        self.weighted_sum += Decimal::from(self.buffer.len()) * value;

        self.value()
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.sum = Decimal::ZERO;
        self.weighted_sum = Decimal::ZERO;
    }

    fn period(&self) -> usize {
        self.len
    }

    fn is_ready(&self) -> bool {
        self.buffer.len() == self.len
    }
}
