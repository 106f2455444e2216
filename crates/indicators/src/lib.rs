pub mod hma;
pub mod rsi;
pub mod wma;

pub use hma::Hma;
pub use rsi::Rsi;
pub use wma::Wma;

use rust_decimal::Decimal;

/// Trait for streaming (incremental) indicators.
/// Feed one value at a time; the indicator maintains internal state.
pub trait Indicator: Send + Sync {
    /// Process the next value and return the indicator output (if ready).
    fn next(&mut self, value: Decimal) -> Option<Decimal>;

    /// Feed an ordered batch of values; equivalent to calling
    /// [`next`](Indicator::next) for each value in order. Returns the final
    /// output (if ready).
    fn next_batch(&mut self, values: &[Decimal]) -> Option<Decimal> {
        let mut last = None;
        for &value in values {
            last = self.next(value);
        }
        last
    }

    /// Reset the indicator to its initial state.
    fn reset(&mut self);

    /// The minimum number of data points needed before the indicator produces output.
    fn period(&self) -> usize;

    /// Whether the indicator has enough data to produce output.
    fn is_ready(&self) -> bool;
}
