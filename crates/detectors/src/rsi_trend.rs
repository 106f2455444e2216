use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use trendlens_core::{DetectorError, TrendDetector, TrendType};
use trendlens_indicators::{Indicator, Rsi};

/// Trend detection with a single RSI indicator.
///
/// Up when RSI > 50, Down otherwise. The boundary RSI == 50 resolves to
/// Down: the strict comparison matches the vendor detector this reproduces,
/// and no Flat band is introduced. Flat is never produced here.
#[derive(Debug, Clone)]
pub struct RsiTrendDetector {
    period: usize,
    rsi: Rsi,
    current_trend: TrendType,
    changed: bool,
}

impl RsiTrendDetector {
    pub fn new(period: usize) -> Result<Self, DetectorError> {
        if period == 0 {
            return Err(DetectorError::invalid_period("RSI"));
        }
        Ok(Self {
            period,
            rsi: Rsi::new(period),
            current_trend: TrendType::Unknown,
            changed: false,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Latest RSI value (rounded to 2 decimal places), if converged.
    pub fn current_rsi(&self) -> Option<Decimal> {
        self.rsi.value()
    }

    fn classify(rsi: Decimal) -> TrendType {
        if rsi > dec!(50) {
            TrendType::Up
        } else {
            TrendType::Down
        }
    }

    fn define_trend(&mut self) {
        self.changed = false;
        if let Some(rsi) = self.rsi.value() {
            let new_trend = Self::classify(rsi);
            if new_trend != self.current_trend {
                tracing::debug!(%rsi, from = %self.current_trend, to = %new_trend, "RSI trend changed");
                self.current_trend = new_trend;
                self.changed = true;
            }
        }
    }
}

impl TrendDetector for RsiTrendDetector {
    fn initialize(&mut self, closes: &[Decimal]) {
        self.rsi.next_batch(closes);
        self.define_trend();
    }

    fn update(&mut self, close: Decimal) {
        self.rsi.next(close);
        self.define_trend();
    }

    fn reset(&mut self) {
        self.current_trend = TrendType::Unknown;
        self.changed = false;
    }

    fn required_period(&self) -> usize {
        // Empirical margin for the finite-sum EWM to stabilize, not a hard
        // mathematical minimum.
        self.period * 9
    }

    fn current_trend(&self) -> TrendType {
        self.current_trend
    }

    fn trend_changed(&self) -> bool {
        self.changed
    }
}
