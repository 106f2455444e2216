use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trendlens_core::{DetectorError, TrendDetector, TrendType};
use trendlens_indicators::{Hma, Indicator};

/// Periods for the three HMA engines.
///
/// By convention `fastest < fast < slow`; the ordering is not enforced, only
/// positivity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmaTrendConfig {
    pub fastest_period: usize,
    pub fast_period: usize,
    pub slow_period: usize,
}

/// Trend detection by triple-HMA comparison.
///
/// Up when the fastest HMA sits above both slower ones, Down when it sits
/// below both, Flat otherwise (ties included). While any engine is still
/// warming up the current trend is left untouched, so it stays Unknown
/// until all three resolve.
#[derive(Debug, Clone)]
pub struct HmaTrendDetector {
    config: HmaTrendConfig,
    fastest_hma: Hma,
    fast_hma: Hma,
    slow_hma: Hma,
    current_trend: TrendType,
    changed: bool,
}

impl HmaTrendDetector {
    pub fn new(config: HmaTrendConfig) -> Result<Self, DetectorError> {
        if config.fastest_period == 0 {
            return Err(DetectorError::invalid_period("fastest HMA"));
        }
        if config.fast_period == 0 {
            return Err(DetectorError::invalid_period("fast HMA"));
        }
        if config.slow_period == 0 {
            return Err(DetectorError::invalid_period("slow HMA"));
        }
        Ok(Self {
            config,
            fastest_hma: Hma::new(config.fastest_period),
            fast_hma: Hma::new(config.fast_period),
            slow_hma: Hma::new(config.slow_period),
            current_trend: TrendType::Unknown,
            changed: false,
        })
    }

    pub fn config(&self) -> &HmaTrendConfig {
        &self.config
    }

    /// Latest fastest-HMA value, if converged.
    pub fn fastest_value(&self) -> Option<Decimal> {
        self.fastest_hma.value()
    }

    pub fn fast_value(&self) -> Option<Decimal> {
        self.fast_hma.value()
    }

    pub fn slow_value(&self) -> Option<Decimal> {
        self.slow_hma.value()
    }

    /// Pure classification of the three latest HMA values.
    fn classify(fastest: Decimal, fast: Decimal, slow: Decimal) -> TrendType {
        if fastest > fast && fastest > slow {
            TrendType::Up
        } else if fastest < fast && fastest < slow {
            TrendType::Down
        } else {
            TrendType::Flat
        }
    }

    fn define_trend(&mut self) {
        self.changed = false;
        if let (Some(fastest), Some(fast), Some(slow)) = (
            self.fastest_hma.value(),
            self.fast_hma.value(),
            self.slow_hma.value(),
        ) {
            let new_trend = Self::classify(fastest, fast, slow);
            if new_trend != self.current_trend {
                tracing::debug!(from = %self.current_trend, to = %new_trend, "HMA trend changed");
                self.current_trend = new_trend;
                self.changed = true;
            }
        }
    }
}

impl TrendDetector for HmaTrendDetector {
    fn initialize(&mut self, closes: &[Decimal]) {
        self.fastest_hma.next_batch(closes);
        self.fast_hma.next_batch(closes);
        self.slow_hma.next_batch(closes);
        self.define_trend();
    }

    fn update(&mut self, close: Decimal) {
        self.fastest_hma.next(close);
        self.fast_hma.next(close);
        self.slow_hma.next(close);
        self.define_trend();
    }

    fn reset(&mut self) {
        self.current_trend = TrendType::Unknown;
        self.changed = false;
    }

    fn required_period(&self) -> usize {
        // Warm-up of the slowest cascaded WMA stage plus a small margin.
        let max_period = self
            .config
            .fastest_period
            .max(self.config.fast_period)
            .max(self.config.slow_period);
        max_period + 2 * isqrt(max_period) + 3
    }

    fn current_trend(&self) -> TrendType {
        self.current_trend
    }

    fn trend_changed(&self) -> bool {
        self.changed
    }
}

fn isqrt(n: usize) -> usize {
    (n as f64).sqrt() as usize
}
