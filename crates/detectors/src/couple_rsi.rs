use serde::{Deserialize, Serialize};
use trendlens_core::{DetectorError, TrendDetector, TrendType};

use crate::rsi_trend::RsiTrendDetector;

/// RSI periods for the two timeframes of a [`CoupleRsiTrendDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoupleRsiConfig {
    pub small_tf_period: usize,
    pub big_tf_period: usize,
}

/// Trend detector combining two [`RsiTrendDetector`]s on different
/// timeframes.
///
/// Up when both children report Up, Down when both report Down, Flat when
/// they disagree. There is no observer wiring between children and parent:
/// the caller feeds each child (they run on different candle streams) and
/// then explicitly calls [`recompute`](CoupleRsiTrendDetector::recompute).
/// While either child is still Unknown the aggregate keeps its previous
/// value.
#[derive(Debug, Clone)]
pub struct CoupleRsiTrendDetector {
    pub small_tf: RsiTrendDetector,
    pub big_tf: RsiTrendDetector,
    current_trend: TrendType,
    changed: bool,
}

impl CoupleRsiTrendDetector {
    pub fn new(config: CoupleRsiConfig) -> Result<Self, DetectorError> {
        Ok(Self {
            small_tf: RsiTrendDetector::new(config.small_tf_period)?,
            big_tf: RsiTrendDetector::new(config.big_tf_period)?,
            current_trend: TrendType::Unknown,
            changed: false,
        })
    }

    /// Derive the aggregate trend from the children's current trends.
    ///
    /// Must be invoked explicitly after updating both children; child
    /// updates never trigger it.
    pub fn recompute(&mut self) {
        self.changed = false;
        let small = self.small_tf.current_trend();
        let big = self.big_tf.current_trend();
        if !small.is_known() || !big.is_known() {
            return;
        }

        let new_trend = match (small, big) {
            (TrendType::Up, TrendType::Up) => TrendType::Up,
            (TrendType::Down, TrendType::Down) => TrendType::Down,
            _ => TrendType::Flat,
        };
        if new_trend != self.current_trend {
            tracing::debug!(%small, %big, to = %new_trend, "couple RSI trend changed");
            self.current_trend = new_trend;
            self.changed = true;
        }
    }

    /// Clear the aggregate trend back to Unknown.
    ///
    /// The children keep both their trends and their RSI history; reset
    /// them individually if needed.
    pub fn reset(&mut self) {
        self.current_trend = TrendType::Unknown;
        self.changed = false;
    }

    pub fn current_trend(&self) -> TrendType {
        self.current_trend
    }

    /// Whether the last [`recompute`](Self::recompute) changed the aggregate.
    pub fn trend_changed(&self) -> bool {
        self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn couple(small: usize, big: usize) -> CoupleRsiTrendDetector {
        CoupleRsiTrendDetector::new(CoupleRsiConfig {
            small_tf_period: small,
            big_tf_period: big,
        })
        .unwrap()
    }

    fn rising(n: usize) -> Vec<Decimal> {
        (1..=n).map(|i| Decimal::from(i * 2)).collect()
    }

    fn falling(n: usize) -> Vec<Decimal> {
        (1..=n).map(|i| Decimal::from(1000 - i * 3)).collect()
    }

    #[test]
    fn test_rejects_zero_periods() {
        for (small, big) in [(0, 14), (14, 0)] {
            assert!(matches!(
                CoupleRsiTrendDetector::new(CoupleRsiConfig {
                    small_tf_period: small,
                    big_tf_period: big,
                }),
                Err(DetectorError::InvalidPeriod { .. })
            ));
        }
    }

    #[test]
    fn test_both_up_aggregates_up() {
        let mut det = couple(14, 14);
        det.small_tf.initialize(&rising(16));
        det.big_tf.initialize(&rising(16));
        det.recompute();
        assert_eq!(det.current_trend(), TrendType::Up);
        assert!(det.trend_changed());
    }

    #[test]
    fn test_both_down_aggregates_down() {
        let mut det = couple(14, 14);
        det.small_tf.initialize(&falling(16));
        det.big_tf.initialize(&falling(16));
        det.recompute();
        assert_eq!(det.current_trend(), TrendType::Down);
    }

    #[test]
    fn test_disagreement_aggregates_flat() {
        let mut det = couple(14, 14);
        det.small_tf.initialize(&rising(16));
        det.big_tf.initialize(&falling(16));
        det.recompute();
        assert_eq!(det.small_tf.current_trend(), TrendType::Up);
        assert_eq!(det.big_tf.current_trend(), TrendType::Down);
        assert_eq!(det.current_trend(), TrendType::Flat);
    }

    #[test]
    fn test_aggregate_untouched_while_a_child_is_unknown() {
        let mut det = couple(14, 14);
        det.small_tf.initialize(&rising(16));
        // big_tf never fed
        det.recompute();
        assert_eq!(det.current_trend(), TrendType::Unknown);
        assert!(!det.trend_changed());
    }

    #[test]
    fn test_aggregate_holds_previous_value_through_child_warmup_gap() {
        let mut det = couple(2, 14);
        det.small_tf.initialize(&rising(16));
        det.big_tf.initialize(&rising(16));
        det.recompute();
        assert_eq!(det.current_trend(), TrendType::Up);

        // Fresh small child values cannot un-know the aggregate; it only
        // moves on a recompute with both children known.
        det.small_tf.reset();
        det.recompute();
        assert_eq!(det.current_trend(), TrendType::Up);
    }

    #[test]
    fn test_recompute_is_explicit_not_automatic() {
        let mut det = couple(14, 14);
        det.small_tf.initialize(&rising(16));
        det.big_tf.initialize(&rising(16));
        // Children resolved, parent not recomputed yet.
        assert_eq!(det.small_tf.current_trend(), TrendType::Up);
        assert_eq!(det.current_trend(), TrendType::Unknown);
        det.recompute();
        assert_eq!(det.current_trend(), TrendType::Up);
    }

    #[test]
    fn test_reset_clears_only_the_aggregate() {
        let mut det = couple(14, 14);
        det.small_tf.initialize(&rising(16));
        det.big_tf.initialize(&rising(16));
        det.recompute();
        det.reset();
        assert_eq!(det.current_trend(), TrendType::Unknown);
        assert_eq!(det.small_tf.current_trend(), TrendType::Up);
        assert_eq!(det.big_tf.current_trend(), TrendType::Up);

        det.recompute();
        assert_eq!(det.current_trend(), TrendType::Up);
    }

    #[test]
    fn test_demo_series_aggregates_up() {
        // The two seed series from the original service demo endpoint; both
        // resolve Up (RSI 51.52 and 74.30).
        let small_closes = [
            dec!(2019.79),
            dec!(2122.92),
            dec!(2123.00),
            dec!(2104.64),
            dec!(2098.14),
            dec!(2091.11),
            dec!(2089.42),
            dec!(2079.10),
            dec!(2047.79),
            dec!(2056.58),
            dec!(2059.53),
            dec!(2069.32),
            dec!(2077.46),
            dec!(2054.52),
            dec!(2052.89),
            dec!(2058.90),
        ];
        let big_closes = [
            dec!(1780.02),
            dec!(1776.76),
            dec!(1795.49),
            dec!(1809.81),
            dec!(1815.67),
            dec!(1848.20),
            dec!(1800.68),
            dec!(1832.49),
            dec!(1856.08),
            dec!(1892.49),
            dec!(1901.71),
            dec!(1885.79),
            dec!(1888.42),
            dec!(2122.92),
            dec!(2079.10),
            dec!(2054.52),
        ];

        let mut det = couple(14, 14);
        det.small_tf.initialize(&small_closes);
        det.big_tf.initialize(&big_closes);
        det.recompute();

        assert_eq!(det.small_tf.current_rsi(), Some(dec!(51.52)));
        assert_eq!(det.big_tf.current_rsi(), Some(dec!(74.30)));
        assert_eq!(det.current_trend(), TrendType::Up);
    }
}
