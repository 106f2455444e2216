use crate::wma::Wma;
use crate::Indicator;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Hull Moving Average (HMA).
///
/// Composed of three WMA stages:
/// - half WMA over the raw input, window `period / 2`
/// - full WMA over the raw input, window `period`
/// - smoothing WMA, window `sqrt(period)`, over the raw hull series
///   `2 * half - full`
///
/// The smoothing stage only starts filling once both raw-input stages have
/// converged, so the first output appears after
/// `period + sqrt(period) - 1` inputs.
#[derive(Debug, Clone)]
pub struct Hma {
    len: usize,
    half_wma: Wma,
    full_wma: Wma,
    smooth_wma: Wma,
    current: Option<Decimal>,
}

impl Hma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "HMA period must be > 0");
        // Stage windows are clamped to >= 1 so period 1 and 2 stay defined.
        let half = (period / 2).max(1);
        let smooth = isqrt(period).max(1);
        Self {
            len: period,
            half_wma: Wma::new(half),
            full_wma: Wma::new(period),
            smooth_wma: Wma::new(smooth),
            current: None,
        }
    }

    /// Get the current HMA value without feeding new data.
    pub fn value(&self) -> Option<Decimal> {
        self.current
    }
}

impl Indicator for Hma {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        let half = self.half_wma.next(value);
        let full = self.full_wma.next(value);

        // The raw hull value exists only once both input stages resolve;
        // until then the smoothing window stays empty.
        if let (Some(h), Some(f)) = (half, full) {
            let raw_hull = dec!(2) * h - f;
            self.current = self.smooth_wma.next(raw_hull);
        }

        self.current
    }

    fn reset(&mut self) {
        self.half_wma.reset();
        self.full_wma.reset();
        self.smooth_wma.reset();
        self.current = None;
    }

    fn period(&self) -> usize {
        self.full_wma.period() + self.smooth_wma.period() - 1
    }

    fn is_ready(&self) -> bool {
        self.current.is_some()
    }
}

/// Integer square root (floor).
fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    // f64 sqrt can land one off for large n.
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(2), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(200), 14);
    }

    #[test]
    fn test_hma_warmup_length() {
        // HMA(4): half=WMA(2), full=WMA(4), smooth=WMA(2).
        // First raw hull at input 4, smooth window full at input 5.
        let mut hma = Hma::new(4);
        assert_eq!(hma.period(), 5);
        for v in [dec!(1), dec!(2), dec!(3), dec!(4)] {
            assert_eq!(hma.next(v), None);
            assert!(!hma.is_ready());
        }
        assert!(hma.next(dec!(5)).is_some());
        assert!(hma.is_ready());
    }

    #[test]
    fn test_hma_of_linear_ramp_equals_latest_input() {
        // The hull construction cancels lag exactly on a linear ramp.
        let mut hma = Hma::new(4);
        for i in 1..=4 {
            hma.next(Decimal::from(i));
        }
        assert_eq!(hma.next(dec!(5)), Some(dec!(5)));
        assert_eq!(hma.next(dec!(6)), Some(dec!(6)));
        assert_eq!(hma.next(dec!(7)), Some(dec!(7)));
    }

    #[test]
    fn test_hma_of_constant_sequence_equals_constant() {
        let mut hma = Hma::new(9);
        let mut last = None;
        for _ in 0..30 {
            last = hma.next(dec!(1500.5));
        }
        assert_eq!(last, Some(dec!(1500.5)));
    }

    #[test]
    fn test_hma_period_one_tracks_input() {
        let mut hma = Hma::new(1);
        assert_eq!(hma.next(dec!(10)), Some(dec!(10)));
        assert_eq!(hma.next(dec!(12)), Some(dec!(12)));
    }

    #[test]
    fn test_hma_batch_matches_incremental() {
        let values: Vec<Decimal> = (1..=20).map(|i| Decimal::from(i * i)).collect();

        let mut batch = Hma::new(5);
        let batched = batch.next_batch(&values);

        let mut inc = Hma::new(5);
        let mut last = None;
        for &v in &values {
            last = inc.next(v);
        }
        assert_eq!(batched, last);
        assert!(batched.is_some());
    }

    #[test]
    fn test_hma_value_is_cached_read() {
        let mut hma = Hma::new(3);
        assert_eq!(hma.value(), None);
        let out = hma.next_batch(&[dec!(1), dec!(2), dec!(3), dec!(4)]);
        assert_eq!(hma.value(), out);
    }

    #[test]
    fn test_hma_reset_clears_all_stages() {
        let mut hma = Hma::new(3);
        hma.next_batch(&[dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
        assert!(hma.is_ready());
        hma.reset();
        assert!(!hma.is_ready());
        assert_eq!(hma.value(), None);
    }
}
