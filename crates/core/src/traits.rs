use crate::trend::TrendType;
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Trend Detector Trait
// ---------------------------------------------------------------------------

/// A trend detector that consumes one stream of closing prices and keeps a
/// single current [`TrendType`].
///
/// Lifecycle: construct with fixed periods, optionally [`initialize`] with a
/// seed series (equivalent to feeding every price through [`update`] in
/// order), then advance one price at a time. Both operations re-evaluate the
/// classification from the latest indicator values.
///
/// [`initialize`]: TrendDetector::initialize
/// [`update`]: TrendDetector::update
pub trait TrendDetector: Send + Sync {
    /// Feed an ordered seed series of closing prices and classify.
    fn initialize(&mut self, closes: &[Decimal]);

    /// Feed one new closing price and re-classify.
    fn update(&mut self, close: Decimal);

    /// Clear the current trend back to [`TrendType::Unknown`].
    ///
    /// Indicator history is kept: the next [`update`](TrendDetector::update)
    /// classifies from engine state that still reflects everything processed
    /// before the reset.
    fn reset(&mut self);

    /// How many seed prices should be supplied to `initialize` so that the
    /// first classification is defined and stable.
    fn required_period(&self) -> usize;

    /// Current trend ([`TrendType::Unknown`] until the first classification).
    fn current_trend(&self) -> TrendType;

    /// Whether the most recent `initialize`/`update` call changed the trend.
    fn trend_changed(&self) -> bool;
}
