/// Errors that can occur when constructing or driving a trend detector.
///
/// Insufficient warm-up data is deliberately not represented here: an
/// indicator that has not converged reports `None` and the detector keeps
/// its last trend. Only genuinely invalid requests produce errors.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    /// A period of zero would make the period-derived decay factors and
    /// window divisions undefined, so it is rejected at construction.
    #[error("Invalid {name} period: must be greater than zero")]
    InvalidPeriod { name: &'static str },
}

impl DetectorError {
    pub fn invalid_period(name: &'static str) -> Self {
        DetectorError::InvalidPeriod { name }
    }
}
