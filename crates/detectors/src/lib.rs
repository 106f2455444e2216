pub mod couple_rsi;
pub mod hma_trend;
pub mod rsi_trend;

pub use couple_rsi::{CoupleRsiConfig, CoupleRsiTrendDetector};
pub use hma_trend::{HmaTrendConfig, HmaTrendDetector};
pub use rsi_trend::RsiTrendDetector;
