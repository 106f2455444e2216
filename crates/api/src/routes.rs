use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trendlens_core::{DetectorError, TrendDetector, TrendType};
use trendlens_detectors::{
    CoupleRsiConfig, CoupleRsiTrendDetector, HmaTrendConfig, HmaTrendDetector,
};

pub fn api_routes() -> Router {
    Router::new()
        // Health
        .route("/health", get(health_check))
        // Trend calculation
        .route("/trend", post(calc_trend))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Trend calculation
// ---------------------------------------------------------------------------

/// One-shot trend calculation over seed close series.
#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub rsi_small_period: usize,
    pub rsi_big_period: usize,
    pub fastest_hma_period: usize,
    pub fast_hma_period: usize,
    pub slow_hma_period: usize,
    /// Closes of the small RSI timeframe.
    pub small_tf_closes: Vec<Decimal>,
    /// Closes of the big RSI timeframe.
    pub big_tf_closes: Vec<Decimal>,
    /// Closes of the HMA timeframe.
    pub hma_closes: Vec<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub hma_trend: TrendType,
    pub fastest_hma: Option<Decimal>,
    pub fast_hma: Option<Decimal>,
    pub slow_hma: Option<Decimal>,
    pub small_tf_trend: TrendType,
    pub big_tf_trend: TrendType,
    pub small_tf_rsi: Option<Decimal>,
    pub big_tf_rsi: Option<Decimal>,
    pub combined_trend: TrendType,
}

/// Build fresh detectors for the request, seed them, and read the trends.
pub fn compute_trend(req: &TrendRequest) -> Result<TrendResponse, DetectorError> {
    let mut couple = CoupleRsiTrendDetector::new(CoupleRsiConfig {
        small_tf_period: req.rsi_small_period,
        big_tf_period: req.rsi_big_period,
    })?;
    couple.small_tf.initialize(&req.small_tf_closes);
    couple.big_tf.initialize(&req.big_tf_closes);
    couple.recompute();

    let mut hma = HmaTrendDetector::new(HmaTrendConfig {
        fastest_period: req.fastest_hma_period,
        fast_period: req.fast_hma_period,
        slow_period: req.slow_hma_period,
    })?;
    hma.initialize(&req.hma_closes);

    Ok(TrendResponse {
        hma_trend: hma.current_trend(),
        fastest_hma: hma.fastest_value(),
        fast_hma: hma.fast_value(),
        slow_hma: hma.slow_value(),
        small_tf_trend: couple.small_tf.current_trend(),
        big_tf_trend: couple.big_tf.current_trend(),
        small_tf_rsi: couple.small_tf.current_rsi(),
        big_tf_rsi: couple.big_tf.current_rsi(),
        combined_trend: couple.current_trend(),
    })
}

async fn calc_trend(Json(req): Json<TrendRequest>) -> Response {
    match compute_trend(&req) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "rejected trend request");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}
