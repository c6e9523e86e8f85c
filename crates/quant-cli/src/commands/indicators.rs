//! 기술적 지표 명령.

use anyhow::{Context, Result};
use quant_analytics::{IndicatorEngine, IndicatorReport};
use quant_core::IndicatorConfig;
use std::path::Path;
use tracing::info;

use super::input::read_prices;

/// 가격 파일을 읽어 설정된 기간으로 모든 지표를 계산합니다.
pub fn run_indicators(prices_path: &Path, settings: &IndicatorConfig) -> Result<IndicatorReport> {
    let prices = read_prices(prices_path)?;
    info!(prices = prices.len(), "Computing indicators");

    IndicatorEngine::new()
        .report(&prices, settings)
        .context("Failed to compute indicators")
}
