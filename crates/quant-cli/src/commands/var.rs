//! VaR / CVaR 명령.

use anyhow::{Context, Result};
use quant_analytics::{conditional_var, simple_returns, value_at_risk};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::input::read_prices;

/// VaR 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VarReport {
    pub confidence: f64,
    pub observations: usize,
    pub value_at_risk: f64,
    pub conditional_var: f64,
}

/// 가격 파일의 단순 수익률로 과거 시뮬레이션 VaR / CVaR를 계산합니다.
pub fn run_var(prices_path: &Path, confidence: f64) -> Result<VarReport> {
    let prices = read_prices(prices_path)?;
    let returns = simple_returns(&prices);
    info!(observations = returns.len(), confidence, "Computing VaR");

    Ok(VarReport {
        confidence,
        observations: returns.len(),
        value_at_risk: value_at_risk(&returns, confidence).context("Failed to compute VaR")?,
        conditional_var: conditional_var(&returns, confidence)
            .context("Failed to compute CVaR")?,
    })
}
