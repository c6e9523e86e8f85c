//! 단일 자산 통계 요약.
//!
//! 가격 시계열 하나(선택적으로 벤치마크 하나)로부터 수익률을 한 번만 계산한 뒤
//! 모든 성과·위험 지표를 묶어 [`StatsSummary`]로 반환합니다.

use quant_core::{ensure_finite, ensure_len, AnalyticsConfig, AnalyticsResult};
use serde::Serialize;
use tracing::debug;

use crate::alignment::align_pair;
use crate::returns::{annualized_return, simple_returns, total_return};
use crate::risk::{
    alpha, beta, conditional_var, correlation, max_drawdown, sharpe_ratio, sortino_ratio,
    value_at_risk, volatility, SortinoRatio,
};
use crate::stats::{kurtosis, max, mean, median, min, sample_std_dev, skewness};

/// 통계 요약 결과.
///
/// 모든 수익률 기반 지표는 같은 단순 수익률 시계열에서 계산됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// 누적 총 수익률
    pub total_return: f64,
    /// 연율화 수익률
    pub annualized_return: f64,
    /// 연율화 변동성
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: SortinoRatio,
    /// 최대 낙폭 (0.0 ~ 1.0)
    pub max_drawdown: f64,
    /// `var_95`/`cvar_95` 계산에 사용한 신뢰수준 (기본 0.95)
    pub var_confidence: f64,
    /// `var_confidence` 수준의 과거 시뮬레이션 VaR.
    ///
    /// 키 이름은 기본 신뢰수준 기준으로 고정되어 있으므로 실제 수준은
    /// `var_confidence`를 확인합니다.
    pub var_95: f64,
    /// `var_confidence` 수준의 조건부 VaR
    pub cvar_95: f64,
    /// 수익률이 3개 미만이면 None
    pub skewness: Option<f64>,
    /// 수익률이 4개 미만이면 None
    pub kurtosis: Option<f64>,
    pub mean: f64,
    pub median: f64,
    pub standard_deviation: f64,
    pub min: f64,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<f64>,
}

/// 벤치마크 대비 지표.
struct BenchmarkMetrics {
    beta: f64,
    alpha: f64,
    correlation: f64,
}

/// 기본 설정(연 252 거래일, 무위험 2%, 신뢰수준 95%)으로 통계 요약을 계산합니다.
///
/// # 인자
///
/// * `prices` - 자산 가격 시계열 (최소 3개)
/// * `benchmark_prices` - 벤치마크 가격 시계열 (비어 있으면 무시)
pub fn stats_summary(
    prices: &[f64],
    benchmark_prices: Option<&[f64]>,
) -> AnalyticsResult<StatsSummary> {
    stats_summary_with_config(prices, benchmark_prices, &AnalyticsConfig::default())
}

/// 설정값을 지정해 통계 요약을 계산합니다.
///
/// # 에러
///
/// - 가격이 3개 미만이면 `InsufficientData`
/// - 가격 또는 수익률에 NaN/무한대가 있으면 `InvalidInput`
/// - 벤치마크와 정렬한 수익률이 2개 미만이면 `InsufficientData`
pub fn stats_summary_with_config(
    prices: &[f64],
    benchmark_prices: Option<&[f64]>,
    config: &AnalyticsConfig,
) -> AnalyticsResult<StatsSummary> {
    ensure_len("stats_summary", prices.len(), 3)?;
    ensure_finite("stats_summary", prices)?;

    let returns = simple_returns(prices);
    ensure_finite("stats_summary", &returns)?;

    let td = config.trading_days;
    let rf = config.risk_free_rate;
    let confidence = config.var_confidence;

    let benchmark = match benchmark_prices {
        Some(bench) if !bench.is_empty() => Some(benchmark_metrics(&returns, bench, config)?),
        _ => None,
    };

    let summary = StatsSummary {
        total_return: total_return(&returns),
        annualized_return: annualized_return(&returns, td)?,
        volatility: volatility(&returns, td)?,
        sharpe_ratio: sharpe_ratio(&returns, rf, td)?,
        sortino_ratio: sortino_ratio(&returns, rf, td)?,
        max_drawdown: max_drawdown(prices)?.max_drawdown,
        var_confidence: confidence,
        var_95: value_at_risk(&returns, confidence)?,
        cvar_95: conditional_var(&returns, confidence)?,
        skewness: skewness(&returns).ok(),
        kurtosis: kurtosis(&returns).ok(),
        mean: mean(&returns)?,
        median: median(&returns)?,
        standard_deviation: sample_std_dev(&returns)?,
        min: min(&returns)?,
        max: max(&returns)?,
        beta: benchmark.as_ref().map(|b| b.beta),
        alpha: benchmark.as_ref().map(|b| b.alpha),
        correlation: benchmark.as_ref().map(|b| b.correlation),
    };

    debug!(
        prices = prices.len(),
        has_benchmark = summary.beta.is_some(),
        total_return = summary.total_return,
        sharpe = summary.sharpe_ratio,
        "stats summary computed"
    );

    Ok(summary)
}

fn benchmark_metrics(
    returns: &[f64],
    benchmark_prices: &[f64],
    config: &AnalyticsConfig,
) -> AnalyticsResult<BenchmarkMetrics> {
    ensure_finite("stats_summary", benchmark_prices)?;
    let bench_returns = simple_returns(benchmark_prices);
    ensure_finite("stats_summary", &bench_returns)?;

    let (asset, bench) = align_pair(returns, &bench_returns);
    ensure_len("stats_summary.benchmark", asset.len(), 2)?;

    Ok(BenchmarkMetrics {
        beta: beta(asset, bench)?,
        alpha: alpha(asset, bench, config.risk_free_rate, config.trading_days)?,
        correlation: correlation(asset, bench)?,
    })
}
