//! 가격 시계열 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 수익률 변환 (단순/로그/누적/연율화)
//! - 기술 통계 (평균, 중앙값, 표본 분산, 왜도, 첨도)
//! - 위험 지표 (변동성, 샤프/소르티노/칼마 비율, 최대 낙폭, 베타/알파, VaR/CVaR)
//! - 기술적 지표 (SMA, EMA, RSI, 볼린저 밴드, MACD)
//! - 다중 시계열 정렬 및 상관행렬
//! - 통계 요약 ([`StatsSummary`])
//!
//! 모든 함수는 순수 함수이며 `&[f64]`를 입력으로 받습니다.
//! `Decimal` 가격은 [`returns::simple_returns_decimal`] 또는
//! [`quant_core::decimal_series_to_f64`]로 변환해 사용합니다.
//!
//! # Re-exports
//!
//! - [`indicators`]: 기술적 지표 ([`IndicatorEngine`], 파라미터 구조체)
//! - [`risk`]: 위험 지표 ([`MaxDrawdown`], [`SortinoRatio`])
//! - [`summary`]: [`stats_summary`], [`stats_summary_with_config`]

pub mod alignment;
pub mod correlation;
pub mod indicators;
pub mod returns;
pub mod risk;
pub mod stats;
pub mod summary;

pub use alignment::{align_pair, align_series, weighted_portfolio_returns, AlignmentPolicy};
pub use correlation::{correlation_matrix, CorrelationMatrix};

// Indicators 모듈 re-exports
pub use indicators::{
    bollinger_bands, ema, macd, rsi, sma, BollingerBands, BollingerBandsParams, EmaParams,
    IndicatorEngine, IndicatorReport, Macd, MacdParams, RsiParams, SmaParams,
};

pub use returns::{
    annualized_return, cumulative_returns, log_returns, simple_returns, simple_returns_decimal,
    total_return,
};
pub use risk::{
    alpha, beta, calmar_ratio, conditional_var, correlation, covariance, drawdown_series,
    max_drawdown, sharpe_ratio, sortino_ratio, value_at_risk, volatility, MaxDrawdown,
    SortinoRatio,
};
pub use summary::{stats_summary, stats_summary_with_config, StatsSummary};

pub use quant_core::{
    AnalyticsConfig, AnalyticsError, AnalyticsResult, DEFAULT_RISK_FREE_RATE,
    DEFAULT_VAR_CONFIDENCE, TRADING_DAYS_PER_YEAR,
};
