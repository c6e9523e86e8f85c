//! 기술적 지표 모듈.
//!
//! 가격 시계열에 직접 작용하는 지표들을 제공하며, 수익률 변환 계층과는
//! 독립적입니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (Simple Moving Average)
//! - **EMA**: 지수 이동평균 (Exponential Moving Average)
//! - **MACD**: 이동평균 수렴/확산 (Moving Average Convergence Divergence)
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (Relative Strength Index)
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Bollinger Bands**: 볼린저 밴드
//!
//! # 사용 예시
//!
//! ```
//! use quant_analytics::indicators::{IndicatorEngine, RsiParams, SmaParams};
//!
//! let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
//! let engine = IndicatorEngine::new();
//!
//! let sma = engine.sma(&prices, SmaParams { period: 20 }).unwrap();
//! let rsi = engine.rsi(&prices, RsiParams::default()).unwrap();
//! assert_eq!(sma.len(), 11);
//! assert_eq!(rsi.len(), 16);
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;

use quant_core::{AnalyticsResult, IndicatorConfig};
use serde::Serialize;

pub use momentum::{rsi, RsiParams};
pub use trend::{ema, macd, sma, EmaParams, Macd, MacdParams, SmaParams};
pub use volatility::{bollinger_bands, BollingerBands, BollingerBandsParams};

/// 통합 지표 엔진.
///
/// 상태가 없으며, 파라미터 구조체를 받아 각 지표 함수에 위임합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self
    }

    // ==================== 추세 지표 ====================

    /// 단순 이동평균 (SMA) 계산.
    pub fn sma(&self, prices: &[f64], params: SmaParams) -> AnalyticsResult<Vec<f64>> {
        sma(prices, params.period)
    }

    /// 지수 이동평균 (EMA) 계산.
    pub fn ema(&self, prices: &[f64], params: EmaParams) -> AnalyticsResult<Vec<f64>> {
        ema(prices, params.period)
    }

    /// MACD 계산.
    pub fn macd(&self, prices: &[f64], params: MacdParams) -> AnalyticsResult<Macd> {
        macd(
            prices,
            params.fast_period,
            params.slow_period,
            params.signal_period,
        )
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI 계산. 0-100 사이 값.
    pub fn rsi(&self, prices: &[f64], params: RsiParams) -> AnalyticsResult<Vec<f64>> {
        rsi(prices, params.period)
    }

    // ==================== 변동성 지표 ====================

    /// 볼린저 밴드 계산.
    pub fn bollinger_bands(
        &self,
        prices: &[f64],
        params: BollingerBandsParams,
    ) -> AnalyticsResult<BollingerBands> {
        bollinger_bands(prices, params.period, params.std_dev_multiplier)
    }

    /// 설정된 기간으로 모든 지표를 한 번에 계산합니다.
    ///
    /// 하나라도 데이터가 부족하면 에러를 반환합니다.
    pub fn report(&self, prices: &[f64], config: &IndicatorConfig) -> AnalyticsResult<IndicatorReport> {
        Ok(IndicatorReport {
            sma: self.sma(prices, SmaParams { period: config.sma_period })?,
            ema: self.ema(prices, EmaParams { period: config.ema_period })?,
            rsi: self.rsi(prices, RsiParams { period: config.rsi_period })?,
            bollinger: self.bollinger_bands(
                prices,
                BollingerBandsParams {
                    period: config.bollinger_period,
                    std_dev_multiplier: config.bollinger_k,
                },
            )?,
            macd: self.macd(
                prices,
                MacdParams {
                    fast_period: config.macd_fast,
                    slow_period: config.macd_slow,
                    signal_period: config.macd_signal,
                },
            )?,
        })
    }
}

/// 지표 일괄 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    /// 단순 이동평균
    pub sma: Vec<f64>,
    /// 지수 이동평균
    pub ema: Vec<f64>,
    /// RSI
    pub rsi: Vec<f64>,
    /// 볼린저 밴드
    pub bollinger: BollingerBands,
    /// MACD
    pub macd: Macd,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prices() -> Vec<f64> {
        (0..60)
            .map(|i| 100.0 + i as f64 * 0.3 + (i as f64 * 0.9).sin() * 2.0)
            .collect()
    }

    #[test]
    fn test_engine_delegates() {
        let engine = IndicatorEngine::new();
        let prices = sample_prices();

        assert_eq!(
            engine.sma(&prices, SmaParams { period: 5 }).unwrap(),
            sma(&prices, 5).unwrap()
        );
        assert_eq!(
            engine.rsi(&prices, RsiParams::default()).unwrap().len(),
            prices.len() - 14
        );
        assert_eq!(
            engine.macd(&prices, MacdParams::default()).unwrap(),
            macd(&prices, 12, 26, 9).unwrap()
        );
    }

    #[test]
    fn test_report_with_default_config() {
        let engine = IndicatorEngine::new();
        let prices = sample_prices();
        let report = engine.report(&prices, &IndicatorConfig::default()).unwrap();

        assert_eq!(report.sma.len(), 60 - 20 + 1);
        assert_eq!(report.ema.len(), 60 - 12 + 1);
        assert_eq!(report.rsi.len(), 60 - 14);
        assert_eq!(report.bollinger.len(), 60 - 20 + 1);
        assert_eq!(report.macd.macd_line.len(), 60 - 26 + 1);
    }

    #[test]
    fn test_report_insufficient_data() {
        let engine = IndicatorEngine::new();
        let prices: Vec<f64> = (0..20).map(|i| i as f64 + 1.0).collect();
        assert!(engine.report(&prices, &IndicatorConfig::default()).is_err());
    }
}
