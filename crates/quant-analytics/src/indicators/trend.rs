//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)
//!
//! 모든 결과는 첫 번째 완전한 윈도우부터 시작합니다. 즉, 결과의 0번 값은
//! 입력의 `period - 1`번 위치에 대응하며 앞쪽을 `None`으로 채우지 않습니다.

use quant_core::{ensure_len, AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD 결과.
///
/// 세 시계열은 길이가 다릅니다:
/// - `macd_line`: `n - slow + 1` (입력 인덱스 `slow - 1`부터)
/// - `signal_line`, `histogram`: `n - slow - signal + 2` (입력 인덱스 `slow + signal - 2`부터)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Macd {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd_line: Vec<f64>,
    /// 시그널 라인 (MACD 라인의 EMA).
    pub signal_line: Vec<f64>,
    /// 히스토그램 (MACD - 시그널), 시그널 라인 기준 정렬.
    pub histogram: Vec<f64>,
}

fn ensure_period(period: usize) -> AnalyticsResult<()> {
    if period == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }
    Ok(())
}

/// 단순 이동평균 (SMA).
///
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// 결과 길이는 `prices.len() - period + 1`.
pub fn sma(prices: &[f64], period: usize) -> AnalyticsResult<Vec<f64>> {
    ensure_period(period)?;
    ensure_len("sma", prices.len(), period)?;

    let divisor = period as f64;
    Ok(prices
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / divisor)
        .collect())
}

/// 지수 이동평균 (EMA).
///
/// 첫 값은 처음 `period`개 가격의 SMA이고, 이후
/// EMA = (현재가 - 이전 EMA) × k + 이전 EMA, k = 2 / (period + 1).
///
/// 결과 길이는 `prices.len() - period + 1`.
pub fn ema(prices: &[f64], period: usize) -> AnalyticsResult<Vec<f64>> {
    ensure_period(period)?;
    ensure_len("ema", prices.len(), period)?;

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed = prices[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(prices.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for price in &prices[period..] {
        prev += (price - prev) * multiplier;
        result.push(prev);
    }

    Ok(result)
}

/// MACD 계산.
///
/// - MACD 라인 = 단기 EMA[i + (slow - fast)] - 장기 EMA[i]
/// - 시그널 라인 = EMA(MACD 라인, signal)
/// - 히스토그램 = MACD 라인[i + signal - 1] - 시그널 라인[i]
///
/// `0 < fast < slow`, `signal >= 1`, 가격 `slow + signal - 1`개 이상이 필요합니다.
pub fn macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> AnalyticsResult<Macd> {
    ensure_period(fast)?;
    ensure_period(signal)?;
    if fast >= slow {
        return Err(AnalyticsError::InvalidParameter(format!(
            "단기 기간({})은 장기 기간({})보다 작아야 합니다",
            fast, slow
        )));
    }
    ensure_len("macd", prices.len(), slow + signal - 1)?;

    let fast_ema = ema(prices, fast)?;
    let slow_ema = ema(prices, slow)?;

    // 단기 EMA는 장기 EMA보다 (slow - fast)개 먼저 시작
    let offset = slow - fast;
    let macd_line: Vec<f64> = slow_ema
        .iter()
        .enumerate()
        .map(|(i, slow_value)| fast_ema[i + offset] - slow_value)
        .collect();

    let signal_line = ema(&macd_line, signal)?;
    let histogram = signal_line
        .iter()
        .enumerate()
        .map(|(i, s)| macd_line[i + signal - 1] - s)
        .collect();

    Ok(Macd {
        macd_line,
        signal_line,
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prices() -> Vec<f64> {
        vec![
            100.0, 102.0, 101.0, 103.0, 105.0, 104.0, 106.0, 108.0, 107.0, 109.0,
        ]
    }

    #[test]
    fn test_sma_basic() {
        let sma = sma(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0], 3).unwrap();
        assert_eq!(sma, vec![11.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn test_sma_full_window() {
        let prices = sample_prices();
        let sma = sma(&prices, prices.len()).unwrap();
        assert_eq!(sma.len(), 1);
        assert!((sma[0] - 104.5).abs() < 1e-12);
    }

    #[test]
    fn test_sma_invalid_inputs() {
        assert!(matches!(
            sma(&[1.0, 2.0], 0),
            Err(AnalyticsError::InvalidParameter(_))
        ));
        assert!(matches!(
            sma(&[1.0, 2.0], 3),
            Err(AnalyticsError::InsufficientData { required: 3, provided: 2, .. })
        ));
    }

    #[test]
    fn test_ema_seed_equals_sma() {
        let prices = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        let ema = ema(&prices, 3).unwrap();
        assert_eq!(ema.len(), 4);
        assert_eq!(ema[0], 11.0);
        // k = 0.5: (13 - 11) × 0.5 + 11 = 12
        assert!((ema[1] - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_ema_period_one_tracks_price() {
        let prices = sample_prices();
        let ema = ema(&prices, 1).unwrap();
        assert_eq!(ema, prices);
    }

    #[test]
    fn test_macd_lengths_and_alignment() {
        let prices: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let result = macd(&prices, 12, 26, 9).unwrap();

        assert_eq!(result.macd_line.len(), 50 - 26 + 1);
        assert_eq!(result.signal_line.len(), 50 - 26 - 9 + 2);
        assert_eq!(result.histogram.len(), result.signal_line.len());

        let fast = ema(&prices, 12).unwrap();
        let slow = ema(&prices, 26).unwrap();
        assert!((result.macd_line[0] - (fast[14] - slow[0])).abs() < 1e-12);

        let last = result.histogram.len() - 1;
        assert!(
            (result.histogram[last]
                - (result.macd_line[result.macd_line.len() - 1] - result.signal_line[last]))
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_macd_minimum_length() {
        let prices: Vec<f64> = (0..34).map(|i| 100.0 + i as f64).collect();
        let result = macd(&prices, 12, 26, 9).unwrap();
        assert_eq!(result.signal_line.len(), 1);

        assert!(matches!(
            macd(&prices[..33], 12, 26, 9),
            Err(AnalyticsError::InsufficientData { required: 34, .. })
        ));
    }

    #[test]
    fn test_macd_rejects_inverted_periods() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        assert!(matches!(
            macd(&prices, 26, 12, 9),
            Err(AnalyticsError::InvalidParameter(_))
        ));
    }
}
