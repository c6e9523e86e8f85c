//! 분포 및 위험 통계.
//!
//! 수익률 시계열(일부는 가격 시계열)을 받아 다음 지표를 계산합니다:
//! - 변동성 (Volatility): 연율화 표본 표준편차
//! - 샤프 비율 (Sharpe Ratio): 변동성 대비 초과 수익
//! - 소르티노 비율 (Sortino Ratio): 하방 편차 대비 초과 수익
//! - 최대 낙폭 (Maximum Drawdown): 고점 대비 최대 하락률
//! - VaR / CVaR: 과거 시뮬레이션 방식의 꼬리 위험
//! - 공분산, 상관계수, 베타, 젠센 알파: 자산/벤치마크 쌍
//!
//! # 센티넬 값
//!
//! 분모가 0이 되는 퇴화 입력은 에러가 아니라 문서화된 극한값을 반환합니다:
//!
//! | 상황 | 반환값 |
//! |------|--------|
//! | 변동성 0 (샤프) | 0 |
//! | 하방 수익률 없음 (소르티노) | [`SortinoRatio::NoDownside`] |
//! | 벤치마크 분산 0 (베타) | 0 |
//! | 한쪽 분산 0 (상관계수) | 0 |

use quant_core::{ensure_len, AnalyticsError, AnalyticsResult};
use serde::{Serialize, Serializer};

use crate::alignment::align_pair;
use crate::returns::{annualized_return, simple_returns};
use crate::stats::{sample_covariance, sample_std_dev, sample_variance, sorted_ascending};

/// 최대 낙폭 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxDrawdown {
    /// 최대 낙폭 (비율, 0.25 = 25%)
    pub max_drawdown: f64,
    /// 최대 낙폭 시점의 고점 인덱스
    pub peak_index: usize,
    /// 최대 낙폭이 발생한 저점 인덱스
    pub trough_index: usize,
}

/// 소르티노 비율.
///
/// 하방 수익률이 관측되지 않으면 비율은 +∞로 정의되는데, 무한대를 그대로
/// 직렬화하면 JSON 계약이 깨지므로 별도 variant로 표현합니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortinoRatio {
    /// 유한한 비율
    Finite(f64),
    /// 관측된 하방 위험 없음 (+∞)
    NoDownside,
}

impl SortinoRatio {
    /// f64로 변환합니다. `NoDownside`는 `f64::INFINITY`.
    pub fn as_f64(self) -> f64 {
        match self {
            SortinoRatio::Finite(v) => v,
            SortinoRatio::NoDownside => f64::INFINITY,
        }
    }

    /// 하방 위험이 관측되지 않았는지 확인합니다.
    pub fn is_no_downside(self) -> bool {
        matches!(self, SortinoRatio::NoDownside)
    }
}

impl Serialize for SortinoRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SortinoRatio::Finite(v) => serializer.serialize_f64(*v),
            SortinoRatio::NoDownside => serializer.serialize_str("noDownside"),
        }
    }
}

fn ensure_trading_days(trading_days: u32) -> AnalyticsResult<()> {
    if trading_days == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "trading_days는 0보다 커야 합니다".to_string(),
        ));
    }
    Ok(())
}

fn ensure_confidence(confidence: f64) -> AnalyticsResult<()> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "신뢰수준은 (0, 1) 범위여야 합니다: {}",
            confidence
        )));
    }
    Ok(())
}

/// 연율화 변동성: 표본 표준편차 × √trading_days.
///
/// 수익률이 2개 미만이면 `InsufficientData`.
pub fn volatility(returns: &[f64], trading_days: u32) -> AnalyticsResult<f64> {
    ensure_len("volatility", returns.len(), 2)?;
    ensure_trading_days(trading_days)?;
    Ok(sample_std_dev(returns)? * f64::from(trading_days).sqrt())
}

/// 샤프 비율: `(연율화 수익률 - 무위험 이자율) / 연율화 변동성`.
///
/// 변동성이 정확히 0이면 0을 반환합니다.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, trading_days: u32) -> AnalyticsResult<f64> {
    let vol = volatility(returns, trading_days)?;
    if vol == 0.0 {
        return Ok(0.0);
    }
    let annual = annualized_return(returns, trading_days)?;
    Ok((annual - risk_free_rate) / vol)
}

/// 소르티노 비율: `(연율화 수익률 - 무위험 이자율) / 연율화 하방 편차`.
///
/// 기간 무위험 수익률(`risk_free_rate / trading_days`)보다 낮은 수익률만 하방으로
/// 보고, 그 부족분 제곱의 평균에 제곱근을 취한 뒤 √trading_days로 연율화합니다.
/// 하방 수익률이 없거나 하방 편차가 0이면 [`SortinoRatio::NoDownside`].
pub fn sortino_ratio(
    returns: &[f64],
    risk_free_rate: f64,
    trading_days: u32,
) -> AnalyticsResult<SortinoRatio> {
    let annual = annualized_return(returns, trading_days)?;
    let period_rf = risk_free_rate / f64::from(trading_days);

    let (count, sum_sq) = returns
        .iter()
        .filter(|r| **r < period_rf)
        .fold((0usize, 0.0_f64), |(n, sum), r| (n + 1, sum + (r - period_rf).powi(2)));

    if count == 0 {
        return Ok(SortinoRatio::NoDownside);
    }

    let downside_deviation = (sum_sq / count as f64).sqrt() * f64::from(trading_days).sqrt();
    if downside_deviation == 0.0 {
        return Ok(SortinoRatio::NoDownside);
    }

    Ok(SortinoRatio::Finite(
        (annual - risk_free_rate) / downside_deviation,
    ))
}

/// 가격 시계열의 최대 낙폭.
///
/// 한 번의 순방향 순회로 고점을 추적하며 낙폭 = `(고점 - 현재가) / 고점`.
/// 동률일 때는 먼저 나온 고점과 먼저 나온 저점을 유지합니다.
/// 단조 증가 시계열은 낙폭 0 (고점·저점 인덱스 0).
///
/// # 예시
///
/// `[100, 120, 90, 80, 100]` → 낙폭 1/3, 고점 인덱스 1, 저점 인덱스 3
pub fn max_drawdown(prices: &[f64]) -> AnalyticsResult<MaxDrawdown> {
    ensure_len("max_drawdown", prices.len(), 1)?;

    let mut result = MaxDrawdown {
        max_drawdown: 0.0,
        peak_index: 0,
        trough_index: 0,
    };
    let mut peak = prices[0];
    let mut peak_index = 0;

    for (i, &price) in prices.iter().enumerate() {
        if price > peak {
            peak = price;
            peak_index = i;
        }

        if peak > 0.0 {
            let drawdown = (peak - price) / peak;
            if drawdown > result.max_drawdown {
                result = MaxDrawdown {
                    max_drawdown: drawdown,
                    peak_index,
                    trough_index: i,
                };
            }
        }
    }

    Ok(result)
}

/// 각 시점의 고점 대비 낙폭 시계열.
///
/// 결과 길이는 가격 길이와 같고 모든 값은 0 이상입니다.
pub fn drawdown_series(prices: &[f64]) -> Vec<f64> {
    prices
        .iter()
        .scan(f64::NEG_INFINITY, |peak, &price| {
            *peak = peak.max(price);
            Some(if *peak > 0.0 {
                (*peak - price) / *peak
            } else {
                0.0
            })
        })
        .collect()
}

/// 칼마 비율: 연율화 수익률 / 최대 낙폭.
///
/// 낙폭이 0이면 0을 반환합니다.
pub fn calmar_ratio(prices: &[f64], trading_days: u32) -> AnalyticsResult<f64> {
    let returns = simple_returns(prices);
    let annual = annualized_return(&returns, trading_days)?;
    let mdd = max_drawdown(prices)?.max_drawdown;
    if mdd == 0.0 {
        return Ok(0.0);
    }
    Ok(annual / mdd)
}

/// 표본 공분산. 두 시계열을 짧은 쪽 길이로 자른 뒤 계산합니다.
pub fn covariance(x: &[f64], y: &[f64]) -> AnalyticsResult<f64> {
    let (x, y) = align_pair(x, y);
    ensure_len("covariance", x.len(), 2)?;
    sample_covariance(x, y)
}

/// Pearson 상관계수 (-1.0 ~ 1.0).
///
/// 두 시계열을 짧은 쪽 길이로 자른 뒤 계산합니다. 한쪽이라도 분산이 0이면 0을
/// 반환하며, 부동소수점 오차로 범위를 벗어나는 값은 [-1, 1]로 잘라냅니다.
pub fn correlation(x: &[f64], y: &[f64]) -> AnalyticsResult<f64> {
    let (x, y) = align_pair(x, y);
    ensure_len("correlation", x.len(), 2)?;

    let var_x = sample_variance(x)?;
    let var_y = sample_variance(y)?;
    if var_x == 0.0 || var_y == 0.0 {
        return Ok(0.0);
    }

    let cov = sample_covariance(x, y)?;
    Ok((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// 베타: `cov(자산, 벤치마크) / var(벤치마크)`.
///
/// 짧은 쪽 길이로 자른 뒤 계산하며, 벤치마크 분산이 0이면 0을 반환합니다.
pub fn beta(asset_returns: &[f64], benchmark_returns: &[f64]) -> AnalyticsResult<f64> {
    let (asset, benchmark) = align_pair(asset_returns, benchmark_returns);
    ensure_len("beta", asset.len(), 2)?;

    let var_b = sample_variance(benchmark)?;
    if var_b == 0.0 {
        return Ok(0.0);
    }
    Ok(sample_covariance(asset, benchmark)? / var_b)
}

/// 젠센 알파: `자산 연율화 수익률 - (rf + β × (벤치마크 연율화 수익률 - rf))`.
///
/// 베타와 두 연율화 수익률 모두 정렬(절단)된 쌍에서 계산합니다.
pub fn alpha(
    asset_returns: &[f64],
    benchmark_returns: &[f64],
    risk_free_rate: f64,
    trading_days: u32,
) -> AnalyticsResult<f64> {
    let (asset, benchmark) = align_pair(asset_returns, benchmark_returns);
    let b = beta(asset, benchmark)?;
    let asset_annual = annualized_return(asset, trading_days)?;
    let benchmark_annual = annualized_return(benchmark, trading_days)?;
    Ok(asset_annual - (risk_free_rate + b * (benchmark_annual - risk_free_rate)))
}

/// `floor` 직전에 더하는 허용 오차 (`(1 - 0.9) × 10 = 0.999…` 보정)
const VAR_INDEX_TOLERANCE: f64 = 1e-9;

/// 오름차순 정렬 기준 VaR 컷오프 인덱스: `floor((1 - c) × n)`, n-1로 제한.
fn var_cutoff_index(len: usize, confidence: f64) -> usize {
    let idx = ((1.0 - confidence) * len as f64 + VAR_INDEX_TOLERANCE).floor() as usize;
    idx.min(len - 1)
}

/// 수익률을 양수 손실 크기로 바꿉니다. `-0.0`은 `0.0`으로 정규화.
fn loss_magnitude(ret: f64) -> f64 {
    -ret + 0.0
}

/// 과거 시뮬레이션 VaR (양수 손실 크기).
///
/// 수익률을 오름차순 정렬해 `floor((1 - c) × n)` 위치의 값을 부호 반전합니다.
/// 신뢰수준이 높을수록 VaR는 같거나 커집니다.
pub fn value_at_risk(returns: &[f64], confidence: f64) -> AnalyticsResult<f64> {
    ensure_confidence(confidence)?;
    ensure_len("value_at_risk", returns.len(), 1)?;
    let sorted = sorted_ascending(returns);
    Ok(loss_magnitude(sorted[var_cutoff_index(sorted.len(), confidence)]))
}

/// 조건부 VaR (Expected Shortfall).
///
/// VaR 컷오프 인덱스까지(포함)의 꼬리 평균을 부호 반전합니다.
/// 같은 신뢰수준의 VaR보다 항상 크거나 같습니다.
pub fn conditional_var(returns: &[f64], confidence: f64) -> AnalyticsResult<f64> {
    ensure_confidence(confidence)?;
    ensure_len("conditional_var", returns.len(), 1)?;
    let sorted = sorted_ascending(returns);
    let cutoff = var_cutoff_index(sorted.len(), confidence);
    let tail = &sorted[..=cutoff];
    let expected_shortfall = loss_magnitude(tail.iter().sum::<f64>() / tail.len() as f64);
    // 꼬리 평균의 합산 오차가 VaR 아래로 내려가지 않도록 고정
    Ok(expected_shortfall.max(loss_magnitude(sorted[cutoff])))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample_returns() -> Vec<f64> {
        vec![
            0.012, -0.008, 0.004, -0.021, 0.017, 0.003, -0.005, 0.009, -0.013, 0.006, 0.011,
            -0.002, 0.008, -0.017, 0.014, 0.002, -0.009, 0.005, 0.010, -0.004,
        ]
    }

    #[test]
    fn test_volatility_annualizes_sample_std() {
        let returns = sample_returns();
        let vol = volatility(&returns, 252).unwrap();
        let expected = sample_std_dev(&returns).unwrap() * 252f64.sqrt();
        assert!((vol - expected).abs() < EPS);
    }

    #[test]
    fn test_volatility_requires_two_returns() {
        assert!(matches!(
            volatility(&[0.01], 252),
            Err(AnalyticsError::InsufficientData { required: 2, provided: 1, .. })
        ));
    }

    #[test]
    fn test_sharpe_zero_volatility_is_zero() {
        let returns = vec![0.001; 30];
        assert_eq!(sharpe_ratio(&returns, 0.02, 252).unwrap(), 0.0);
    }

    #[test]
    fn test_sharpe_matches_formula() {
        let returns = sample_returns();
        let sharpe = sharpe_ratio(&returns, 0.02, 252).unwrap();
        let expected = (annualized_return(&returns, 252).unwrap() - 0.02)
            / volatility(&returns, 252).unwrap();
        assert!((sharpe - expected).abs() < EPS);
    }

    #[test]
    fn test_sortino_all_winning_is_no_downside() {
        let returns = vec![0.01, 0.02, 0.015, 0.03];
        let sortino = sortino_ratio(&returns, 0.02, 252).unwrap();
        assert_eq!(sortino, SortinoRatio::NoDownside);
        assert!(sortino.is_no_downside());
        assert_eq!(sortino.as_f64(), f64::INFINITY);
    }

    #[test]
    fn test_sortino_all_losing_is_negative() {
        let returns = vec![-0.01, -0.02, -0.015, -0.03];
        match sortino_ratio(&returns, 0.02, 252).unwrap() {
            SortinoRatio::Finite(v) => assert!(v < 0.0),
            SortinoRatio::NoDownside => panic!("losing series must have downside"),
        }
    }

    #[test]
    fn test_sortino_downside_formula() {
        let returns = vec![0.02, -0.01, 0.03, -0.03];
        // 무위험 이자율 0 → 음수 수익률 두 개만 하방
        let dd = ((0.01f64.powi(2) + 0.03f64.powi(2)) / 2.0).sqrt() * 252f64.sqrt();
        let expected = annualized_return(&returns, 252).unwrap() / dd;
        let sortino = sortino_ratio(&returns, 0.0, 252).unwrap();
        assert!((sortino.as_f64() - expected).abs() < EPS);
    }

    #[test]
    fn test_sortino_serializes_sentinel() {
        let json = serde_json::to_string(&SortinoRatio::NoDownside).unwrap();
        assert_eq!(json, "\"noDownside\"");
        let json = serde_json::to_string(&SortinoRatio::Finite(1.5)).unwrap();
        assert_eq!(json, "1.5");
    }

    #[test]
    fn test_max_drawdown_known_series() {
        let mdd = max_drawdown(&[100.0, 120.0, 90.0, 80.0, 100.0]).unwrap();
        assert!((mdd.max_drawdown - 1.0 / 3.0).abs() < EPS);
        assert_eq!(mdd.peak_index, 1);
        assert_eq!(mdd.trough_index, 3);
    }

    #[test]
    fn test_max_drawdown_monotonic_is_zero() {
        let mdd = max_drawdown(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(mdd.max_drawdown, 0.0);
        assert_eq!((mdd.peak_index, mdd.trough_index), (0, 0));
    }

    #[test]
    fn test_max_drawdown_tie_breaks_on_first_occurrence() {
        // 고점 100이 두 번, 같은 낙폭 50%가 두 번 발생
        let mdd = max_drawdown(&[100.0, 50.0, 100.0, 50.0]).unwrap();
        assert_eq!(mdd.peak_index, 0);
        assert_eq!(mdd.trough_index, 1);
    }

    #[test]
    fn test_max_drawdown_empty_is_error() {
        assert!(max_drawdown(&[]).is_err());
    }

    #[test]
    fn test_drawdown_series() {
        let dd = drawdown_series(&[100.0, 120.0, 90.0, 80.0, 100.0]);
        assert_eq!(dd.len(), 5);
        assert_eq!(dd[0], 0.0);
        assert_eq!(dd[1], 0.0);
        assert!((dd[2] - 0.25).abs() < EPS);
        assert!((dd[3] - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_calmar_ratio() {
        let prices = [100.0, 120.0, 90.0, 80.0, 100.0, 130.0];
        let calmar = calmar_ratio(&prices, 252).unwrap();
        let annual = annualized_return(&simple_returns(&prices), 252).unwrap();
        assert!((calmar - annual * 3.0).abs() < 1e-6 * annual.abs().max(1.0));
    }

    #[test]
    fn test_calmar_without_drawdown_is_zero() {
        assert_eq!(calmar_ratio(&[1.0, 2.0, 3.0], 252).unwrap(), 0.0);
    }

    #[test]
    fn test_correlation_perfect_positive_and_negative() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let z = [10.0, 8.0, 6.0, 4.0, 2.0];
        assert!((correlation(&x, &y).unwrap() - 1.0).abs() < EPS);
        assert!((correlation(&x, &z).unwrap() + 1.0).abs() < EPS);
    }

    #[test]
    fn test_correlation_zero_variance_is_zero() {
        assert_eq!(correlation(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_correlation_truncates_longer_series() {
        let x = [1.0, 2.0, 3.0, 100.0];
        let y = [2.0, 4.0, 6.0];
        assert!((correlation(&x, &y).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_covariance() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0];
        // x̄ = 2, ȳ = 3 → (2 + 0 + 2) / 2 = 2
        assert!((covariance(&x, &y).unwrap() - 2.0).abs() < EPS);
        assert!(covariance(&[1.0], &[1.0]).is_err());
    }

    #[test]
    fn test_beta_of_scaled_series() {
        let bench = sample_returns();
        let asset: Vec<f64> = bench.iter().map(|r| r * 1.5).collect();
        assert!((beta(&asset, &bench).unwrap() - 1.5).abs() < EPS);
    }

    #[test]
    fn test_beta_zero_benchmark_variance() {
        assert_eq!(beta(&[0.01, 0.02, 0.03], &[0.01, 0.01, 0.01]).unwrap(), 0.0);
    }

    #[test]
    fn test_alpha_of_benchmark_itself_is_zero() {
        let bench = sample_returns();
        let a = alpha(&bench, &bench, 0.02, 252).unwrap();
        assert!(a.abs() < EPS);
    }

    #[test]
    fn test_alpha_formula() {
        let bench = sample_returns();
        let asset: Vec<f64> = bench.iter().map(|r| r * 0.5 + 0.001).collect();
        let b = beta(&asset, &bench).unwrap();
        let expected = annualized_return(&asset, 252).unwrap()
            - (0.02 + b * (annualized_return(&bench, 252).unwrap() - 0.02));
        assert!((alpha(&asset, &bench, 0.02, 252).unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn test_value_at_risk_picks_quantile() {
        let returns = sample_returns();
        // n = 20, floor(0.05 × 20) = 1 → 두 번째로 작은 값 (-0.017)
        let var = value_at_risk(&returns, 0.95).unwrap();
        assert!((var - 0.017).abs() < EPS);
    }

    #[test]
    fn test_conditional_var_tail_mean() {
        let returns = sample_returns();
        let cvar = conditional_var(&returns, 0.95).unwrap();
        assert!((cvar - (0.021 + 0.017) / 2.0).abs() < EPS);
        assert!(cvar >= value_at_risk(&returns, 0.95).unwrap());
    }

    #[test]
    fn test_var_monotonic_in_confidence() {
        let returns = sample_returns();
        let var95 = value_at_risk(&returns, 0.95).unwrap();
        let var99 = value_at_risk(&returns, 0.99).unwrap();
        assert!(var99 >= var95);
    }

    #[test]
    fn test_var_rejects_invalid_confidence() {
        assert!(matches!(
            value_at_risk(&[0.01], 1.0),
            Err(AnalyticsError::InvalidParameter(_))
        ));
        assert!(matches!(
            conditional_var(&[0.01], 0.0),
            Err(AnalyticsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_var_empty_is_error() {
        assert!(matches!(
            value_at_risk(&[], 0.95),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_var_single_observation() {
        assert_eq!(value_at_risk(&[-0.05], 0.95).unwrap(), 0.05);
        assert_eq!(conditional_var(&[-0.05], 0.95).unwrap(), 0.05);
    }

    #[test]
    fn test_var_cutoff_survives_rounding() {
        // (1 - 0.9) × 10 = 0.999…: 인덱스는 1이어야 함
        let returns: Vec<f64> = (1..=10).map(|i| -0.01 * i as f64).collect();
        assert!((value_at_risk(&returns, 0.9).unwrap() - 0.09).abs() < EPS);
        assert!((conditional_var(&returns, 0.9).unwrap() - 0.095).abs() < EPS);
    }

    #[test]
    fn test_var_zero_loss_is_positive_zero() {
        let returns = [0.0, 0.01, 0.02];
        let var = value_at_risk(&returns, 0.9).unwrap();
        let cvar = conditional_var(&returns, 0.9).unwrap();
        assert!(var == 0.0 && var.is_sign_positive());
        assert!(cvar == 0.0 && cvar.is_sign_positive());
    }

    #[test]
    fn test_constant_series_sentinels() {
        let flat = [0.1; 10];
        let asset = [0.03, -0.01, 0.02, 0.05, -0.02, 0.01, 0.04, -0.03, 0.02, 0.0];

        assert_eq!(volatility(&flat, 252).unwrap(), 0.0);
        assert_eq!(sharpe_ratio(&flat, 0.02, 252).unwrap(), 0.0);
        assert_eq!(beta(&asset, &flat).unwrap(), 0.0);
        assert_eq!(correlation(&asset, &flat).unwrap(), 0.0);
        assert_eq!(correlation(&flat, &asset).unwrap(), 0.0);
    }
}
