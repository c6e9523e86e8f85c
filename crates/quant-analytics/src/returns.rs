//! 수익률 변환 (Return Transforms).
//!
//! 가격 시계열을 수익률 시계열로 변환하고, 수익률을 누적·연율화합니다.
//! 다른 모든 위험 지표의 입력이 되는 최하위 계층입니다.
//!
//! 가격이 2개 미만이면 빈 수익률 시계열을 반환합니다. 이는 데이터 부족 시
//! 즉시 에러를 반환하는 엔진 전반의 정책에 대한 유일한 예외입니다.

use quant_core::{decimal_series_to_f64, ensure_len, AnalyticsError, AnalyticsResult};
use rust_decimal::Decimal;

/// 단순 수익률: `(p[i] - p[i-1]) / p[i-1]`.
///
/// 결과 길이는 `prices.len() - 1` (가격 2개 미만이면 빈 벡터).
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// 로그 수익률: `ln(p[i] / p[i-1])`.
///
/// # 전제 조건
///
/// 모든 가격이 양수여야 합니다. 엔진은 이를 검증하지 않으며, 0 이하 가격이
/// 섞이면 NaN 또는 무한대가 나옵니다.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// 누적 수익률: `cumulative[i] = Π_{k≤i}(1 + r[k]) - 1`.
///
/// 순서에 의존합니다 (복리 경로).
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0_f64, |growth, r| {
            *growth *= 1.0 + r;
            Some(*growth - 1.0)
        })
        .collect()
}

/// 전체 기간 복리 수익률. 빈 입력이면 0.
pub fn total_return(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |growth, r| growth * (1.0 + r)) - 1.0
}

/// 연율화 수익률: `(Π(1 + r))^(trading_days / n) - 1`.
///
/// # 에러
///
/// - 수익률이 비어 있으면 `InsufficientData`
/// - `trading_days == 0`이면 `InvalidParameter`
/// - 복리 성장 계수가 음수(−100% 미만 손실)이면 `InvalidInput`
pub fn annualized_return(returns: &[f64], trading_days: u32) -> AnalyticsResult<f64> {
    ensure_len("annualized_return", returns.len(), 1)?;
    if trading_days == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "trading_days는 0보다 커야 합니다".to_string(),
        ));
    }

    let growth = 1.0 + total_return(returns);
    if growth < 0.0 {
        return Err(AnalyticsError::InvalidInput(format!(
            "복리 성장 계수가 음수입니다: {}",
            growth
        )));
    }

    let exponent = f64::from(trading_days) / returns.len() as f64;
    Ok(growth.powf(exponent) - 1.0)
}

/// Decimal 가격으로 단순 수익률 계산.
pub fn simple_returns_decimal(prices: &[Decimal]) -> AnalyticsResult<Vec<f64>> {
    Ok(simple_returns(&decimal_series_to_f64(prices)?))
}
