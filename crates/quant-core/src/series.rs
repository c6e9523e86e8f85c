//! 외부 계층이 보관하는 Decimal 가격과 엔진의 f64 시계열 사이의 변환.
//!
//! 저장소는 `rust_decimal::Decimal`로 가격을 보관하지만, 로그·제곱근·거듭제곱이
//! 필요한 통계 계산은 f64로 수행합니다. 변환 실패 값을 조용히 버리면 인덱스
//! 정렬이 어긋나므로 실패 시 에러를 반환합니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Decimal 시계열을 f64 시계열로 변환합니다.
pub fn decimal_series_to_f64(values: &[Decimal]) -> AnalyticsResult<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, d)| {
            d.to_f64().filter(|v| v.is_finite()).ok_or_else(|| {
                AnalyticsError::InvalidInput(format!("index {}: f64로 변환할 수 없는 값 {}", i, d))
            })
        })
        .collect()
}

/// 시계열에 NaN/무한대가 없는지 확인합니다.
pub fn ensure_finite(operation: &'static str, values: &[f64]) -> AnalyticsResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(AnalyticsError::InvalidInput(format!(
            "{}: index {}의 값이 유한하지 않습니다",
            operation, i
        ))),
        None => Ok(()),
    }
}
