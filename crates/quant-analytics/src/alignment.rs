//! 다중 시계열 정렬 정책.
//!
//! 길이가 다른 여러 수익률 시계열을 결합할 때(가중 포트폴리오 수익률, 상관행렬,
//! 자산/벤치마크 쌍) 사용하는 규칙입니다. 기본 정책은 모든 시계열을 가장 짧은
//! 길이로 자르고 0번 위치부터 인덱스 단위로 결합하는 것입니다.
//!
//! 이 정책은 날짜를 비교하지 않습니다. 잘린 위치가 시계열마다 같은 날짜라는 보장은
//! 호출자 책임이며, 데이터가 버려지는 경우 `warn!` 로그를 남깁니다.
//! 길이가 같아야만 하는 경우에는 [`AlignmentPolicy::Strict`]를 사용합니다.

use quant_core::{ensure_len, AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 시계열 정렬 정책.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// 가장 짧은 길이로 자르고 0번 위치부터 정렬
    #[default]
    TruncateFromStart,
    /// 길이가 모두 같지 않으면 `LengthMismatch` 에러
    Strict,
}

/// 두 시계열을 짧은 쪽 길이로 잘라 0번 위치부터 정렬합니다.
pub fn align_pair<'a>(x: &'a [f64], y: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let len = x.len().min(y.len());
    if x.len() != y.len() {
        warn!(
            left = x.len(),
            right = y.len(),
            aligned = len,
            "series lengths differ, truncating to shorter"
        );
    }
    (&x[..len], &y[..len])
}

/// 여러 시계열을 정책에 따라 정렬합니다.
///
/// 반환되는 슬라이스는 모두 같은 길이입니다.
pub fn align_series<'a>(
    series: &[&'a [f64]],
    policy: AlignmentPolicy,
) -> AnalyticsResult<Vec<&'a [f64]>> {
    let Some(min_len) = series.iter().map(|s| s.len()).min() else {
        return Ok(Vec::new());
    };

    if let Some(longer) = series.iter().find(|s| s.len() != min_len) {
        match policy {
            AlignmentPolicy::Strict => {
                return Err(AnalyticsError::LengthMismatch {
                    expected: min_len,
                    actual: longer.len(),
                });
            }
            AlignmentPolicy::TruncateFromStart => {
                let max_len = series.iter().map(|s| s.len()).max().unwrap_or(min_len);
                warn!(
                    series = series.len(),
                    min_len,
                    max_len,
                    "truncating series to shortest length"
                );
            }
        }
    }

    Ok(series.iter().map(|s| &s[..min_len]).collect())
}

/// 가중 포트폴리오 수익률: `Σ_k w[k] × r_k[i]`.
///
/// 가중치 합이 1일 필요는 없습니다 (레버리지/부분 투자 허용).
///
/// # 에러
///
/// - 가중치 개수가 시계열 개수와 다르면 `LengthMismatch`
/// - 시계열이 없거나 정렬 후 길이가 0이면 `InsufficientData`
/// - 유한하지 않은 가중치는 `InvalidParameter`
pub fn weighted_portfolio_returns(
    series: &[&[f64]],
    weights: &[f64],
    policy: AlignmentPolicy,
) -> AnalyticsResult<Vec<f64>> {
    ensure_len("weighted_portfolio_returns", series.len(), 1)?;
    if weights.len() != series.len() {
        return Err(AnalyticsError::LengthMismatch {
            expected: series.len(),
            actual: weights.len(),
        });
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite()) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "가중치는 유한한 값이어야 합니다: {}",
            w
        )));
    }

    let aligned = align_series(series, policy)?;
    let len = aligned[0].len();
    ensure_len("weighted_portfolio_returns", len, 1)?;

    Ok((0..len)
        .map(|i| aligned.iter().zip(weights).map(|(s, w)| s[i] * w).sum::<f64>())
        .collect())
}
