//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정합니다.
//! - RSI (Relative Strength Index, Wilder 평활)

use quant_core::{ensure_len, AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// RSI (Relative Strength Index) 계산.
///
/// RSI = 100 - (100 / (1 + RS)), RS = 평균 상승폭 / 평균 하락폭
///
/// 평균은 Wilder 평활을 사용합니다. 첫 평균은 처음 `period`개 가격 변화의
/// 단순 평균이고, 이후 `avg = (이전 avg × (period - 1) + 현재값) / period`.
/// 평균 하락폭이 0이면 RSI는 100입니다.
///
/// # 반환
///
/// 0-100 사이의 RSI 값들. 길이는 `prices.len() - period`이며 0번 값은
/// 입력 인덱스 `period`에 대응합니다.
pub fn rsi(prices: &[f64], period: usize) -> AnalyticsResult<Vec<f64>> {
    if period == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }
    ensure_len("rsi", prices.len(), period + 1)?;

    // 상승/하락 분리
    let changes: Vec<(f64, f64)> = prices
        .windows(2)
        .map(|w| {
            let delta = w[1] - w[0];
            (delta.max(0.0), (-delta).max(0.0))
        })
        .collect();

    let p = period as f64;
    let (mut avg_gain, mut avg_loss) = changes[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), (gain, loss)| (g + gain, l + loss));
    avg_gain /= p;
    avg_loss /= p;

    let mut result = Vec::with_capacity(prices.len() - period);
    result.push(rsi_value(avg_gain, avg_loss));

    for (gain, loss) in &changes[period..] {
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
        result.push(rsi_value(avg_gain, avg_loss));
    }

    Ok(result)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}
