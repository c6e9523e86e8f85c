//! 변동성 지표 (Volatility Indicators).
//!
//! - Bollinger Bands (볼린저 밴드)

use quant_core::{ensure_len, AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};

use crate::stats::sample_std_dev;

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 배수 (기본: 2.0).
    pub std_dev_multiplier: f64,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

/// 볼린저 밴드 결과.
///
/// 세 밴드의 길이는 모두 `n - period + 1`이며 같은 인덱스끼리 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    /// 상단 밴드 (MA + k × σ).
    pub upper: Vec<f64>,
    /// 중간 밴드 (이동평균).
    pub middle: Vec<f64>,
    /// 하단 밴드 (MA - k × σ).
    pub lower: Vec<f64>,
}

impl BollingerBands {
    /// 밴드 폭 ((상단 - 하단) / 중간).
    ///
    /// 중간 밴드가 0인 지점은 0으로 둡니다.
    pub fn bandwidth(&self) -> Vec<f64> {
        self.upper
            .iter()
            .zip(&self.lower)
            .zip(&self.middle)
            .map(|((u, l), m)| if *m == 0.0 { 0.0 } else { (u - l) / m })
            .collect()
    }

    /// 결과 길이.
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    /// 결과가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }
}

/// 볼린저 밴드 계산.
///
/// 상단 밴드 = MA + (k × σ)
/// 중간 밴드 = MA (단순 이동평균)
/// 하단 밴드 = MA - (k × σ)
///
/// σ는 같은 윈도우의 표본 표준편차(n−1)이므로 `period`는 2 이상이어야 하고,
/// 밴드 순서(상단 > 중간 > 하단)를 보장하기 위해 `k`는 양수여야 합니다.
pub fn bollinger_bands(prices: &[f64], period: usize, k: f64) -> AnalyticsResult<BollingerBands> {
    if period < 2 {
        return Err(AnalyticsError::InvalidParameter(format!(
            "볼린저 밴드 기간은 2 이상이어야 합니다: {}",
            period
        )));
    }
    if !(k.is_finite() && k > 0.0) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "표준편차 배수는 양의 유한한 값이어야 합니다: {}",
            k
        )));
    }
    ensure_len("bollinger_bands", prices.len(), period)?;

    let len = prices.len() - period + 1;
    let mut bands = BollingerBands {
        upper: Vec::with_capacity(len),
        middle: Vec::with_capacity(len),
        lower: Vec::with_capacity(len),
    };

    for window in prices.windows(period) {
        let ma = window.iter().sum::<f64>() / period as f64;
        let width = k * sample_std_dev(window)?;
        bands.upper.push(ma + width);
        bands.middle.push(ma);
        bands.lower.push(ma - width);
    }

    Ok(bands)
}
