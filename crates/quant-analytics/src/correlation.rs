//! 상관행렬 계산 모듈.
//!
//! 여러 종목의 가격 시계열을 수익률로 변환한 뒤 정렬 정책에 따라 길이를 맞추고
//! N×N Pearson 상관행렬을 계산합니다. 포트폴리오 분산 투자 및 리스크 관리에
//! 활용됩니다.
//!
//! # 예시
//!
//! ```
//! use std::collections::HashMap;
//! use quant_analytics::alignment::AlignmentPolicy;
//! use quant_analytics::correlation::correlation_matrix;
//!
//! let mut prices = HashMap::new();
//! prices.insert("A".to_string(), vec![100.0, 105.0, 102.0, 110.0]);
//! prices.insert("B".to_string(), vec![50.0, 52.5, 51.0, 55.0]);
//!
//! let m = correlation_matrix(&prices, None, AlignmentPolicy::default()).unwrap();
//! assert_eq!(m.symbols, vec!["A", "B"]);
//! assert!((m.matrix[0][1] - 1.0).abs() < 1e-9);
//! ```

use quant_core::{AnalyticsError, AnalyticsResult};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::alignment::{align_series, AlignmentPolicy};
use crate::returns::simple_returns;
use crate::risk::correlation;

/// 상관행렬 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// 종목 목록 (행/열 순서)
    pub symbols: Vec<String>,
    /// 상관계수 행렬 (N×N, -1.0 ~ 1.0)
    pub matrix: Vec<Vec<f64>>,
    /// 정렬 후 수익률 길이
    pub aligned_len: usize,
}

impl CorrelationMatrix {
    /// 두 종목 사이의 상관계수를 조회합니다.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        Some(self.matrix[i][j])
    }
}

/// 상관행렬 계산.
///
/// # 인자
///
/// * `prices` - 종목별 가격 데이터 (종목코드 → 가격벡터)
/// * `symbols` - 행렬에 포함할 종목 순서 (None이면 종목코드 정렬 순서)
/// * `policy` - 길이가 다른 수익률 시계열의 정렬 정책
///
/// # 에러
///
/// - 지정한 종목의 가격이 없으면 `InvalidInput`
/// - 정렬 후 수익률이 2개 미만이면 `InsufficientData`
pub fn correlation_matrix(
    prices: &HashMap<String, Vec<f64>>,
    symbols: Option<Vec<String>>,
    policy: AlignmentPolicy,
) -> AnalyticsResult<CorrelationMatrix> {
    let symbol_list: Vec<String> = symbols.unwrap_or_else(|| {
        let mut keys: Vec<String> = prices.keys().cloned().collect();
        keys.sort();
        keys
    });

    let returns = symbol_list
        .iter()
        .map(|s| {
            prices
                .get(s)
                .map(|p| simple_returns(p))
                .ok_or_else(|| AnalyticsError::InvalidInput(format!("가격 데이터 없음: {}", s)))
        })
        .collect::<AnalyticsResult<Vec<_>>>()?;

    let slices: Vec<&[f64]> = returns.iter().map(Vec::as_slice).collect();
    let aligned = align_series(&slices, policy)?;
    let aligned_len = aligned.first().map_or(0, |s| s.len());
    quant_core::ensure_len("correlation_matrix", aligned_len, 2)?;

    let n = symbol_list.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        // 상삼각만 계산하고 대칭 복사
        for j in (i + 1)..n {
            let corr = correlation(aligned[i], aligned[j])?;
            matrix[i][j] = corr;
            matrix[j][i] = corr;
        }
    }

    debug!(symbols = n, aligned_len, "correlation matrix computed");

    Ok(CorrelationMatrix {
        symbols: symbol_list,
        matrix,
        aligned_len,
    })
}
