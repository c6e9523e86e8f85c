//! 기술 통계 기본 함수.
//!
//! 외부 통계 라이브러리 없이 평균, 중앙값, 분산, 왜도, 첨도를 직접 구현합니다.
//! 분산/표준편차는 모두 표본 규약(n−1로 나눔)입니다. 평균·분산·공분산은
//! Welford 누적으로 계산하므로 상수 시계열에서는 평균이 입력값 그대로,
//! 편차 제곱합은 정확히 0이 됩니다. 분산 0 센티넬 검사는 이 성질에 의존합니다.

use quant_core::{ensure_len, AnalyticsError, AnalyticsResult};

/// Welford 누적: `(평균, 편차 제곱합)`.
fn welford(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .enumerate()
        .fold((0.0_f64, 0.0_f64), |(mean, m2), (i, x)| {
            let delta = x - mean;
            let mean = mean + delta / (i + 1) as f64;
            (mean, m2 + delta * (x - mean))
        })
}

/// 산술 평균. 빈 입력이면 데이터 부족 에러.
pub fn mean(values: &[f64]) -> AnalyticsResult<f64> {
    ensure_len("mean", values.len(), 1)?;
    Ok(welford(values).0)
}

/// 중앙값. 짝수 개면 가운데 두 값의 평균.
pub fn median(values: &[f64]) -> AnalyticsResult<f64> {
    ensure_len("median", values.len(), 1)?;
    let sorted = sorted_ascending(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// 최솟값.
pub fn min(values: &[f64]) -> AnalyticsResult<f64> {
    ensure_len("min", values.len(), 1)?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// 최댓값.
pub fn max(values: &[f64]) -> AnalyticsResult<f64> {
    ensure_len("max", values.len(), 1)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// 표본 분산: Σ(x − x̄)² / (n − 1). 최소 2개 필요.
pub fn sample_variance(values: &[f64]) -> AnalyticsResult<f64> {
    ensure_len("sample_variance", values.len(), 2)?;
    let (_, m2) = welford(values);
    Ok(m2 / (values.len() - 1) as f64)
}

/// 표본 표준편차.
pub fn sample_std_dev(values: &[f64]) -> AnalyticsResult<f64> {
    Ok(sample_variance(values)?.sqrt())
}

/// 표본 공분산: Σ(x − x̄)(y − ȳ) / (n − 1).
///
/// 두 시계열의 길이가 같아야 합니다. 길이가 다른 쌍의 정렬은
/// [`crate::risk::covariance`]가 담당합니다.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> AnalyticsResult<f64> {
    if x.len() != y.len() {
        return Err(AnalyticsError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    ensure_len("sample_covariance", x.len(), 2)?;
    // 분산과 같은 갱신 순서라 cov(x, x) == var(x)
    let (_, _, co_moment) = x.iter().zip(y).enumerate().fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(mean_x, mean_y, c), (i, (a, b))| {
            let k = (i + 1) as f64;
            let dx = a - mean_x;
            let mean_x = mean_x + dx / k;
            let mean_y = mean_y + (b - mean_y) / k;
            (mean_x, mean_y, c + dx * (b - mean_y))
        },
    );
    Ok(co_moment / (x.len() - 1) as f64)
}

/// 표본 왜도 (adjusted Fisher-Pearson).
///
/// G1 = n / ((n−1)(n−2)) · Σ(x − x̄)³ / s³, s는 표본 표준편차. 최소 3개 필요.
/// 분산이 0이면 0을 반환합니다.
pub fn skewness(values: &[f64]) -> AnalyticsResult<f64> {
    ensure_len("skewness", values.len(), 3)?;
    let n = values.len() as f64;
    let m = mean(values)?;
    let (sum_sq, sum_cube) = values.iter().fold((0.0_f64, 0.0_f64), |(sq, cube), v| {
        let d = v - m;
        (sq + d * d, cube + d * d * d)
    });
    if sum_sq == 0.0 {
        return Ok(0.0);
    }
    let s = (sum_sq / (n - 1.0)).sqrt();
    Ok(n * sum_cube / ((n - 1.0) * (n - 2.0) * s.powi(3)))
}

/// 표본 초과 첨도 (excess kurtosis).
///
/// (n−1)/((n−2)(n−3)) · ((n+1)·n·Σd⁴ / (Σd²)² − 3(n−1)). 최소 4개 필요.
/// 정규분포에서 0 근처. 분산이 0이면 0을 반환합니다.
pub fn kurtosis(values: &[f64]) -> AnalyticsResult<f64> {
    ensure_len("kurtosis", values.len(), 4)?;
    let n = values.len() as f64;
    let m = mean(values)?;
    let (sum_sq, sum_fourth) = values.iter().fold((0.0_f64, 0.0_f64), |(sq, fourth), v| {
        let d2 = (v - m).powi(2);
        (sq + d2, fourth + d2 * d2)
    });
    if sum_sq == 0.0 {
        return Ok(0.0);
    }
    Ok((n - 1.0) / ((n - 2.0) * (n - 3.0))
        * ((n + 1.0) * n * sum_fourth / (sum_sq * sum_sq) - 3.0 * (n - 1.0)))
}

/// 오름차순 정렬된 복사본. NaN은 입력 전제 조건 밖이므로 동등 취급합니다.
pub(crate) fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
