//! 분석 엔진의 에러 타입.
//!
//! 모든 계산 함수는 문서화된 전제 조건을 벗어나면 NaN을 흘려보내지 않고
//! 즉시 [`AnalyticsError`]를 반환합니다. 변동성 0 등 수학적으로 극한값이
//! 정의되는 경우는 에러가 아니라 각 함수에 문서화된 센티넬 값을 반환합니다.

use thiserror::Error;

/// 분석 엔진 에러.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// 데이터 부족 (예: period > 가격 개수, 변동성 계산에 수익률 2개 미만)
    #[error("{operation}: 데이터가 부족합니다 (필요 {required}개, 제공 {provided}개)")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        provided: usize,
    },

    /// 잘못된 파라미터 (기간 0, 신뢰수준 범위 밖 등)
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 정의역을 벗어난 입력 데이터
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 시계열 길이 불일치 (엄격 정렬 모드, 가중치 개수 등)
    #[error("길이 불일치: 기대 {expected}개, 실제 {actual}개")]
    LengthMismatch { expected: usize, actual: usize },

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 분석 작업을 위한 Result 타입.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// 데이터 부족 에러를 생성합니다.
    pub fn insufficient(operation: &'static str, required: usize, provided: usize) -> Self {
        Self::InsufficientData {
            operation,
            required,
            provided,
        }
    }

    /// 호출자 입력 문제로 분류되는 에러인지 확인합니다.
    ///
    /// CLI는 이 값으로 입력 오류 종료 코드(2)를 구분합니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AnalyticsError::Config(_))
    }
}

impl From<config::ConfigError> for AnalyticsError {
    fn from(err: config::ConfigError) -> Self {
        AnalyticsError::Config(err.to_string())
    }
}

/// `len >= required`가 아니면 데이터 부족 에러를 반환합니다.
pub fn ensure_len(operation: &'static str, len: usize, required: usize) -> AnalyticsResult<()> {
    if len < required {
        return Err(AnalyticsError::insufficient(operation, required, len));
    }
    Ok(())
}
