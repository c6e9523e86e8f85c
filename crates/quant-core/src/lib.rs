//! # Quant Core
//!
//! 분석 엔진 전반에서 공유하는 기반 타입을 제공합니다:
//! - 에러 분류 ([`AnalyticsError`])
//! - 계산 규약 설정 ([`AnalyticsConfig`])
//! - 로깅 인프라
//! - Decimal ↔ f64 시계열 변환

pub mod config;
pub mod error;
pub mod logging;
pub mod series;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use series::*;
