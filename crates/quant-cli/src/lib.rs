//! `quant` CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 가격 파일(숫자 목록 또는 CSV) 읽기
//! - 통계 요약, 기술적 지표, VaR 계산 명령

pub mod commands;
