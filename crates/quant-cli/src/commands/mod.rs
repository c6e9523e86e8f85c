//! CLI 명령어 구현 모듈.

pub mod indicators;
pub mod input;
pub mod summary;
pub mod var;

use anyhow::{Context, Result};
use quant_core::AnalyticsConfig;
use std::path::Path;

/// 설정 파일을 로드합니다. 경로가 없으면 기본값을 사용합니다.
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => AnalyticsConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(AnalyticsConfig::default()),
    }
}
