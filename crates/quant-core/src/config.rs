//! 엔진 설정 관리.
//!
//! 연율화 거래일 수, 무위험 이자율, VaR 신뢰수준, 지표 기본 기간 등
//! 계산 규약을 한 곳에서 정의합니다. 모든 필드에는 문서화된 기본값이 있으므로
//! 설정 파일은 바꾸려는 항목만 포함하면 됩니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::logging::LogFormat;

/// 연간 거래일 수 (연율화 계산에 사용)
///
/// 주식 시장 기준 252일. 암호화폐처럼 365일 거래되는 시장은 설정으로 조정합니다.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// 기본 무위험 이자율 (연간, 0.02 = 2%)
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// 기본 VaR/CVaR 신뢰수준
pub const DEFAULT_VAR_CONFIDENCE: f64 = 0.95;

/// 환경 변수 오버라이드 접두사 (예: `QUANT__TRADING_DAYS=365`)
pub const ENV_PREFIX: &str = "QUANT";

/// 분석 엔진 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// 연간 거래일 수
    pub trading_days: u32,
    /// 연간 무위험 이자율
    pub risk_free_rate: f64,
    /// VaR/CVaR 신뢰수준 (0, 1)
    pub var_confidence: f64,
    /// 기술적 지표 기본 파라미터
    pub indicators: IndicatorConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trading_days: TRADING_DAYS_PER_YEAR,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            var_confidence: DEFAULT_VAR_CONFIDENCE,
            indicators: IndicatorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// 기술적 지표 파라미터 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// SMA 기간
    pub sma_period: usize,
    /// EMA 기간
    pub ema_period: usize,
    /// RSI 기간
    pub rsi_period: usize,
    /// 볼린저 밴드 기간
    pub bollinger_period: usize,
    /// 볼린저 밴드 표준편차 배수
    pub bollinger_k: f64,
    /// MACD 단기 EMA 기간
    pub macd_fast: usize,
    /// MACD 장기 EMA 기간
    pub macd_slow: usize,
    /// MACD 시그널 기간
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: 20,
            ema_period: 12,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_k: 2.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일 값 위에 `QUANT__` 접두사 환경 변수가 덮어쓰며, 로드 후 검증까지 수행합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 로드합니다 (환경 변수 미적용).
    pub fn from_toml_str(toml: &str) -> AnalyticsResult<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값이 계산 규약을 만족하는지 검증합니다.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.trading_days == 0 {
            return Err(AnalyticsError::Config(
                "trading_days는 0보다 커야 합니다".to_string(),
            ));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(AnalyticsError::Config(
                "risk_free_rate는 유한한 값이어야 합니다".to_string(),
            ));
        }
        if !(self.var_confidence > 0.0 && self.var_confidence < 1.0) {
            return Err(AnalyticsError::Config(format!(
                "var_confidence는 (0, 1) 범위여야 합니다: {}",
                self.var_confidence
            )));
        }
        self.indicators.validate()?;
        self.logging.validate()
    }
}

impl LoggingConfig {
    /// 로그 레벨 필터와 출력 형식을 검증합니다.
    pub fn validate(&self) -> AnalyticsResult<()> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| AnalyticsError::Config(format!("logging.format: {}", e)))?;
        tracing_subscriber::EnvFilter::try_new(&self.level).map_err(|e| {
            AnalyticsError::Config(format!("logging.level '{}': {}", self.level, e))
        })?;
        Ok(())
    }
}

impl IndicatorConfig {
    /// 지표 기간 조합을 검증합니다.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let periods = [
            ("sma_period", self.sma_period),
            ("ema_period", self.ema_period),
            ("rsi_period", self.rsi_period),
            ("macd_signal", self.macd_signal),
        ];
        for (name, period) in periods {
            if period == 0 {
                return Err(AnalyticsError::Config(format!(
                    "{}는 0보다 커야 합니다",
                    name
                )));
            }
        }
        if self.bollinger_period < 2 {
            return Err(AnalyticsError::Config(
                "bollinger_period는 2 이상이어야 합니다".to_string(),
            ));
        }
        if !(self.bollinger_k.is_finite() && self.bollinger_k > 0.0) {
            return Err(AnalyticsError::Config(
                "bollinger_k는 0보다 큰 유한한 값이어야 합니다".to_string(),
            ));
        }
        if self.macd_fast == 0 || self.macd_fast >= self.macd_slow {
            return Err(AnalyticsError::Config(format!(
                "macd_fast({})는 0보다 크고 macd_slow({})보다 작아야 합니다",
                self.macd_fast, self.macd_slow
            )));
        }
        Ok(())
    }
}
