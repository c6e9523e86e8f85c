//! 통계 요약 명령.

use anyhow::{Context, Result};
use quant_analytics::{stats_summary_with_config, StatsSummary};
use quant_core::AnalyticsConfig;
use std::path::PathBuf;
use tracing::info;

use super::input::read_prices;

/// 통계 요약 설정.
#[derive(Debug)]
pub struct SummaryConfig {
    /// 자산 가격 파일
    pub prices: PathBuf,
    /// 벤치마크 가격 파일
    pub benchmark: Option<PathBuf>,
}

/// 가격 파일을 읽어 통계 요약을 계산합니다.
pub fn run_summary(config: &SummaryConfig, settings: &AnalyticsConfig) -> Result<StatsSummary> {
    let prices = read_prices(&config.prices)?;
    let benchmark = config
        .benchmark
        .as_deref()
        .map(read_prices)
        .transpose()?;

    info!(
        prices = prices.len(),
        benchmark = benchmark.as_ref().map_or(0, Vec::len),
        "Computing stats summary"
    );

    stats_summary_with_config(&prices, benchmark.as_deref(), settings)
        .context("Failed to compute stats summary")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("quant-cli-{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_run_summary_with_benchmark() {
        let prices = write_temp("summary-asset.txt", "100\n102\n101\n105\n103\n108\n");
        let benchmark = write_temp(
            "summary-bench.csv",
            "date,close\nd1,50\nd2,51\nd3,50.5\nd4,52.5\nd5,51.5\nd6,54\n",
        );

        let summary = run_summary(
            &SummaryConfig {
                prices: prices.clone(),
                benchmark: Some(benchmark.clone()),
            },
            &AnalyticsConfig::default(),
        )
        .unwrap();

        assert!((summary.total_return - 0.08).abs() < 1e-9);
        assert!((summary.beta.unwrap() - 1.0).abs() < 1e-9);

        fs::remove_file(prices).ok();
        fs::remove_file(benchmark).ok();
    }

    #[test]
    fn test_run_summary_too_short() {
        let prices = write_temp("summary-short.txt", "100\n101\n");
        let result = run_summary(
            &SummaryConfig {
                prices: prices.clone(),
                benchmark: None,
            },
            &AnalyticsConfig::default(),
        );
        assert!(result.is_err());
        fs::remove_file(prices).ok();
    }
}
