//! 가격 시계열 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 통계 요약 (벤치마크 대비 베타/알파 포함)
//! quant summary --prices data/spy.csv --benchmark data/qqq.csv
//!
//! # 설정 파일의 기간으로 기술적 지표 계산
//! quant indicators --prices data/spy.csv --config config/analytics.toml
//!
//! # 99% VaR / CVaR
//! quant var --prices data/spy.csv --confidence 0.99
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use quant_cli::commands::{
    indicators::run_indicators,
    load_config,
    summary::{run_summary, SummaryConfig},
    var::run_var,
};
use quant_core::{init_logging, AnalyticsError, LogConfig};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "quant")]
#[command(about = "Price series analytics - 수익률, 위험 지표, 기술적 지표", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML, `QUANT__` 환경 변수로 덮어쓰기 가능)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 통계 요약 (수익률, 변동성, 샤프/소르티노, 낙폭, VaR, 분포 통계)
    Summary {
        /// 가격 파일 (한 줄에 하나 또는 CSV 마지막 열)
        #[arg(short, long)]
        prices: PathBuf,

        /// 벤치마크 가격 파일
        #[arg(short, long)]
        benchmark: Option<PathBuf>,
    },

    /// 기술적 지표 (SMA, EMA, RSI, 볼린저 밴드, MACD)
    Indicators {
        /// 가격 파일
        #[arg(short, long)]
        prices: PathBuf,
    },

    /// 과거 시뮬레이션 VaR / CVaR
    Var {
        /// 가격 파일
        #[arg(short, long)]
        prices: PathBuf,

        /// 신뢰수준 (기본: 설정의 var_confidence)
        #[arg(long)]
        confidence: Option<f64>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_config(cli.config.as_deref())?;

    init_logging(LogConfig::from_settings(&settings.logging))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Summary { prices, benchmark } => {
            let summary = run_summary(&SummaryConfig { prices, benchmark }, &settings)?;
            print_json(&summary)
        }
        Commands::Indicators { prices } => {
            let report = run_indicators(&prices, &settings.indicators)?;
            print_json(&report)
        }
        Commands::Var { prices, confidence } => {
            let confidence = confidence.unwrap_or(settings.var_confidence);
            let report = run_var(&prices, confidence)?;
            info!(
                var = report.value_at_risk,
                cvar = report.conditional_var,
                "VaR computed"
            );
            print_json(&report)
        }
    }
}

/// 입력 데이터·파라미터 문제는 종료 코드 2, 그 외는 1.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    let client_error = err.chain().any(|cause| {
        cause
            .downcast_ref::<AnalyticsError>()
            .is_some_and(AnalyticsError::is_client_error)
    });
    if client_error {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            exit_code(&e)
        }
    }
}
