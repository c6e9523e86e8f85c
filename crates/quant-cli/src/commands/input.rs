//! 가격 파일 읽기.
//!
//! 지원 형식:
//! - 한 줄에 숫자 하나
//! - CSV (마지막 열을 종가로 사용, 예: `date,open,high,low,close`)
//!
//! 빈 줄과 `#` 주석 줄은 건너뛰며, 첫 가격이 나오기 전의 숫자가 아닌 줄은
//! 헤더로 간주합니다.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// 파일에서 가격 시계열을 읽습니다.
pub fn read_prices(path: &Path) -> Result<Vec<f64>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read price file: {}", path.display()))?;
    let prices = parse_prices(&content)
        .with_context(|| format!("Invalid price file: {}", path.display()))?;
    debug!(path = %path.display(), count = prices.len(), "price file loaded");
    Ok(prices)
}

/// 문자열 내용에서 가격 시계열을 파싱합니다.
pub fn parse_prices(content: &str) -> Result<Vec<f64>> {
    let mut prices = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let field = line.rsplit(',').next().unwrap_or(line).trim();
        match field.parse::<f64>() {
            Ok(price) if price.is_finite() => prices.push(price),
            Ok(price) => bail!("line {}: non-finite price {}", line_no + 1, price),
            // 헤더
            Err(_) if prices.is_empty() => continue,
            Err(e) => bail!("line {}: cannot parse '{}': {}", line_no + 1, field, e),
        }
    }

    Ok(prices)
}
