//! Stock Data Boundary
//!
//! The stock-data service sends numbers as display strings with thousands
//! separators (`"1,234,500"`). These adapters turn its responses into
//! numeric types at the boundary; nothing past this module sees the strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parse failures of a grouped numeric string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid number {input:?} in field {field}")]
pub struct StockParseError {
    pub field: &'static str,
    pub input: String,
}

/// Parse `"1,234,500"` / `"-3,000"` into an integer
pub fn parse_grouped_int(input: &str) -> Option<i64> {
    let cleaned: String = input.trim().chars().filter(|&c| c != ',').collect();
    cleaned.parse().ok()
}

/// Parse `"1,234.5"` / `"-1.25"` into a float
pub fn parse_grouped_decimal(input: &str) -> Option<f64> {
    let cleaned: String = input.trim().chars().filter(|&c| c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn int_field(field: &'static str, input: &str) -> Result<i64, StockParseError> {
    parse_grouped_int(input).ok_or_else(|| StockParseError {
        field,
        input: input.to_string(),
    })
}

fn decimal_field(field: &'static str, input: &str) -> Result<f64, StockParseError> {
    parse_grouped_decimal(input).ok_or_else(|| StockParseError {
        field,
        input: input.to_string(),
    })
}

/// `GET /api/stock/price/{code}` as sent by the service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPriceResponse {
    pub code: String,
    pub name: String,
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub volume: String,
    pub is_up: bool,
    pub is_down: bool,
}

/// Parsed quote
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub code: String,
    pub name: String,
    pub price: i64,
    pub change: i64,
    pub change_percent: f64,
    pub volume: i64,
    pub is_up: bool,
    pub is_down: bool,
}

impl TryFrom<StockPriceResponse> for StockQuote {
    type Error = StockParseError;

    fn try_from(raw: StockPriceResponse) -> Result<Self, Self::Error> {
        Ok(StockQuote {
            price: int_field("price", &raw.price)?,
            change: int_field("change", &raw.change)?,
            change_percent: decimal_field("changePercent", &raw.change_percent)?,
            volume: int_field("volume", &raw.volume)?,
            code: raw.code,
            name: raw.name,
            is_up: raw.is_up,
            is_down: raw.is_down,
        })
    }
}

/// `GET /api/stock/chart/{code}?days=N` as sent by the service
#[derive(Debug, Clone, Deserialize)]
pub struct ChartDataResponse {
    pub code: String,
    pub data: Vec<RawChartPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawChartPoint {
    pub date: String,
    pub price: String,
    pub volume: String,
}

/// Parsed chart point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub price: i64,
    pub volume: i64,
}

impl ChartDataResponse {
    pub fn into_points(self) -> Result<Vec<ChartPoint>, StockParseError> {
        self.data
            .into_iter()
            .map(|p| {
                Ok(ChartPoint {
                    price: int_field("price", &p.price)?,
                    volume: int_field("volume", &p.volume)?,
                    date: p.date,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouped_numbers() {
        assert_eq!(parse_grouped_int("1,234,500"), Some(1_234_500));
        assert_eq!(parse_grouped_int(" -3,000 "), Some(-3_000));
        assert_eq!(parse_grouped_int("12a"), None);
        assert_eq!(parse_grouped_decimal("-1.25"), Some(-1.25));
        assert_eq!(parse_grouped_decimal("1,024.5"), Some(1024.5));
        assert_eq!(parse_grouped_decimal("NaN"), None);
    }

    #[test]
    fn test_quote_conversion() {
        let raw: StockPriceResponse = serde_json::from_str(
            r#"{"code":"005930","name":"Samsung","price":"71,200","change":"-800",
                "changePercent":"-1.11","volume":"12,345,678","isUp":false,"isDown":true}"#,
        )
        .unwrap();

        let quote = StockQuote::try_from(raw).unwrap();
        assert_eq!(quote.price, 71_200);
        assert_eq!(quote.change, -800);
        assert_eq!(quote.volume, 12_345_678);
        assert!(quote.is_down);
    }

    #[test]
    fn test_chart_conversion_reports_bad_field() {
        let raw: ChartDataResponse = serde_json::from_str(
            r#"{"code":"X","data":[{"date":"2024-01-02","price":"1,000","volume":"5"},
                                   {"date":"2024-01-03","price":"n/a","volume":"7"}]}"#,
        )
        .unwrap();

        let err = raw.into_points().unwrap_err();
        assert_eq!(err.field, "price");
        assert_eq!(err.input, "n/a");
    }
}
