// Chart domain model
use super::token_usage::TokenMetrics;

pub const INPUT_COLOR: &str = "#3b82f6";
pub const OUTPUT_COLOR: &str = "#10b981";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: String, value: f64) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<ChartPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, color: Option<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            id,
            name,
            color,
            points,
        }
    }
}

/// Category-axis line chart; every series shares the same labels
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(id: String, title: String, labels: Vec<String>, series: Vec<SeriesData>) -> Self {
        Self {
            id,
            title,
            labels,
            series,
        }
    }

    /// Input/output token lines over the daily buckets
    pub fn token_usage(metrics: &TokenMetrics) -> Self {
        let labels: Vec<String> = metrics.daily.iter().map(|d| d.date.clone()).collect();

        let input = metrics
            .daily
            .iter()
            .map(|d| ChartPoint::new(d.date.clone(), d.tokens_in))
            .collect();
        let output = metrics
            .daily
            .iter()
            .map(|d| ChartPoint::new(d.date.clone(), d.tokens_out))
            .collect();

        Self::new(
            "token-usage".to_string(),
            "Token Usage (Last 7 Days)".to_string(),
            labels,
            vec![
                SeriesData::new(
                    "tokens_in".to_string(),
                    "Input".to_string(),
                    Some(INPUT_COLOR.to_string()),
                    input,
                ),
                SeriesData::new(
                    "tokens_out".to_string(),
                    "Output".to_string(),
                    Some(OUTPUT_COLOR.to_string()),
                    output,
                ),
            ],
        )
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|p| p.value)
            .fold(0.0, f64::max)
    }
}
