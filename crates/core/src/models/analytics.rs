use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Valuation of the whole collection between two dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Sum of every asset's price on `start_date`
    pub start_value: f64,

    /// Sum of every asset's price on `end_date`
    pub end_value: f64,

    /// end_value - start_value
    pub profit: f64,

    /// end_value / start_value - 1, `None` when start_value is zero
    pub total_return: Option<f64>,

    /// Capital-weighted annualized return.
    /// `None` when start_value is zero or the range spans zero days.
    pub annualized_return: Option<f64>,

    /// Per-asset breakdown, in insertion order
    pub assets: Vec<AssetPerformance>,
}

/// Performance of a single asset over the summary range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPerformance {
    pub symbol: String,
    pub start_price: f64,
    pub end_price: f64,
    pub profit: f64,

    /// Percentage return: (profit / start_price) * 100, `None` for a zero start price
    pub return_pct: Option<f64>,
}
