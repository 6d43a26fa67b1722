use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::date::{parse_date_with_format, DATE_FORMAT};

/// A single price observation (date → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// A labelled, sparse history of price observations.
///
/// Observations are kept sorted by date with at most one entry per date,
/// so a lookup is a binary search for the latest observation at or before
/// the query date (last observation carried forward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PricedAssetRecord")]
pub struct PricedAsset {
    /// Identifier, trimmed and uppercased (e.g., "AAPL", "GOOG")
    symbol: String,

    /// Observations sorted ascending by date, unique dates
    points: Vec<PricePoint>,
}

/// Unchecked wire shape; normalized into `PricedAsset` on deserialization.
#[derive(Deserialize)]
struct PricedAssetRecord {
    symbol: String,
    #[serde(default)]
    points: Vec<PricePoint>,
}

impl From<PricedAssetRecord> for PricedAsset {
    fn from(record: PricedAssetRecord) -> Self {
        let mut asset = PricedAsset::new(record.symbol);
        for point in record.points {
            asset.set_price(point.date, point.price);
        }
        asset
    }
}

impl PricedAsset {
    /// Create an asset with no observations yet.
    ///
    /// The symbol is trimmed and uppercased, so `"brk.b "` is stored and
    /// reported as `"BRK.B"`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            points: Vec::new(),
        }
    }

    /// Build an asset from `(YYYY-MM-DD, price)` pairs.
    /// A repeated date keeps the last price given for it.
    pub fn from_prices<I, K>(symbol: impl Into<String>, prices: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Self::from_prices_with_format(symbol, prices, DATE_FORMAT)
    }

    /// Same as [`PricedAsset::from_prices`] with an explicit chrono date format.
    pub fn from_prices_with_format<I, K>(
        symbol: impl Into<String>,
        prices: I,
        format: &str,
    ) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut asset = Self::new(symbol);
        for (date, price) in prices {
            let date = parse_date_with_format(date.as_ref(), format)?;
            asset.set_price(date, price);
        }
        Ok(asset)
    }

    /// Build an asset from a JSON object such as `{"2023-01-01": 150.0}`.
    pub fn from_json(symbol: impl Into<String>, json: &str) -> Result<Self, CoreError> {
        let prices: BTreeMap<String, f64> = serde_json::from_str(json)?;
        Self::from_prices(symbol, prices)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All observations, oldest first.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Insert or update an observation, keeping dates sorted and unique.
    pub fn set_price(&mut self, date: NaiveDate, price: f64) {
        match self.points.binary_search_by_key(&date, |p| p.date) {
            Ok(idx) => self.points[idx].price = price,
            Err(idx) => self.points.insert(idx, PricePoint { date, price }),
        }
    }

    /// Price in effect on `date`: the observation with the largest date `<= date`.
    ///
    /// Fails with `NoPriorObservation` when `date` precedes every observation
    /// (including when the history is empty).
    pub fn price_at(&self, date: NaiveDate) -> Result<f64, CoreError> {
        match self.points.binary_search_by_key(&date, |p| p.date) {
            Ok(idx) => Ok(self.points[idx].price),
            Err(0) => {
                debug!(
                    "No observation for {} on or before {date} (history starts {:?})",
                    self.symbol,
                    self.first_date()
                );
                Err(CoreError::NoPriorObservation {
                    symbol: self.symbol.clone(),
                    date: date.to_string(),
                })
            }
            Err(idx) => Ok(self.points[idx - 1].price),
        }
    }

    /// String-dated form of [`PricedAsset::price_at`].
    /// Always expects `YYYY-MM-DD`; use [`PricedAsset::price_on_with_format`]
    /// for any other layout.
    pub fn price_on(&self, date: &str) -> Result<f64, CoreError> {
        self.price_on_with_format(date, DATE_FORMAT)
    }

    /// Same as [`PricedAsset::price_on`] with an explicit chrono date format.
    pub fn price_on_with_format(&self, date: &str, format: &str) -> Result<f64, CoreError> {
        let date = parse_date_with_format(date, format)?;
        self.price_at(date)
    }

    /// Observations recorded within `[from, to]`, oldest first.
    pub fn prices_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<PricePoint> {
        if from > to {
            return Vec::new();
        }
        // First entry >= from
        let start = self.points.partition_point(|p| p.date < from);
        // First entry > to
        let end = self.points.partition_point(|p| p.date <= to);
        self.points[start..end].to_vec()
    }
}
