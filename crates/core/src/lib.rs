pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use models::{
    analytics::ValuationSummary,
    date::parse_date_with_format,
    priced_asset::PricedAsset,
    settings::Settings,
};
use services::valuation_service::ValuationService;
use std::collections::BTreeMap;

use errors::CoreError;

/// Main entry point for the portfolio-returns core library.
/// An append-only collection of priced assets plus the service that values it.
///
/// Queries take `&self` and never mutate, so a `Holdings` can be shared across
/// threads for reading. `add_asset` takes `&mut self`; concurrent writers need
/// external synchronization (e.g., an `RwLock<Holdings>`).
#[must_use]
#[derive(Clone)]
pub struct Holdings {
    assets: Vec<PricedAsset>,
    settings: Settings,
    valuation_service: ValuationService,
}

impl std::fmt::Debug for Holdings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Holdings")
            .field("assets", &self.assets.len())
            .field("observations", &self.total_observations())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Default for Holdings {
    fn default() -> Self {
        Self::new()
    }
}

impl Holdings {
    /// Create an empty collection with default settings.
    pub fn new() -> Self {
        Self::build(Settings::default())
    }

    /// Create an empty collection with custom settings.
    pub fn with_settings(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    // ── Assets ──────────────────────────────────────────────────────

    /// Append an asset. No deduplication and no check that it has prices
    /// in any particular range; gaps surface at query time.
    pub fn add_asset(&mut self, asset: PricedAsset) {
        log::debug!(
            "Adding asset {} with {} observations",
            asset.symbol(),
            asset.len()
        );
        self.assets.push(asset);
    }

    /// Import assets from a JSON object of `{"SYMBOL": {"YYYY-MM-DD": price}}`.
    /// Every asset is parsed before any is added (all-or-nothing).
    /// Returns the number of assets imported.
    pub fn import_assets_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let raw: BTreeMap<String, BTreeMap<String, f64>> = serde_json::from_str(json)?;
        let mut parsed = Vec::with_capacity(raw.len());
        for (symbol, prices) in raw {
            parsed.push(PricedAsset::from_prices_with_format(
                symbol,
                prices,
                &self.settings.date_format,
            )?);
        }
        let count = parsed.len();
        for asset in parsed {
            self.add_asset(asset);
        }
        Ok(count)
    }

    /// All assets in insertion order.
    #[must_use]
    pub fn assets(&self) -> &[PricedAsset] {
        &self.assets
    }

    /// First asset with the given symbol (case-insensitive).
    #[must_use]
    pub fn get_asset(&self, symbol: &str) -> Option<&PricedAsset> {
        let upper = symbol.trim().to_uppercase();
        self.assets.iter().find(|a| a.symbol() == upper)
    }

    /// Symbols in insertion order, duplicates included.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.assets.iter().map(PricedAsset::symbol).collect()
    }

    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Total number of price observations across all assets.
    #[must_use]
    pub fn total_observations(&self) -> usize {
        self.assets.iter().map(PricedAsset::len).sum()
    }

    // ── Valuation (string dates) ────────────────────────────────────

    /// Profit between two `YYYY-MM-DD` dates: total end value minus total start value.
    pub fn profit(&self, start_date: &str, end_date: &str) -> Result<f64, CoreError> {
        let (start, end) = self.parse_range(start_date, end_date)?;
        self.profit_between(start, end)
    }

    /// Capital-weighted annualized return between two `YYYY-MM-DD` dates.
    /// A result of `0.0` on an empty collection or zero start value means "undefined".
    pub fn annualized_return(&self, start_date: &str, end_date: &str) -> Result<f64, CoreError> {
        let (start, end) = self.parse_range(start_date, end_date)?;
        self.annualized_return_between(start, end)
    }

    /// Total value of all assets on a `YYYY-MM-DD` date.
    pub fn value_at(&self, date: &str) -> Result<f64, CoreError> {
        let date = self.parse(date)?;
        self.valuation_service.total_value(&self.assets, date)
    }

    /// Full valuation summary with per-asset breakdown.
    pub fn summary(&self, start_date: &str, end_date: &str) -> Result<ValuationSummary, CoreError> {
        let (start, end) = self.parse_range(start_date, end_date)?;
        self.summary_between(start, end)
    }

    // ── Valuation (typed dates) ─────────────────────────────────────

    pub fn profit_between(&self, start: NaiveDate, end: NaiveDate) -> Result<f64, CoreError> {
        self.valuation_service.profit(&self.assets, start, end)
    }

    pub fn annualized_return_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, CoreError> {
        self.valuation_service
            .annualized_return(&self.assets, start, end)
    }

    pub fn summary_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ValuationSummary, CoreError> {
        self.valuation_service.summary(&self.assets, start, end)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change the year length used for annualizing.
    /// Rebuilds the valuation service so the new value takes effect immediately.
    pub fn set_days_per_year(&mut self, days_per_year: f64) -> Result<(), CoreError> {
        let settings = Settings {
            days_per_year,
            ..self.settings.clone()
        };
        settings.validate()?;
        self.valuation_service = ValuationService::new(&settings);
        self.settings = settings;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn parse(&self, date: &str) -> Result<NaiveDate, CoreError> {
        parse_date_with_format(date, &self.settings.date_format)
    }

    fn parse_range(&self, start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), CoreError> {
        Ok((self.parse(start)?, self.parse(end)?))
    }

    fn build(settings: Settings) -> Self {
        let valuation_service = ValuationService::new(&settings);
        Self {
            assets: Vec::new(),
            settings,
            valuation_service,
        }
    }
}
