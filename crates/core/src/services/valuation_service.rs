use chrono::NaiveDate;
use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::analytics::{AssetPerformance, ValuationSummary};
use crate::models::date::days_between;
use crate::models::priced_asset::PricedAsset;
use crate::models::settings::Settings;

/// Computes capital-weighted valuation metrics over a set of priced assets.
///
/// Every aggregate looks up each asset at both boundary dates and fails as a
/// whole on the first missing observation; there is no partial result.
#[derive(Debug, Clone)]
pub struct ValuationService {
    days_per_year: f64,
}

impl ValuationService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            days_per_year: settings.days_per_year,
        }
    }

    /// Elapsed time between two dates, in years.
    pub fn years_between(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        days_between(start, end) as f64 / self.days_per_year
    }

    /// Sum of every asset's price on `date`. Zero for no assets.
    pub fn total_value(&self, assets: &[PricedAsset], date: NaiveDate) -> Result<f64, CoreError> {
        let mut total = 0.0;
        for asset in assets {
            total += asset.price_at(date)?;
        }
        Ok(total)
    }

    /// Profit between two dates: end value minus start value.
    /// `start == end` is valid and yields zero.
    pub fn profit(
        &self,
        assets: &[PricedAsset],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, CoreError> {
        let (start_value, end_value) = self.boundary_values(assets, start, end)?;
        let profit = end_value - start_value;
        debug!(
            "Profit over {} assets from {start} to {end}: {profit}",
            assets.len()
        );
        Ok(profit)
    }

    /// Annualized capital-weighted return between two dates.
    ///
    /// Returns `0.0` for an empty collection or a zero start value; that zero
    /// means "undefined", not a 0% return. A zero-length range on a non-empty
    /// collection fails with `InvalidDateRange`, and a rate that compounds to
    /// infinity or NaN fails with `NonFiniteReturn`.
    pub fn annualized_return(
        &self,
        assets: &[PricedAsset],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, CoreError> {
        if assets.is_empty() {
            return Ok(0.0);
        }
        if start == end {
            return Err(CoreError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let (start_value, end_value) = self.boundary_values(assets, start, end)?;
        if start_value == 0.0 {
            warn!(
                "Annualized return from {start} to {end}: start value is zero, reporting 0"
            );
            return Ok(0.0);
        }

        let years = self.years_between(start, end);
        let rate = compound_annualize(start_value, end_value, start, end, years)?;
        debug!(
            "Annualized return over {} assets from {start} to {end} ({years:.4} years): {rate}",
            assets.len()
        );
        Ok(rate)
    }

    /// Full valuation summary with a per-asset breakdown.
    ///
    /// Unlike `annualized_return`, a zero-length range is not an error here:
    /// the annualized figure is simply left as `None`. A non-finite annualized
    /// figure still fails with `NonFiniteReturn`.
    pub fn summary(
        &self,
        assets: &[PricedAsset],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ValuationSummary, CoreError> {
        let mut breakdown = Vec::with_capacity(assets.len());
        let mut start_value = 0.0;
        let mut end_value = 0.0;

        for asset in assets {
            let start_price = asset.price_at(start)?;
            let end_price = asset.price_at(end)?;
            start_value += start_price;
            end_value += end_price;

            let profit = end_price - start_price;
            let return_pct = if start_price == 0.0 {
                None
            } else {
                Some(profit / start_price * 100.0)
            };
            breakdown.push(AssetPerformance {
                symbol: asset.symbol().to_string(),
                start_price,
                end_price,
                profit,
                return_pct,
            });
        }

        let (total_return, annualized_return) = if start_value == 0.0 {
            (None, None)
        } else if start == end {
            (Some(end_value / start_value - 1.0), None)
        } else {
            let years = self.years_between(start, end);
            (
                Some(end_value / start_value - 1.0),
                Some(compound_annualize(start_value, end_value, start, end, years)?),
            )
        };

        Ok(ValuationSummary {
            start_date: start,
            end_date: end,
            start_value,
            end_value,
            profit: end_value - start_value,
            total_return,
            annualized_return,
            assets: breakdown,
        })
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Start and end totals, looking each asset up at start then end.
    fn boundary_values(
        &self,
        assets: &[PricedAsset],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(f64, f64), CoreError> {
        let mut start_value = 0.0;
        let mut end_value = 0.0;
        for asset in assets {
            start_value += asset.price_at(start)?;
            end_value += asset.price_at(end)?;
        }
        Ok((start_value, end_value))
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

/// (1 + total_return)^(1 / years) - 1, rejected unless finite.
fn compound_annualize(
    start_value: f64,
    end_value: f64,
    start: NaiveDate,
    end: NaiveDate,
    years: f64,
) -> Result<f64, CoreError> {
    let total_return = end_value / start_value - 1.0;
    let rate = (1.0 + total_return).powf(1.0 / years) - 1.0;
    if !rate.is_finite() {
        warn!(
            "Annualized return from {start} to {end} is not finite \
             (start value {start_value}, end value {end_value}, {years:.4} years)"
        );
        return Err(CoreError::NonFiniteReturn {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(rate)
}
