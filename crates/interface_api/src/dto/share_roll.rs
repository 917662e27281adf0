//! Share roll DTOs
//!
//! Request bodies come from spreadsheet-like forms, so amount fields are
//! accepted as JSON numbers, numeric strings (`"$1,250.00"`), empty strings
//! or null. Anything unparseable counts as zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use core_kernel::parse_amount;
use domain_share_roll::{
    MonthlyActivity, OperationOrder, PriorSeries, ShareRollError, ShareRollInput,
};

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => parse_amount(&n.to_string()),
        Some(Value::String(s)) => parse_amount(&s),
        _ => Decimal::ZERO,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorSeriesRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ending_shares: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub nav_per_share: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyActivityRequest {
    /// Defaults to the entry's 1-based position in the list
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub profit_loss: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub contribution: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub redemption_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub full_redemption: bool,
    #[serde(default)]
    pub redemption_series: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRollRequest {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub par_value: Decimal,
    pub prior_year: i32,
    #[serde(default)]
    pub prior_series: Vec<PriorSeriesRequest>,
    #[serde(default)]
    pub monthly_activity: Vec<MonthlyActivityRequest>,
    /// `contribution_first` or `redemption_first`
    #[serde(default)]
    pub operation_order: Option<String>,
}

impl ShareRollRequest {
    /// Operation order requested by the caller, if any
    pub fn operation_order(&self) -> Result<Option<OperationOrder>, ShareRollError> {
        self.operation_order
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .transpose()
    }

    /// Converts the request into engine input
    pub fn to_input(&self) -> ShareRollInput {
        let prior_series = self
            .prior_series
            .iter()
            .map(|s| PriorSeries::new(s.name.trim(), s.ending_shares, s.nav_per_share))
            .collect();

        let monthly_activity = self
            .monthly_activity
            .iter()
            .enumerate()
            .map(|(i, m)| MonthlyActivity {
                month: m.month.unwrap_or(i as u32 + 1),
                profit_loss: m.profit_loss,
                contribution: m.contribution,
                redemption_amount: m.redemption_amount,
                full_redemption: m.full_redemption,
                redemption_series: m
                    .redemption_series
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            })
            .collect();

        ShareRollInput {
            par_value: self.par_value,
            prior_year: self.prior_year,
            prior_series,
            monthly_activity,
        }
    }
}
