//! The input record describing one investment scenario.
//!
//! Every value is a display string prepared by the caller; the report never parses or computes
//! numbers.  Decoding is deliberately loose: optional fields may be missing, `null`, strings,
//! numbers or booleans, and always end up as text.  Only `years` is required.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// One row of the year-by-year projection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct YearRecord {
    #[serde(default, deserialize_with = "display_text")]
    pub year: String,
    #[serde(default, deserialize_with = "display_text")]
    pub rental: String,
    #[serde(default, deserialize_with = "display_text")]
    pub growth: String,
    #[serde(default, deserialize_with = "display_text")]
    pub total_pct: String,
}

impl YearRecord {
    pub fn new(
        year: impl Into<String>,
        rental: impl Into<String>,
        growth: impl Into<String>,
        total_pct: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            rental: rental.into(),
            growth: growth.into(),
            total_pct: total_pct.into(),
        }
    }

    /// The four cell texts in column order.
    pub fn cells(&self) -> [&str; 4] {
        [&self.year, &self.rental, &self.growth, &self.total_pct]
    }
}

/// Data record rendered into a report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InputRecord {
    /// Report subtitle, appended to the title heading.
    #[serde(default, deserialize_with = "display_text")]
    pub title: String,
    #[serde(default, deserialize_with = "display_text")]
    pub area: String,
    #[serde(default, deserialize_with = "display_text")]
    pub price_m2: String,
    #[serde(default, deserialize_with = "display_text")]
    pub price: String,
    /// Projection rows, rendered in the given order.
    pub years: Vec<YearRecord>,
    #[serde(default, deserialize_with = "display_text")]
    pub total_rental: String,
    #[serde(default, deserialize_with = "display_text")]
    pub total_growth: String,
    #[serde(default, deserialize_with = "display_text")]
    pub total_profit: String,
    #[serde(default, deserialize_with = "display_text")]
    pub roi_pct: String,
    #[serde(default, deserialize_with = "display_text")]
    pub avg_annual_pct: String,
    #[serde(default, deserialize_with = "display_text")]
    pub final_value: String,
}

impl InputRecord {
    /// Decodes a record from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let record = serde_json::from_str(json)?;
        Ok(record)
    }

    /// Encodes the record as JSON, the format accepted by [`InputRecord::from_json`].
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks that every field carries text.
    ///
    /// Rendering never requires this; it backs the opt-in strict mode of the command line.
    pub fn validate(&self) -> Result<(), ReportError> {
        let scalars = [
            ("title", &self.title),
            ("area", &self.area),
            ("price_m2", &self.price_m2),
            ("price", &self.price),
            ("total_rental", &self.total_rental),
            ("total_growth", &self.total_growth),
            ("total_profit", &self.total_profit),
            ("roi_pct", &self.roi_pct),
            ("avg_annual_pct", &self.avg_annual_pct),
            ("final_value", &self.final_value),
        ];

        let mut issues: Vec<String> = scalars
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| format!("`{name}` is empty"))
            .collect();

        if self.years.is_empty() {
            issues.push("`years` is empty".to_string());
        }
        for (index, year) in self.years.iter().enumerate() {
            if year.year.trim().is_empty() {
                issues.push(format!("`years[{index}].year` is empty"));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ReportError::Validation(issues))
        }
    }
}

/// Accepts any JSON scalar and keeps its textual form; `null` becomes the empty string.
fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}
