use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use wickbiz_core::{Entity, LineItemId, ValueObject};
use wickbiz_receipts::ParsedLine;

use crate::aggregates::ReceiptKey;

pub const FALLBACK_VENDOR: &str = "Manual entry";
pub const FALLBACK_ITEM: &str = "New supply item";

/// Purchase unit.
///
/// The add-item form offers `oz`, `lb`, `g` and `kg`; anything else (e.g. a
/// parser reading "each" off a receipt) is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Unit {
    #[default]
    Oz,
    Lb,
    G,
    Kg,
    Other(String),
}

impl Unit {
    /// Blank input means `oz`; known names match case-insensitively.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "oz" => Unit::Oz,
            "lb" => Unit::Lb,
            "g" => Unit::G,
            "kg" => Unit::Kg,
            _ => Unit::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Unit::Oz => "oz",
            Unit::Lb => "lb",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Other(s) => s,
        }
    }
}

impl ValueObject for Unit {}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        Unit::parse(&value)
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        match value {
            Unit::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// A numeric field as the user (or a parser) supplied it.
///
/// JSON clients may send either `12.5` or `"12.5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Coerce to a non-negative finite amount; anything unusable becomes `0`.
    pub fn coerce(&self) -> f64 {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        non_negative(value)
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Text(String::new())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

fn non_negative(value: f64) -> f64 {
    // Also rejects NaN and folds -0.0 into 0.0.
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Raw, unvalidated line item fields (form submission or parsed upload).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItemCandidate {
    pub vendor: String,
    /// `YYYY-MM-DD`; blank means "today".
    pub date: String,
    pub item: String,
    pub quantity: NumericInput,
    pub unit: String,
    pub total_price: NumericInput,
}

impl From<ParsedLine> for LineItemCandidate {
    fn from(line: ParsedLine) -> Self {
        Self {
            vendor: line.vendor,
            date: line.date.map(|d| d.to_string()).unwrap_or_default(),
            item: line.item,
            quantity: NumericInput::Number(line.quantity),
            unit: line.unit,
            total_price: NumericInput::Number(line.total_price),
        }
    }
}

/// One recorded supply purchase.
///
/// Immutable once created; a correction is a delete followed by a new add.
/// Only built through the ledger, so every instance has passed normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplyLineItem {
    id: LineItemId,
    vendor: String,
    date: NaiveDate,
    item: String,
    total_price: f64,
    quantity: f64,
    unit: Unit,
}

impl SupplyLineItem {
    /// Apply the normalization rules to a candidate.
    pub(crate) fn from_candidate(
        id: LineItemId,
        candidate: LineItemCandidate,
        today: NaiveDate,
    ) -> Self {
        let vendor = non_blank_or(&candidate.vendor, FALLBACK_VENDOR);
        let item = non_blank_or(&candidate.item, FALLBACK_ITEM);

        let raw_date = candidate.date.trim();
        let date = if raw_date.is_empty() {
            today
        } else {
            raw_date.parse::<NaiveDate>().unwrap_or_else(|e| {
                tracing::debug!(date = raw_date, error = %e, "unparseable purchase date; using today");
                today
            })
        };

        Self {
            id,
            vendor,
            date,
            item,
            total_price: candidate.total_price.coerce(),
            quantity: candidate.quantity.coerce(),
            unit: Unit::parse(&candidate.unit),
        }
    }

    pub fn id_typed(&self) -> LineItemId {
        self.id
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Price per unit, or `0` when nothing was bought.
    ///
    /// A quantity so small that the division overflows also yields `0`, so
    /// aggregates stay finite.
    pub fn unit_cost(&self) -> f64 {
        if self.quantity <= 0.0 {
            return 0.0;
        }
        let cost = self.total_price / self.quantity;
        if cost.is_finite() { cost } else { 0.0 }
    }

    /// Receipt this line is assumed to belong to.
    pub fn receipt_key(&self) -> ReceiptKey {
        ReceiptKey {
            vendor: self.vendor.clone(),
            date: self.date,
        }
    }
}

impl Entity for SupplyLineItem {
    type Id = LineItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn non_blank_or(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
