//! Dashboard metrics derived from the full line item collection.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use wickbiz_core::ValueObject;

use crate::item::SupplyLineItem;

/// Receipts are not stored; lines sharing vendor and date are assumed to come
/// from the same one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReceiptKey {
    pub vendor: String,
    pub date: NaiveDate,
}

impl ValueObject for ReceiptKey {}

/// Snapshot of the ledger's summary figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LedgerAggregates {
    /// Sum of line totals (USD).
    pub total_cost: f64,
    pub item_count: usize,
    /// Arithmetic mean of per-line unit costs; zero-quantity lines add `0` to
    /// the sum but still count in the divisor. Not volume-weighted.
    pub avg_cost_per_unit: f64,
    /// Distinct (vendor, date) pairs.
    pub unique_receipt_count: usize,
}

impl ValueObject for LedgerAggregates {}

impl LedgerAggregates {
    /// Full recomputation over `items`.
    pub fn compute(items: &[SupplyLineItem]) -> Self {
        if items.is_empty() {
            return Self::default();
        }

        let total_cost = items.iter().map(SupplyLineItem::total_price).sum();
        let unit_cost_sum: f64 = items.iter().map(SupplyLineItem::unit_cost).sum();
        let receipts: HashSet<ReceiptKey> = items.iter().map(SupplyLineItem::receipt_key).collect();

        Self {
            total_cost,
            item_count: items.len(),
            avg_cost_per_unit: unit_cost_sum / items.len() as f64,
            unique_receipt_count: receipts.len(),
        }
    }
}
