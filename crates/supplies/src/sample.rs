//! Sample purchases shown on a fresh dashboard.

use crate::item::{LineItemCandidate, NumericInput};

fn line(vendor: &str, date: &str, item: &str, total_price: f64, quantity: f64, unit: &str) -> LineItemCandidate {
    LineItemCandidate {
        vendor: vendor.to_string(),
        date: date.to_string(),
        item: item.to_string(),
        quantity: NumericInput::Number(quantity),
        unit: unit.to_string(),
        total_price: NumericInput::Number(total_price),
    }
}

/// Sample lines, newest first.
pub fn sample_candidates() -> Vec<LineItemCandidate> {
    vec![
        line("CandleScience", "2026-02-10", "Golden Brands 464 Soy Wax", 34.99, 10.0, "lb"),
        line("Lone Star Candle Supply", "2026-02-08", "Premium Cotton Wicks CD-18 (6\")", 12.5, 100.0, "oz"),
        line("CandleScience", "2026-02-05", "Lavender Eucalyptus Fragrance Oil", 18.0, 16.0, "oz"),
        line("Fillmore Container", "2026-01-28", "Straight Sided Tumbler Jars (8oz)", 48.0, 24.0, "oz"),
        line("Nature's Garden", "2026-01-22", "Coconut Wax Blend CB-135", 52.99, 640.0, "oz"),
        line("Bramble Berry", "2026-01-15", "Vanilla Sandalwood FO", 22.5, 16.0, "oz"),
    ]
}
