use std::sync::Arc;

use wickbiz_core::{
    Clock, DomainError, DomainResult, Entity, IdGenerator, LineItemId, SystemClock, UuidV7Ids,
};
use wickbiz_receipts::{ReceiptParser, UploadedFile};

use crate::aggregates::LedgerAggregates;
use crate::error::IngestError;
use crate::item::{LineItemCandidate, SupplyLineItem};
use crate::sample;

/// One session's supply purchases, newest first.
///
/// Owns the collection outright; callers hold it (or wrap it in a lock) and
/// pass it to whatever presentation layer drives it. Mutations are plain
/// `&mut self` calls that finish before the next read.
pub struct SupplyLedger {
    items: Vec<SupplyLineItem>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl core::fmt::Debug for SupplyLedger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SupplyLedger")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl SupplyLedger {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            items: Vec::new(),
            clock,
            ids,
        }
    }

    /// Empty ledger using the wall clock and UUIDv7 ids.
    pub fn with_system_defaults() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidV7Ids))
    }

    /// Load the sample purchases, keeping their newest-first order on top of
    /// whatever is already recorded.
    pub fn seed_sample_data(&mut self) {
        for candidate in sample::sample_candidates().into_iter().rev() {
            self.add_item(candidate);
        }
    }

    pub fn items(&self) -> &[SupplyLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: LineItemId) -> Option<&SupplyLineItem> {
        self.items.iter().find(|i| *i.id() == id)
    }

    pub fn require(&self, id: LineItemId) -> DomainResult<&SupplyLineItem> {
        self.get(id).ok_or_else(DomainError::not_found)
    }

    /// Normalize `candidate`, assign a fresh id, and record it as the newest line.
    ///
    /// Never fails: malformed fields degrade to their defaults.
    pub fn add_item(&mut self, candidate: LineItemCandidate) -> SupplyLineItem {
        let id = self.ids.next_id();
        debug_assert!(self.get(id).is_none(), "id generator repeated {id}");

        let item = SupplyLineItem::from_candidate(id, candidate, self.clock.today());
        tracing::info!(
            item_id = %item.id_typed(),
            vendor = item.vendor(),
            total_price = item.total_price(),
            quantity = item.quantity(),
            unit = %item.unit(),
            "supply line added"
        );

        self.items.insert(0, item.clone());
        item
    }

    /// Remove the line with `id`. Unknown ids are ignored.
    pub fn delete_item(&mut self, id: LineItemId) -> Option<SupplyLineItem> {
        let Some(pos) = self.items.iter().position(|i| *i.id() == id) else {
            tracing::debug!(item_id = %id, "delete ignored; no such supply line");
            return None;
        };

        let removed = self.items.remove(pos);
        tracing::info!(item_id = %id, vendor = removed.vendor(), "supply line deleted");
        Some(removed)
    }

    /// Turn an upload into a new line.
    ///
    /// An empty selection records nothing and never reaches the parser. If the
    /// parser fails the ledger is left untouched.
    pub fn ingest_upload(
        &mut self,
        files: &[UploadedFile],
        parser: &dyn ReceiptParser,
    ) -> Result<Option<SupplyLineItem>, IngestError> {
        if files.is_empty() {
            tracing::debug!("ingest ignored; empty file selection");
            return Ok(None);
        }

        let parsed = parser.parse(files).map_err(|source| {
            tracing::warn!(parser = parser.name(), files = files.len(), error = %source, "receipt parse failed");
            IngestError::ParseFailed {
                parser: parser.name(),
                source,
            }
        })?;

        tracing::info!(parser = parser.name(), files = files.len(), "receipt upload parsed");
        Ok(Some(self.add_item(parsed.into())))
    }

    pub fn compute_aggregates(&self) -> LedgerAggregates {
        LedgerAggregates::compute(&self.items)
    }
}

impl Default for SupplyLedger {
    fn default() -> Self {
        Self::with_system_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use wickbiz_core::{FixedClock, SequentialIds};
    use wickbiz_receipts::{ParsedLine, ReceiptError, StubRandomParser};

    use crate::item::{NumericInput, Unit};

    fn test_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    }

    fn test_ledger() -> SupplyLedger {
        SupplyLedger::new(
            Arc::new(FixedClock(test_today())),
            Arc::new(SequentialIds::default()),
        )
    }

    fn candidate(vendor: &str, date: &str, total_price: f64, quantity: f64) -> LineItemCandidate {
        LineItemCandidate {
            vendor: vendor.to_string(),
            date: date.to_string(),
            item: "Soy Wax".to_string(),
            quantity: NumericInput::Number(quantity),
            unit: "lb".to_string(),
            total_price: NumericInput::Number(total_price),
        }
    }

    fn receipt_file() -> UploadedFile {
        UploadedFile::new("receipt.pdf", Some("application/pdf".to_string()), vec![b'%', b'P', b'D', b'F'])
    }

    struct FailingParser;

    impl ReceiptParser for FailingParser {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn parse(&self, files: &[UploadedFile]) -> Result<ParsedLine, ReceiptError> {
            Err(ReceiptError::Unreadable {
                file_name: files[0].file_name.clone(),
                reason: "corrupt".to_string(),
            })
        }
    }

    /// Panics if consulted; proves empty selections short-circuit.
    struct UnreachableParser;

    impl ReceiptParser for UnreachableParser {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        fn parse(&self, _files: &[UploadedFile]) -> Result<ParsedLine, ReceiptError> {
            panic!("parser must not be called for an empty selection");
        }
    }

    #[test]
    fn add_item_prepends_and_returns_stored_item() {
        let mut ledger = test_ledger();
        let first = ledger.add_item(candidate("CandleScience", "2026-02-10", 34.99, 10.0));
        let second = ledger.add_item(candidate("Bramble Berry", "2026-01-15", 22.5, 16.0));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.items()[0], second);
        assert_eq!(ledger.items()[1], first);
        assert_ne!(first.id_typed(), second.id_typed());
    }

    #[test]
    fn add_item_with_blank_form_uses_defaults() {
        let mut ledger = test_ledger();
        let item = ledger.add_item(LineItemCandidate {
            quantity: "abc".into(),
            total_price: "".into(),
            ..Default::default()
        });

        assert_eq!(item.vendor(), "Manual entry");
        assert_eq!(item.item(), "New supply item");
        assert_eq!(item.date(), test_today());
        assert_eq!(item.unit(), &Unit::Oz);
        assert_eq!(item.quantity(), 0.0);
        assert_eq!(item.total_price(), 0.0);
    }

    #[test]
    fn delete_removes_only_matching_item() {
        let mut ledger = test_ledger();
        let keep = ledger.add_item(candidate("A", "2026-01-01", 1.0, 1.0));
        let gone = ledger.add_item(candidate("B", "2026-01-02", 2.0, 1.0));

        let removed = ledger.delete_item(gone.id_typed());
        assert_eq!(removed, Some(gone));
        assert_eq!(ledger.items(), &[keep]);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut ledger = test_ledger();
        ledger.seed_sample_data();
        let before = ledger.items().to_vec();

        assert_eq!(ledger.delete_item(LineItemId::new()), None);
        assert_eq!(ledger.items(), before.as_slice());
    }

    #[test]
    fn require_reports_not_found() {
        let ledger = test_ledger();
        assert_eq!(ledger.require(LineItemId::new()).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn ingest_empty_selection_changes_nothing() {
        let mut ledger = test_ledger();
        ledger.seed_sample_data();

        let outcome = ledger.ingest_upload(&[], &UnreachableParser).unwrap();
        assert_eq!(outcome, None);
        assert_eq!(ledger.len(), 6);
    }

    #[test]
    fn ingest_adds_exactly_one_stub_line_dated_today() {
        let mut ledger = test_ledger();
        ledger.seed_sample_data();
        let parser = StubRandomParser::seeded(11);

        let item = ledger
            .ingest_upload(&[receipt_file(), receipt_file()], &parser)
            .unwrap()
            .expect("non-empty upload creates a line");

        assert_eq!(ledger.len(), 7);
        assert_eq!(ledger.items()[0], item);
        assert_eq!(item.vendor(), "Uploaded Vendor");
        assert_eq!(item.item(), "Parsed Supply Item");
        assert_eq!(item.date(), test_today());
        assert_eq!(item.unit(), &Unit::Oz);
        assert!((0.0..=50.0).contains(&item.total_price()));
        assert!((0.0..=500.0).contains(&item.quantity()));
    }

    #[test]
    fn failed_parse_leaves_ledger_unchanged() {
        let mut ledger = test_ledger();
        ledger.seed_sample_data();
        let before = ledger.items().to_vec();

        let err = ledger.ingest_upload(&[receipt_file()], &FailingParser).unwrap_err();
        match err {
            IngestError::ParseFailed { parser, source: ReceiptError::Unreadable { file_name, .. } } => {
                assert_eq!(parser, "failing");
                assert_eq!(file_name, "receipt.pdf");
            }
            other => panic!("expected Unreadable parse failure, got {other:?}"),
        }
        assert_eq!(ledger.items(), before.as_slice());
    }

    #[test]
    fn sample_data_keeps_newest_first_order() {
        let mut ledger = test_ledger();
        ledger.seed_sample_data();

        let vendors: Vec<&str> = ledger.items().iter().map(SupplyLineItem::vendor).collect();
        assert_eq!(
            vendors,
            [
                "CandleScience",
                "Lone Star Candle Supply",
                "CandleScience",
                "Fillmore Container",
                "Nature's Garden",
                "Bramble Berry",
            ]
        );
    }

    #[test]
    fn aggregates_of_empty_ledger_are_zero() {
        let ledger = test_ledger();
        assert_eq!(ledger.compute_aggregates(), LedgerAggregates::default());
    }

    #[test]
    fn aggregates_use_mean_of_unit_costs() {
        let mut ledger = test_ledger();
        ledger.add_item(candidate("A", "2026-02-10", 34.99, 10.0));
        ledger.add_item(candidate("B", "2026-02-08", 12.50, 100.0));
        ledger.add_item(candidate("C", "2026-02-05", 18.00, 16.0));

        let agg = ledger.compute_aggregates();
        assert!((agg.total_cost - 65.49).abs() < 1e-9);
        assert_eq!(agg.item_count, 3);
        assert!((agg.avg_cost_per_unit - 1.583).abs() < 1e-3);
        assert_eq!(agg.unique_receipt_count, 3);
    }

    #[test]
    fn zero_quantity_lines_count_in_divisor() {
        let mut ledger = test_ledger();
        ledger.add_item(candidate("A", "2026-02-10", 10.0, 5.0));
        ledger.add_item(candidate("A", "2026-02-10", 99.0, 0.0));

        let agg = ledger.compute_aggregates();
        assert!((agg.avg_cost_per_unit - 1.0).abs() < 1e-12);
        assert!((agg.total_cost - 109.0).abs() < 1e-12);
    }

    #[test]
    fn average_stays_finite_with_subnormal_quantity() {
        let mut ledger = test_ledger();
        ledger.add_item(candidate("A", "2026-02-10", 50.0, 1e-320));
        ledger.add_item(candidate("B", "2026-02-10", 10.0, 5.0));

        let agg = ledger.compute_aggregates();
        assert!(agg.avg_cost_per_unit.is_finite());
        assert!((agg.avg_cost_per_unit - 1.0).abs() < 1e-12);
    }

    #[test]
    fn receipts_group_by_vendor_and_date() {
        let mut ledger = test_ledger();
        ledger.add_item(candidate("CandleScience", "2026-02-10", 34.99, 10.0));
        ledger.add_item(candidate("CandleScience", "2026-02-10", 18.0, 16.0));
        ledger.add_item(candidate("Bramble Berry", "2026-02-10", 22.5, 16.0));

        assert_eq!(ledger.compute_aggregates().unique_receipt_count, 2);
    }

    #[test]
    fn aggregates_follow_deletes() {
        let mut ledger = test_ledger();
        let a = ledger.add_item(candidate("A", "2026-02-10", 10.0, 1.0));
        ledger.add_item(candidate("B", "2026-02-11", 5.0, 1.0));

        ledger.delete_item(a.id_typed());
        let agg = ledger.compute_aggregates();
        assert_eq!(agg.item_count, 1);
        assert!((agg.total_cost - 5.0).abs() < 1e-12);
        assert_eq!(agg.unique_receipt_count, 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: the most recently added line is always first, and the
        /// collection is exactly the reverse of insertion order.
        #[test]
        fn additions_are_newest_first(
            prices in prop::collection::vec(-100.0f64..1_000.0f64, 1..20)
        ) {
            let mut ledger = test_ledger();
            let mut added = Vec::new();
            for p in &prices {
                let item = ledger.add_item(candidate("V", "2026-01-01", *p, 1.0));
                prop_assert_eq!(ledger.items()[0].id_typed(), item.id_typed());
                added.push(item.id_typed());
            }

            let listed: Vec<_> = ledger.items().iter().map(SupplyLineItem::id_typed).collect();
            added.reverse();
            prop_assert_eq!(listed, added);
        }

        /// Property: stored amounts are never negative, whatever text arrives.
        #[test]
        fn amounts_are_never_negative(qty in ".{0,12}", price in any::<f64>()) {
            let mut ledger = test_ledger();
            let item = ledger.add_item(LineItemCandidate {
                quantity: NumericInput::Text(qty),
                total_price: NumericInput::Number(price),
                ..Default::default()
            });
            prop_assert!(item.quantity() >= 0.0 && item.quantity().is_finite());
            prop_assert!(item.total_price() >= 0.0 && item.total_price().is_finite());
        }

        /// Property: total cost equals the sum of stored line totals and the
        /// average never exceeds the largest per-line unit cost.
        #[test]
        fn aggregates_match_line_totals(
            lines in prop::collection::vec((0.0f64..500.0, 0.0f64..50.0), 0..30)
        ) {
            let mut ledger = test_ledger();
            for (price, qty) in &lines {
                ledger.add_item(candidate("V", "2026-01-01", *price, *qty));
            }

            let agg = ledger.compute_aggregates();
            let expected: f64 = ledger.items().iter().map(SupplyLineItem::total_price).sum();
            prop_assert!((agg.total_cost - expected).abs() < 1e-6);
            prop_assert_eq!(agg.item_count, lines.len());

            let max_unit = ledger.items().iter().map(SupplyLineItem::unit_cost).fold(0.0, f64::max);
            prop_assert!(agg.avg_cost_per_unit <= max_unit + 1e-9);
            prop_assert_eq!(agg.unique_receipt_count, usize::from(!lines.is_empty()));
        }
    }
}
