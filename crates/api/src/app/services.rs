use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use wickbiz_core::{DomainResult, LineItemId};
use wickbiz_receipts::{ReceiptParser, StubRandomParser, UploadedFile};
use wickbiz_supplies::{IngestError, LedgerAggregates, LineItemCandidate, SupplyLedger, SupplyLineItem};

use crate::config::ApiConfig;

/// The single ledger session served by this process.
///
/// Every operation takes the lock, finishes its mutation, and releases it
/// before returning, so concurrent requests observe whole operations only.
/// The lock is never held across an `.await`.
pub struct AppServices {
    ledger: Mutex<SupplyLedger>,
    parser: Arc<dyn ReceiptParser>,
}

impl AppServices {
    pub fn new(ledger: SupplyLedger, parser: Arc<dyn ReceiptParser>) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            parser,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        let mut ledger = SupplyLedger::with_system_defaults();
        if config.seed_sample_data {
            ledger.seed_sample_data();
        }

        let parser = match config.stub_seed {
            Some(seed) => StubRandomParser::seeded(seed),
            None => StubRandomParser::new(),
        };

        tracing::info!(
            items = ledger.len(),
            parser = parser.name(),
            "supply ledger session ready"
        );
        Self::new(ledger, Arc::new(parser))
    }

    fn ledger(&self) -> MutexGuard<'_, SupplyLedger> {
        // The ledger never panics mid-mutation, so a poisoned lock still guards consistent data.
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<SupplyLineItem> {
        self.ledger().items().to_vec()
    }

    pub fn get(&self, id: LineItemId) -> DomainResult<SupplyLineItem> {
        self.ledger().require(id).cloned()
    }

    pub fn add(&self, candidate: LineItemCandidate) -> SupplyLineItem {
        self.ledger().add_item(candidate)
    }

    pub fn delete(&self, id: LineItemId) -> Option<SupplyLineItem> {
        self.ledger().delete_item(id)
    }

    pub fn ingest(&self, files: &[UploadedFile]) -> Result<Option<SupplyLineItem>, IngestError> {
        self.ledger().ingest_upload(files, self.parser.as_ref())
    }

    pub fn summary(&self) -> LedgerAggregates {
        self.ledger().compute_aggregates()
    }
}
