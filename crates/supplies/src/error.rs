use thiserror::Error;

use wickbiz_receipts::ReceiptError;

/// Ingest failure; the ledger is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("receipt parser `{parser}` failed: {source}")]
    ParseFailed {
        parser: &'static str,
        #[source]
        source: ReceiptError,
    },
}
