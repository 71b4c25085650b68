use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReceiptError;
use crate::upload::UploadedFile;

/// Fields a parser extracted from an upload.
///
/// Values are already numeric; the ledger still normalizes them (fallback
/// labels, non-negative amounts) on the way in. A `None` date means "use the
/// ledger's current date".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub vendor: String,
    pub date: Option<NaiveDate>,
    pub item: String,
    pub total_price: f64,
    pub quantity: f64,
    pub unit: String,
}

/// Capability that turns an upload into one line item.
///
/// Implementations must not be called with an empty selection; callers treat
/// an empty selection as "nothing to do".
pub trait ReceiptParser: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn parse(&self, files: &[UploadedFile]) -> Result<ParsedLine, ReceiptError>;
}
