use thiserror::Error;

/// Why a parser could not turn an upload into a line item.
///
/// Every variant is recoverable: the caller keeps its state and may retry with
/// other files.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("no files to parse")]
    NoFiles,

    #[error("could not read {file_name}: {reason}")]
    Unreadable { file_name: String, reason: String },

    #[error("unsupported format for {file_name} ({content_type})")]
    UnsupportedFormat {
        file_name: String,
        content_type: String,
    },
}
