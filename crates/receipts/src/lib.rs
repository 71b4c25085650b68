//! Receipt parsing seam.
//!
//! Uploads arrive as opaque file blobs. A [`ReceiptParser`] turns a selection of
//! files into a single [`ParsedLine`] that the supply ledger then records. The
//! only parser shipped today is [`StubRandomParser`], which never reads file
//! contents; real extraction plugs in behind the same trait.

pub mod error;
pub mod parser;
pub mod stub;
pub mod upload;

pub use error::ReceiptError;
pub use parser::{ParsedLine, ReceiptParser};
pub use stub::StubRandomParser;
pub use upload::UploadedFile;
