//! Supply ledger domain module.
//!
//! Tracks candle-making supply purchases (wax, wicks, jars, fragrance oils) and
//! derives the cost figures shown on the dashboard. Pure domain logic: the
//! ledger is an owned session object with its clock and id source injected,
//! and no IO happens here.

pub mod aggregates;
pub mod error;
pub mod item;
pub mod ledger;
pub mod sample;

pub use aggregates::{LedgerAggregates, ReceiptKey};
pub use error::IngestError;
pub use item::{LineItemCandidate, NumericInput, SupplyLineItem, Unit};
pub use ledger::SupplyLedger;
