//! Placeholder parser used until real receipt extraction exists.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ReceiptError;
use crate::parser::{ParsedLine, ReceiptParser};
use crate::upload::UploadedFile;

pub const STUB_VENDOR: &str = "Uploaded Vendor";
pub const STUB_ITEM: &str = "Parsed Supply Item";
pub const STUB_UNIT: &str = "oz";

/// Upper bound for generated prices, in cents.
const MAX_PRICE_CENTS: f64 = 5000.0;
const MAX_QUANTITY: f64 = 500.0;

/// Ignores file contents and fabricates one plausible-looking line.
///
/// Price is a whole number of cents in `[0, 50.00]`, quantity a whole number in
/// `[0, 500]`, unit `oz`, and the date is left for the ledger to fill in.
#[derive(Debug)]
pub struct StubRandomParser {
    rng: Mutex<StdRng>,
}

impl StubRandomParser {
    /// Parser seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic parser: equal seeds yield equal sequences of lines.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StubRandomParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for StubRandomParser {
    fn name(&self) -> &'static str {
        "stub-random"
    }

    fn parse(&self, files: &[UploadedFile]) -> Result<ParsedLine, ReceiptError> {
        if files.is_empty() {
            return Err(ReceiptError::NoFiles);
        }

        // A poisoned lock only means another parse panicked mid-draw; the RNG is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let price_draw: f64 = rng.r#gen();
        let quantity_draw: f64 = rng.r#gen();
        drop(rng);

        let line = ParsedLine {
            vendor: STUB_VENDOR.to_string(),
            date: None,
            item: STUB_ITEM.to_string(),
            total_price: (price_draw * MAX_PRICE_CENTS).round() / 100.0,
            quantity: (quantity_draw * MAX_QUANTITY).round(),
            unit: STUB_UNIT.to_string(),
        };

        tracing::debug!(
            files = files.len(),
            total_price = line.total_price,
            quantity = line.quantity,
            "stub parser fabricated receipt line"
        );

        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(name: &str) -> UploadedFile {
        UploadedFile::new(name, Some("image/png".to_string()), vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn fabricates_fixed_labels_and_no_date() {
        let parser = StubRandomParser::seeded(1);
        let line = parser.parse(&[receipt("a.png")]).unwrap();
        assert_eq!(line.vendor, "Uploaded Vendor");
        assert_eq!(line.item, "Parsed Supply Item");
        assert_eq!(line.unit, "oz");
        assert_eq!(line.date, None);
    }

    #[test]
    fn values_stay_within_bounds_and_precision() {
        let parser = StubRandomParser::seeded(42);
        for _ in 0..500 {
            let line = parser.parse(&[receipt("r.pdf")]).unwrap();
            assert!((0.0..=50.0).contains(&line.total_price));
            assert!((0.0..=500.0).contains(&line.quantity));
            assert_eq!(line.quantity.fract(), 0.0);
            let cents = line.total_price * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn equal_seeds_produce_equal_lines() {
        let a = StubRandomParser::seeded(9);
        let b = StubRandomParser::seeded(9);
        let files = [receipt("x.jpg")];
        for _ in 0..10 {
            assert_eq!(a.parse(&files).unwrap(), b.parse(&files).unwrap());
        }
    }

    #[test]
    fn content_is_ignored() {
        let a = StubRandomParser::seeded(3);
        let b = StubRandomParser::seeded(3);
        let one = a.parse(&[receipt("one.png")]).unwrap();
        let many = b
            .parse(&[
                UploadedFile::new("empty.pdf", None, Vec::new()),
                receipt("two.png"),
            ])
            .unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let parser = StubRandomParser::seeded(0);
        assert_eq!(parser.parse(&[]).unwrap_err(), ReceiptError::NoFiles);
    }
}
