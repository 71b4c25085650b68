//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances holding the same values are
/// the same value. In the supply ledger, a purchase unit (`oz`, `lb`, ...) or a
/// derived metrics snapshot is a value object, while a line item is an entity
/// (two purchases of the same wax on the same day are still two line items).
///
/// Value objects are immutable; to "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct ReceiptKey {
///     vendor: String,
///     date: NaiveDate,
/// }
///
/// impl ValueObject for ReceiptKey {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
