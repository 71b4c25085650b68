//! Entity trait: identity that outlives field values.

/// Something tracked by identity rather than by value.
///
/// Two supply lines with identical vendor, date and amounts are still two
/// purchases; lookups and deletes go through `id()`.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
