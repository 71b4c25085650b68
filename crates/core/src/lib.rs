//! `wickbiz-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and the small collaborator traits
//! (clock, id generation) that domain services receive by injection.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{IdGenerator, LineItemId, SequentialIds, UuidV7Ids};
pub use value_object::ValueObject;
