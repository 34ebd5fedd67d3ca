//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two value
/// objects with the same attribute values are the same value. To "modify"
/// one, create a new one. Contrast with [`crate::Entity`], where identity
/// persists across state changes.
///
/// `Money::from_cents(100)` is a value object; a `Budget` with an id is an
/// entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
