//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values, so two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Constructors are the place to enforce their invariants
/// (e.g. a unit price is never negative), so holders never re-check them.
///
/// - **Value Object**: `UnitPrice(19.99)`; any two equal prices are interchangeable.
/// - **Entity**: `Product { id: "E-100", .. }`; same id means same product.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct UnitPrice(Decimal);
///
/// impl ValueObject for UnitPrice {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
