//! Entity trait: identity that survives state changes.

/// Anything the catalog tracks by identity rather than by value.
///
/// A product keeps its id while its stock level and name change; two products
/// with the same id are the same catalog entry.
pub trait Entity {
    /// Strongly-typed identifier, printable for logs and messages.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
