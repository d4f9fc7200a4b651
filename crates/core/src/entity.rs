//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two records with the same identifier describe the same entity, even when
/// their other attributes differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `self` carries the given identifier.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
