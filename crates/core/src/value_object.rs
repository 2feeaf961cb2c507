//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable**, **self-validating** and **compared by
/// value**. Constructors are the only way in: a value object either validates
/// completely or is never created, so holding one is proof the input was
/// well-formed.
///
/// ```ignore
/// let a = Title::new("Home")?;
/// let b = Title::new("Home")?;
/// assert_eq!(a, b);  // Equal by value, not identity
/// ```
pub trait ValueObject: Clone + PartialEq + Eq + core::hash::Hash + core::fmt::Debug {}
