//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two product
/// names with the same text are the same product. To "modify" one, build a
/// new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ProductName(String);
///
/// impl ValueObject for ProductName {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
