//! Built-in attribute types.

mod list;
mod map;
mod object;
mod scalar;

#[cfg(test)]
mod tests;

// re-exports
pub use list::{ListType, ListValue};
pub use map::{MapType, MapValue};
pub use object::{ObjectType, ObjectValue};
pub use scalar::{BoolType, BoolValue, NumberType, NumberValue, StringType, StringValue};

///
/// ValueState
///
/// Null, unknown, or known payload of a built-in value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ValueState<T> {
    Null,
    Unknown,
    Known(T),
}

impl<T> Default for ValueState<T> {
    fn default() -> Self {
        Self::Null
    }
}

impl<T> ValueState<T> {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    #[must_use]
    pub const fn known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            _ => None,
        }
    }
}
