//! Capability hooks a native leaf can opt into.
//!
//! The engine asks a [`Hooked`] leaf which hooks it supports and routes
//! null, unknown, and payload values accordingly.

use crate::{error::HookError, raw::RawValue};

///
/// ValueHolder
///
/// Payload accessors shared by [`Nullable`] and [`Unknownable`].
///

pub trait ValueHolder {
    fn get_value(&self) -> RawValue;

    fn set_value(&mut self, value: RawValue) -> Result<(), HookError>;
}

///
/// Nullable
///

pub trait Nullable: ValueHolder {
    fn get_null(&self) -> bool;

    fn set_null(&mut self, null: bool) -> Result<(), HookError>;
}

///
/// Unknownable
///

pub trait Unknownable: ValueHolder {
    fn get_unknown(&self) -> bool;

    fn set_unknown(&mut self, unknown: bool) -> Result<(), HookError>;
}

///
/// ValueConverter
///
/// Full control over the raw value, including null and unknown.
///

pub trait ValueConverter {
    fn to_raw(&self) -> Result<RawValue, HookError>;

    fn from_raw(&mut self, raw: RawValue) -> Result<(), HookError>;
}

///
/// Hooked
///
/// Capability query for a leaf. Every hook defaults to "absent"; use
/// [`impl_hooked!`](crate::impl_hooked) to wire the ones a type implements.
///

pub trait Hooked {
    fn nullable(&mut self) -> Option<&mut dyn Nullable> {
        None
    }

    fn unknownable(&mut self) -> Option<&mut dyn Unknownable> {
        None
    }

    fn value_converter(&mut self) -> Option<&mut dyn ValueConverter> {
        None
    }

    fn nullable_ref(&self) -> Option<&dyn Nullable> {
        None
    }

    fn unknownable_ref(&self) -> Option<&dyn Unknownable> {
        None
    }

    fn value_converter_ref(&self) -> Option<&dyn ValueConverter> {
        None
    }

    /// Return the leaf to its empty state.
    fn reset(&mut self);
}

// impl_hooked
#[macro_export]
macro_rules! impl_hooked {
    (@hook nullable) => {
        fn nullable(&mut self) -> Option<&mut dyn $crate::reflect::Nullable> {
            Some(self)
        }

        fn nullable_ref(&self) -> Option<&dyn $crate::reflect::Nullable> {
            Some(self)
        }
    };
    (@hook unknownable) => {
        fn unknownable(&mut self) -> Option<&mut dyn $crate::reflect::Unknownable> {
            Some(self)
        }

        fn unknownable_ref(&self) -> Option<&dyn $crate::reflect::Unknownable> {
            Some(self)
        }
    };
    (@hook value_converter) => {
        fn value_converter(&mut self) -> Option<&mut dyn $crate::reflect::ValueConverter> {
            Some(self)
        }

        fn value_converter_ref(&self) -> Option<&dyn $crate::reflect::ValueConverter> {
            Some(self)
        }
    };
    ($type:ty => $($hook:ident),* $(,)?) => {
        impl $crate::reflect::Hooked for $type {
            $( $crate::impl_hooked!(@hook $hook); )*

            fn reset(&mut self) {
                *self = <Self as ::core::default::Default>::default();
            }
        }

        impl $crate::reflect::Bind for $type {
            fn target(&mut self) -> $crate::reflect::Target<'_> {
                $crate::reflect::Target::Hooked(self)
            }

            fn source(&self) -> $crate::reflect::Source<'_> {
                $crate::reflect::Source::Hooked(self)
            }
        }
    };
}
