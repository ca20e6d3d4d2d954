use crate::{
    attr::{AttrType, AttrValue, TypeRef, ValueRef},
    error::ConversionError,
    raw::{Number, RawType, RawValue},
    types::ValueState,
};
use std::sync::Arc;

// scalar_type
macro_rules! scalar_type {
    ( $( $type:ident => $value:ident($native:ty, $variant:ident) ),* $(,)? ) => {
        $(
            #[doc = concat!("Primitive ", stringify!($variant), " type.")]
            #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
            pub struct $type;

            impl AttrType for $type {
                fn raw_type(&self) -> RawType {
                    RawType::$variant
                }

                fn value_from_raw(&self, raw: &RawValue) -> Result<ValueRef, ConversionError> {
                    let state = match raw {
                        RawValue::Null => ValueState::Null,
                        RawValue::Unknown => ValueState::Unknown,
                        RawValue::$variant(v) => ValueState::Known(v.clone()),
                        other => {
                            return Err(ConversionError::UnexpectedShape {
                                type_name: stringify!($type),
                                found: other.kind(),
                            });
                        }
                    };

                    Ok(Box::new($value { state }))
                }

                fn equal(&self, other: &dyn AttrType) -> bool {
                    other.is::<Self>()
                }
            }

            #[doc = concat!("Value produced by [`", stringify!($type), "`].")]
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct $value {
                state: ValueState<$native>,
            }

            impl $value {
                pub fn new(value: impl Into<$native>) -> Self {
                    Self {
                        state: ValueState::Known(value.into()),
                    }
                }

                #[must_use]
                pub const fn null() -> Self {
                    Self {
                        state: ValueState::Null,
                    }
                }

                #[must_use]
                pub const fn unknown() -> Self {
                    Self {
                        state: ValueState::Unknown,
                    }
                }

                #[must_use]
                pub const fn state(&self) -> &ValueState<$native> {
                    &self.state
                }

                #[must_use]
                pub const fn value(&self) -> Option<&$native> {
                    self.state.known()
                }
            }

            impl AttrValue for $value {
                fn attr_type(&self) -> TypeRef {
                    Arc::new($type)
                }

                fn to_raw(&self) -> Result<RawValue, ConversionError> {
                    Ok(match &self.state {
                        ValueState::Null => RawValue::Null,
                        ValueState::Unknown => RawValue::Unknown,
                        ValueState::Known(v) => RawValue::$variant(v.clone()),
                    })
                }

                fn equal(&self, other: &dyn AttrValue) -> bool {
                    other.downcast_ref::<Self>() == Some(self)
                }

                fn is_null(&self) -> bool {
                    self.state.is_null()
                }

                fn is_unknown(&self) -> bool {
                    self.state.is_unknown()
                }
            }
        )*
    };
}

scalar_type!(
    BoolType => BoolValue(bool, Bool),
    NumberType => NumberValue(Number, Number),
    StringType => StringValue(String, String),
);
