use crate::{
    attr::{AttrType, AttrValue, TypeRef, ValueRef, check_element_types},
    error::ConversionError,
    raw::{RawType, RawValue},
    types::ValueState,
};
use std::sync::Arc;

///
/// ListType
///
/// Ordered collection whose elements all share one type.
///

#[derive(Clone, Debug)]
pub struct ListType {
    elem: TypeRef,
}

impl ListType {
    #[must_use]
    pub const fn new(elem: TypeRef) -> Self {
        Self { elem }
    }

    #[must_use]
    pub fn of(elem: impl AttrType) -> Self {
        Self::new(Arc::new(elem))
    }

    #[must_use]
    pub const fn elem(&self) -> &TypeRef {
        &self.elem
    }
}

impl PartialEq for ListType {
    fn eq(&self, other: &Self) -> bool {
        self.elem.equal(&*other.elem)
    }
}

impl AttrType for ListType {
    fn raw_type(&self) -> RawType {
        RawType::list(self.elem.raw_type())
    }

    fn value_from_raw(&self, raw: &RawValue) -> Result<ValueRef, ConversionError> {
        let state = match raw {
            RawValue::Null => ValueState::Null,
            RawValue::Unknown => ValueState::Unknown,
            RawValue::List(items) => ValueState::Known(
                items
                    .iter()
                    .map(|item| self.elem.value_from_raw(item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            other => {
                return Err(ConversionError::UnexpectedShape {
                    type_name: "ListType",
                    found: other.kind(),
                });
            }
        };

        Ok(Box::new(ListValue {
            elem_type: self.elem.clone(),
            state,
        }))
    }

    fn equal(&self, other: &dyn AttrType) -> bool {
        other.downcast_ref::<Self>() == Some(self)
    }

    fn element_type(&self) -> Option<TypeRef> {
        Some(self.elem.clone())
    }
}

///
/// ListValue
///

#[derive(Clone, Debug)]
pub struct ListValue {
    elem_type: TypeRef,
    state: ValueState<Vec<ValueRef>>,
}

impl ListValue {
    /// Known list. Every element must have been produced by `elem_type`.
    pub fn new(elem_type: TypeRef, elements: Vec<ValueRef>) -> Result<Self, ConversionError> {
        check_element_types(&*elem_type, &elements)?;

        Ok(Self {
            elem_type,
            state: ValueState::Known(elements),
        })
    }

    #[must_use]
    pub const fn null(elem_type: TypeRef) -> Self {
        Self {
            elem_type,
            state: ValueState::Null,
        }
    }

    #[must_use]
    pub const fn unknown(elem_type: TypeRef) -> Self {
        Self {
            elem_type,
            state: ValueState::Unknown,
        }
    }

    #[must_use]
    pub const fn elem_type(&self) -> &TypeRef {
        &self.elem_type
    }

    #[must_use]
    pub fn elements(&self) -> Option<&[ValueRef]> {
        self.state.known().map(Vec::as_slice)
    }
}

impl PartialEq for ListValue {
    fn eq(&self, other: &Self) -> bool {
        self.elem_type.equal(&*other.elem_type) && self.state == other.state
    }
}

impl AttrValue for ListValue {
    fn attr_type(&self) -> TypeRef {
        Arc::new(ListType::new(self.elem_type.clone()))
    }

    fn to_raw(&self) -> Result<RawValue, ConversionError> {
        Ok(match &self.state {
            ValueState::Null => RawValue::Null,
            ValueState::Unknown => RawValue::Unknown,
            ValueState::Known(items) => RawValue::List(
                items
                    .iter()
                    .map(|item| item.to_raw())
                    .collect::<Result<_, _>>()?,
            ),
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
