use crate::{
    attr::{AttrType, AttrValue, TypeRef, ValueRef, check_element_types},
    error::ConversionError,
    raw::{RawType, RawValue},
    types::ValueState,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// MapType
///
/// String-keyed collection whose values all share one type.
///

#[derive(Clone, Debug)]
pub struct MapType {
    elem: TypeRef,
}

impl MapType {
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

impl PartialEq for MapType {
    fn eq(&self, other: &Self) -> bool {
        self.elem.equal(&*other.elem)
    }
}

impl AttrType for MapType {
    fn raw_type(&self) -> RawType {
        RawType::map(self.elem.raw_type())
    }

    fn value_from_raw(&self, raw: &RawValue) -> Result<ValueRef, ConversionError> {
        let state = match raw {
            RawValue::Null => ValueState::Null,
            RawValue::Unknown => ValueState::Unknown,
            RawValue::Map(entries) => ValueState::Known(
                entries
                    .iter()
                    .map(|(key, item)| {
                        Ok((key.clone(), self.elem.value_from_raw(item)?))
                    })
                    .collect::<Result<BTreeMap<_, _>, ConversionError>>()?,
            ),
            other => {
                return Err(ConversionError::UnexpectedShape {
                    type_name: "MapType",
                    found: other.kind(),
                });
            }
        };

        Ok(Box::new(MapValue {
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
/// MapValue
///

#[derive(Clone, Debug)]
pub struct MapValue {
    elem_type: TypeRef,
    state: ValueState<BTreeMap<String, ValueRef>>,
}

impl MapValue {
    pub fn new(
        elem_type: TypeRef,
        entries: BTreeMap<String, ValueRef>,
    ) -> Result<Self, ConversionError> {
        check_element_types(&*elem_type, entries.values())?;

        Ok(Self {
            elem_type,
            state: ValueState::Known(entries),
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
    pub const fn entries(&self) -> Option<&BTreeMap<String, ValueRef>> {
        self.state.known()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ValueRef> {
        self.entries()?.get(key)
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.elem_type.equal(&*other.elem_type) && self.state == other.state
    }
}

impl AttrValue for MapValue {
    fn attr_type(&self) -> TypeRef {
        Arc::new(MapType::new(self.elem_type.clone()))
    }

    fn to_raw(&self) -> Result<RawValue, ConversionError> {
        Ok(match &self.state {
            ValueState::Null => RawValue::Null,
            ValueState::Unknown => RawValue::Unknown,
            ValueState::Known(entries) => RawValue::Map(
                entries
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), item.to_raw()?)))
                    .collect::<Result<_, ConversionError>>()?,
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
