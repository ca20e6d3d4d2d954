use crate::{
    attr::{AttrType, AttrValue, TypeRef, ValueRef, check_element_types},
    error::{ConversionError, RawShapeError},
    path::Path,
    raw::{RawType, RawValue},
    types::ValueState,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// ObjectType
///
/// Fixed set of named attributes, each with its own type.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectType {
    attrs: BTreeMap<String, TypeRef>,
}

impl ObjectType {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attrs: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(self, name: impl Into<String>, typ: impl AttrType) -> Self {
        self.with_attribute_type(name, Arc::new(typ))
    }

    #[must_use]
    pub fn with_attribute_type(mut self, name: impl Into<String>, typ: TypeRef) -> Self {
        self.attrs.insert(name.into(), typ);
        self
    }

    #[must_use]
    pub const fn attrs(&self) -> &BTreeMap<String, TypeRef> {
        &self.attrs
    }
}

impl FromIterator<(String, TypeRef)> for ObjectType {
    fn from_iter<I: IntoIterator<Item = (String, TypeRef)>>(iter: I) -> Self {
        Self {
            attrs: iter.into_iter().collect(),
        }
    }
}

impl AttrType for ObjectType {
    fn raw_type(&self) -> RawType {
        RawType::Object(
            self.attrs
                .iter()
                .map(|(name, typ)| (name.clone(), typ.raw_type()))
                .collect(),
        )
    }

    fn value_from_raw(&self, raw: &RawValue) -> Result<ValueRef, ConversionError> {
        let state = match raw {
            RawValue::Null => ValueState::Null,
            RawValue::Unknown => ValueState::Unknown,
            RawValue::Object(attrs) => ValueState::Known(self.build_attributes(attrs)?),
            other => {
                return Err(ConversionError::UnexpectedShape {
                    type_name: "ObjectType",
                    found: other.kind(),
                });
            }
        };

        Ok(Box::new(ObjectValue {
            attr_types: self.attrs.clone(),
            state,
        }))
    }

    fn equal(&self, other: &dyn AttrType) -> bool {
        other.downcast_ref::<Self>() == Some(self)
    }

    fn attribute_types(&self) -> Option<&BTreeMap<String, TypeRef>> {
        Some(&self.attrs)
    }
}

impl ObjectType {
    fn build_attributes(
        &self,
        raw: &BTreeMap<String, RawValue>,
    ) -> Result<BTreeMap<String, ValueRef>, ConversionError> {
        if let Some(name) = raw.keys().find(|name| !self.attrs.contains_key(*name)) {
            return Err(RawShapeError::UnexpectedAttribute {
                path: Path::root(),
                name: name.clone(),
            }
            .into());
        }

        self.attrs
            .iter()
            .map(|(name, typ)| -> Result<_, ConversionError> {
                let attr = raw
                    .get(name)
                    .ok_or_else(|| RawShapeError::MissingAttribute {
                        path: Path::root(),
                        name: name.clone(),
                    })?;

                Ok((name.clone(), typ.value_from_raw(attr)?))
            })
            .collect()
    }
}

///
/// ObjectValue
///

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    attr_types: BTreeMap<String, TypeRef>,
    state: ValueState<BTreeMap<String, ValueRef>>,
}

impl ObjectValue {
    /// Known object. `attrs` must cover exactly the attributes of `typ`,
    /// each produced by its declared type.
    pub fn new(
        typ: &ObjectType,
        attrs: BTreeMap<String, ValueRef>,
    ) -> Result<Self, ConversionError> {
        for (name, attr_type) in &typ.attrs {
            let Some(value) = attrs.get(name) else {
                return Err(RawShapeError::MissingAttribute {
                    path: Path::root(),
                    name: name.clone(),
                }
                .into());
            };
            check_element_types(&**attr_type, [value])?;
        }
        if let Some(name) = attrs.keys().find(|name| !typ.attrs.contains_key(*name)) {
            return Err(RawShapeError::UnexpectedAttribute {
                path: Path::root(),
                name: name.clone(),
            }
            .into());
        }

        Ok(Self {
            attr_types: typ.attrs.clone(),
            state: ValueState::Known(attrs),
        })
    }

    #[must_use]
    pub fn null(typ: &ObjectType) -> Self {
        Self {
            attr_types: typ.attrs.clone(),
            state: ValueState::Null,
        }
    }

    #[must_use]
    pub fn unknown(typ: &ObjectType) -> Self {
        Self {
            attr_types: typ.attrs.clone(),
            state: ValueState::Unknown,
        }
    }

    #[must_use]
    pub const fn attributes(&self) -> Option<&BTreeMap<String, ValueRef>> {
        self.state.known()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&ValueRef> {
        self.attributes()?.get(name)
    }
}

impl AttrValue for ObjectValue {
    fn attr_type(&self) -> TypeRef {
        Arc::new(ObjectType {
            attrs: self.attr_types.clone(),
        })
    }

    fn to_raw(&self) -> Result<RawValue, ConversionError> {
        Ok(match &self.state {
            ValueState::Null => RawValue::Null,
            ValueState::Unknown => RawValue::Unknown,
            ValueState::Known(attrs) => RawValue::Object(
                attrs
                    .iter()
                    .map(|(name, value)| Ok((name.clone(), value.to_raw()?)))
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
