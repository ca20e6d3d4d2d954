//! The attribute value model: schema types and the values they produce.


use crate::{
    diag::Diagnostics,
    error::ConversionError,
    path::Path,
    raw::{RawType, RawValue},
};
use std::{any::Any, collections::BTreeMap, fmt::Debug, sync::Arc};

///
/// TypeRef
/// Shared handle to a schema type.
///

pub type TypeRef = Arc<dyn AttrType>;

///
/// ValueRef
/// Owned, cloneable handle to an attribute value.
///

pub type ValueRef = Box<dyn AttrValue>;

///
/// AsAny
///

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

///
/// AttrType
///
/// Structural descriptor of a family of attribute values. Optional
/// capabilities are exposed through the query methods, which default to
/// "not supported".
///

pub trait AttrType: AsAny + Debug + Send + Sync {
    /// Transport shape every raw value of this type must satisfy.
    fn raw_type(&self) -> RawType;

    /// Build a value of this type from a raw value.
    fn value_from_raw(&self, raw: &RawValue) -> Result<ValueRef, ConversionError>;

    /// Structural equality with another type.
    fn equal(&self, other: &dyn AttrType) -> bool;

    fn validator(&self) -> Option<&dyn TypeWithValidate> {
        None
    }

    /// Type of every element, for collection types.
    fn element_type(&self) -> Option<TypeRef> {
        None
    }

    /// Declared attributes, for object types.
    fn attribute_types(&self) -> Option<&BTreeMap<String, TypeRef>> {
        None
    }
}

impl dyn AttrType {
    #[must_use]
    pub fn is<T: AttrType>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: AttrType>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Type of the named attribute, for object types.
    #[must_use]
    pub fn attribute_type(&self, name: &str) -> Option<TypeRef> {
        self.attribute_types()?.get(name).cloned()
    }
}

impl PartialEq for dyn AttrType {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

///
/// TypeWithValidate
///
/// Semantic validation run against a raw value before it is materialized.
/// Error diagnostics stop materialization of that subtree; warnings do not.
///

pub trait TypeWithValidate {
    fn validate(&self, raw: &RawValue, path: &Path) -> Diagnostics;
}

///
/// CloneValue
///

pub trait CloneValue {
    fn clone_value(&self) -> ValueRef;
}

impl<T: AttrValue + Clone> CloneValue for T {
    fn clone_value(&self) -> ValueRef {
        Box::new(self.clone())
    }
}

///
/// AttrValue
///
/// Concrete instance of an attribute type. A value can be null, unknown,
/// or known; values of different types are never equal.
///

pub trait AttrValue: AsAny + CloneValue + Debug + Send + Sync {
    /// The type that produced this value.
    fn attr_type(&self) -> TypeRef;

    /// Render the value back into its transport form.
    fn to_raw(&self) -> Result<RawValue, ConversionError>;

    /// Semantic equality with another value.
    fn equal(&self, other: &dyn AttrValue) -> bool;

    fn is_null(&self) -> bool;

    fn is_unknown(&self) -> bool;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn AttrValue {
    #[must_use]
    pub fn is<V: AttrValue>(&self) -> bool {
        self.as_any().is::<V>()
    }

    #[must_use]
    pub fn downcast_ref<V: AttrValue>(&self) -> Option<&V> {
        self.as_any().downcast_ref()
    }
}

impl PartialEq for dyn AttrValue {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Clone for ValueRef {
    fn clone(&self) -> Self {
        (**self).clone_value()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Render `value` and check the rendering still satisfies the transport
/// shape of its own type.
pub fn value_to_raw(value: &dyn AttrValue) -> Result<RawValue, ConversionError> {
    let raw = value.to_raw()?;
    value.attr_type().raw_type().validate(&raw)?;

    Ok(raw)
}

/// Check that every value in `values` was produced by a type equal to
/// `expected`.
pub(crate) fn check_element_types<'a>(
    expected: &dyn AttrType,
    values: impl IntoIterator<Item = &'a ValueRef>,
) -> Result<(), ConversionError> {
    for value in values {
        let found = value.attr_type();
        if !expected.equal(&*found) {
            return Err(ConversionError::ElementType {
                expected: format!("{expected:?}"),
                found: format!("{found:?}"),
            });
        }
    }

    Ok(())
}
