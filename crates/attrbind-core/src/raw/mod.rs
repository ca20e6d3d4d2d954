//! Transport-neutral raw values and the type descriptors that validate them.

mod number;


use crate::{
    error::RawShapeError,
    path::{Path, PathStep},
};
use std::{collections::BTreeMap, fmt};

// re-exports
pub use number::Number;

///
/// RawValue
///
/// Dynamically-typed value exchanged at the system boundary. `Null` and
/// `Unknown` may appear at any position of the tree.
///

#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Null,
    /// Value not yet determined.
    Unknown,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Self>),
    /// String-keyed homogeneous collection.
    Map(BTreeMap<String, Self>),
    /// Fixed set of named attributes.
    Object(BTreeMap<String, Self>),
}

impl RawValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// True when no part of the tree is unknown.
    #[must_use]
    pub fn is_fully_known(&self) -> bool {
        match self {
            Self::Unknown => false,
            Self::List(items) => items.iter().all(Self::is_fully_known),
            Self::Map(entries) | Self::Object(entries) => {
                entries.values().all(Self::is_fully_known)
            }
            _ => true,
        }
    }

    /// Stable label of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Unknown => "unknown",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
        }
    }

    pub fn object<K, I>(attrs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(attrs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The child addressed by a single step.
    #[must_use]
    pub fn child(&self, step: &PathStep) -> Option<&Self> {
        match (self, step) {
            (Self::Object(attrs), PathStep::AttributeName(name)) => attrs.get(name),
            (Self::Map(entries), PathStep::ElementKey(key)) => entries.get(key),
            (Self::List(items), PathStep::ElementIndex(index)) => items.get(*index),
            _ => None,
        }
    }

    /// Follow `path` down the tree. Returns `None` when a step does not
    /// match the shape it is applied to or the child does not exist.
    #[must_use]
    pub fn walk(&self, path: &Path) -> Option<&Self> {
        path.steps()
            .iter()
            .try_fold(self, |value, step| value.child(step))
    }

    /// Mutable counterpart of [`RawValue::walk`].
    pub fn walk_mut(&mut self, path: &Path) -> Option<&mut Self> {
        path.steps()
            .iter()
            .try_fold(self, |value, step| match (value, step) {
                (Self::Object(attrs), PathStep::AttributeName(name)) => attrs.get_mut(name),
                (Self::Map(entries), PathStep::ElementKey(key)) => entries.get_mut(key),
                (Self::List(items), PathStep::ElementIndex(index)) => items.get_mut(*index),
                _ => None,
            })
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Number> for RawValue {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::Int(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(Number::Float(value))
    }
}

impl<T: Into<Self>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

///
/// RawType
///
/// Transport-neutral shape descriptor. `Dynamic` accepts any value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawType {
    Bool,
    Number,
    String,
    List(Box<Self>),
    Map(Box<Self>),
    Object(BTreeMap<String, Self>),
    Dynamic,
}

impl RawType {
    #[must_use]
    pub fn list(elem: Self) -> Self {
        Self::List(Box::new(elem))
    }

    #[must_use]
    pub fn map(elem: Self) -> Self {
        Self::Map(Box::new(elem))
    }

    pub fn object<K, I>(attrs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(attrs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check that `value` has this shape at every level.
    pub fn validate(&self, value: &RawValue) -> Result<(), RawShapeError> {
        self.validate_at(value, &Path::root())
    }

    /// Check the outermost level of `value` only: its kind and, for
    /// objects, its attribute names. Children are not visited.
    pub fn validate_shallow(&self, value: &RawValue) -> Result<(), RawShapeError> {
        self.validate_level(value, &Path::root())
    }

    fn validate_at(&self, value: &RawValue, path: &Path) -> Result<(), RawShapeError> {
        self.validate_level(value, path)?;

        match (self, value) {
            (Self::List(elem), RawValue::List(items)) => {
                for (index, item) in items.iter().enumerate() {
                    elem.validate_at(item, &path.with_element_index(index))?;
                }
            }
            (Self::Map(elem), RawValue::Map(entries)) => {
                for (key, item) in entries {
                    elem.validate_at(item, &path.with_element_key(key))?;
                }
            }
            (Self::Object(attr_types), RawValue::Object(attrs)) => {
                for (name, attr) in attrs {
                    if let Some(attr_type) = attr_types.get(name) {
                        attr_type.validate_at(attr, &path.with_attribute_name(name))?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn validate_level(&self, value: &RawValue, path: &Path) -> Result<(), RawShapeError> {
        match (self, value) {
            (_, RawValue::Null | RawValue::Unknown)
            | (Self::Dynamic, _)
            | (Self::Bool, RawValue::Bool(_))
            | (Self::Number, RawValue::Number(_))
            | (Self::String, RawValue::String(_))
            | (Self::List(_), RawValue::List(_))
            | (Self::Map(_), RawValue::Map(_)) => Ok(()),

            (Self::Object(attr_types), RawValue::Object(attrs)) => {
                if let Some(name) = attrs.keys().find(|name| !attr_types.contains_key(*name)) {
                    return Err(RawShapeError::UnexpectedAttribute {
                        path: path.clone(),
                        name: name.clone(),
                    });
                }
                if let Some(name) = attr_types.keys().find(|name| !attrs.contains_key(*name)) {
                    return Err(RawShapeError::MissingAttribute {
                        path: path.clone(),
                        name: name.clone(),
                    });
                }
                Ok(())
            }

            (expected, found) => Err(RawShapeError::Mismatch {
                path: path.clone(),
                expected: expected.clone(),
                found: found.kind(),
            }),
        }
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("Bool"),
            Self::Number => f.write_str("Number"),
            Self::String => f.write_str("String"),
            Self::Dynamic => f.write_str("Dynamic"),
            Self::List(elem) => write!(f, "List[{elem}]"),
            Self::Map(elem) => write!(f, "Map[{elem}]"),
            Self::Object(attrs) => {
                f.write_str("Object[")?;
                for (i, (name, attr)) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name:?}:{attr}")?;
                }
                f.write_str("]")
            }
        }
    }
}
