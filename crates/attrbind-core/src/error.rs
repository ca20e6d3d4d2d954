use crate::{
    path::Path,
    raw::{Number, RawType},
};
use thiserror::Error as ThisError;

///
/// NumberError
///
/// A transport number that does not fit its native numeric target.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NumberError {
    #[error("value {value} does not fit in {target}")]
    OutOfRange {
        value: String,
        target: &'static str,
    },

    #[error("value {value} has a fractional part and cannot be stored in {target}")]
    Fractional {
        value: String,
        target: &'static str,
    },

    #[error("value {value} cannot be represented exactly as {target}")]
    PrecisionLoss {
        value: String,
        target: &'static str,
    },
}

impl NumberError {
    pub(crate) fn out_of_range(value: Number, target: &'static str) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            target,
        }
    }
}

///
/// RawShapeError
///
/// A raw value that does not satisfy a raw type descriptor. `path` is
/// relative to the value that was validated.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RawShapeError {
    #[error("{found} value is not compatible with {expected}{}", at(.path))]
    Mismatch {
        path: Path,
        expected: RawType,
        found: &'static str,
    },

    #[error("object is missing attribute {name:?}{}", at(.path))]
    MissingAttribute { path: Path, name: String },

    #[error("object has unexpected attribute {name:?}{}", at(.path))]
    UnexpectedAttribute { path: Path, name: String },
}

impl RawShapeError {
    #[must_use]
    pub const fn path(&self) -> &Path {
        match self {
            Self::Mismatch { path, .. }
            | Self::MissingAttribute { path, .. }
            | Self::UnexpectedAttribute { path, .. } => path,
        }
    }
}

fn at(path: &Path) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at {path}")
    }
}

///
/// ConversionError
///
/// Failure to build an attribute value from a raw value, or to render one.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConversionError {
    #[error("can't build {type_name} from {found} value")]
    UnexpectedShape {
        type_name: &'static str,
        found: &'static str,
    },

    #[error("element type mismatch: expected {expected}, got {found}")]
    ElementType { expected: String, found: String },

    #[error(transparent)]
    Shape(#[from] RawShapeError),

    #[error("{0}")]
    Custom(String),
}

impl ConversionError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

///
/// TagError
///
/// A structure whose field tags cannot be bound. Raised once per structure
/// type, before any value is processed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TagError {
    #[error("need an `attr` tag on field `{field}`")]
    Missing { field: &'static str },

    #[error(
        "invalid field name {tag:?} on field `{field}`, must only use lowercase letters, underscores, and numbers, and must start with a letter"
    )]
    Invalid {
        field: &'static str,
        tag: &'static str,
    },

    #[error("can't use field name {tag:?} for both `{first}` and `{second}`")]
    Duplicate {
        tag: &'static str,
        first: &'static str,
        second: &'static str,
    },
}

impl TagError {
    /// Location of the offending tag under the structure at `base`.
    #[must_use]
    pub fn path(&self, base: &Path) -> Path {
        match self {
            Self::Missing { .. } => base.clone(),
            Self::Invalid { tag, .. } | Self::Duplicate { tag, .. } => {
                base.with_attribute_name(*tag)
            }
        }
    }
}

///
/// HookError
///
/// Failure reported by a capability hook implementation.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct HookError {
    pub message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
