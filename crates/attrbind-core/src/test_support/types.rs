use crate::{
    attr::{AttrType, AttrValue, TypeRef, TypeWithValidate, ValueRef},
    diag::{Diagnostic, DiagnosticClass, Diagnostics, Severity},
    error::ConversionError,
    path::Path,
    raw::{RawType, RawValue},
    reflect::{Bind, Source, Target},
    types::ValueState,
};
use std::sync::Arc;

///
/// ValidatedStringType
///
/// String type whose validator always reports one diagnostic of the
/// configured severity.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ValidatedStringType {
    severity: Severity,
}

impl ValidatedStringType {
    pub(crate) const ERROR: Self = Self {
        severity: Severity::Error,
    };
    pub(crate) const WARNING: Self = Self {
        severity: Severity::Warning,
    };
}

impl AttrType for ValidatedStringType {
    fn raw_type(&self) -> RawType {
        RawType::String
    }

    fn value_from_raw(&self, raw: &RawValue) -> Result<ValueRef, ConversionError> {
        let state = match raw {
            RawValue::Null => ValueState::Null,
            RawValue::Unknown => ValueState::Unknown,
            RawValue::String(v) => ValueState::Known(v.clone()),
            other => {
                return Err(ConversionError::UnexpectedShape {
                    type_name: "ValidatedStringType",
                    found: other.kind(),
                });
            }
        };

        Ok(Box::new(ValidatedString {
            state,
            created_by: *self,
        }))
    }

    fn equal(&self, other: &dyn AttrType) -> bool {
        other.downcast_ref::<Self>() == Some(self)
    }

    fn validator(&self) -> Option<&dyn TypeWithValidate> {
        Some(self)
    }
}

impl TypeWithValidate for ValidatedStringType {
    fn validate(&self, _: &RawValue, path: &Path) -> Diagnostics {
        let diag = match self.severity {
            Severity::Error => {
                Diagnostic::attribute_error(path.clone(), "Error Diagnostic", "This is an error.")
            }
            Severity::Warning => Diagnostic::attribute_warning(
                path.clone(),
                "Warning Diagnostic",
                "This is a warning.",
            ),
        };

        diag.into()
    }
}

/// The diagnostic the error-severity type reports, as the engine records it.
pub(crate) fn error_diagnostic(path: Path) -> Diagnostic {
    Diagnostic::attribute_error(path, "Error Diagnostic", "This is an error.")
        .with_class(DiagnosticClass::Validation)
}

pub(crate) fn warning_diagnostic(path: Path) -> Diagnostic {
    Diagnostic::attribute_warning(path, "Warning Diagnostic", "This is a warning.")
        .with_class(DiagnosticClass::Validation)
}

///
/// ValidatedString
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ValidatedString {
    pub(crate) state: ValueState<String>,
    pub(crate) created_by: ValidatedStringType,
}

impl ValidatedString {
    pub(crate) const fn null(created_by: ValidatedStringType) -> Self {
        Self {
            state: ValueState::Null,
            created_by,
        }
    }

    pub(crate) fn new(value: &str, created_by: ValidatedStringType) -> Self {
        Self {
            state: ValueState::Known(value.to_string()),
            created_by,
        }
    }
}

impl AttrValue for ValidatedString {
    fn attr_type(&self) -> TypeRef {
        Arc::new(self.created_by)
    }

    fn to_raw(&self) -> Result<RawValue, ConversionError> {
        Ok(match &self.state {
            ValueState::Null => RawValue::Null,
            ValueState::Unknown => RawValue::Unknown,
            ValueState::Known(v) => RawValue::from(v.as_str()),
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

impl Bind for ValidatedString {
    fn target(&mut self) -> Target<'_> {
        Target::Attr(self)
    }

    fn source(&self) -> Source<'_> {
        Source::Attr(self)
    }
}
