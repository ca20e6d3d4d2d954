use crate::{
    attr::AttrType,
    diag::{Diagnostic, DiagnosticClass, Severity},
    path::Path,
};
use std::fmt::Display;

const SUMMARY: &str = "Value Conversion Error";

const DEFECT: &str = "This is always a defect in the calling code, not a problem with the data. \
                      Please report the following to the developer:\n\n";

fn conversion_error(path: &Path, class: DiagnosticClass, detail: String) -> Diagnostic {
    Diagnostic::attribute_error(path.clone(), SUMMARY, detail).with_class(class)
}

/// A value of one kind cannot be converted into the other side.
pub(crate) fn incompatible_type(
    path: &Path,
    from: impl Display,
    into: impl Display,
    err: impl Display,
) -> Diagnostic {
    conversion_error(
        path,
        DiagnosticClass::ShapeMismatch,
        format!(
            "An unexpected error was encountered trying to convert {from} value into {into}. {DEFECT}{err}"
        ),
    )
}

/// The native structure cannot be bound at all.
pub(crate) fn binding_config(path: &Path, target: &str, err: impl Display) -> Diagnostic {
    conversion_error(
        path,
        DiagnosticClass::BindingConfig,
        format!(
            "An unexpected error was encountered trying to bind {target}. {DEFECT}{err}"
        ),
    )
}

pub(crate) fn value_from_raw_error(path: &Path, err: impl Display) -> Diagnostic {
    conversion_error(
        path,
        DiagnosticClass::ShapeMismatch,
        format!(
            "An unexpected error was encountered trying to build the attribute value. {DEFECT}{err}"
        ),
    )
}

pub(crate) fn validate_value_error(path: &Path, err: impl Display) -> Diagnostic {
    conversion_error(
        path,
        DiagnosticClass::ShapeMismatch,
        format!(
            "An unexpected error was encountered trying to validate the raw value shape. {DEFECT}{err}"
        ),
    )
}

pub(crate) fn to_raw_error(path: &Path, err: impl Display) -> Diagnostic {
    conversion_error(
        path,
        DiagnosticClass::ShapeMismatch,
        format!(
            "An unexpected error was encountered trying to convert the attribute value into a raw value. {DEFECT}{err}"
        ),
    )
}

/// A capability hook on the native leaf reported failure.
pub(crate) fn hook_error(path: &Path, hook: &str, target: &str, err: impl Display) -> Diagnostic {
    conversion_error(
        path,
        DiagnosticClass::Hook,
        format!(
            "An unexpected error was encountered calling the {hook} hook of {target}. {DEFECT}{err}"
        ),
    )
}

/// The schema type produced a value the native slot cannot hold.
pub(crate) fn wrong_value_type(
    path: &Path,
    produced: &str,
    target: &str,
    schema: &dyn AttrType,
) -> Diagnostic {
    conversion_error(
        path,
        DiagnosticClass::ValueTypeMismatch,
        format!(
            "An unexpected error was encountered trying to store an attribute value. {DEFECT}\
             Cannot use attribute value {target}, only {produced} is supported because {schema:?} is the type in the schema"
        ),
    )
}

/// A native slot holds an attribute value of a different type than the
/// schema declares.
pub(crate) fn foreign_value_type(
    path: &Path,
    value_type: &dyn AttrType,
    schema: &dyn AttrType,
) -> Diagnostic {
    conversion_error(
        path,
        DiagnosticClass::ValueTypeMismatch,
        format!(
            "An unexpected error was encountered trying to convert an attribute value. {DEFECT}\
             The value was produced by {value_type:?}, but {schema:?} is the type in the schema"
        ),
    )
}

/// Validation diagnostics keep their own class, or get the validation one.
pub(crate) fn classify_validation(diag: Diagnostic) -> Diagnostic {
    match diag.class() {
        Some(_) => diag,
        None => diag.with_class(DiagnosticClass::Validation),
    }
}

pub(crate) fn cancelled() -> Diagnostic {
    Diagnostic::new(
        Severity::Error,
        "Conversion Cancelled",
        "The conversion was cancelled before it completed. The result is incomplete.",
    )
    .with_class(DiagnosticClass::Cancelled)
}

/// `a`, `a and b`, `a, b, and c`.
pub(crate) fn english_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => (*one).to_string(),
        [a, b] => format!("{a} and {b}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    }
}
