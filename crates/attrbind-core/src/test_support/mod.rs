//! Attribute types and hook leaves shared by the unit tests.

mod hooks;
mod types;

pub(crate) use hooks::{Celsius, Faulty, MaybeString, NullOnly};
pub(crate) use types::{
    ValidatedString, ValidatedStringType, error_diagnostic, warning_diagnostic,
};
