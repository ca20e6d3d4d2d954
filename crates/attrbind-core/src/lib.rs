//! Core runtime for attrbind: paths, diagnostics, raw transport values, the
//! attribute value model, and the reflection engine that binds them to
//! native Rust structures.
#![warn(unreachable_pub)]

extern crate self as attrbind;

// public exports are one module level down
pub mod attr;
pub mod context;
pub mod data;
pub mod diag;
pub mod error;
pub mod options;
pub mod path;
pub mod raw;
pub mod reflect;
pub mod types;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// Engine entry points and error types are reached through their modules.
///

pub mod prelude {
    pub use crate::{
        attr::{AttrType, AttrValue, TypeRef, ValueRef},
        context::Context,
        diag::{Diagnostic, Diagnostics, Severity},
        options::Options,
        path::{Path, PathStep},
        raw::{Number, RawType, RawValue},
        reflect::Bind,
    };
}
