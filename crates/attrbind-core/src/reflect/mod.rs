//! Reflection engine: binds attribute values to native Rust structures
//! and back.
//!
//! Both directions walk the schema type, the value tree, and the native
//! shape in lock-step. Failures are collected as path-qualified
//! diagnostics; an error stops the walk of its own subtree only.

mod bind;
mod from;
mod hooks;
mod impls;
mod into;
mod meta;
mod report;

#[cfg(test)]
mod tests;

use crate::{
    attr::{AttrType, TypeRef},
    context::Context,
    diag::Diagnostics,
    options::{Options, UnmatchedAttributes},
    path::Path,
    raw::RawValue,
};
use std::collections::BTreeMap;
use tracing::warn;

// re-exports
pub use bind::{
    AttrTarget, Bind, ListTarget, MapKey, MapSource, MapTarget, NumberTarget, OptionalTarget,
    Source, Structure, Target,
};
pub use from::{from_native, from_value, materialize};
pub use hooks::{Hooked, Nullable, Unknownable, ValueConverter, ValueHolder};
pub use into::{into, into_native};
pub use meta::{EXCLUDE_TAG, FieldDecl, FieldSlot, StructMeta, is_valid_tag, struct_meta};

///
/// Walk
///
/// State of one conversion pass.
///

struct Walk<'a> {
    ctx: &'a Context,
    opts: Options,
    cancel_reported: bool,
}

impl<'a> Walk<'a> {
    const fn new(ctx: &'a Context, opts: Options) -> Self {
        Self {
            ctx,
            opts,
            cancel_reported: false,
        }
    }

    /// True once the context is cancelled. The first call after
    /// cancellation records a single pass-level diagnostic.
    fn interrupted(&mut self, diags: &mut Diagnostics) -> bool {
        if !self.ctx.is_cancelled() {
            return false;
        }
        if !self.cancel_reported {
            self.cancel_reported = true;
            warn!("conversion cancelled, abandoning the remaining walk");
            diags.push(report::cancelled());
        }

        true
    }

    /// Run the type's validator, if it has one. Returns `false` when the
    /// validator reported an error.
    fn validate(
        &self,
        typ: &dyn AttrType,
        raw: &RawValue,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> bool {
        let Some(validator) = typ.validator() else {
            return true;
        };

        let found = validator.validate(raw, path);
        let ok = !found.has_error();
        diags.extend(found.into_iter().map(report::classify_validation));

        ok
    }

    /// Describe how the structure's tags disagree with the declared
    /// attributes, or `None` when they line up.
    fn unmatched(
        &self,
        meta: &StructMeta,
        attr_types: &BTreeMap<String, TypeRef>,
    ) -> Option<String> {
        let missing: Vec<&str> = meta
            .slots()
            .iter()
            .map(|slot| slot.tag)
            .filter(|tag| !attr_types.contains_key(*tag))
            .collect();
        let extra: Vec<&str> = match self.opts.unmatched_attributes {
            UnmatchedAttributes::Error => attr_types
                .keys()
                .map(String::as_str)
                .filter(|name| !meta.contains(name))
                .collect(),
            UnmatchedAttributes::Ignore => Vec::new(),
        };

        if missing.is_empty() && extra.is_empty() {
            return None;
        }

        let mut parts = Vec::new();
        if !missing.is_empty() {
            parts.push(format!(
                "the structure defines fields not found in the object: {}",
                report::english_list(&missing)
            ));
        }
        if !extra.is_empty() {
            parts.push(format!(
                "the object defines attributes not found in the structure: {}",
                report::english_list(&extra)
            ));
        }

        Some(format!(
            "mismatch between structure and object: {}",
            parts.join("; ")
        ))
    }
}
