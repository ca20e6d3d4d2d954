//! Schema-typed documents: a raw value paired with the type that
//! describes it.


use crate::{
    attr::{TypeRef, ValueRef, value_to_raw},
    context::Context,
    diag::{Diagnostic, DiagnosticClass, Diagnostics},
    options::Options,
    path::{Path, PathStep},
    raw::{RawType, RawValue},
    reflect::{self, Bind},
};

const LOOKUP_SUMMARY: &str = "Attribute Lookup Error";

///
/// Document
///
/// Owns its raw value; reads and writes go through the reflection engine
/// so every access is checked against the schema.
///

#[derive(Clone, Debug)]
pub struct Document {
    schema: TypeRef,
    raw: RawValue,
}

impl Document {
    #[must_use]
    pub const fn new(schema: TypeRef, raw: RawValue) -> Self {
        Self { schema, raw }
    }

    /// A document whose whole value is null.
    #[must_use]
    pub const fn null(schema: TypeRef) -> Self {
        Self::new(schema, RawValue::Null)
    }

    #[must_use]
    pub const fn schema(&self) -> &TypeRef {
        &self.schema
    }

    #[must_use]
    pub const fn raw(&self) -> &RawValue {
        &self.raw
    }

    /// Populate `target` from the whole document.
    pub fn get(&self, ctx: &Context, target: &mut dyn Bind, opts: Options) -> Diagnostics {
        reflect::into_native(ctx, &*self.schema, &self.raw, target, opts)
    }

    /// The attribute value at `path`. Attributes below a null or unknown
    /// value are themselves null or unknown.
    pub fn get_attribute(&self, ctx: &Context, path: &Path) -> (Option<ValueRef>, Diagnostics) {
        let Some(typ) = type_at_path(&self.schema, path) else {
            return (
                None,
                lookup_error(path, "the schema has no attribute at this path").into(),
            );
        };
        let Some(raw) = raw_at_path(&self.raw, path) else {
            return (
                None,
                lookup_error(path, "the value has no attribute at this path").into(),
            );
        };

        reflect::materialize(ctx, &*typ, raw, path)
    }

    /// Replace the whole document with the value read from `source`. The
    /// document is left untouched when an error is reported.
    pub fn set(&mut self, ctx: &Context, source: &dyn Bind, opts: Options) -> Diagnostics {
        self.set_attribute(ctx, &Path::root(), source, opts)
    }

    /// Replace the attribute at `path` with the value read from `source`.
    pub fn set_attribute(
        &mut self,
        ctx: &Context,
        path: &Path,
        source: &dyn Bind,
        opts: Options,
    ) -> Diagnostics {
        let Some(typ) = type_at_path(&self.schema, path) else {
            return lookup_error(path, "the schema has no attribute at this path").into();
        };

        let (value, mut diags) = reflect::from_value(ctx, &*typ, source, opts, path);
        let Some(value) = value.filter(|_| !diags.has_error()) else {
            return diags;
        };
        let raw = match value_to_raw(&*value) {
            Ok(raw) => raw,
            Err(err) => {
                diags.push(lookup_error(path, err));
                return diags;
            }
        };

        match self.raw.walk_mut(path) {
            Some(slot) => *slot = raw,
            None => diags.push(lookup_error(
                path,
                "the attribute cannot be set, its parent is null, unknown, or missing",
            )),
        }

        diags
    }
}

fn lookup_error(path: &Path, detail: impl ToString) -> Diagnostic {
    Diagnostic::attribute_error(path.clone(), LOOKUP_SUMMARY, detail.to_string())
        .with_class(DiagnosticClass::BindingConfig)
}

/// Type of the value at `path` below `root`.
#[must_use]
pub fn type_at_path(root: &TypeRef, path: &Path) -> Option<TypeRef> {
    path.steps()
        .iter()
        .try_fold(root.clone(), |typ, step| match step {
            PathStep::AttributeName(name) => typ.attribute_type(name),
            PathStep::ElementIndex(_) if matches!(typ.raw_type(), RawType::List(_)) => {
                typ.element_type()
            }
            PathStep::ElementKey(_) if matches!(typ.raw_type(), RawType::Map(_)) => {
                typ.element_type()
            }
            PathStep::ElementIndex(_) | PathStep::ElementKey(_) => None,
        })
}

// Null and unknown propagate to everything below them.
fn raw_at_path(root: &RawValue, path: &Path) -> Option<RawValue> {
    let mut current = root;

    for step in path.steps() {
        if current.is_null() || current.is_unknown() {
            break;
        }
        current = current.child(step)?;
    }

    Some(current.clone())
}
