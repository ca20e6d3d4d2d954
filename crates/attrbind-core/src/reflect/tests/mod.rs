
use crate::{
    attr::{AttrType, ValueRef},
    context::Context,
    diag::{Diagnostic, DiagnosticClass, Diagnostics},
    options::Options,
    path::Path,
    raw::RawValue,
    reflect::{Bind, from_native, into_native},
};

fn ctx() -> Context {
    Context::background()
}

/// Into-native at the root with default options.
fn into_default(typ: &dyn AttrType, raw: &RawValue, target: &mut dyn Bind) -> Diagnostics {
    into_native(&ctx(), typ, raw, target, Options::default())
}

/// From-native at the root with default options.
fn from_default(typ: &dyn AttrType, source: &dyn Bind) -> (Option<ValueRef>, Diagnostics) {
    from_native(&ctx(), typ, source, Options::default())
}

fn attr(name: &str) -> Path {
    Path::root().with_attribute_name(name)
}

/// The single diagnostic of `diags`, which must be an error.
#[track_caller]
fn sole_error(diags: &Diagnostics) -> &Diagnostic {
    assert_eq!(diags.len(), 1, "expected one diagnostic: {diags:#?}");
    assert!(diags[0].is_error(), "expected an error: {diags:#?}");

    &diags[0]
}

#[track_caller]
fn assert_error_at(diags: &Diagnostics, path: &Path, class: DiagnosticClass, needle: &str) {
    let diag = sole_error(diags);

    assert_eq!(diag.path(), Some(path));
    assert_eq!(diag.class(), Some(class));
    assert!(
        diag.detail().contains(needle),
        "detail {:?} does not mention {needle:?}",
        diag.detail()
    );
}
