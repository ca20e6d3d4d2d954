use crate::{
    attr::AttrType,
    context::Context,
    diag::{Diagnostic, Diagnostics},
    error::RawShapeError,
    options::Options,
    path::Path,
    raw::RawValue,
    reflect::{
        Walk,
        bind::{AttrTarget, Bind, ListTarget, MapTarget, Structure, Target},
        hooks::Hooked,
        meta::struct_meta,
        report::{
            binding_config, hook_error, incompatible_type, validate_value_error,
            value_from_raw_error, wrong_value_type,
        },
    },
};
use tracing::debug;

/// Populate `target` from `raw`, interpreted as a value of `typ` located at
/// `path`. The target may be partially populated when errors are reported.
pub fn into(
    ctx: &Context,
    typ: &dyn AttrType,
    raw: &RawValue,
    target: &mut dyn Bind,
    opts: Options,
    path: &Path,
) -> Diagnostics {
    debug!(
        %path,
        target = target.native_name(),
        "converting into native value"
    );

    let mut diags = Diagnostics::new();
    Walk::new(ctx, opts).build_value(typ, raw, target, path, &mut diags);

    debug!(
        %path,
        errors = diags.error_count(),
        warnings = diags.warning_count(),
        "converted into native value"
    );

    diags
}

/// [`into`] at the root path.
pub fn into_native(
    ctx: &Context,
    typ: &dyn AttrType,
    raw: &RawValue,
    target: &mut dyn Bind,
    opts: Options,
) -> Diagnostics {
    into(ctx, typ, raw, target, opts, &Path::root())
}

impl Walk<'_> {
    fn build_value(
        &mut self,
        typ: &dyn AttrType,
        raw: &RawValue,
        target: &mut dyn Bind,
        path: &Path,
        diags: &mut Diagnostics,
    ) {
        if self.interrupted(diags) {
            return;
        }

        let name = target.native_name();
        let view = target.target();

        // attribute values and hooks take the whole subtree at once
        let whole = matches!(view, Target::Attr(_) | Target::Hooked(_));
        if !check_shape(typ, raw, whole, path, diags) {
            return;
        }

        match view {
            // attribute values and hooks see null and unknown themselves
            Target::Attr(slot) => self.into_attr(typ, raw, slot, path, diags),
            Target::Hooked(hooked) => self.into_hooked(raw, hooked, name, path, diags),

            view if raw.is_unknown() => {
                if self.opts.unhandled_unknown_as_empty {
                    reset(view);
                } else {
                    diags.push(incompatible_type(
                        path,
                        "unknown",
                        name,
                        "unhandled unknown value",
                    ));
                }
            }
            Target::Optional(slot) if raw.is_null() => slot.set_none(),
            view if raw.is_null() => {
                if self.opts.unhandled_null_as_empty {
                    reset(view);
                } else {
                    diags.push(incompatible_type(
                        path,
                        "null",
                        name,
                        "unhandled null value",
                    ));
                }
            }

            Target::Bool(slot) => match raw {
                RawValue::Bool(v) => *slot = *v,
                other => diags.push(expected(path, other, name, "a bool")),
            },
            Target::String(slot) => match raw {
                RawValue::String(v) => slot.clone_from(v),
                other => diags.push(expected(path, other, name, "a string")),
            },
            Target::Number(slot) => match raw {
                RawValue::Number(v) => {
                    if let Err(err) = slot.set_number(*v, self.opts.allow_rounding_numbers) {
                        diags.push(incompatible_type(path, "number", name, err));
                    }
                }
                other => diags.push(expected(path, other, name, "a number")),
            },
            Target::Optional(slot) => {
                self.build_value(typ, raw, slot.insert_default(), path, diags);
            }
            Target::Struct(structure) => self.into_struct(typ, raw, structure, name, path, diags),
            Target::List(list) => self.into_list(typ, raw, list, name, path, diags),
            Target::Map(map) => self.into_map(typ, raw, map, name, path, diags),
        }
    }

    fn into_attr(
        &self,
        typ: &dyn AttrType,
        raw: &RawValue,
        slot: &mut dyn AttrTarget,
        path: &Path,
        diags: &mut Diagnostics,
    ) {
        if !self.validate(typ, raw, path, diags) {
            return;
        }

        let value = match typ.value_from_raw(raw) {
            Ok(value) => value,
            Err(err) => {
                diags.push(value_from_raw_error(path, err));
                return;
            }
        };

        if !slot.set_value(&*value) {
            diags.push(wrong_value_type(
                path,
                value.type_name(),
                slot.expected_name(),
                typ,
            ));
        }
    }

    fn into_hooked(
        &self,
        raw: &RawValue,
        hooked: &mut dyn Hooked,
        name: &str,
        path: &Path,
        diags: &mut Diagnostics,
    ) {
        if let Some(converter) = hooked.value_converter() {
            if let Err(err) = converter.from_raw(raw.clone()) {
                diags.push(hook_error(path, "ValueConverter", name, err));
            }
            return;
        }

        if let Some(unknownable) = hooked.unknownable() {
            if let Err(err) = unknownable.set_unknown(raw.is_unknown()) {
                diags.push(hook_error(path, "Unknownable", name, err));
                return;
            }
            if raw.is_unknown() {
                return;
            }
        } else if raw.is_unknown() {
            if self.opts.unhandled_unknown_as_empty {
                hooked.reset();
            } else {
                diags.push(incompatible_type(
                    path,
                    "unknown",
                    name,
                    "unhandled unknown value",
                ));
            }
            return;
        }

        if let Some(nullable) = hooked.nullable() {
            if let Err(err) = nullable.set_null(raw.is_null()) {
                diags.push(hook_error(path, "Nullable", name, err));
                return;
            }
            if raw.is_null() {
                return;
            }
        } else if raw.is_null() {
            if self.opts.unhandled_null_as_empty {
                hooked.reset();
            } else {
                diags.push(incompatible_type(
                    path,
                    "null",
                    name,
                    "unhandled null value",
                ));
            }
            return;
        }

        let result = if let Some(nullable) = hooked.nullable() {
            nullable.set_value(raw.clone())
        } else if let Some(unknownable) = hooked.unknownable() {
            unknownable.set_value(raw.clone())
        } else {
            diags.push(binding_config(
                path,
                name,
                "the type declares capability hooks but implements none of them",
            ));
            return;
        };

        if let Err(err) = result {
            diags.push(hook_error(path, "value setter", name, err));
        }
    }

    fn into_struct(
        &mut self,
        typ: &dyn AttrType,
        raw: &RawValue,
        structure: &mut dyn Structure,
        name: &str,
        path: &Path,
        diags: &mut Diagnostics,
    ) {
        let RawValue::Object(attrs) = raw else {
            diags.push(expected(path, raw, name, "an object"));
            return;
        };
        let Some(attr_types) = typ.attribute_types() else {
            diags.push(incompatible_type(
                path,
                "object",
                name,
                format!("{typ:?} does not declare attribute types"),
            ));
            return;
        };

        let entry = struct_meta(&*structure);
        let meta = match &*entry {
            Ok(meta) => meta,
            Err(err) => {
                diags.push(binding_config(&err.path(path), name, err));
                return;
            }
        };
        if let Some(mismatch) = self.unmatched(meta, attr_types) {
            diags.push(binding_config(path, name, mismatch));
            return;
        }

        for slot in meta.slots() {
            let field_path = path.with_attribute_name(slot.tag);
            let (Some(attr_type), Some(attr_raw)) = (attr_types.get(slot.tag), attrs.get(slot.tag))
            else {
                let err = RawShapeError::MissingAttribute {
                    path: Path::root(),
                    name: slot.tag.to_string(),
                };
                diags.push(validate_value_error(path, err));
                continue;
            };
            let Some(field) = structure.field_mut(slot.index) else {
                diags.push(binding_config(
                    &field_path,
                    name,
                    format!("no accessor for field `{}`", slot.field),
                ));
                continue;
            };

            self.build_value(&**attr_type, attr_raw, field, &field_path, diags);
        }
    }

    fn into_list(
        &mut self,
        typ: &dyn AttrType,
        raw: &RawValue,
        list: &mut dyn ListTarget,
        name: &str,
        path: &Path,
        diags: &mut Diagnostics,
    ) {
        let RawValue::List(items) = raw else {
            diags.push(expected(path, raw, name, "a list"));
            return;
        };
        let Some(elem_type) = typ.element_type() else {
            diags.push(incompatible_type(
                path,
                "list",
                name,
                format!("{typ:?} does not declare an element type"),
            ));
            return;
        };

        list.clear();
        for (index, item) in items.iter().enumerate() {
            if self.interrupted(diags) {
                return;
            }

            let elem_path = path.with_element_index(index);
            self.build_value(&*elem_type, item, list.push_default(), &elem_path, diags);
        }
    }

    fn into_map(
        &mut self,
        typ: &dyn AttrType,
        raw: &RawValue,
        map: &mut dyn MapTarget,
        name: &str,
        path: &Path,
        diags: &mut Diagnostics,
    ) {
        let RawValue::Map(entries) = raw else {
            diags.push(expected(path, raw, name, "a map"));
            return;
        };
        if !map.string_keyed() {
            diags.push(incompatible_type(
                path,
                "map",
                name,
                format!("map keys must be strings, not {}", map.key_type_name()),
            ));
            return;
        }
        let Some(elem_type) = typ.element_type() else {
            diags.push(incompatible_type(
                path,
                "map",
                name,
                format!("{typ:?} does not declare an element type"),
            ));
            return;
        };

        map.clear();
        for (key, item) in entries {
            if self.interrupted(diags) {
                return;
            }

            let elem_path = path.with_element_key(key);
            let Some(slot) = map.insert_default(key) else {
                diags.push(incompatible_type(
                    &elem_path,
                    "string",
                    map.key_type_name(),
                    "map key cannot be built from a string",
                ));
                continue;
            };
            self.build_value(&*elem_type, item, slot, &elem_path, diags);
        }
    }
}

/// Check `raw` against the shape of `typ`, either just this level or the
/// whole subtree. A mismatch is reported at the offending position.
fn check_shape(
    typ: &dyn AttrType,
    raw: &RawValue,
    whole: bool,
    path: &Path,
    diags: &mut Diagnostics,
) -> bool {
    let raw_type = typ.raw_type();
    let result = if whole {
        raw_type.validate(raw)
    } else {
        raw_type.validate_shallow(raw)
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            diags.push(validate_value_error(&path.join(err.path()), &err));
            false
        }
    }
}

fn expected(path: &Path, raw: &RawValue, name: &str, what: &str) -> Diagnostic {
    incompatible_type(
        path,
        raw.kind(),
        name,
        format!("expected {what}, got {}", raw.kind()),
    )
}

/// Return the target to its empty state.
fn reset(view: Target<'_>) {
    match view {
        Target::Bool(slot) => *slot = false,
        Target::String(slot) => slot.clear(),
        Target::Number(slot) => slot.reset(),
        Target::Optional(slot) => slot.set_none(),
        Target::Struct(structure) => {
            for index in 0..structure.field_decls().len() {
                if let Some(field) = structure.field_mut(index) {
                    reset(field.target());
                }
            }
        }
        Target::List(list) => list.clear(),
        Target::Map(map) => map.clear(),
        Target::Hooked(hooked) => hooked.reset(),
        Target::Attr(slot) => slot.reset(),
    }
}
