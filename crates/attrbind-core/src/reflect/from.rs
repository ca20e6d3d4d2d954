use crate::{
    attr::{AttrType, AttrValue, ValueRef, value_to_raw},
    context::Context,
    diag::Diagnostics,
    options::Options,
    path::Path,
    raw::RawValue,
    reflect::{
        Walk,
        bind::{Bind, MapSource, Source, Structure},
        hooks::Hooked,
        meta::struct_meta,
        report::{
            binding_config, foreign_value_type, hook_error, incompatible_type, to_raw_error,
            validate_value_error, value_from_raw_error,
        },
    },
};
use std::collections::BTreeMap;
use tracing::debug;

/// Build a value of `typ` from the native `source` located at `path`.
/// The value is `None` whenever an error was reported.
pub fn from_value(
    ctx: &Context,
    typ: &dyn AttrType,
    source: &dyn Bind,
    opts: Options,
    path: &Path,
) -> (Option<ValueRef>, Diagnostics) {
    debug!(
        %path,
        source = source.native_name(),
        "converting from native value"
    );

    let mut diags = Diagnostics::new();
    let value = Walk::new(ctx, opts).from_bind(typ, source, path, &mut diags);

    debug!(
        %path,
        errors = diags.error_count(),
        warnings = diags.warning_count(),
        "converted from native value"
    );

    (value, diags)
}

/// [`from_value`] at the root path.
pub fn from_native(
    ctx: &Context,
    typ: &dyn AttrType,
    source: &dyn Bind,
    opts: Options,
) -> (Option<ValueRef>, Diagnostics) {
    from_value(ctx, typ, source, opts, &Path::root())
}

/// Check `raw` against `typ` and build the value, with `path` as the
/// location reported by diagnostics.
pub fn materialize(
    ctx: &Context,
    typ: &dyn AttrType,
    raw: RawValue,
    path: &Path,
) -> (Option<ValueRef>, Diagnostics) {
    let mut diags = Diagnostics::new();
    let mut walk = Walk::new(ctx, Options::default());
    if walk.interrupted(&mut diags) {
        return (None, diags);
    }

    let value = walk.materialize(typ, raw, path, &mut diags);

    (value, diags)
}

impl Walk<'_> {
    fn from_bind(
        &mut self,
        typ: &dyn AttrType,
        source: &dyn Bind,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> Option<ValueRef> {
        if self.interrupted(diags) {
            return None;
        }

        let name = source.native_name();
        match source.source() {
            Source::Attr(value) => self.from_attr(typ, value, path, diags),
            Source::Hooked(hooked) => self.from_hooked(typ, hooked, name, path, diags),
            Source::Bool(v) => self.materialize(typ, RawValue::Bool(v), path, diags),
            Source::String(v) => self.materialize(typ, RawValue::from(v), path, diags),
            Source::Number(v) => self.materialize(typ, RawValue::Number(v), path, diags),
            Source::Optional(None) => self.materialize(typ, RawValue::Null, path, diags),
            Source::Optional(Some(inner)) => self.from_bind(typ, inner, path, diags),
            Source::Struct(structure) => self.from_struct(typ, structure, name, path, diags),
            Source::List(items) => self.from_list(typ, items, name, path, diags),
            Source::Map(map) => self.from_map(typ, map, name, path, diags),
        }
    }

    /// Shape check, then validator, then the type's constructor.
    fn materialize(
        &self,
        typ: &dyn AttrType,
        raw: RawValue,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> Option<ValueRef> {
        if let Err(err) = typ.raw_type().validate(&raw) {
            diags.push(validate_value_error(&path.join(err.path()), &err));
            return None;
        }
        if !self.validate(typ, &raw, path, diags) {
            return None;
        }

        match typ.value_from_raw(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                diags.push(value_from_raw_error(path, err));
                None
            }
        }
    }

    fn from_attr(
        &self,
        typ: &dyn AttrType,
        value: &dyn AttrValue,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> Option<ValueRef> {
        let value_type = value.attr_type();
        if !typ.equal(&*value_type) {
            diags.push(foreign_value_type(path, &*value_type, typ));
            return None;
        }

        if typ.validator().is_some() {
            let raw = match value.to_raw() {
                Ok(raw) => raw,
                Err(err) => {
                    diags.push(to_raw_error(path, err));
                    return None;
                }
            };
            if !self.validate(typ, &raw, path, diags) {
                return None;
            }
        }

        Some(value.clone_value())
    }

    fn from_hooked(
        &self,
        typ: &dyn AttrType,
        hooked: &dyn Hooked,
        name: &str,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> Option<ValueRef> {
        if let Some(converter) = hooked.value_converter_ref() {
            return match converter.to_raw() {
                Ok(raw) => self.materialize(typ, raw, path, diags),
                Err(err) => {
                    diags.push(hook_error(path, "ValueConverter", name, err));
                    None
                }
            };
        }

        let unknownable = hooked.unknownable_ref();
        let nullable = hooked.nullable_ref();

        let raw = if unknownable.is_some_and(|u| u.get_unknown()) {
            RawValue::Unknown
        } else if nullable.is_some_and(|n| n.get_null()) {
            RawValue::Null
        } else if let Some(nullable) = nullable {
            nullable.get_value()
        } else if let Some(unknownable) = unknownable {
            unknownable.get_value()
        } else {
            diags.push(binding_config(
                path,
                name,
                "the type declares capability hooks but implements none of them",
            ));
            return None;
        };

        self.materialize(typ, raw, path, diags)
    }

    fn from_struct(
        &mut self,
        typ: &dyn AttrType,
        structure: &dyn Structure,
        name: &str,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> Option<ValueRef> {
        let Some(attr_types) = typ.attribute_types() else {
            diags.push(incompatible_type(
                path,
                name,
                format!("{typ:?}"),
                "the type does not declare attribute types",
            ));
            return None;
        };

        let entry = struct_meta(structure);
        let meta = match &*entry {
            Ok(meta) => meta,
            Err(err) => {
                diags.push(binding_config(&err.path(path), name, err));
                return None;
            }
        };
        if let Some(mismatch) = self.unmatched(meta, attr_types) {
            diags.push(binding_config(path, name, mismatch));
            return None;
        }

        let mut attrs = BTreeMap::new();
        let mut failed = false;

        for slot in meta.slots() {
            let field_path = path.with_attribute_name(slot.tag);
            let Some(attr_type) = attr_types.get(slot.tag) else {
                continue;
            };
            let Some(field) = structure.field(slot.index) else {
                diags.push(binding_config(
                    &field_path,
                    name,
                    format!("no accessor for field `{}`", slot.field),
                ));
                failed = true;
                continue;
            };

            match self.render(&**attr_type, field, &field_path, diags) {
                Some(raw) => {
                    attrs.insert(slot.tag.to_string(), raw);
                }
                None => failed = true,
            }
        }
        if failed {
            return None;
        }

        // attributes no field claims are sent as null
        for attr in attr_types.keys() {
            attrs.entry(attr.clone()).or_insert(RawValue::Null);
        }

        self.materialize(typ, RawValue::Object(attrs), path, diags)
    }

    fn from_list(
        &mut self,
        typ: &dyn AttrType,
        items: Vec<&dyn Bind>,
        name: &str,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> Option<ValueRef> {
        let Some(elem_type) = typ.element_type() else {
            diags.push(incompatible_type(
                path,
                name,
                format!("{typ:?}"),
                "the type does not declare an element type",
            ));
            return None;
        };

        let mut raws = Vec::with_capacity(items.len());
        let mut failed = false;

        for (index, item) in items.into_iter().enumerate() {
            let elem_path = path.with_element_index(index);
            match self.render(&*elem_type, item, &elem_path, diags) {
                Some(raw) => raws.push(raw),
                None => failed = true,
            }
        }
        if failed {
            return None;
        }

        self.materialize(typ, RawValue::List(raws), path, diags)
    }

    fn from_map(
        &mut self,
        typ: &dyn AttrType,
        map: MapSource<'_>,
        name: &str,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> Option<ValueRef> {
        let Some(entries) = map.entries else {
            diags.push(incompatible_type(
                path,
                name,
                format!("{typ:?}"),
                format!("map keys must be strings, not {}", map.key_type),
            ));
            return None;
        };
        let Some(elem_type) = typ.element_type() else {
            diags.push(incompatible_type(
                path,
                name,
                format!("{typ:?}"),
                "the type does not declare an element type",
            ));
            return None;
        };

        let mut raws = BTreeMap::new();
        let mut failed = false;

        for (key, item) in entries {
            let elem_path = path.with_element_key(key);
            match self.render(&*elem_type, item, &elem_path, diags) {
                Some(raw) => {
                    raws.insert(key.to_string(), raw);
                }
                None => failed = true,
            }
        }
        if failed {
            return None;
        }

        self.materialize(typ, RawValue::Map(raws), path, diags)
    }

    /// Convert a child and render it back to a raw value for its parent.
    fn render(
        &mut self,
        typ: &dyn AttrType,
        source: &dyn Bind,
        path: &Path,
        diags: &mut Diagnostics,
    ) -> Option<RawValue> {
        let value = self.from_bind(typ, source, path, diags)?;

        match value_to_raw(&*value) {
            Ok(raw) => Some(raw),
            Err(err) => {
                diags.push(to_raw_error(path, err));
                None
            }
        }
    }
}
