use crate::{
    attr::{AttrValue, ValueRef},
    error::NumberError,
    raw::{Number, RawValue},
    reflect::{hooks::Hooked, meta::FieldDecl},
};
use std::any::TypeId;

///
/// Bind
///
/// A native value the engine can populate from, or read into, the
/// attribute model. Implementations only say which category they belong
/// to; the engine does the walking.
///

pub trait Bind {
    /// Mutable category view, used when converting into this value.
    fn target(&mut self) -> Target<'_>;

    /// Shared category view, used when converting from this value.
    fn source(&self) -> Source<'_>;

    /// Name of the native type, for diagnostics.
    fn native_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

///
/// Target
///

pub enum Target<'a> {
    Bool(&'a mut bool),
    String(&'a mut String),
    Number(&'a mut dyn NumberTarget),
    Optional(&'a mut dyn OptionalTarget),
    Struct(&'a mut dyn Structure),
    List(&'a mut dyn ListTarget),
    Map(&'a mut dyn MapTarget),
    Hooked(&'a mut dyn Hooked),
    Attr(&'a mut dyn AttrTarget),
}

///
/// Source
///

pub enum Source<'a> {
    Bool(bool),
    String(&'a str),
    Number(Number),
    Optional(Option<&'a dyn Bind>),
    Struct(&'a dyn Structure),
    List(Vec<&'a dyn Bind>),
    Map(MapSource<'a>),
    Hooked(&'a dyn Hooked),
    Attr(&'a dyn AttrValue),
}

///
/// MapSource
///
/// `entries` is `None` when the key type cannot be written as a string.
///

pub struct MapSource<'a> {
    pub key_type: &'static str,
    pub entries: Option<Vec<(&'a str, &'a dyn Bind)>>,
}

// ============================================================================
// Category traits
// ============================================================================

///
/// NumberTarget
///

pub trait NumberTarget {
    fn set_number(&mut self, value: Number, allow_rounding: bool) -> Result<(), NumberError>;

    fn reset(&mut self);
}

///
/// OptionalTarget
///

pub trait OptionalTarget {
    fn set_none(&mut self);

    /// Replace the contents with a default inner value and return it.
    fn insert_default(&mut self) -> &mut dyn Bind;
}

///
/// Structure
///
/// Native structure with named fields. Usually implemented by
/// `#[derive(Bind)]`.
///

pub trait Structure {
    /// Identity of the structure type, used to cache its metadata.
    fn meta_key(&self) -> TypeId;

    /// Every named field in declaration order, tagged or not.
    fn field_decls(&self) -> &'static [FieldDecl];

    /// Field at `index` into [`Structure::field_decls`]. `None` for
    /// excluded fields.
    fn field(&self, index: usize) -> Option<&dyn Bind>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Bind>;
}

///
/// ListTarget
///

pub trait ListTarget {
    fn clear(&mut self);

    /// Append a default element and return it.
    fn push_default(&mut self) -> &mut dyn Bind;
}

///
/// MapTarget
///

pub trait MapTarget {
    fn clear(&mut self);

    fn string_keyed(&self) -> bool;

    fn key_type_name(&self) -> &'static str;

    /// Insert a default value under `key` and return it. `None` when the
    /// key type cannot be built from a string.
    fn insert_default(&mut self, key: &str) -> Option<&mut dyn Bind>;
}

///
/// AttrTarget
///
/// Native slot that holds an attribute value as is.
///

pub trait AttrTarget {
    fn expected_name(&self) -> &'static str;

    /// Store `value` if it has the slot's concrete type. Returns `false`
    /// and leaves the slot untouched otherwise.
    fn set_value(&mut self, value: &dyn AttrValue) -> bool;

    /// Store the null value of the slot's own type.
    fn reset(&mut self);
}

impl<V: AttrValue + Clone> AttrTarget for V {
    fn expected_name(&self) -> &'static str {
        std::any::type_name::<V>()
    }

    fn set_value(&mut self, value: &dyn AttrValue) -> bool {
        match value.downcast_ref::<V>() {
            Some(value) => {
                self.clone_from(value);
                true
            }
            None => false,
        }
    }

    fn reset(&mut self) {
        let null: Option<ValueRef> = self.attr_type().value_from_raw(&RawValue::Null).ok();
        if let Some(null) = null {
            AttrTarget::set_value(self, &*null);
        }
    }
}

///
/// MapKey
///

pub trait MapKey: Sized + 'static {
    const STRING_KEYED: bool;

    fn from_key(key: &str) -> Option<Self>;

    fn as_key(&self) -> Option<&str>;
}

impl MapKey for String {
    const STRING_KEYED: bool = true;

    fn from_key(key: &str) -> Option<Self> {
        Some(key.to_string())
    }

    fn as_key(&self) -> Option<&str> {
        Some(self)
    }
}

// impl_map_key
macro_rules! impl_map_key {
    ($($type:ty),* $(,)?) => {
        $(
            impl MapKey for $type {
                const STRING_KEYED: bool = false;

                fn from_key(_: &str) -> Option<Self> {
                    None
                }

                fn as_key(&self) -> Option<&str> {
                    None
                }
            }
        )*
    };
}

impl_map_key!(bool, i8, i16, i32, i64, u8, u16, u32, u64);
