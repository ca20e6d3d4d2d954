use crate::{
    error::NumberError,
    raw::Number,
    reflect::bind::{
        Bind, ListTarget, MapKey, MapSource, MapTarget, NumberTarget, OptionalTarget, Source,
        Target,
    },
    types::{BoolValue, ListValue, MapValue, NumberValue, ObjectValue, StringValue},
};
use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

// ============================================================================
// Scalars
// ============================================================================

impl Bind for bool {
    fn target(&mut self) -> Target<'_> {
        Target::Bool(self)
    }

    fn source(&self) -> Source<'_> {
        Source::Bool(*self)
    }
}

impl Bind for String {
    fn target(&mut self) -> Target<'_> {
        Target::String(self)
    }

    fn source(&self) -> Source<'_> {
        Source::String(self)
    }
}

// impl_int_bind
macro_rules! impl_int_bind {
    ($($type:ty),* $(,)?) => {
        $(
            impl NumberTarget for $type {
                fn set_number(&mut self, value: Number, allow_rounding: bool) -> Result<(), NumberError> {
                    let target = stringify!($type);
                    let wide = value.to_i128(allow_rounding, target)?;
                    *self = <$type>::try_from(wide)
                        .map_err(|_| NumberError::out_of_range(value, target))?;

                    Ok(())
                }

                fn reset(&mut self) {
                    *self = 0;
                }
            }

            impl Bind for $type {
                fn target(&mut self) -> Target<'_> {
                    Target::Number(self)
                }

                fn source(&self) -> Source<'_> {
                    Source::Number(Number::from(*self))
                }
            }
        )*
    };
}

impl_int_bind!(i8, i16, i32, i64, u8, u16, u32, u64);

impl NumberTarget for f64 {
    fn set_number(&mut self, value: Number, allow_rounding: bool) -> Result<(), NumberError> {
        *self = value.to_f64(allow_rounding, "f64")?;

        Ok(())
    }

    fn reset(&mut self) {
        *self = 0.0;
    }
}

impl NumberTarget for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn set_number(&mut self, value: Number, allow_rounding: bool) -> Result<(), NumberError> {
        let wide = value.to_f64(allow_rounding, "f32")?;
        let narrow = wide as f32;

        if wide.is_finite() && !narrow.is_finite() {
            return Err(NumberError::out_of_range(value, "f32"));
        }
        if !allow_rounding && f64::from(narrow) != wide && !wide.is_nan() {
            return Err(NumberError::PrecisionLoss {
                value: value.to_string(),
                target: "f32",
            });
        }
        *self = narrow;

        Ok(())
    }

    fn reset(&mut self) {
        *self = 0.0;
    }
}

impl Bind for f64 {
    fn target(&mut self) -> Target<'_> {
        Target::Number(self)
    }

    fn source(&self) -> Source<'_> {
        Source::Number(Number::Float(*self))
    }
}

impl Bind for f32 {
    fn target(&mut self) -> Target<'_> {
        Target::Number(self)
    }

    fn source(&self) -> Source<'_> {
        Source::Number(Number::from(*self))
    }
}

impl NumberTarget for Number {
    fn set_number(&mut self, value: Number, _: bool) -> Result<(), NumberError> {
        *self = value;

        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::Int(0);
    }
}

impl Bind for Number {
    fn target(&mut self) -> Target<'_> {
        Target::Number(self)
    }

    fn source(&self) -> Source<'_> {
        Source::Number(*self)
    }
}

// ============================================================================
// Wrappers
// ============================================================================

impl<T: Bind + Default> OptionalTarget for Option<T> {
    fn set_none(&mut self) {
        *self = None;
    }

    fn insert_default(&mut self) -> &mut dyn Bind {
        self.insert(T::default())
    }
}

impl<T: Bind + Default + 'static> Bind for Option<T> {
    fn target(&mut self) -> Target<'_> {
        Target::Optional(self)
    }

    fn source(&self) -> Source<'_> {
        Source::Optional(self.as_ref().map(|inner| inner as &dyn Bind))
    }
}

impl<T: Bind + ?Sized> Bind for Box<T> {
    fn target(&mut self) -> Target<'_> {
        (**self).target()
    }

    fn source(&self) -> Source<'_> {
        (**self).source()
    }

    fn native_name(&self) -> &'static str {
        (**self).native_name()
    }
}

// ============================================================================
// Collections
// ============================================================================

impl<T: Bind + Default> ListTarget for Vec<T> {
    fn clear(&mut self) {
        Self::clear(self);
    }

    fn push_default(&mut self) -> &mut dyn Bind {
        self.push(T::default());
        let last = self.len() - 1;

        &mut self[last]
    }
}

impl<T: Bind + Default + 'static> Bind for Vec<T> {
    fn target(&mut self) -> Target<'_> {
        Target::List(self)
    }

    fn source(&self) -> Source<'_> {
        Source::List(self.iter().map(|item| item as &dyn Bind).collect())
    }
}

// impl_map_bind
macro_rules! impl_map_bind {
    ($map:ident, $($bound:ident),+) => {
        impl<K, V> MapTarget for $map<K, V>
        where
            K: MapKey $(+ $bound)+,
            V: Bind + Default,
        {
            fn clear(&mut self) {
                Self::clear(self);
            }

            fn string_keyed(&self) -> bool {
                K::STRING_KEYED
            }

            fn key_type_name(&self) -> &'static str {
                std::any::type_name::<K>()
            }

            fn insert_default(&mut self, key: &str) -> Option<&mut dyn Bind> {
                let key = K::from_key(key)?;

                Some(self.entry(key).or_default())
            }
        }

        impl<K, V> Bind for $map<K, V>
        where
            K: MapKey $(+ $bound)+,
            V: Bind + Default + 'static,
        {
            fn target(&mut self) -> Target<'_> {
                Target::Map(self)
            }

            fn source(&self) -> Source<'_> {
                let entries = K::STRING_KEYED.then(|| {
                    let mut entries: Vec<(&str, &dyn Bind)> = self
                        .iter()
                        .filter_map(|(key, value)| Some((key.as_key()?, value as &dyn Bind)))
                        .collect();
                    entries.sort_by(|a, b| a.0.cmp(b.0));
                    entries
                });

                Source::Map(MapSource {
                    key_type: std::any::type_name::<K>(),
                    entries,
                })
            }
        }
    };
}

impl_map_bind!(HashMap, Eq, Hash);
impl_map_bind!(BTreeMap, Ord);

// ============================================================================
// Attribute values
// ============================================================================

// impl_attr_bind
macro_rules! impl_attr_bind {
    ($($type:ty),* $(,)?) => {
        $(
            impl Bind for $type {
                fn target(&mut self) -> Target<'_> {
                    Target::Attr(self)
                }

                fn source(&self) -> Source<'_> {
                    Source::Attr(self)
                }
            }
        )*
    };
}

impl_attr_bind!(
    BoolValue,
    ListValue,
    MapValue,
    NumberValue,
    ObjectValue,
    StringValue
);
