use crate::{
    error::HookError,
    raw::{Number, RawValue},
    reflect::{Nullable, Unknownable, ValueConverter, ValueHolder},
};

///
/// MaybeString
///
/// String leaf that records null and unknown itself.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MaybeString {
    pub(crate) value: Option<String>,
    pub(crate) null: bool,
    pub(crate) unknown: bool,
}

impl MaybeString {
    pub(crate) fn known(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::default()
        }
    }
}

impl ValueHolder for MaybeString {
    fn get_value(&self) -> RawValue {
        self.value.clone().map_or(RawValue::Null, RawValue::String)
    }

    fn set_value(&mut self, value: RawValue) -> Result<(), HookError> {
        match value {
            RawValue::String(v) => {
                self.value = Some(v);
                Ok(())
            }
            other => Err(HookError::new(format!(
                "expected a string, got {}",
                other.kind()
            ))),
        }
    }
}

impl Nullable for MaybeString {
    fn get_null(&self) -> bool {
        self.null
    }

    fn set_null(&mut self, null: bool) -> Result<(), HookError> {
        self.null = null;
        Ok(())
    }
}

impl Unknownable for MaybeString {
    fn get_unknown(&self) -> bool {
        self.unknown
    }

    fn set_unknown(&mut self, unknown: bool) -> Result<(), HookError> {
        self.unknown = unknown;
        Ok(())
    }
}

crate::impl_hooked!(MaybeString => nullable, unknownable);

///
/// NullOnly
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NullOnly {
    pub(crate) value: String,
    pub(crate) null: bool,
}

impl ValueHolder for NullOnly {
    fn get_value(&self) -> RawValue {
        RawValue::from(self.value.as_str())
    }

    fn set_value(&mut self, value: RawValue) -> Result<(), HookError> {
        let RawValue::String(v) = value else {
            return Err(HookError::from("expected a string"));
        };
        self.value = v;

        Ok(())
    }
}

impl Nullable for NullOnly {
    fn get_null(&self) -> bool {
        self.null
    }

    fn set_null(&mut self, null: bool) -> Result<(), HookError> {
        self.null = null;
        Ok(())
    }
}

crate::impl_hooked!(NullOnly => nullable);

///
/// Celsius
///
/// Temperature carried as a plain number; null reads as absolute zero.
///

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Celsius(pub(crate) f64);

impl ValueConverter for Celsius {
    fn to_raw(&self) -> Result<RawValue, HookError> {
        Ok(RawValue::Number(Number::Float(self.0)))
    }

    fn from_raw(&mut self, raw: RawValue) -> Result<(), HookError> {
        self.0 = match raw {
            RawValue::Null => -273.15,
            RawValue::Number(n) => n
                .to_f64(true, "Celsius")
                .map_err(|err| HookError::new(err.to_string()))?,
            other => {
                return Err(HookError::new(format!(
                    "expected a number, got {}",
                    other.kind()
                )));
            }
        };

        Ok(())
    }
}

crate::impl_hooked!(Celsius => value_converter);

///
/// Faulty
///
/// Converter that always fails.
///

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Faulty;

impl ValueConverter for Faulty {
    fn to_raw(&self) -> Result<RawValue, HookError> {
        Err(HookError::from("faulty hook"))
    }

    fn from_raw(&mut self, _: RawValue) -> Result<(), HookError> {
        Err(HookError::from("faulty hook"))
    }
}

crate::impl_hooked!(Faulty => value_converter);
