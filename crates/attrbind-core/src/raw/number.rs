use crate::error::NumberError;
use std::fmt;

///
/// CONSTANTS
///

const F64_SAFE_I128: i128 = 1i128 << 53;

///
/// Number
///
/// Exact transport number. Integers keep their full width so large values
/// survive a round trip; equality is numeric across representations.
///

#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Number {
    /// Integral value as an `i128`, rejecting fractions unless rounding is
    /// allowed.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn to_i128(self, allow_rounding: bool, target: &'static str) -> Result<i128, NumberError> {
        match self {
            Self::Int(v) => Ok(i128::from(v)),
            Self::Uint(v) => Ok(i128::from(v)),
            Self::Float(v) => {
                if !v.is_finite() {
                    return Err(NumberError::out_of_range(self, target));
                }
                if v.fract() != 0.0 && !allow_rounding {
                    return Err(NumberError::Fractional {
                        value: self.to_string(),
                        target,
                    });
                }

                let truncated = v.trunc();
                if truncated < i128::MIN as f64 || truncated >= i128::MAX as f64 {
                    return Err(NumberError::out_of_range(self, target));
                }

                Ok(truncated as i128)
            }
        }
    }

    /// Value as an `f64`, rejecting integers that would lose precision
    /// unless rounding is allowed.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn to_f64(self, allow_rounding: bool, target: &'static str) -> Result<f64, NumberError> {
        let (wide, float) = match self {
            Self::Float(v) => return Ok(v),
            Self::Int(v) => (i128::from(v), v as f64),
            Self::Uint(v) => (i128::from(v), v as f64),
        };

        if !allow_rounding && wide.abs() > F64_SAFE_I128 && float as i128 != wide {
            return Err(NumberError::PrecisionLoss {
                value: self.to_string(),
                target,
            });
        }

        Ok(float)
    }
}

impl PartialEq for Number {
    #[allow(clippy::cast_possible_truncation)]
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Float(f), int) | (int, Self::Float(f)) => {
                let whole = f.is_finite() && f.fract() == 0.0;
                int.to_i128(false, "i128")
                    .is_ok_and(|wide| whole && f as i128 == wide)
            }
            (a, b) => a.to_i128(false, "i128").ok() == b.to_i128(false, "i128").ok(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

// impl_number_from
macro_rules! impl_number_from {
    ( $( $type:ty => $variant:ident($wide:ty) ),* $(,)? ) => {
        $(
            impl From<$type> for Number {
                fn from(value: $type) -> Self {
                    Self::$variant(<$wide>::from(value))
                }
            }
        )*
    };
}

impl_number_from!(
    i8 => Int(i64),
    i16 => Int(i64),
    i32 => Int(i64),
    i64 => Int(i64),
    u8 => Uint(u64),
    u16 => Uint(u64),
    u32 => Uint(u64),
    u64 => Uint(u64),
    f32 => Float(f64),
    f64 => Float(f64),
);
