//! Knobs that relax the conversion rules for a single pass.

use serde::{Deserialize, Serialize};

///
/// UnmatchedAttributes
///
/// What to do with object attributes that no structure field claims.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedAttributes {
    /// Report a binding configuration error for the structure.
    #[default]
    Error,
    /// Skip the attribute.
    Ignore,
}

///
/// Options
///
/// Everything defaults to the strict behaviour.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Null into a target that cannot hold null leaves the target empty
    /// instead of failing.
    pub unhandled_null_as_empty: bool,

    /// Unknown into a target that cannot hold unknown leaves the target
    /// empty instead of failing.
    pub unhandled_unknown_as_empty: bool,

    /// Allow lossy numeric conversions (fractions truncated, wide integers
    /// rounded to the nearest float).
    pub allow_rounding_numbers: bool,

    pub unmatched_attributes: UnmatchedAttributes,
}

impl Options {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unhandled_null_as_empty: false,
            unhandled_unknown_as_empty: false,
            allow_rounding_numbers: false,
            unmatched_attributes: UnmatchedAttributes::Error,
        }
    }

    #[must_use]
    pub const fn with_unhandled_null_as_empty(mut self, yes: bool) -> Self {
        self.unhandled_null_as_empty = yes;
        self
    }

    #[must_use]
    pub const fn with_unhandled_unknown_as_empty(mut self, yes: bool) -> Self {
        self.unhandled_unknown_as_empty = yes;
        self
    }

    #[must_use]
    pub const fn with_allow_rounding_numbers(mut self, yes: bool) -> Self {
        self.allow_rounding_numbers = yes;
        self
    }

    #[must_use]
    pub const fn with_unmatched_attributes(mut self, policy: UnmatchedAttributes) -> Self {
        self.unmatched_attributes = policy;
        self
    }
}

///
/// TESTS
///
