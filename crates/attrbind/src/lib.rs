//! ## Crate layout
//! - `attr`: the attribute type and value contracts.
//! - `data`: schema-typed documents read and written through the engine.
//! - `diag`: severity-tagged, path-qualified diagnostics.
//! - `path`: addresses inside a value tree.
//! - `raw`: transport values and their shape descriptors.
//! - `reflect`: the binding engine and the native-side traits.
//! - `types`: built-in string, bool, number, list, map, and object types.
//!
//! Structures bind through `#[derive(Bind)]`; leaves that need custom
//! null or unknown handling implement the hooks in `reflect` and wire them
//! with [`impl_hooked!`].

pub use attrbind_core::{
    attr, context, data, diag, error, impl_hooked, options, path, raw, reflect, types,
};

// derive
pub use attrbind_derive::Bind;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// the derive and the trait share a name, so one import covers both
///

pub mod prelude {
    pub use attrbind_core::prelude::*;
    pub use attrbind_derive::Bind;
}
