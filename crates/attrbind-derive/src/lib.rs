use proc_macro::TokenStream;

mod bind;
mod util;

/// Implements `Bind` and `Structure` for a struct with named fields.
///
/// Every field needs `#[attr("name")]` naming the object attribute it binds
/// to, or `#[attr("-")]` to leave it out. Tags are checked when the struct is
/// first bound, so a bad tag shows up as a diagnostic rather than a compile
/// error.
#[proc_macro_derive(Bind, attributes(attr))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::derive_bind(input.into()).into()
}
