use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, WhereClause};

/// Merge an existing where clause with extra predicates.
pub fn where_clause_with_bounds(
    where_clause: Option<&WhereClause>,
    bounds: &[TokenStream],
) -> TokenStream {
    if bounds.is_empty() {
        return where_clause.map_or_else(|| quote!(), |wc| quote!(#wc));
    }

    match where_clause {
        Some(wc) if !wc.predicates.is_empty() => {
            let preds = wc.predicates.iter();
            quote!(where #(#preds,)* #(#bounds),*)
        }
        _ => quote!(where #(#bounds),*),
    }
}

/// `T: <bound>` for every type parameter.
pub fn type_param_bounds(generics: &Generics, bound: &TokenStream) -> Vec<TokenStream> {
    generics
        .type_params()
        .map(|param| {
            let ident = &param.ident;
            quote!(#ident: #bound)
        })
        .collect()
}
