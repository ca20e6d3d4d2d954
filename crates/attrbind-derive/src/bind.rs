use crate::util::{type_param_bounds, where_clause_with_bounds};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, LitStr, punctuated::Punctuated,
    token::Comma,
};

// derive_bind
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

///
/// BoundField
///

struct BoundField {
    ident: syn::Ident,
    tag: Option<String>,
}

impl BoundField {
    fn is_bound(&self) -> bool {
        self.tag.as_deref().is_some_and(|tag| tag != "-")
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream, Error> {
    let ident = &input.ident;
    let fields = named_fields(input)?
        .iter()
        .map(|field| {
            Ok(BoundField {
                ident: field
                    .ident
                    .clone()
                    .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?,
                tag: field_tag(&field.attrs)?,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let decls = fields.iter().map(|field| {
        let name = field.ident.to_string();
        let tag = match &field.tag {
            Some(tag) => quote!(::core::option::Option::Some(#tag)),
            None => quote!(::core::option::Option::None),
        };

        quote! {
            ::attrbind::reflect::FieldDecl::new(#name, #tag)
        }
    });

    let bound = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.is_bound())
        .collect::<Vec<_>>();
    let field_arms = bound.iter().map(|(index, field)| {
        let field_ident = &field.ident;
        quote! {
            #index => ::core::option::Option::Some(&self.#field_ident),
        }
    });
    let field_mut_arms = bound.iter().map(|(index, field)| {
        let field_ident = &field.ident;
        quote! {
            #index => ::core::option::Option::Some(&mut self.#field_ident),
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let bounds = type_param_bounds(
        &input.generics,
        &quote!(::attrbind::reflect::Bind + ::core::default::Default + 'static),
    );
    let where_clause = where_clause_with_bounds(where_clause, &bounds);

    Ok(quote! {
        impl #impl_generics ::attrbind::reflect::Structure for #ident #ty_generics #where_clause {
            fn meta_key(&self) -> ::core::any::TypeId {
                ::core::any::TypeId::of::<Self>()
            }

            fn field_decls(&self) -> &'static [::attrbind::reflect::FieldDecl] {
                const FIELDS: &[::attrbind::reflect::FieldDecl] = &[#(#decls),*];

                FIELDS
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::attrbind::reflect::Bind> {
                match index {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::attrbind::reflect::Bind> {
                match index {
                    #(#field_mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::attrbind::reflect::Bind for #ident #ty_generics #where_clause {
            fn target(&mut self) -> ::attrbind::reflect::Target<'_> {
                ::attrbind::reflect::Target::Struct(self)
            }

            fn source(&self) -> ::attrbind::reflect::Source<'_> {
                ::attrbind::reflect::Source::Struct(self)
            }
        }
    })
}

fn named_fields(input: &DeriveInput) -> Result<&Punctuated<Field, Comma>, Error> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(&named.named),
            other => Err(Error::new_spanned(
                other,
                "Bind can only be derived for structs with named fields",
            )),
        },
        _ => Err(Error::new_spanned(
            &input.ident,
            "Bind can only be derived for structs with named fields",
        )),
    }
}

// `#[attr("name")]`, at most once per field
fn field_tag(attrs: &[Attribute]) -> Result<Option<String>, Error> {
    let mut tag = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("attr")) {
        if tag.is_some() {
            return Err(Error::new_spanned(attr, "duplicate #[attr] attribute"));
        }
        tag = Some(attr.parse_args::<LitStr>()?.value());
    }

    Ok(tag)
}
