use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derives `Display` and `FromStr` for an enum through its serde
/// representation, so `rename_all` and `rename` attributes decide the text.
#[proc_macro_derive(Str)]
pub fn str_macro_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let name = &ast.ident;

    if !matches!(ast.data, syn::Data::Enum(_)) {
        return quote! { compile_error!("Str supports only enums"); }.into();
    }

    let expanded = quote! {
        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::serde::Serialize::serialize(self, f)
            }
        }

        impl ::std::str::FromStr for #name {
            type Err = ::serde::de::value::Error;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                use ::serde::de::IntoDeserializer;

                <Self as ::serde::Deserialize>::deserialize(s.into_deserializer())
            }
        }
    };

    expanded.into()
}
