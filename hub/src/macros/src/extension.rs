use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

pub fn derive_extension(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    // Get the type name we are annotating
    let type_name = &ast.ident;

    // Emit ::app_hub::Extension so the impl resolves both inside and outside the crate.
    // Inside the crate it relies on `extern crate self as app_hub;` in lib.rs;
    // outside the crate it resolves to the app_hub dependency.
    TokenStream::from(quote! {
        impl ::app_hub::Extension for #type_name {
        }
    })
}
