mod extension;

use proc_macro::TokenStream;

#[proc_macro_derive(Extension)]
pub fn derive_extension(item: TokenStream) -> TokenStream {
    extension::derive_extension(item)
}
