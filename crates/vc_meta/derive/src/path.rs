//! Paths into `vc_meta`, kept in one place so generated code follows its
//! module layout.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `vc_meta` crate, as seen from the caller.
///
/// 1. For crates that depend on `vc_meta`, `::vc_meta` is returned.
/// 2. For crates that depend on `vc_props`, `::vc_props::meta` is returned.
/// 3. Otherwise `::vc_meta` is returned, which may be incorrect.
///
/// Reads the caller's manifest, so call it once per derive.
pub(crate) fn vc_meta() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_meta"))
}

#[inline(always)]
pub(crate) fn macro_exports_(vc_meta_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_meta_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_meta_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_meta_path::__macro_exports::auto_register
    }
}
