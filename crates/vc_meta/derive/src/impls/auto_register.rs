use proc_macro2::TokenStream;

use crate::derive_data::PropertiesDerive;

/// Generate `auto_register` submission.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(derive: &PropertiesDerive) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = derive.attrs.auto_register else {
        return TokenStream::new();
    };
    // Invalid for generic types.
    if derive.impl_with_generic() {
        return TokenStream::new();
    }

    let auto_register_ = crate::path::auto_register_(&derive.vc_meta_path);
    let ident = derive.ident;

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::AutoRegister(#auto_register_::register_type::<#ident>)
        }
    }
}

/// Generate `auto_register` submission.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &PropertiesDerive) -> TokenStream {
    TokenStream::new()
}
