use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;

use crate::derive_data::{CallbackAttribute, FieldKind, PropertiesDerive, PropertyField};

/// Generate the `Properties` implementation and, if requested, its
/// auto registration.
pub(crate) fn impl_properties(derive: &PropertiesDerive) -> TokenStream {
    let exports_ = crate::path::macro_exports_(&derive.vc_meta_path);
    let ident = derive.ident;

    let mut generics = derive.generics.clone();
    let (_, ty_generics, _) = derive.generics.split_for_impl();
    if derive.impl_with_generic() {
        generics
            .make_where_clause()
            .predicates
            .push(syn::parse_quote! { #ident #ty_generics: ::core::default::Default + ::core::marker::Send + ::core::marker::Sync + 'static });
    }
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let type_name = derive.attrs.name.as_ref().map(|name| {
        quote! {
            fn type_name() -> &'static str {
                #name
            }
        }
    });

    let category = derive.attrs.category.as_ref().map(|category| {
        quote! {
            schema.set_category(#category);
        }
    });

    let fields = derive
        .fields
        .iter()
        .map(|field| field_declaration(field, &exports_));
    let callbacks = derive.attrs.callbacks.iter().map(callback_declaration);

    let auto_register = super::get_auto_register_impl(derive);

    quote! {
        impl #impl_generics #exports_::Properties for #ident #ty_generics #where_clause {
            #type_name

            fn declare(schema: &mut #exports_::SchemaBuilder<'_, Self>) {
                #category
                #(#fields)*
                #(#callbacks)*
            }
        }

        #auto_register
    }
}

fn field_declaration(field: &PropertyField, exports_: &TokenStream) -> TokenStream {
    let PropertyField {
        member,
        ty,
        name,
        attrs,
    } = field;

    let accessor = quote! {
        #exports_::Field::<Self, #ty>::new(
            |owner| &owner.#member,
            |owner| &mut owner.#member,
        )
    };

    let declare = match &attrs.kind {
        FieldKind::Typed => {
            let default = match &attrs.default {
                Some(default) => quote! { ::core::option::Option::Some(#default) },
                None => quote! { ::core::option::Option::None },
            };
            quote! {
                <#ty as #exports_::PropertyValue>::declare(schema, #name, #accessor, #default)
            }
        }
        FieldKind::FileName => {
            let default = match &attrs.default {
                Some(default) => quote! { #default },
                None => quote! { "" },
            };
            quote! { schema.file_name(#name, #accessor, #default) }
        }
        FieldKind::Enumeration(domain) => quote! {
            schema.enumeration(#name, #accessor, <#domain as #exports_::EnumDomain>::DESCRIPTOR)
        },
        FieldKind::EnumString(domain) => quote! {
            schema.enum_string(#name, #accessor, <#domain as #exports_::EnumDomain>::DESCRIPTOR)
        },
    };

    let display = attrs
        .display
        .as_ref()
        .map(|display| quote! { .display_name(#display) });
    let category = attrs
        .category
        .as_ref()
        .map(|category| quote! { .category(#category) });

    quote_spanned! { ty.span() =>
        #declare #display #category;
    }
}

fn callback_declaration(callback: &CallbackAttribute) -> TokenStream {
    let CallbackAttribute {
        name,
        call,
        display,
        category,
    } = callback;
    let display = display.as_ref().map(|display| quote! { .display_name(#display) });
    let category = category
        .as_ref()
        .map(|category| quote! { .category(#category) });

    quote_spanned! { call.span() =>
        schema.callback(#name, #call) #display #category;
    }
}
