//! Parsed form of a `#[derive(Properties)]` input.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::{FieldAttributes, FieldKind};
pub(crate) use type_attributes::{CallbackAttribute, TypeAttributes};

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Generics, Ident, LitStr, Member, Type};

/// One field marked with `#[property]`.
pub(crate) struct PropertyField<'a> {
    pub member: Member,
    pub ty: &'a Type,
    /// The persisted name.
    pub name: LitStr,
    pub attrs: FieldAttributes,
}

pub(crate) struct PropertiesDerive<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<PropertyField<'a>>,
    pub vc_meta_path: syn::Path,
}

impl<'a> PropertiesDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &input.data else {
            return Err(syn::Error::new(
                Span::call_site(),
                "`Properties` can only be derived for structs",
            ));
        };

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let mut fields = Vec::new();
        let mut errors: Option<syn::Error> = None;
        let members = match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unnamed(unnamed) => unnamed.unnamed.iter().collect(),
            Fields::Unit => Vec::new(),
        };

        for (index, field) in members.into_iter().enumerate() {
            let parsed = match FieldAttributes::parse_attrs(&field.attrs) {
                Ok(Some(parsed)) => parsed,
                Ok(None) => continue,
                Err(err) => {
                    combine(&mut errors, err);
                    continue;
                }
            };

            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(index.into()),
            };
            let name = match (&parsed.name, &field.ident) {
                (Some(name), _) => name.clone(),
                (None, Some(ident)) => {
                    let text = ident.to_string();
                    LitStr::new(text.trim_start_matches("r#"), ident.span())
                }
                (None, None) => {
                    combine(
                        &mut errors,
                        syn::Error::new(field.span(), "tuple struct properties need `name = \"...\"`"),
                    );
                    continue;
                }
            };

            if let Some(previous) = fields
                .iter()
                .find(|f: &&PropertyField<'_>| f.name.value() == name.value())
            {
                let mut err = syn::Error::new(name.span(), "duplicate property name");
                err.combine(syn::Error::new(previous.name.span(), "first declared here"));
                combine(&mut errors, err);
                continue;
            }

            fields.push(PropertyField {
                member,
                ty: &field.ty,
                name,
                attrs: parsed,
            });
        }

        if let Some(err) = errors {
            return Err(err);
        }

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            fields,
            vc_meta_path: crate::path::vc_meta(),
        })
    }

    /// Whether the type has non-lifetime generic parameters.
    pub fn impl_with_generic(&self) -> bool {
        !self
            .generics
            .params
            .iter()
            .all(|param| matches!(param, syn::GenericParam::Lifetime(_)))
    }
}

fn combine(errors: &mut Option<syn::Error>, err: syn::Error) {
    match errors {
        Some(errors) => errors.combine(err),
        None => *errors = Some(err),
    }
}
