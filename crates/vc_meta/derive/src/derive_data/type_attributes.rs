use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path};

use super::field_attributes::set_once;
use crate::PROPERTIES_ATTRIBUTE_NAME;

/// `callback(name = "...", call = path, ...)`
pub(crate) struct CallbackAttribute {
    pub name: LitStr,
    pub call: Path,
    pub display: Option<LitStr>,
    pub category: Option<LitStr>,
}

/// Parsed `#[properties(...)]` of the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub name: Option<LitStr>,
    pub category: Option<LitStr>,
    pub auto_register: Option<Span>,
    pub callbacks: Vec<CallbackAttribute>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(PROPERTIES_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            set_once(&mut self.name, meta.value()?.parse()?, &meta)
        } else if meta.path.is_ident("category") {
            set_once(&mut self.category, meta.value()?.parse()?, &meta)
        } else if meta.path.is_ident("auto_register") {
            set_once(&mut self.auto_register, meta.path.span(), &meta)
        } else if meta.path.is_ident("callback") {
            let callback = parse_callback(&meta)?;
            self.callbacks.push(callback);
            Ok(())
        } else {
            Err(meta.error(
                "unknown `properties` attribute, expected one of `name`, `category`, \
                 `auto_register`, `callback`",
            ))
        }
    }
}

fn parse_callback(meta: &ParseNestedMeta<'_>) -> syn::Result<CallbackAttribute> {
    let mut name: Option<LitStr> = None;
    let mut call: Option<Path> = None;
    let mut display = None;
    let mut category = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            set_once(&mut name, inner.value()?.parse()?, &inner)
        } else if inner.path.is_ident("call") {
            set_once(&mut call, inner.value()?.parse()?, &inner)
        } else if inner.path.is_ident("display") {
            set_once(&mut display, inner.value()?.parse()?, &inner)
        } else if inner.path.is_ident("category") {
            set_once(&mut category, inner.value()?.parse()?, &inner)
        } else {
            Err(inner.error("unknown `callback` attribute"))
        }
    })?;
    match (name, call) {
        (Some(name), Some(call)) => Ok(CallbackAttribute {
            name,
            call,
            display,
            category,
        }),
        _ => Err(meta.error("`callback` needs `name` and `call`")),
    }
}
