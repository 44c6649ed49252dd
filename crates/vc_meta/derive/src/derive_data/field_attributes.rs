use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, LitStr, Meta, Path};

use crate::PROPERTY_ATTRIBUTE_NAME;

/// How a field is declared.
pub(crate) enum FieldKind {
    /// Through the `PropertyValue` impl of the field type.
    Typed,
    FileName,
    Enumeration(Path),
    EnumString(Path),
}

/// Parsed `#[property(...)]` of one field.
pub(crate) struct FieldAttributes {
    pub name: Option<LitStr>,
    pub display: Option<LitStr>,
    pub category: Option<LitStr>,
    pub default: Option<Expr>,
    pub kind: FieldKind,
}

impl FieldAttributes {
    /// Returns `None` if the field has no `#[property]` attribute.
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Option<Self>> {
        let mut parsed: Option<Self> = None;
        for attr in attrs {
            if !attr.path().is_ident(PROPERTY_ATTRIBUTE_NAME) {
                continue;
            }
            let this = parsed.get_or_insert_with(|| Self {
                name: None,
                display: None,
                category: None,
                default: None,
                kind: FieldKind::Typed,
            });
            if let Meta::List(_) = &attr.meta {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        if let Some(this) = &parsed
            && let (Some(default), FieldKind::Enumeration(_)) = (&this.default, &this.kind)
        {
            return Err(syn::Error::new_spanned(
                default,
                "enumeration properties take their default from the domain",
            ));
        }
        Ok(parsed)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            set_once(&mut self.name, meta.value()?.parse()?, &meta)
        } else if meta.path.is_ident("display") {
            set_once(&mut self.display, meta.value()?.parse()?, &meta)
        } else if meta.path.is_ident("category") {
            set_once(&mut self.category, meta.value()?.parse()?, &meta)
        } else if meta.path.is_ident("default") {
            set_once(&mut self.default, meta.value()?.parse()?, &meta)
        } else if meta.path.is_ident("file_name") {
            self.set_kind(FieldKind::FileName, &meta)
        } else if meta.path.is_ident("enumeration") {
            let domain = meta.value()?.parse()?;
            self.set_kind(FieldKind::Enumeration(domain), &meta)
        } else if meta.path.is_ident("enum_string") {
            let domain = meta.value()?.parse()?;
            self.set_kind(FieldKind::EnumString(domain), &meta)
        } else {
            Err(meta.error(
                "unknown `property` attribute, expected one of `name`, `display`, `category`, \
                 `default`, `file_name`, `enumeration`, `enum_string`",
            ))
        }
    }

    fn set_kind(&mut self, kind: FieldKind, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if !matches!(self.kind, FieldKind::Typed) {
            return Err(meta.error("`file_name`, `enumeration` and `enum_string` are exclusive"));
        }
        self.kind = kind;
        Ok(())
    }
}

pub(super) fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *slot = Some(value);
    Ok(())
}
