//! See [`Properties`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static PROPERTY_ATTRIBUTE_NAME: &str = "property";
static PROPERTIES_ATTRIBUTE_NAME: &str = "properties";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Property Declaration
///
/// `#[derive(Properties)]` implements `Properties`, declaring one property
/// per field marked with `#[property]`, in field order. Unmarked fields are
/// not part of the schema.
///
/// The type must implement `Default`.
///
/// ```rust, ignore
/// #[derive(Properties, Default)]
/// #[properties(category = "Light", auto_register)]
/// #[properties(callback(name = "reset", call = Self::reset))]
/// struct PointLight {
///     #[property(default = 10.0, display = "Radius")]
///     radius: f32,
///     #[property(default = Color::WHITE)]
///     color: Color,
///     #[property(enumeration = Falloff)]
///     falloff: i32,
///     #[property(file_name, default = "light.png", category = "Advanced")]
///     cookie: String,
///     #[property]
///     target: EntityRef,
///     #[property]
///     flares: Vec<Flare>,
///     // Not a property.
///     cache: Vec<f32>,
/// }
/// ```
///
/// ## Field Attributes
///
/// - `name = "..."`: the persisted name, defaults to the field name.
///   Required for tuple struct fields.
/// - `display = "..."`: the editor label, defaults to the name.
/// - `category = "..."`: overrides the type category for this property.
/// - `default = expr`: the declared default. Strings take a string literal;
///   omitted, the zero value of the kind is used.
/// - `file_name`: declares a `String` as a file name.
/// - `enumeration = Path`: declares an `i32` restricted to the domain of
///   `Path: EnumDomain`. Its default comes from the domain.
/// - `enum_string = Path`: declares a `String` restricted to the labels of
///   `Path: EnumDomain`.
///
/// The kind of the other fields follows their type, through `PropertyValue`.
/// `Vec<E>` declares an array of `E: Properties`.
///
/// ## Type Attributes
///
/// - `name = "..."`: the registered type name, defaults to the type path.
/// - `category = "..."`: the category of the properties that set none.
/// - `auto_register`: submits the type for `SchemaRegistry::auto_register`.
///   Ignored for generic types.
/// - `callback(name = "...", call = path, display = "...", category = "...")`:
///   declares an editor action after the fields. `call` is a
///   `fn(&mut Self)`.
#[proc_macro_derive(Properties, attributes(property, properties))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let derive = match derive_data::PropertiesDerive::from_input(&ast) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    impls::impl_properties(&derive).into()
}
