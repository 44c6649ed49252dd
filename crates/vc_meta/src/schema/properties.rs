use crate::scene::EntityRef;
use crate::schema::{Field, PropertyHandle, SchemaBuilder};
use crate::value::{AnimGraphRef, Color, TextureRef, Transform};

// -----------------------------------------------------------------------------
// Properties

/// A type with a declared, ordered set of persisted fields.
///
/// Usually derived. A manual implementation lists every property in
/// [`declare`](Properties::declare):
///
/// ```
/// use vc_meta::field;
/// use vc_meta::registry::SchemaRegistry;
/// use vc_meta::schema::SchemaBuilder;
/// use vc_meta::Properties;
///
/// #[derive(Default)]
/// struct Light {
///     radius: f32,
///     enabled: bool,
/// }
///
/// impl Properties for Light {
///     fn declare(schema: &mut SchemaBuilder<'_, Self>) {
///         schema.set_category("Light");
///         schema.float("radius", field!(Light, radius), 4.0);
///         schema
///             .boolean("enabled", field!(Light, enabled), true)
///             .display_name("Enabled");
///     }
/// }
///
/// let mut registry = SchemaRegistry::new();
/// let schema = registry.schema::<Light>();
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.categories()[0].name(), "Light");
/// ```
pub trait Properties: Default + Send + Sync + 'static {
    /// The name stored in scene documents, the Rust type name by default.
    fn type_name() -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Declares every property, in document order.
    fn declare(schema: &mut SchemaBuilder<'_, Self>);
}

// -----------------------------------------------------------------------------
// PropertyValue

/// A field type with a natural property kind.
///
/// Lets generated code declare a field from its type alone. Kinds sharing a
/// Rust type with another kind, such as file names or enums, are declared
/// through the dedicated [`SchemaBuilder`] methods instead.
pub trait PropertyValue: Sized + 'static {
    /// What `#[property(default = ..)]` accepts for this type.
    type Default;

    fn declare<'s, T: 'static>(
        schema: &'s mut SchemaBuilder<'_, T>,
        name: &'static str,
        field: Field<T, Self>,
        default: Option<Self::Default>,
    ) -> PropertyHandle<'s, T>;
}

macro_rules! impl_scalar_value {
    ($ty:ty, $method:ident) => {
        impl PropertyValue for $ty {
            type Default = $ty;

            #[inline]
            fn declare<'s, T: 'static>(
                schema: &'s mut SchemaBuilder<'_, T>,
                name: &'static str,
                field: Field<T, Self>,
                default: Option<Self::Default>,
            ) -> PropertyHandle<'s, T> {
                schema.$method(name, field, default.unwrap_or_default())
            }
        }
    };
}

impl_scalar_value!(bool, boolean);
impl_scalar_value!(i32, integer);
impl_scalar_value!(f32, float);
impl_scalar_value!(Color, color);

impl PropertyValue for String {
    type Default = &'static str;

    #[inline]
    fn declare<'s, T: 'static>(
        schema: &'s mut SchemaBuilder<'_, T>,
        name: &'static str,
        field: Field<T, Self>,
        default: Option<Self::Default>,
    ) -> PropertyHandle<'s, T> {
        schema.string(name, field, default.unwrap_or(""))
    }
}

macro_rules! impl_unit_value {
    ($ty:ty, $method:ident) => {
        impl PropertyValue for $ty {
            type Default = ();

            #[inline]
            fn declare<'s, T: 'static>(
                schema: &'s mut SchemaBuilder<'_, T>,
                name: &'static str,
                field: Field<T, Self>,
                _default: Option<()>,
            ) -> PropertyHandle<'s, T> {
                schema.$method(name, field)
            }
        }
    };
}

impl_unit_value!(Transform, transform);
impl_unit_value!(TextureRef, texture);
impl_unit_value!(AnimGraphRef, anim_graph);
impl_unit_value!(EntityRef, entity);

impl<E: Properties> PropertyValue for Vec<E> {
    type Default = ();

    #[inline]
    fn declare<'s, T: 'static>(
        schema: &'s mut SchemaBuilder<'_, T>,
        name: &'static str,
        field: Field<T, Self>,
        _default: Option<()>,
    ) -> PropertyHandle<'s, T> {
        schema.array(name, field)
    }
}

#[cfg(test)]
mod tests {
    use crate::Properties;
    use crate::info::{EnumDescriptor, EnumDomain, PropertyKind};
    use crate::registry::SchemaRegistry;
    use crate::scene::EntityRef;
    use crate::schema::DefaultValue;
    use crate::value::{Color, TextureRef, Transform};

    struct Falloff;

    impl EnumDomain for Falloff {
        const DESCRIPTOR: EnumDescriptor =
            EnumDescriptor::new("Falloff", &[("Linear", 0), ("Square", 2)], 1);
    }

    #[derive(Properties, Default)]
    struct Flare {
        #[property(default = 0.5)]
        size: f32,
    }

    #[derive(Properties, Default)]
    #[properties(name = "PointLight", category = "Light")]
    #[properties(callback(name = "reset", call = PointLight::reset, display = "Reset"))]
    struct PointLight {
        #[property(default = 10.0, display = "Radius")]
        radius: f32,
        #[property(default = Color::BLACK)]
        color: Color,
        #[property(enumeration = Falloff)]
        falloff: i32,
        #[property(enum_string = Falloff, name = "falloff_name")]
        falloff_label: String,
        #[property(file_name, default = "light.png", category = "Advanced")]
        cookie: String,
        #[property]
        frame: Transform,
        #[property]
        skin: TextureRef,
        #[property]
        target: EntityRef,
        #[property]
        flares: Vec<Flare>,
        cache: Vec<f32>,
    }

    impl PointLight {
        fn reset(&mut self) {
            self.radius = 0.0;
        }
    }

    #[test]
    fn derived_declaration() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<PointLight>();
        assert_eq!(schema.type_name(), "PointLight");

        let kinds: Vec<_> = schema.iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            [
                PropertyKind::Float,
                PropertyKind::Color,
                PropertyKind::Enum,
                PropertyKind::EnumString,
                PropertyKind::FileName,
                PropertyKind::Transform,
                PropertyKind::Asset(crate::info::AssetKind::Texture),
                PropertyKind::EntityReference,
                PropertyKind::Array,
                PropertyKind::Callback,
            ]
        );

        assert_eq!(schema.index_of("falloff_name"), Some(3));
        assert_eq!(schema.index_of("cache"), None);
        assert_eq!(schema.find("radius").map(|p| p.display_name()), Some("Radius"));
        assert_eq!(schema.find("reset").map(|p| p.display_name()), Some("Reset"));
        assert_eq!(schema.find("cookie").map(|p| p.category()), Some("Advanced"));

        let categories: Vec<_> = schema.categories().iter().map(|c| c.name()).collect();
        assert_eq!(categories, ["Light", "Advanced"]);

        assert_eq!(schema.default_value(0), Some(DefaultValue::Float(10.0)));
        assert_eq!(schema.default_value(1), Some(DefaultValue::Color(Color::BLACK)));
        assert_eq!(schema.default_value(2), Some(DefaultValue::Integer(2)));
        assert_eq!(schema.default_value(4), Some(DefaultValue::String("light.png")));
        assert!(registry.get::<Flare>().is_some());
    }

    #[test]
    fn derived_callback_runs() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<PointLight>();
        let mut light = PointLight::default();
        let mut binding = schema.prepare(&mut light);
        binding.set_defaults();
        assert_eq!(binding.owner().radius, 10.0);

        let reset = binding.index_of("reset").unwrap();
        assert!(binding.invoke(reset));
        assert_eq!(light.radius, 0.0);
    }
}
