use crate::info::{EnumDescriptor, EnumIndex, StringPool};
use crate::ops::{CollectionAdapter, VecAdapter};
use crate::registry::SchemaRegistry;
use crate::scene::EntityRef;
use crate::schema::{Access, Field, Properties, PropertyDescriptor, Schema};
use crate::value::{AnimGraphRef, Color, TextureRef, Transform};

const DEFAULT_CATEGORY: &str = "Properties";

// -----------------------------------------------------------------------------
// SchemaBuilder

/// Collects the property declarations of one type.
///
/// Properties are appended in call order, which is also the document order.
/// New properties take the current category, see [`set_category`].
///
/// [`set_category`]: SchemaBuilder::set_category
pub struct SchemaBuilder<'r, T: 'static> {
    registry: &'r mut SchemaRegistry,
    type_name: &'static str,
    category: &'static str,
    properties: Vec<PropertyDescriptor<T>>,
    strings: StringPool,
    enums: Vec<EnumDescriptor>,
}

impl<'r, T: 'static> SchemaBuilder<'r, T> {
    pub(crate) fn new(registry: &'r mut SchemaRegistry, type_name: &'static str) -> Self {
        Self {
            registry,
            type_name,
            category: DEFAULT_CATEGORY,
            properties: Vec::new(),
            strings: StringPool::default(),
            enums: Vec::new(),
        }
    }

    /// The registry building this schema, used to obtain nested schemas.
    #[inline]
    pub fn registry(&mut self) -> &mut SchemaRegistry {
        self.registry
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Sets the category of the properties declared next.
    #[inline]
    pub fn set_category(&mut self, category: &'static str) {
        self.category = category;
    }

    pub fn boolean(
        &mut self,
        name: &'static str,
        field: Field<T, bool>,
        default: bool,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::Boolean { field, default })
    }

    pub fn integer(
        &mut self,
        name: &'static str,
        field: Field<T, i32>,
        default: i32,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::Integer { field, default })
    }

    pub fn float(
        &mut self,
        name: &'static str,
        field: Field<T, f32>,
        default: f32,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::Float { field, default })
    }

    pub fn string(
        &mut self,
        name: &'static str,
        field: Field<T, String>,
        default: &'static str,
    ) -> PropertyHandle<'_, T> {
        let default = self.strings.intern(default);
        self.push(name, Access::String { field, default })
    }

    pub fn file_name(
        &mut self,
        name: &'static str,
        field: Field<T, String>,
        default: &'static str,
    ) -> PropertyHandle<'_, T> {
        let default = self.strings.intern(default);
        self.push(name, Access::FileName { field, default })
    }

    pub fn color(
        &mut self,
        name: &'static str,
        field: Field<T, Color>,
        default: Color,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::Color { field, default })
    }

    /// Declares an integer restricted to `domain`.
    ///
    /// Its default is the value at the domain's default index.
    pub fn enumeration(
        &mut self,
        name: &'static str,
        field: Field<T, i32>,
        domain: EnumDescriptor,
    ) -> PropertyHandle<'_, T> {
        let domain = self.intern_enum(domain);
        self.push(name, Access::Enum { field, domain })
    }

    /// Declares a string restricted to the labels of `domain`.
    pub fn enum_string(
        &mut self,
        name: &'static str,
        field: Field<T, String>,
        domain: EnumDescriptor,
    ) -> PropertyHandle<'_, T> {
        let domain = self.intern_enum(domain);
        self.push(name, Access::EnumString { field, domain })
    }

    pub fn transform(
        &mut self,
        name: &'static str,
        field: Field<T, Transform>,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::Transform { field })
    }

    pub fn texture(
        &mut self,
        name: &'static str,
        field: Field<T, TextureRef>,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::Texture { field })
    }

    pub fn anim_graph(
        &mut self,
        name: &'static str,
        field: Field<T, AnimGraphRef>,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::AnimGraph { field })
    }

    pub fn entity(
        &mut self,
        name: &'static str,
        field: Field<T, EntityRef>,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::Entity { field })
    }

    /// Declares a `Vec` of sub-objects, building the element schema first.
    ///
    /// The element type may contain the type being built, directly or not.
    pub fn array<E: Properties>(
        &mut self,
        name: &'static str,
        field: Field<T, Vec<E>>,
    ) -> PropertyHandle<'_, T> {
        let element = self.registry.element_schema::<E>();
        let adapter = Box::new(VecAdapter::with_element(field, element));
        self.push(name, Access::Array { adapter })
    }

    /// Declares a collection through a custom adapter.
    pub fn collection(
        &mut self,
        name: &'static str,
        adapter: Box<dyn CollectionAdapter<T>>,
    ) -> PropertyHandle<'_, T> {
        self.push(name, Access::Array { adapter })
    }

    /// Declares an editor action. Callbacks are never loaded or saved.
    pub fn callback(&mut self, name: &'static str, call: fn(&mut T)) -> PropertyHandle<'_, T> {
        self.push(name, Access::Callback { call })
    }

    fn intern_enum(&mut self, domain: EnumDescriptor) -> EnumIndex {
        if let Some(index) = self.enums.iter().position(|e| *e == domain) {
            return EnumIndex(index as u16);
        }
        let Ok(raw) = u16::try_from(self.enums.len()) else {
            panic!("too many enum domains in `{}`", self.type_name);
        };
        self.enums.push(domain);
        EnumIndex(raw)
    }

    fn push(&mut self, name: &'static str, access: Access<T>) -> PropertyHandle<'_, T> {
        if self.properties.iter().any(|p| p.name == name) {
            panic!("property `{name}` is declared twice in `{}`", self.type_name);
        }
        let index = self.properties.len();
        self.properties
            .push(PropertyDescriptor::new(index, name, self.category, access));
        PropertyHandle {
            descriptor: &mut self.properties[index],
        }
    }

    pub(crate) fn build(self) -> Schema<T> {
        Schema::new(
            self.type_name,
            self.properties,
            self.strings,
            self.enums,
        )
    }
}

// -----------------------------------------------------------------------------
// PropertyHandle

/// The property just declared, for optional settings.
pub struct PropertyHandle<'s, T: 'static> {
    descriptor: &'s mut PropertyDescriptor<T>,
}

impl<T: 'static> PropertyHandle<'_, T> {
    /// Sets the editor label.
    #[inline]
    pub fn display_name(self, display_name: &'static str) -> Self {
        self.descriptor.display_name = display_name;
        self
    }

    /// Overrides the category of this property only.
    #[inline]
    pub fn category(self, category: &'static str) -> Self {
        self.descriptor.category = category;
        self
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.descriptor.index
    }
}

#[cfg(test)]
mod tests {
    use crate::field;
    use crate::info::{EnumDescriptor, PropertyKind};
    use crate::registry::SchemaRegistry;
    use crate::schema::{Properties, SchemaBuilder};

    const MODE: EnumDescriptor = EnumDescriptor::new("Mode", &[("A", 0), ("B", 5)], 1);

    #[derive(Default)]
    struct Sample {
        a: String,
        b: String,
        mode: i32,
        other_mode: i32,
    }

    impl Properties for Sample {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.string("a", field!(Sample, a), "shared");
            schema.set_category("Extra");
            schema.file_name("b", field!(Sample, b), "shared");
            schema
                .enumeration("mode", field!(Sample, mode), MODE)
                .category("Modes");
            schema.enumeration("other_mode", field!(Sample, other_mode), MODE);
        }
    }

    #[test]
    fn pools_strings_and_domains() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Sample>();

        assert_eq!(schema.strings().len(), 1);
        assert_eq!(schema.enums().len(), 1);
        assert_eq!(
            schema.find("b").map(|p| p.kind()),
            Some(PropertyKind::FileName)
        );
    }

    #[test]
    fn categories_follow_declarations() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Sample>();
        let names: Vec<_> = schema.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Properties", "Extra", "Modes"]);
        assert_eq!(schema.categories()[1].indices(), &[1, 3]);
    }

    #[derive(Default)]
    struct Twice {
        a: bool,
    }

    impl Properties for Twice {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.boolean("a", field!(Twice, a), false);
            schema.boolean("a", field!(Twice, a), true);
        }
    }

    #[test]
    #[should_panic(expected = "declared twice")]
    fn duplicate_name_panics() {
        SchemaRegistry::new().schema::<Twice>();
    }
}
