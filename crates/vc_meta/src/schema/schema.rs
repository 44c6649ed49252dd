use core::fmt;

use vc_utils::hash::HashMap;

use crate::access::{self, Binding, PropertyMut, PropertyRef, RootId};
use crate::info::{Category, EnumDescriptor, EnumIndex, StrIndex, StringPool, group_categories};
use crate::schema::{Access, DefaultValue, PropertyDescriptor};
use crate::value::Transform;

// -----------------------------------------------------------------------------
// Schema

/// The ordered, immutable property table of `T`.
///
/// Built once per registry by [`SchemaRegistry::schema`], then shared.
/// Only the per-property change flags mutate after build.
///
/// [`SchemaRegistry::schema`]: crate::registry::SchemaRegistry::schema
pub struct Schema<T: 'static> {
    type_name: &'static str,
    properties: Box<[PropertyDescriptor<T>]>,
    names: HashMap<&'static str, usize>,
    strings: StringPool,
    enums: Box<[EnumDescriptor]>,
    categories: Box<[Category]>,
}

impl<T: 'static> Schema<T> {
    pub(crate) fn new(
        type_name: &'static str,
        properties: Vec<PropertyDescriptor<T>>,
        strings: StringPool,
        enums: Vec<EnumDescriptor>,
    ) -> Self {
        let names = properties.iter().map(|p| (p.name, p.index)).collect();
        let categories = group_categories(properties.iter().map(|p| p.category));
        Self {
            type_name,
            properties: properties.into_boxed_slice(),
            names,
            strings,
            enums: enums.into_boxed_slice(),
            categories,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates the descriptors in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PropertyDescriptor<T>> {
        self.properties.iter()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&PropertyDescriptor<T>> {
        self.properties.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Returns the descriptor named `name`.
    #[inline]
    pub fn find(&self, name: &str) -> Option<&PropertyDescriptor<T>> {
        self.index_of(name).and_then(|index| self.get(index))
    }

    /// Property indices grouped by category, in first-seen order.
    #[inline]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[inline]
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    #[inline]
    pub fn enums(&self) -> &[EnumDescriptor] {
        &self.enums
    }

    /// Returns the domain an enum property refers to.
    ///
    /// # Panics
    ///
    /// Panics if `index` belongs to another schema.
    #[inline]
    pub fn enum_descriptor(&self, index: EnumIndex) -> &EnumDescriptor {
        &self.enums[index.index()]
    }

    #[inline]
    pub fn string(&self, index: StrIndex) -> &'static str {
        self.strings.get(index)
    }

    /// Returns the declared default of the property at `index`.
    ///
    /// Arrays and callbacks have none.
    pub fn default_value(&self, index: usize) -> Option<DefaultValue<'static>> {
        let value = match self.get(index)?.access() {
            Access::Boolean { default, .. } => DefaultValue::Boolean(*default),
            Access::Integer { default, .. } => DefaultValue::Integer(*default),
            Access::Float { default, .. } => DefaultValue::Float(*default),
            Access::String { default, .. } | Access::FileName { default, .. } => {
                DefaultValue::String(self.string(*default))
            }
            Access::Color { default, .. } => DefaultValue::Color(*default),
            Access::Enum { domain, .. } => {
                DefaultValue::Integer(self.enum_descriptor(*domain).default_value())
            }
            Access::EnumString { .. } => DefaultValue::String(""),
            Access::Transform { .. } => DefaultValue::Transform(Transform::IDENTITY),
            Access::Texture { .. } | Access::AnimGraph { .. } | Access::Entity { .. } => {
                DefaultValue::Empty
            }
            Access::Array { .. } | Access::Callback { .. } => return None,
        };
        Some(value)
    }

    /// Binds this schema to `owner`, which also becomes the root.
    #[inline]
    pub fn prepare<'a>(&'a self, owner: &'a mut T) -> Binding<'a, T> {
        let root = RootId::of(owner);
        Binding::new(self, owner, root)
    }

    /// Binds this schema to `owner`, nested inside the object `root`.
    #[inline]
    pub fn prepare_with_root<'a>(&'a self, owner: &'a mut T, root: RootId) -> Binding<'a, T> {
        Binding::new(self, owner, root)
    }

    /// Reads the property at `index` of `owner`.
    #[inline]
    pub fn value<'a>(&'a self, owner: &'a T, index: usize) -> Option<PropertyRef<'a>> {
        self.get(index)
            .map(|descriptor| access::property_ref(self, descriptor, owner))
    }

    /// Borrows the property at `index` of `owner` mutably.
    #[inline]
    pub fn value_mut<'a>(&'a self, owner: &'a mut T, index: usize) -> Option<PropertyMut<'a>> {
        self.get(index)
            .map(|descriptor| access::property_mut(self, descriptor, owner))
    }
}

impl<T: 'static> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}
