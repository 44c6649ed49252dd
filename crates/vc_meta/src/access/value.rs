use crate::info::{AssetKind, EnumDescriptor, PropertyKind};
use crate::ops::{ArrayMut, ArrayRef};
use crate::scene::EntityRef;
use crate::schema::{Access, PropertyDescriptor, Schema};
use crate::value::{AnimGraphRef, Color, TextureRef, Transform};

// -----------------------------------------------------------------------------
// PropertyRef

/// A property value, tagged with its kind.
#[derive(Debug, Clone, Copy)]
pub enum PropertyRef<'a> {
    Boolean(&'a bool),
    Integer(&'a i32),
    Float(&'a f32),
    String(&'a String),
    FileName(&'a String),
    Color(&'a Color),
    Enum {
        value: &'a i32,
        domain: &'a EnumDescriptor,
    },
    EnumString {
        value: &'a String,
        domain: &'a EnumDescriptor,
    },
    Transform(&'a Transform),
    Texture(&'a TextureRef),
    AnimGraph(&'a AnimGraphRef),
    Entity(&'a EntityRef),
    Array(ArrayRef<'a>),
    Callback,
}

/// A mutable property value, tagged with its kind.
///
/// Writing through it does not set the change flag, see
/// [`Binding::mark_changed`](crate::access::Binding::mark_changed).
#[derive(Debug)]
pub enum PropertyMut<'a> {
    Boolean(&'a mut bool),
    Integer(&'a mut i32),
    Float(&'a mut f32),
    String(&'a mut String),
    FileName(&'a mut String),
    Color(&'a mut Color),
    Enum {
        value: &'a mut i32,
        domain: &'a EnumDescriptor,
    },
    EnumString {
        value: &'a mut String,
        domain: &'a EnumDescriptor,
    },
    Transform(&'a mut Transform),
    Texture(&'a mut TextureRef),
    AnimGraph(&'a mut AnimGraphRef),
    Entity(&'a mut EntityRef),
    Array(ArrayMut<'a>),
    Callback,
}

impl PropertyRef<'_> {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyRef::Boolean(_) => PropertyKind::Boolean,
            PropertyRef::Integer(_) => PropertyKind::Integer,
            PropertyRef::Float(_) => PropertyKind::Float,
            PropertyRef::String(_) => PropertyKind::String,
            PropertyRef::FileName(_) => PropertyKind::FileName,
            PropertyRef::Color(_) => PropertyKind::Color,
            PropertyRef::Enum { .. } => PropertyKind::Enum,
            PropertyRef::EnumString { .. } => PropertyKind::EnumString,
            PropertyRef::Transform(_) => PropertyKind::Transform,
            PropertyRef::Texture(_) => PropertyKind::Asset(AssetKind::Texture),
            PropertyRef::AnimGraph(_) => PropertyKind::Asset(AssetKind::AnimGraph),
            PropertyRef::Entity(_) => PropertyKind::EntityReference,
            PropertyRef::Array(_) => PropertyKind::Array,
            PropertyRef::Callback => PropertyKind::Callback,
        }
    }
}

pub(crate) fn property_ref<'a, T: 'static>(
    schema: &'a Schema<T>,
    descriptor: &'a PropertyDescriptor<T>,
    owner: &'a T,
) -> PropertyRef<'a> {
    match descriptor.access() {
        Access::Boolean { field, .. } => PropertyRef::Boolean(field.get(owner)),
        Access::Integer { field, .. } => PropertyRef::Integer(field.get(owner)),
        Access::Float { field, .. } => PropertyRef::Float(field.get(owner)),
        Access::String { field, .. } => PropertyRef::String(field.get(owner)),
        Access::FileName { field, .. } => PropertyRef::FileName(field.get(owner)),
        Access::Color { field, .. } => PropertyRef::Color(field.get(owner)),
        Access::Enum { field, domain } => PropertyRef::Enum {
            value: field.get(owner),
            domain: schema.enum_descriptor(*domain),
        },
        Access::EnumString { field, domain } => PropertyRef::EnumString {
            value: field.get(owner),
            domain: schema.enum_descriptor(*domain),
        },
        Access::Transform { field } => PropertyRef::Transform(field.get(owner)),
        Access::Texture { field } => PropertyRef::Texture(field.get(owner)),
        Access::AnimGraph { field } => PropertyRef::AnimGraph(field.get(owner)),
        Access::Entity { field } => PropertyRef::Entity(field.get(owner)),
        Access::Array { adapter } => {
            PropertyRef::Array(ArrayRef::new(adapter.elements(owner), adapter.element_schema()))
        }
        Access::Callback { .. } => PropertyRef::Callback,
    }
}

pub(crate) fn property_mut<'a, T: 'static>(
    schema: &'a Schema<T>,
    descriptor: &'a PropertyDescriptor<T>,
    owner: &'a mut T,
) -> PropertyMut<'a> {
    match descriptor.access() {
        Access::Boolean { field, .. } => PropertyMut::Boolean(field.get_mut(owner)),
        Access::Integer { field, .. } => PropertyMut::Integer(field.get_mut(owner)),
        Access::Float { field, .. } => PropertyMut::Float(field.get_mut(owner)),
        Access::String { field, .. } => PropertyMut::String(field.get_mut(owner)),
        Access::FileName { field, .. } => PropertyMut::FileName(field.get_mut(owner)),
        Access::Color { field, .. } => PropertyMut::Color(field.get_mut(owner)),
        Access::Enum { field, domain } => PropertyMut::Enum {
            value: field.get_mut(owner),
            domain: schema.enum_descriptor(*domain),
        },
        Access::EnumString { field, domain } => PropertyMut::EnumString {
            value: field.get_mut(owner),
            domain: schema.enum_descriptor(*domain),
        },
        Access::Transform { field } => PropertyMut::Transform(field.get_mut(owner)),
        Access::Texture { field } => PropertyMut::Texture(field.get_mut(owner)),
        Access::AnimGraph { field } => PropertyMut::AnimGraph(field.get_mut(owner)),
        Access::Entity { field } => PropertyMut::Entity(field.get_mut(owner)),
        Access::Array { adapter } => PropertyMut::Array(ArrayMut::new(
            adapter.elements_mut(owner),
            adapter.element_schema(),
        )),
        Access::Callback { .. } => PropertyMut::Callback,
    }
}
