use core::fmt;

// -----------------------------------------------------------------------------
// AssetKind

/// The asset family behind an asset reference property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    AnimGraph,
}

impl AssetKind {
    /// Returns a short, stable name of the asset family.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            AssetKind::Texture => "Texture",
            AssetKind::AnimGraph => "AnimGraph",
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyKind

/// The semantic kind of a property.
///
/// Every load, save, copy and default routine matches this set exhaustively,
/// see [`Access`](crate::schema::Access) for the payload carried by each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Boolean,
    Integer,
    Float,
    String,
    /// A string holding a path, edited with a file picker.
    FileName,
    /// Four `f32` components.
    Color,
    /// An integer restricted to an [`EnumDescriptor`](crate::info::EnumDescriptor).
    Enum,
    /// A string restricted to the labels of an [`EnumDescriptor`](crate::info::EnumDescriptor).
    EnumString,
    Transform,
    Asset(AssetKind),
    /// A link to another scene entity, stored by id.
    EntityReference,
    /// A resizable sequence of sub-objects with their own schema.
    Array,
    /// An editor action, never persisted.
    Callback,
}

impl PropertyKind {
    /// Returns `false` for kinds that are skipped by load and save.
    #[inline]
    pub const fn is_persistent(self) -> bool {
        !matches!(self, PropertyKind::Callback)
    }

    /// Returns a short, stable name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            PropertyKind::Boolean => "Boolean",
            PropertyKind::Integer => "Integer",
            PropertyKind::Float => "Float",
            PropertyKind::String => "String",
            PropertyKind::FileName => "FileName",
            PropertyKind::Color => "Color",
            PropertyKind::Enum => "Enum",
            PropertyKind::EnumString => "EnumString",
            PropertyKind::Transform => "Transform",
            PropertyKind::Asset(kind) => kind.name(),
            PropertyKind::EntityReference => "EntityReference",
            PropertyKind::Array => "Array",
            PropertyKind::Callback => "Callback",
        }
    }
}

impl fmt::Display for PropertyKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
