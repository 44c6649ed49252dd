use core::any::Any;

use crate::access::{PropertyRef, RootId};
use crate::ops::{ArrayRef, CollectionAdapter};
use crate::schema::{Access, ErasedSchema, PropertyDescriptor, Schema, SchemaMismatch};

/// Copies the properties of `source` whose name and kind match, an integer
/// matching an enumeration.
pub(crate) fn copy_from<T: 'static>(
    schema: &Schema<T>,
    owner: &mut T,
    root: RootId,
    source: &dyn Any,
    source_schema: &dyn ErasedSchema,
) -> Result<usize, SchemaMismatch> {
    if Any::type_id(source) != source_schema.owner_type_id() {
        return Err(SchemaMismatch {
            expected: source_schema.type_name(),
        });
    }
    let mut copied = 0;
    for descriptor in schema.iter() {
        let Some(index) = source_schema.index_of(descriptor.name()) else {
            continue;
        };
        let Some(value) = source_schema.value(source, index) else {
            continue;
        };
        if copy_property(descriptor, owner, root, value)? {
            copied += 1;
        }
    }
    Ok(copied)
}

fn copy_property<T: 'static>(
    descriptor: &PropertyDescriptor<T>,
    owner: &mut T,
    root: RootId,
    value: PropertyRef<'_>,
) -> Result<bool, SchemaMismatch> {
    match (descriptor.access(), value) {
        (Access::Boolean { field, .. }, PropertyRef::Boolean(v)) => *field.get_mut(owner) = *v,
        // An enumeration stores its integer, so both kinds copy into each other.
        (
            Access::Integer { field, .. } | Access::Enum { field, .. },
            PropertyRef::Integer(v) | PropertyRef::Enum { value: v, .. },
        ) => *field.get_mut(owner) = *v,
        (Access::Float { field, .. }, PropertyRef::Float(v)) => *field.get_mut(owner) = *v,
        (Access::String { field, .. }, PropertyRef::String(v))
        | (Access::FileName { field, .. }, PropertyRef::FileName(v))
        | (Access::EnumString { field, .. }, PropertyRef::EnumString { value: v, .. }) => {
            field.get_mut(owner).clone_from(v);
        }
        (Access::Color { field, .. }, PropertyRef::Color(v)) => *field.get_mut(owner) = *v,
        (Access::Transform { field }, PropertyRef::Transform(v)) => *field.get_mut(owner) = *v,
        (Access::Texture { field }, PropertyRef::Texture(v)) => field.get_mut(owner).clone_from(v),
        (Access::AnimGraph { field }, PropertyRef::AnimGraph(v)) => {
            field.get_mut(owner).clone_from(v);
        }
        (Access::Entity { field }, PropertyRef::Entity(v)) => field.get_mut(owner).clone_from(v),
        (Access::Array { adapter }, PropertyRef::Array(source)) => {
            copy_elements(&**adapter, owner, root, source)?;
        }
        (Access::Callback { .. }, _) => return Ok(false),
        (access, value) => {
            log::debug!(
                "`{}` is not copied: {} from {}",
                descriptor.name(),
                access.kind(),
                value.kind()
            );
            return Ok(false);
        }
    }
    Ok(true)
}

// Element-wise, so the destination never aliases the source elements.
fn copy_elements<T: 'static>(
    adapter: &dyn CollectionAdapter<T>,
    owner: &mut T,
    root: RootId,
    source: ArrayRef<'_>,
) -> Result<(), SchemaMismatch> {
    adapter.resize(owner, source.len());
    let schema = adapter.element_schema();
    for index in 0..source.len() {
        let (Some(from), Some(to)) = (source.item(index), adapter.item_mut(owner, index)) else {
            break;
        };
        schema.copy_from(to, root, from, source.schema())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::field;
    use crate::registry::SchemaRegistry;
    use crate::info::EnumDescriptor;
    use crate::schema::{Properties, SchemaBuilder};
    use crate::value::{AssetCache, AssetCatalog, Texture, TextureRef};

    #[derive(Default, Debug, PartialEq)]
    struct Frame {
        duration: f32,
        label: String,
    }

    impl Properties for Frame {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.float("duration", field!(Frame, duration), 0.1);
            schema.string("label", field!(Frame, label), "");
        }
    }

    #[derive(Default)]
    struct Clip {
        frames: Vec<Frame>,
        sheet: TextureRef,
        speed: f32,
    }

    impl Properties for Clip {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.array("frames", field!(Clip, frames));
            schema.texture("sheet", field!(Clip, sheet));
            schema.float("speed", field!(Clip, speed), 1.0);
        }
    }

    /// Same names as `Clip`, one with another kind.
    #[derive(Default)]
    struct ClipPreview {
        speed: i32,
        frames: Vec<Frame>,
    }

    impl Properties for ClipPreview {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.integer("speed", field!(ClipPreview, speed), 0);
            schema.array("frames", field!(ClipPreview, frames));
        }
    }

    fn prototype(cache: &AssetCache) -> Clip {
        Clip {
            frames: vec![
                Frame {
                    duration: 0.25,
                    label: "a".into(),
                },
                Frame {
                    duration: 0.5,
                    label: "b".into(),
                },
            ],
            sheet: TextureRef::new(cache.texture("sheet.png").unwrap()),
            speed: 2.0,
        }
    }

    #[test]
    fn deep_copies_elements_and_shares_assets() {
        let mut cache = AssetCache::default();
        cache.insert_texture(Texture {
            path: "sheet.png".into(),
            width: 256,
            height: 256,
        });
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Clip>();
        let source = prototype(&cache);

        let mut copy = Clip::default();
        let copied = schema.prepare(&mut copy).copy_from(&source, &schema).unwrap();
        assert_eq!(copied, 3);
        assert_eq!(copy.frames, source.frames);
        assert!(copy.sheet.ptr_eq(&source.sheet));
        assert_eq!(copy.sheet.get().map(Arc::strong_count), Some(3));

        copy.frames[0].label.push('!');
        assert_eq!(source.frames[0].label, "a");
    }

    #[test]
    fn skips_other_kinds() {
        let mut registry = SchemaRegistry::new();
        let clip_schema = registry.schema::<Clip>();
        let preview_schema = registry.schema::<ClipPreview>();
        let source = Clip {
            frames: vec![Frame::default(), Frame::default()],
            sheet: TextureRef::empty(),
            speed: 2.0,
        };

        let mut preview = ClipPreview {
            speed: 9,
            frames: Vec::new(),
        };
        let copied = preview_schema
            .prepare(&mut preview)
            .copy_from(&source, &clip_schema)
            .unwrap();
        assert_eq!(copied, 1);
        assert_eq!(preview.speed, 9);
        assert_eq!(preview.frames.len(), 2);
    }

    const BLEND: EnumDescriptor = EnumDescriptor::new("Blend", &[("Alpha", 0), ("Add", 1)], 0);

    #[derive(Default)]
    struct Layer {
        blend: i32,
        order: i32,
    }

    impl Properties for Layer {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.enumeration("blend", field!(Layer, blend), BLEND);
            schema.integer("order", field!(Layer, order), 0);
        }
    }

    /// `Layer` with the kinds of `blend` and `order` swapped.
    #[derive(Default)]
    struct RawLayer {
        blend: i32,
        order: i32,
    }

    impl Properties for RawLayer {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.integer("blend", field!(RawLayer, blend), 0);
            schema.enumeration("order", field!(RawLayer, order), BLEND);
        }
    }

    #[test]
    fn integers_and_enumerations_copy_into_each_other() {
        let mut registry = SchemaRegistry::new();
        let layer_schema = registry.schema::<Layer>();
        let raw_schema = registry.schema::<RawLayer>();
        let source = Layer { blend: 1, order: 5 };

        let mut raw = RawLayer::default();
        let copied = raw_schema.prepare(&mut raw).copy_from(&source, &layer_schema).unwrap();
        assert_eq!(copied, 2);
        assert_eq!((raw.blend, raw.order), (1, 5));

        let mut back = Layer::default();
        raw.blend = 0;
        layer_schema.prepare(&mut back).copy_from(&raw, &raw_schema).unwrap();
        assert_eq!((back.blend, back.order), (0, 5));
    }
}
