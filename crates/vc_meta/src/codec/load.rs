use crate::access::RootId;
use crate::codec::{COUNT_FIELD, ELEMENT_BLOCK, LoadContext, LoadError, PathSegment, UID_FIELD};
use crate::document::{DocumentError, DocumentReader};
use crate::ops::CollectionAdapter;
use crate::scene::{EntityId, EntityRef};
use crate::schema::{Access, PropertyDescriptor, Schema};

/// Reads every property present in the current block.
pub(crate) fn load<T: 'static>(
    schema: &Schema<T>,
    owner: &mut T,
    root: RootId,
    reader: &mut dyn DocumentReader,
    cx: &mut LoadContext<'_>,
) -> Result<(), LoadError> {
    for descriptor in schema.iter() {
        cx.enter(PathSegment::Property {
            index: descriptor.index(),
            name: descriptor.name(),
        });
        let result = load_property(descriptor, owner, root, reader, cx);
        cx.leave();
        result?;
    }
    Ok(())
}

fn load_property<T: 'static>(
    descriptor: &PropertyDescriptor<T>,
    owner: &mut T,
    root: RootId,
    reader: &mut dyn DocumentReader,
    cx: &mut LoadContext<'_>,
) -> Result<(), LoadError> {
    let name = descriptor.name();
    match descriptor.access() {
        Access::Boolean { field, .. } => {
            if let Some(value) = cx.accept(reader.read_bool(name))? {
                *field.get_mut(owner) = value;
            }
        }
        Access::Integer { field, .. } | Access::Enum { field, .. } => {
            if let Some(value) = cx.accept(read_i32(reader, name))? {
                *field.get_mut(owner) = value;
            }
        }
        Access::Float { field, .. } => {
            if let Some(value) = cx.accept(reader.read_float(name))? {
                *field.get_mut(owner) = value;
            }
        }
        Access::String { field, .. }
        | Access::FileName { field, .. }
        | Access::EnumString { field, .. } => {
            if let Some(value) = cx.accept(reader.read_string(name))? {
                *field.get_mut(owner) = value;
            }
        }
        Access::Color { field, .. } => {
            if let Some(value) = cx.accept(reader.read_color(name))? {
                *field.get_mut(owner) = value;
            }
        }
        Access::Transform { field } => {
            let read = field.get_mut(owner).load(reader, name).map(Some);
            cx.accept(read)?;
        }
        Access::Texture { field } => {
            let read = field.get_mut(owner).load_data(reader, name, cx.assets());
            cx.accept(read.map(Some))?;
        }
        Access::AnimGraph { field } => {
            let read = field.get_mut(owner).load_data(reader, name, cx.assets());
            cx.accept(read.map(Some))?;
        }
        Access::Entity { field } => {
            if !reader.enter_block(name) {
                return Ok(());
            }
            let uid = read_uid(reader);
            reader.leave_block();
            match cx.accept(uid)? {
                Some(Some(target)) => {
                    *field.get_mut(owner) = EntityRef::unresolved(target);
                    cx.defer(target);
                }
                Some(None) => field.get_mut(owner).clear(),
                None => {}
            }
        }
        Access::Array { adapter } => {
            if !reader.enter_block(name) {
                return Ok(());
            }
            let result = load_elements(&**adapter, owner, root, reader, cx);
            reader.leave_block();
            result?;
        }
        Access::Callback { .. } => {}
    }
    Ok(())
}

fn load_elements<T: 'static>(
    adapter: &dyn CollectionAdapter<T>,
    owner: &mut T,
    root: RootId,
    reader: &mut dyn DocumentReader,
    cx: &mut LoadContext<'_>,
) -> Result<(), LoadError> {
    let Some(count) = cx.accept(reader.read_int(COUNT_FIELD))? else {
        return Ok(());
    };
    let Ok(count) = usize::try_from(count) else {
        return Err(LoadError::InvalidCount {
            path: cx.path().clone(),
            count,
        });
    };

    // Grow one element per stored entry, never from `count` alone.
    let schema = adapter.element_schema();
    let mut loaded = 0;
    while loaded < count {
        if !reader.enter_block(ELEMENT_BLOCK) {
            log::warn!(
                "`{}` declares {count} elements but holds {loaded}",
                cx.path()
            );
            break;
        }
        if loaded >= adapter.len(owner) {
            adapter.push_back(owner);
        }
        cx.enter(PathSegment::Element(loaded));
        let result = match adapter.item_mut(owner, loaded) {
            Some(item) => schema.load(item, root, reader, cx),
            None => Ok(()),
        };
        cx.leave();
        reader.leave_block();
        result?;
        loaded += 1;
    }
    adapter.resize(owner, loaded);
    Ok(())
}

fn read_i32(reader: &mut dyn DocumentReader, name: &str) -> Result<Option<i32>, DocumentError> {
    match reader.read_int(name)? {
        Some(value) => i32::try_from(value)
            .map(Some)
            .map_err(|_| DocumentError::out_of_range(name, value)),
        None => Ok(None),
    }
}

// `Some(None)` is a stored empty reference.
fn read_uid(reader: &mut dyn DocumentReader) -> Result<Option<Option<EntityId>>, DocumentError> {
    match reader.read_int(UID_FIELD)? {
        Some(0) => Ok(Some(None)),
        Some(value) => u32::try_from(value)
            .ok()
            .and_then(EntityId::new)
            .map(|id| Some(Some(id)))
            .ok_or_else(|| DocumentError::out_of_range(UID_FIELD, value)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::{LoadContext, LoadError, LoadOptions, MismatchPolicy};
    use crate::document::{DocNode, DocumentError, NodeKind, NodeReader, NodeWriter};
    use crate::field;
    use crate::registry::SchemaRegistry;
    use crate::scene::EntityId;
    use crate::schema::{Properties, SchemaBuilder};
    use crate::value::Color;

    #[derive(Default, Debug, PartialEq)]
    struct Primitives {
        flag: bool,
        count: i32,
        ratio: f32,
        name: String,
        tint: Color,
    }

    impl Properties for Primitives {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.boolean("flag", field!(Primitives, flag), false);
            schema.integer("count", field!(Primitives, count), 0);
            schema.float("ratio", field!(Primitives, ratio), 0.0);
            schema.string("name", field!(Primitives, name), "");
            schema.color("tint", field!(Primitives, tint), Color::WHITE);
        }
    }

    #[test]
    fn primitives_round_trip() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Primitives>();
        let mut source = Primitives {
            flag: true,
            count: -123_456,
            ratio: 0.1 + 0.2,
            name: "héllo".into(),
            tint: Color::new(0.1, 0.2, 0.3, 0.4),
        };

        let mut writer = NodeWriter::new();
        schema.prepare(&mut source).save(&mut writer).unwrap();
        let doc = writer.finish().unwrap();
        // Through text as well, to cover the serde layer.
        let doc: DocNode = serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();

        let mut target = Primitives::default();
        let mut cx = LoadContext::detached();
        schema
            .prepare(&mut target)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap();

        assert_eq!(target, source);
        assert_eq!(target.ratio.to_bits(), source.ratio.to_bits());
    }

    #[test]
    fn absent_fields_are_untouched() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Primitives>();
        let doc: DocNode = serde_json::from_str(r#"{ "count": 4 }"#).unwrap();

        let mut target = Primitives {
            name: "kept".into(),
            ..Primitives::default()
        };
        let mut cx = LoadContext::detached();
        schema
            .prepare(&mut target)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap();
        assert_eq!(target.count, 4);
        assert_eq!(target.name, "kept");
    }

    #[test]
    fn mismatch_is_an_error_by_default() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Primitives>();
        let doc: DocNode = serde_json::from_str(r#"{ "flag": 1, "count": 9 }"#).unwrap();

        let mut target = Primitives::default();
        let mut cx = LoadContext::detached();
        let error = schema
            .prepare(&mut target)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap_err();
        match error {
            LoadError::Document { path, source } => {
                assert_eq!(path.to_string(), "flag");
                assert_eq!(
                    source,
                    DocumentError::TypeMismatch {
                        field: "flag".into(),
                        expected: NodeKind::Bool,
                        found: NodeKind::Int,
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mismatch_can_be_skipped() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Primitives>();
        let doc: DocNode =
            serde_json::from_str(r#"{ "flag": 1, "count": 99999999999, "ratio": 2 }"#).unwrap();

        let mut target = Primitives {
            count: 5,
            ..Primitives::default()
        };
        let mut cx = LoadContext::detached().with_options(LoadOptions {
            mismatch: MismatchPolicy::Skip,
        });
        schema
            .prepare(&mut target)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap();
        assert!(!target.flag);
        assert_eq!(target.count, 5);
        assert_eq!(target.ratio, 2.0);
    }

    #[derive(Default)]
    struct Item {
        id: i32,
    }

    impl Properties for Item {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.integer("id", field!(Item, id), 0);
        }
    }

    #[derive(Default)]
    struct Bag {
        items: Vec<Item>,
    }

    impl Properties for Bag {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.array("items", field!(Bag, items));
        }
    }

    #[test]
    fn load_truncates_to_count() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Bag>();
        let doc: DocNode = serde_json::from_str(
            r#"{ "items": { "count": 3, "Elem": [{ "id": 10 }, { "id": 11 }, { "id": 12 }] } }"#,
        )
        .unwrap();

        let mut bag = Bag {
            items: (0..5).map(|id| Item { id }).collect(),
        };
        let mut cx = LoadContext::detached();
        schema
            .prepare(&mut bag)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap();
        let ids: Vec<i32> = bag.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, [10, 11, 12]);
    }

    #[test]
    fn negative_count_is_rejected() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Bag>();
        let doc: DocNode = serde_json::from_str(r#"{ "items": { "count": -1 } }"#).unwrap();

        let mut bag = Bag::default();
        let mut cx = LoadContext::detached();
        let error = schema
            .prepare(&mut bag)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap_err();
        assert!(matches!(error, LoadError::InvalidCount { count: -1, .. }));
    }

    #[test]
    fn count_beyond_stored_elements_is_clamped() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Bag>();
        let doc: DocNode = serde_json::from_str(
            r#"{ "items": { "count": 9223372036854775807, "Elem": [{ "id": 4 }, { "id": 5 }] } }"#,
        )
        .unwrap();

        let mut bag = Bag::default();
        let mut cx = LoadContext::detached();
        schema
            .prepare(&mut bag)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap();
        let ids: Vec<i32> = bag.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, [4, 5]);

        let doc: DocNode =
            serde_json::from_str(r#"{ "items": { "count": 9223372036854775807 } }"#).unwrap();
        schema
            .prepare(&mut bag)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap();
        assert!(bag.items.is_empty());
    }

    #[test]
    fn element_errors_carry_their_path() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Bag>();
        let doc: DocNode = serde_json::from_str(
            r#"{ "items": { "count": 2, "Elem": [{ "id": 1 }, { "id": "two" }] } }"#,
        )
        .unwrap();

        let mut bag = Bag::default();
        let mut cx = LoadContext::detached();
        let error = schema
            .prepare(&mut bag)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap_err();
        assert!(error.to_string().starts_with("cannot load `items/Elem[1]/id`"));
    }

    #[derive(Default)]
    struct Follower {
        target: crate::scene::EntityRef,
    }

    impl Properties for Follower {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.entity("target", field!(Follower, target));
        }
    }

    #[test]
    fn entity_reference_is_deferred() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Follower>();
        let doc: DocNode = serde_json::from_str(r#"{ "target": { "uid": 42 } }"#).unwrap();

        let mut follower = Follower::default();
        let mut cx = LoadContext::detached();
        schema
            .prepare(&mut follower)
            .load(&mut NodeReader::new(&doc), &mut cx)
            .unwrap();

        let target = EntityId::new(42);
        assert_eq!(follower.target.uid(), target);
        assert!(follower.target.entity().is_none());
        assert_eq!(cx.deferred().len(), 1);
        assert_eq!(Some(cx.deferred()[0].target), target);
        assert_eq!(cx.deferred()[0].path.to_string(), "target");
    }
}
