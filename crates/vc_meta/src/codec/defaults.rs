use crate::schema::{Access, Schema};

/// Writes the declared default of every property of `owner`.
pub(crate) fn set_defaults<T: 'static>(schema: &Schema<T>, owner: &mut T) {
    for descriptor in schema.iter() {
        match descriptor.access() {
            Access::Boolean { field, default } => *field.get_mut(owner) = *default,
            Access::Integer { field, default } => *field.get_mut(owner) = *default,
            Access::Float { field, default } => *field.get_mut(owner) = *default,
            Access::String { field, default } | Access::FileName { field, default } => {
                let value = field.get_mut(owner);
                value.clear();
                value.push_str(schema.string(*default));
            }
            Access::Color { field, default } => *field.get_mut(owner) = *default,
            Access::Enum { field, domain } => {
                *field.get_mut(owner) = schema.enum_descriptor(*domain).default_value();
            }
            Access::EnumString { field, .. } => field.get_mut(owner).clear(),
            Access::Transform { field } => field.get_mut(owner).reset(),
            Access::Texture { field } => field.get_mut(owner).release(),
            Access::AnimGraph { field } => field.get_mut(owner).release(),
            Access::Entity { field } => field.get_mut(owner).clear(),
            Access::Array { .. } | Access::Callback { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::field;
    use crate::info::EnumDescriptor;
    use crate::registry::SchemaRegistry;
    use crate::scene::{EntityId, EntityRef};
    use crate::schema::{Properties, SchemaBuilder};
    use crate::value::{Color, Transform};

    const QUALITY: EnumDescriptor =
        EnumDescriptor::new("Quality", &[("Low", 10), ("Medium", 20), ("High", 30)], 2);

    struct Emitter {
        tint: Color,
        quality: i32,
        rate: f32,
        label: String,
        preset: String,
        transform: Transform,
        target: EntityRef,
        children: Vec<Spark>,
    }

    impl Default for Emitter {
        fn default() -> Self {
            Self {
                tint: Color::TRANSPARENT,
                quality: -1,
                rate: -1.0,
                label: "stale".into(),
                preset: "stale".into(),
                transform: Transform {
                    scale: glam::Vec3::ZERO,
                    ..Transform::IDENTITY
                },
                target: EntityRef::unresolved(EntityId::new(5).unwrap()),
                children: vec![Spark::default()],
            }
        }
    }

    #[derive(Default)]
    struct Spark {
        life: f32,
    }

    impl Properties for Spark {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.float("life", field!(Spark, life), 1.0);
        }
    }

    impl Properties for Emitter {
        // Deliberately not in field order.
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.array("children", field!(Emitter, children));
            schema.string("label", field!(Emitter, label), "emitter");
            schema.float("rate", field!(Emitter, rate), 12.5);
            schema.enumeration("quality", field!(Emitter, quality), QUALITY);
            schema.enum_string("preset", field!(Emitter, preset), QUALITY);
            schema.color("tint", field!(Emitter, tint), Color::WHITE);
            schema.transform("transform", field!(Emitter, transform));
            schema.entity("target", field!(Emitter, target));
        }
    }

    #[test]
    fn every_default_is_written() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Emitter>();
        let mut emitter = Emitter::default();
        schema.prepare(&mut emitter).set_defaults();

        assert_eq!(emitter.tint, Color::WHITE);
        assert_eq!(emitter.quality, 30);
        assert_eq!(emitter.rate, 12.5);
        assert_eq!(emitter.label, "emitter");
        assert_eq!(emitter.preset, "");
        assert_eq!(emitter.transform, Transform::IDENTITY);
        assert!(emitter.target.uid().is_none());
        // Arrays keep their elements.
        assert_eq!(emitter.children.len(), 1);
        assert_eq!(emitter.children[0].life, 0.0);
    }
}
