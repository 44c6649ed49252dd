use crate::access::RootId;
use crate::codec::{COUNT_FIELD, ELEMENT_BLOCK, UID_FIELD};
use crate::document::DocumentWriter;
use crate::ops::CollectionAdapter;
use crate::schema::{Access, Schema, SchemaMismatch};

/// Writes every persistent property into the current block.
pub(crate) fn save<T: 'static>(
    schema: &Schema<T>,
    owner: &T,
    root: RootId,
    writer: &mut dyn DocumentWriter,
) -> Result<(), SchemaMismatch> {
    for descriptor in schema.iter() {
        let name = descriptor.name();
        match descriptor.access() {
            Access::Boolean { field, .. } => writer.write_bool(name, *field.get(owner)),
            Access::Integer { field, .. } | Access::Enum { field, .. } => {
                writer.write_int(name, i64::from(*field.get(owner)));
            }
            Access::Float { field, .. } => writer.write_float(name, *field.get(owner)),
            Access::String { field, .. }
            | Access::FileName { field, .. }
            | Access::EnumString { field, .. } => writer.write_string(name, field.get(owner)),
            Access::Color { field, .. } => writer.write_color(name, *field.get(owner)),
            Access::Transform { field } => field.get(owner).save(writer, name),
            Access::Texture { field } => field.get(owner).save_data(writer, name),
            Access::AnimGraph { field } => field.get(owner).save_data(writer, name),
            Access::Entity { field } => {
                let uid = field.get(owner).uid().map_or(0, |id| id.get());
                writer.start_block(Some(name));
                writer.write_int(UID_FIELD, i64::from(uid));
                writer.finish_block();
            }
            Access::Array { adapter } => {
                writer.start_block(Some(name));
                let result = save_elements(&**adapter, owner, root, writer);
                writer.finish_block();
                result?;
            }
            Access::Callback { .. } => {}
        }
    }
    Ok(())
}

fn save_elements<T: 'static>(
    adapter: &dyn CollectionAdapter<T>,
    owner: &T,
    root: RootId,
    writer: &mut dyn DocumentWriter,
) -> Result<(), SchemaMismatch> {
    let len = adapter.len(owner);
    writer.write_int(COUNT_FIELD, len as i64);
    writer.start_array(ELEMENT_BLOCK);
    let schema = adapter.element_schema();
    let mut result = Ok(());
    for index in 0..len {
        let Some(item) = adapter.item(owner, index) else {
            break;
        };
        writer.start_block(None);
        result = schema.save(item, root, writer);
        writer.finish_block();
        if result.is_err() {
            break;
        }
    }
    writer.finish_array();
    result
}
