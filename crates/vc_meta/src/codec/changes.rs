use core::any::TypeId;

use crate::schema::{Access, Schema};

/// Reads and clears every change flag of `schema` and of its element schemas.
///
/// `visited` holds the schemas already cleared, so recursive element types
/// are cleared once.
pub(crate) fn take_changed<T: 'static>(schema: &Schema<T>, visited: &mut Vec<TypeId>) -> bool {
    let type_id = TypeId::of::<T>();
    if visited.contains(&type_id) {
        return false;
    }
    visited.push(type_id);

    let mut changed = false;
    for descriptor in schema.iter() {
        // Every flag is cleared, so no short-circuit.
        changed |= descriptor.take_changed_flag();
        if let Access::Array { adapter } = descriptor.access() {
            changed |= adapter.element_schema().take_changed_with(visited);
        }
    }
    changed
}
