use glam::Vec3;

use crate::document::{DocumentError, DocumentReader, DocumentWriter};

const AXES: [&str; 3] = ["x", "y", "z"];

// -----------------------------------------------------------------------------
// Transform

/// Placement of an entity.
///
/// `offset` is the pivot inside `size`, in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub size: Vec3,
    pub offset: Vec3,
}

impl Transform {
    /// Zero position and rotation, unit scale, centered pivot.
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
        size: Vec3::ZERO,
        offset: Vec3::splat(0.5),
    };

    /// Resets to [`IDENTITY`](Self::IDENTITY).
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Loads the block named `name`.
    ///
    /// Returns `Ok(false)` if the block is absent. Absent components keep
    /// their current value.
    pub fn load(
        &mut self,
        reader: &mut dyn DocumentReader,
        name: &str,
    ) -> Result<bool, DocumentError> {
        if !reader.enter_block(name) {
            return Ok(false);
        }
        let result = self.load_fields(reader);
        reader.leave_block();
        result.map(|()| true)
    }

    fn load_fields(&mut self, reader: &mut dyn DocumentReader) -> Result<(), DocumentError> {
        load_vec3(reader, "position", &mut self.position)?;
        load_vec3(reader, "rotation", &mut self.rotation)?;
        load_vec3(reader, "scale", &mut self.scale)?;
        load_vec3(reader, "size", &mut self.size)?;
        load_vec3(reader, "offset", &mut self.offset)
    }

    /// Saves as a block named `name`.
    pub fn save(&self, writer: &mut dyn DocumentWriter, name: &str) {
        writer.start_block(Some(name));
        save_vec3(writer, "position", self.position);
        save_vec3(writer, "rotation", self.rotation);
        save_vec3(writer, "scale", self.scale);
        save_vec3(writer, "size", self.size);
        save_vec3(writer, "offset", self.offset);
        writer.finish_block();
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn load_vec3(
    reader: &mut dyn DocumentReader,
    name: &str,
    value: &mut Vec3,
) -> Result<(), DocumentError> {
    if !reader.enter_block(name) {
        return Ok(());
    }
    let mut result = Ok(());
    for (axis, component) in AXES.into_iter().zip([&mut value.x, &mut value.y, &mut value.z]) {
        match reader.read_float(axis) {
            Ok(Some(v)) => *component = v,
            Ok(None) => {}
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }
    reader.leave_block();
    result
}

fn save_vec3(writer: &mut dyn DocumentWriter, name: &str, value: Vec3) {
    writer.start_block(Some(name));
    for (axis, component) in AXES.into_iter().zip(value.to_array()) {
        writer.write_float(axis, component);
    }
    writer.finish_block();
}
