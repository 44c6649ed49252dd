//! Items used by `#[derive(Properties)]` output. Not a public API.

pub use crate::info::EnumDomain;
pub use crate::schema::{Field, Properties, PropertyValue, SchemaBuilder};

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::Properties;
    use crate::registry::SchemaRegistry;

    /// One registration function, submitted per `auto_register` type.
    pub struct AutoRegister(pub fn(&mut SchemaRegistry));

    inventory::collect!(AutoRegister);

    #[inline]
    pub fn register_type<T: Properties>(registry: &mut SchemaRegistry) {
        registry.register::<T>();
    }

    fn availability_marker(_: &mut SchemaRegistry) {}

    // Always submitted, so an empty collection means the platform is unsupported.
    inventory::submit! { AutoRegister(availability_marker) }

    /// Runs every submitted registration, returns `false` if none ran.
    pub(crate) fn register_types(registry: &mut SchemaRegistry) -> bool {
        let mut available = false;
        for item in inventory::iter::<AutoRegister> {
            (item.0)(registry);
            available = true;
        }
        available
    }
}
