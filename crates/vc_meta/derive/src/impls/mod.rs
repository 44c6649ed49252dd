// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod properties;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use properties::impl_properties;

use auto_register::get_auto_register_impl;
