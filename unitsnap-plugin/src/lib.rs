//! UnitSnap Plugin System
//!
//! Every conversion family registers its operations as named
//! [`FunctionPlugin`]s so dynamic callers can discover, document and invoke
//! them by name.

pub mod args;
mod context;
mod registry;
mod traits;

pub use context::{EvalContext, DEFAULT_BASE_FONT_SIZE};
pub use registry::PluginRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::args::*;
    pub use crate::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry};
    pub use unitsnap_core::prelude::*;
}
