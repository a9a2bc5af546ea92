//! Wires the external readers and caches into the pure engine.

pub mod resolver;

pub use resolver::{ItemResolver, ResolveError, HUMANIZE_UNITS_RANGE};
