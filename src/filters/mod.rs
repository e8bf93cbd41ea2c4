//! Named filters callable from templates.
//!
//! Filters are pure, synchronous value transforms. Registering one wires it
//! into the handle's template environment under its name; failures surface as
//! template errors, never swallowed here.

mod cssmin;
mod dump;

pub use cssmin::CssMin;
pub use dump::Dump;

use minijinja::value::Value;

/// A named pure function exposed to templates.
pub trait TemplateFilter: Send + Sync {
    /// Applies the filter to one template value.
    fn apply(&self, value: &Value) -> Result<Value, minijinja::Error>;
}
