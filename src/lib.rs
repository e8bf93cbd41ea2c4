//! sitewire - extension wiring for a static-site build pipeline
//!
//! A host build engine constructs a [`BuildConfig`] handle once per build and
//! hands it to [`configure`], which registers template filters, plugins, a
//! passthrough-copy rule, and the markdown template library, then returns the
//! input/output directory settings. Registration is descriptor-driven: every
//! call reduces to applying a [`Registration`] value, so the whole sequence is
//! testable without a real engine.

pub mod config;
pub mod filters;
pub mod markdown;
pub mod plugins;
pub mod registrar;

pub use config::{BuildConfig, DirSettings, Registration, settings::Settings};
pub use registrar::configure;
