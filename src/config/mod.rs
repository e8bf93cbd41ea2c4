//! The build configuration handle and its registration descriptors.
//!
//! The host engine owns the build lifecycle; this module owns the mutable
//! handle it passes to the registrar. Every registration method reduces to
//! applying a [`Registration`] descriptor, so a test can drive the handle
//! with plain data instead of a live engine.

pub mod settings;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use minijinja::{Environment, value::Value};
use thiserror::Error;

use crate::filters::TemplateFilter;
use crate::markdown::MarkdownRenderer;
use crate::plugins::{PassthroughCopy, Plugin};

/// Errors raised while using a configured handle.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no template library registered for format: {format}")]
    UnknownFormat { format: String },
}

/// Input/output directory pair returned once at the end of setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSettings {
    /// Directory containing source content.
    pub input: PathBuf,
    /// Directory generated output is written to.
    pub output: PathBuf,
}

impl Default for DirSettings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("src"),
            output: PathBuf::from("_site"),
        }
    }
}

impl DirSettings {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// A single, independent configuration step.
///
/// The registrar's setup sequence is an ordered list of these; none of them
/// depends on another having been applied first.
pub enum Registration {
    /// Register a plugin by value.
    Plugin(Box<dyn Plugin>),
    /// Register a named filter callable from templates.
    Filter {
        name: String,
        filter: Box<dyn TemplateFilter>,
    },
    /// Copy files under `source` verbatim into the output tree.
    PassthroughCopy { source: PathBuf },
    /// Install a markdown renderer as the handler for the given formats.
    TemplateLibrary {
        formats: Vec<String>,
        renderer: MarkdownRenderer,
    },
}

/// Mutable configuration handle, constructed fresh per build invocation.
///
/// Borrowed by the registrar for the duration of one setup call; the host
/// queries it afterwards through the accessor surface.
pub struct BuildConfig {
    env: Environment<'static>,
    filters: HashMap<String, Arc<dyn TemplateFilter>>,
    plugins: Vec<Box<dyn Plugin>>,
    passthrough: Vec<PassthroughCopy>,
    libraries: HashMap<String, Arc<MarkdownRenderer>>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            filters: HashMap::new(),
            plugins: Vec::new(),
            passthrough: Vec::new(),
            libraries: HashMap::new(),
        }
    }

    /// Applies one registration descriptor to the handle.
    pub fn apply(&mut self, registration: Registration) {
        match registration {
            Registration::Plugin(plugin) => self.plugins.push(plugin),
            Registration::Filter { name, filter } => {
                let filter: Arc<dyn TemplateFilter> = Arc::from(filter);
                let hook = Arc::clone(&filter);
                self.env.add_filter(
                    name.clone(),
                    move |value: Value| -> Result<Value, minijinja::Error> { hook.apply(&value) },
                );
                self.filters.insert(name, filter);
            }
            Registration::PassthroughCopy { source } => {
                self.passthrough.push(PassthroughCopy::new(source));
            }
            Registration::TemplateLibrary { formats, renderer } => {
                let renderer = Arc::new(renderer);
                for format in formats {
                    self.libraries.insert(format, Arc::clone(&renderer));
                }
            }
        }
    }

    /// Registers a plugin.
    pub fn add_plugin(&mut self, plugin: impl Plugin + 'static) {
        self.apply(Registration::Plugin(Box::new(plugin)));
    }

    /// Registers a named filter, callable from templates.
    pub fn add_filter(&mut self, name: &str, filter: impl TemplateFilter + 'static) {
        self.apply(Registration::Filter {
            name: name.to_string(),
            filter: Box::new(filter),
        });
    }

    /// Registers a verbatim-copy rule for files under `source`.
    pub fn add_passthrough_copy(&mut self, source: impl Into<PathBuf>) {
        self.apply(Registration::PassthroughCopy {
            source: source.into(),
        });
    }

    /// Installs `renderer` as the template library for each of `formats`.
    pub fn set_library(&mut self, formats: &[&str], renderer: MarkdownRenderer) {
        self.apply(Registration::TemplateLibrary {
            formats: formats.iter().map(|f| f.to_string()).collect(),
            renderer,
        });
    }

    /// The template environment filters are registered into.
    pub fn env(&self) -> &Environment<'static> {
        &self.env
    }

    /// Looks up a registered filter by name.
    pub fn filter(&self, name: &str) -> Option<Arc<dyn TemplateFilter>> {
        self.filters.get(name).cloned()
    }

    /// Looks up a registered plugin by name.
    pub fn plugin(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// All registered passthrough-copy rules, in registration order.
    pub fn passthrough_rules(&self) -> &[PassthroughCopy] {
        &self.passthrough
    }

    /// The template library installed for `format`, if any.
    pub fn library_for(&self, format: &str) -> Option<&MarkdownRenderer> {
        self.libraries.get(format).map(|r| r.as_ref())
    }

    /// Renders one page the way the host engine would: the library for
    /// `format` renders the source (routing fenced code through the
    /// registered highlighter, if one handles this format), then every
    /// applicable plugin post-processes the HTML in registration order.
    pub fn render_page(&self, format: &str, source: &str) -> Result<String, ConfigError> {
        let library = self.library_for(format).ok_or_else(|| ConfigError::UnknownFormat {
            format: format.to_string(),
        })?;

        let highlighter = self
            .plugins
            .iter()
            .filter(|p| p.handles(format))
            .find_map(|p| p.code_highlighter());

        let html = library.render_with(source, highlighter);
        Ok(self
            .plugins
            .iter()
            .filter(|p| p.handles(format))
            .fold(html, |html, plugin| plugin.postprocess(html)))
    }
}
