//! Build plugins: feed generation, link safety, syntax highlighting, and
//! passthrough copy.
//!
//! Each plugin sits behind the narrow [`Plugin`] seam so the handle never
//! needs to know concrete types; the host drives them through the hooks.

pub mod feed;
mod highlight;
mod passthrough;
mod safe_links;

pub use feed::{ChannelSettings, FeedEntry, FeedPlugin};
pub use highlight::{HighlightOptions, SyntaxHighlight};
pub use passthrough::{PassthroughCopy, PassthroughError};
pub use safe_links::SafeLinks;

use crate::markdown::CodeHighlighter;

/// A registered build extension.
///
/// Hooks default to no-ops; a plugin overrides only the phases it
/// participates in.
pub trait Plugin: Send + Sync {
    /// Stable name the host looks the plugin up by.
    fn name(&self) -> &'static str;

    /// Whether this plugin applies to pages of the given template format.
    fn handles(&self, _format: &str) -> bool {
        true
    }

    /// The code-block highlighting facet, if this plugin provides one.
    fn code_highlighter(&self) -> Option<&dyn CodeHighlighter> {
        None
    }

    /// Post-processes a fully rendered page.
    fn postprocess(&self, html: String) -> String {
        html
    }
}
