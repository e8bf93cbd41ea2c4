//! The build-configuration registrar.
//!
//! One linear registration sequence against the host's handle, executed once
//! per build invocation. The registrations are independent of one another;
//! none is expected to fail, and failures at render time (a malformed filter
//! input, say) surface through the delegated library unmodified.

use crate::config::{BuildConfig, DirSettings};
use crate::filters::{CssMin, Dump};
use crate::markdown::{AnchorOptions, MarkdownOptions, MarkdownRenderer};
use crate::plugins::{FeedPlugin, HighlightOptions, SafeLinks, SyntaxHighlight};

/// Registers every extension with the handle and returns the directory
/// settings: input `src`, output `_site`.
pub fn configure(config: &mut BuildConfig) -> DirSettings {
    config.add_plugin(FeedPlugin::new());
    config.add_plugin(SafeLinks::new());
    config.add_passthrough_copy("src/assets");
    config.add_filter("dump", Dump);
    config.add_filter("cssmin", CssMin);

    config.add_plugin(SyntaxHighlight::new(HighlightOptions {
        template_formats: vec!["njk".to_string(), "md".to_string()],
        always_wrap_line_highlights: true,
        trim: true,
        line_separator: "\n".to_string(),
    }));

    let markdown = MarkdownRenderer::new(MarkdownOptions {
        html: true,
        breaks: true,
        linkify: true,
        typographer: true,
    })
    .with_anchors(AnchorOptions::default());
    config.set_library(&["md"], markdown);

    DirSettings::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn configured() -> (BuildConfig, DirSettings) {
        let mut config = BuildConfig::new();
        let dirs = configure(&mut config);
        (config, dirs)
    }

    #[test]
    fn returns_fixed_directories() {
        let (_, dirs) = configured();
        assert_eq!(dirs.input, PathBuf::from("src"));
        assert_eq!(dirs.output, PathBuf::from("_site"));
    }

    #[test]
    fn directories_ignore_prior_handle_state() {
        let mut config = BuildConfig::new();
        config.add_passthrough_copy("elsewhere");
        config.add_plugin(FeedPlugin::new());

        assert_eq!(configure(&mut config), DirSettings::default());
    }

    #[test]
    fn registers_both_filters() {
        let (config, _) = configured();
        assert!(config.filter("cssmin").is_some());
        assert!(config.filter("dump").is_some());
    }

    #[test]
    fn registers_feed_and_safe_links_plugins() {
        let (config, _) = configured();
        assert!(config.plugin("feed").is_some());
        assert!(config.plugin("safe-links").is_some());
        assert!(config.plugin("syntax-highlight").is_some());
    }

    #[test]
    fn registers_assets_passthrough() {
        let (config, _) = configured();
        let rules = config.passthrough_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].source(), &PathBuf::from("src/assets"));
    }

    #[test]
    fn installs_markdown_library_for_md() {
        let (config, _) = configured();
        let library = config.library_for("md").unwrap();
        assert!(library.options().html);
        assert!(library.options().breaks);
        assert!(library.options().linkify);
        assert!(library.options().typographer);
    }

    #[test]
    fn markdown_library_attaches_hidden_anchor_marker() {
        let (config, _) = configured();
        let html = config.library_for("md").unwrap().render("# Title");

        assert!(html.contains(r#"<h1 id="title">"#));
        assert!(html.contains(r#"class="direct-link""#));
        assert!(html.contains(r#"aria-hidden="true""#));
        assert!(html.contains(">#</a>"));
    }
}
