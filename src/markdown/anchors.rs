//! Heading anchors: slug ids plus a hidden permalink marker.

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};

/// Where the permalink marker sits relative to the heading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorPlacement {
    Before,
    After,
}

/// Options for the heading-anchor sub-extension.
#[derive(Debug, Clone)]
pub struct AnchorOptions {
    pub placement: AnchorPlacement,
    /// CSS class on the permalink marker.
    pub class: String,
    /// Visible marker symbol.
    pub symbol: String,
    /// Heading levels that receive anchors.
    pub levels: Vec<u8>,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            placement: AnchorPlacement::After,
            class: "direct-link".to_string(),
            symbol: "#".to_string(),
            levels: vec![1, 2, 3, 4],
        }
    }
}

fn level_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Slugify heading text for use as an HTML id.
///
/// Lowercases, replaces non-alphanumeric runs with hyphens, strips
/// leading/trailing hyphens.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_hyphen = true; // suppress leading hyphen
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Walks the event stream and rewrites configured headings to
/// `<hN id="slug">text <a class="…" href="#slug" aria-hidden="true">sym</a></hN>`.
///
/// Headings outside the configured levels, and headings whose slug comes out
/// empty, pass through unchanged.
pub(crate) fn inject_heading_anchors<'a>(
    events: Vec<Event<'a>>,
    options: &AnchorOptions,
) -> Vec<Event<'a>> {
    let mut out: Vec<Event<'a>> = Vec::with_capacity(events.len());
    let mut in_heading: Option<HeadingLevel> = None;
    let mut heading_text = String::new();
    let mut heading_events: Vec<Event<'a>> = Vec::new();

    for event in events {
        match &event {
            Event::Start(Tag::Heading { level, .. }) if options.levels.contains(&level_num(*level)) => {
                in_heading = Some(*level);
                heading_text.clear();
                heading_events.clear();
                heading_events.push(event);
            }
            Event::End(TagEnd::Heading(level)) if in_heading == Some(*level) => {
                let slug = slugify(&heading_text);
                let n = level_num(*level);

                if slug.is_empty() {
                    out.extend(heading_events.drain(..));
                    out.push(event);
                } else {
                    let marker = format!(
                        "<a class=\"{}\" href=\"#{}\" aria-hidden=\"true\">{}</a>",
                        options.class, slug, options.symbol
                    );
                    out.push(Event::Html(format!("<h{n} id=\"{slug}\">").into()));
                    if options.placement == AnchorPlacement::Before {
                        out.push(Event::Html(format!("{marker} ").into()));
                    }
                    // Inner events, minus the Start(Heading) we buffered.
                    for e in heading_events.drain(..).skip(1) {
                        out.push(e);
                    }
                    if options.placement == AnchorPlacement::After {
                        out.push(Event::Html(format!(" {marker}").into()));
                    }
                    out.push(Event::Html(format!("</h{n}>").into()));
                }
                in_heading = None;
            }
            Event::Text(text) if in_heading.is_some() => {
                heading_text.push_str(text);
                heading_events.push(event);
            }
            Event::Code(code) if in_heading.is_some() => {
                heading_text.push_str(code);
                heading_events.push(event);
            }
            _ if in_heading.is_some() => {
                heading_events.push(event);
            }
            _ => out.push(event),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{MarkdownOptions, MarkdownRenderer};

    fn render(source: &str, options: AnchorOptions) -> String {
        MarkdownRenderer::new(MarkdownOptions::default())
            .with_anchors(options)
            .render(source)
    }

    #[test]
    fn slugify_basics() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Leading & Trailing  "), "leading-trailing");
        assert_eq!(slugify("CamelCase123"), "camelcase123");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn heading_gets_id_and_marker() {
        let html = render("# Getting Started", AnchorOptions::default());
        assert!(html.contains(r#"<h1 id="getting-started">"#));
        assert!(html.contains(
            r##"<a class="direct-link" href="#getting-started" aria-hidden="true">#</a>"##
        ));
    }

    #[test]
    fn marker_follows_heading_text() {
        let html = render("## Usage", AnchorOptions::default());
        let text = html.find("Usage").unwrap();
        let marker = html.find("direct-link").unwrap();
        assert!(marker > text);
    }

    #[test]
    fn before_placement_leads_heading_text() {
        let options = AnchorOptions {
            placement: AnchorPlacement::Before,
            ..Default::default()
        };
        let html = render("## Usage", options);
        let text = html.find("Usage").unwrap();
        let marker = html.find("direct-link").unwrap();
        assert!(marker < text);
    }

    #[test]
    fn levels_outside_configuration_pass_through() {
        let html = render("##### Fine Print", AnchorOptions::default());
        assert!(html.contains("<h5>Fine Print</h5>"));
        assert!(!html.contains("direct-link"));
    }

    #[test]
    fn symbol_only_heading_passes_through() {
        let html = render("# !!!", AnchorOptions::default());
        assert!(!html.contains("direct-link"));
        assert!(html.contains("<h1>"));
    }

    #[test]
    fn inline_code_contributes_to_slug() {
        let html = render("## The `render` call", AnchorOptions::default());
        assert!(html.contains(r#"<h2 id="the-render-call">"#));
        assert!(html.contains("<code>render</code>"));
    }

    #[test]
    fn custom_class_and_symbol() {
        let options = AnchorOptions {
            class: "permalink".to_string(),
            symbol: "¶".to_string(),
            ..Default::default()
        };
        let html = render("# Title", options);
        assert!(html.contains(r#"class="permalink""#));
        assert!(html.contains(">¶</a>"));
    }
}
