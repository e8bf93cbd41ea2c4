//! Markdown rendering for the template library.
//!
//! Built on pulldown-cmark event streams: each renderer option is one pass
//! over the events, applied in a fixed order before serialization. The
//! renderer is fully configured at construction; there is no two-phase init.

mod anchors;
mod autolink;

pub use anchors::{AnchorOptions, AnchorPlacement};

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html::push_html};

/// Code-block highlighting capability injected at render time.
///
/// Implemented by the syntax-highlighting plugin; the renderer itself never
/// owns a highlighter so that plugin and library registrations stay
/// independent.
pub trait CodeHighlighter: Send + Sync {
    /// Renders a fenced code block to HTML. `language` is the fence's first
    /// info-string token, if any.
    fn highlight(&self, language: Option<&str>, code: &str) -> String;
}

/// Renderer option set, mirroring the upstream markdown engine's flags.
///
/// All flags default to off; the registrar turns every one of them on.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownOptions {
    /// Pass raw HTML through unchanged. When off, raw markup is escaped.
    pub html: bool,
    /// Render single newlines as line breaks.
    pub breaks: bool,
    /// Auto-convert bare URLs in text to links.
    pub linkify: bool,
    /// Typographic substitutions (smart quotes, dashes, ellipses).
    pub typographer: bool,
}

/// Markdown template library: one immutable instance per configuration.
pub struct MarkdownRenderer {
    options: MarkdownOptions,
    anchors: Option<AnchorOptions>,
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self {
            options,
            anchors: None,
        }
    }

    /// Attaches the heading-anchor sub-extension.
    pub fn with_anchors(mut self, anchors: AnchorOptions) -> Self {
        self.anchors = Some(anchors);
        self
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Renders markdown to HTML without code-block highlighting.
    pub fn render(&self, source: &str) -> String {
        self.render_with(source, None)
    }

    /// Renders markdown to HTML, routing language-tagged fenced code blocks
    /// through `highlighter` when one is supplied.
    pub fn render_with(&self, source: &str, highlighter: Option<&dyn CodeHighlighter>) -> String {
        let mut parser_options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        if self.options.typographer {
            parser_options |= Options::ENABLE_SMART_PUNCTUATION;
        }

        let mut events: Vec<Event<'_>> = Parser::new_ext(source, parser_options).collect();

        if !self.options.html {
            events = escape_raw_html(events);
        }
        if self.options.breaks {
            events = harden_soft_breaks(events);
        }
        if self.options.linkify {
            events = autolink::autolink_bare_urls(events);
        }
        if let Some(anchors) = &self.anchors {
            events = anchors::inject_heading_anchors(events, anchors);
        }
        if let Some(highlighter) = highlighter {
            events = highlight_code_blocks(events, highlighter);
        }

        let mut html = String::with_capacity(source.len() * 2);
        push_html(&mut html, events.into_iter());
        html
    }
}

/// Turns raw markup events into text so they render escaped.
fn escape_raw_html(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    events
        .into_iter()
        .map(|event| match event {
            Event::Html(s) | Event::InlineHtml(s) => Event::Text(s),
            other => other,
        })
        .collect()
}

/// Maps soft line breaks to hard breaks (`breaks: true` semantics).
fn harden_soft_breaks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    events
        .into_iter()
        .map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        })
        .collect()
}

/// Replaces language-tagged fenced code blocks with highlighter output.
///
/// Untagged fences and indented blocks pass through to the default renderer.
fn highlight_code_blocks<'a>(
    events: Vec<Event<'a>>,
    highlighter: &dyn CodeHighlighter,
) -> Vec<Event<'a>> {
    let mut out: Vec<Event<'a>> = Vec::with_capacity(events.len());
    let mut language: Option<String> = None;
    let mut code = String::new();

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let token = info
                    .split([' ', ','])
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string();
                if token.is_empty() {
                    out.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))));
                } else {
                    language = Some(token);
                    code.clear();
                }
            }
            Event::Text(text) if language.is_some() => code.push_str(&text),
            Event::End(TagEnd::CodeBlock) if language.is_some() => {
                let lang = language.take().unwrap_or_default();
                let mut block = highlighter.highlight(Some(&lang), &code);
                block.push('\n');
                out.push(Event::Html(block.into()));
            }
            other => out.push(other),
        }
    }

    out
}
