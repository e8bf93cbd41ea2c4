//! Bare-URL auto-linking (`linkify: true` semantics).

use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};

/// Rewrites bare `http(s)://` and `www.` URLs in text events into links.
///
/// Text inside code blocks, existing links, and images is left alone.
pub(crate) fn autolink_bare_urls(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out: Vec<Event<'_>> = Vec::with_capacity(events.len());
    let mut in_code_block = false;
    let mut link_depth = 0usize;

    for event in events {
        match event {
            Event::Start(tag @ Tag::CodeBlock(_)) => {
                in_code_block = true;
                out.push(Event::Start(tag));
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push(Event::End(TagEnd::CodeBlock));
            }
            Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                link_depth += 1;
                out.push(Event::Start(tag));
            }
            Event::End(end @ (TagEnd::Link | TagEnd::Image)) => {
                link_depth = link_depth.saturating_sub(1);
                out.push(Event::End(end));
            }
            Event::Text(text) if !in_code_block && link_depth == 0 => {
                linkify_text(text, &mut out);
            }
            other => out.push(other),
        }
    }

    out
}

/// Splits one text event around any bare URLs it contains.
fn linkify_text<'a>(text: CowStr<'a>, out: &mut Vec<Event<'a>>) {
    let s: &str = &text;
    let mut cursor = 0;
    let mut rewrote = false;

    while let Some((start, end, is_www)) = next_bare_url(s, cursor) {
        if start > cursor {
            out.push(Event::Text(s[cursor..start].to_string().into()));
        }

        let url = &s[start..end];
        let dest = if is_www {
            format!("http://{url}")
        } else {
            url.to_string()
        };

        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: dest.into(),
            title: "".into(),
            id: "".into(),
        }));
        out.push(Event::Text(url.to_string().into()));
        out.push(Event::End(TagEnd::Link));

        cursor = end;
        rewrote = true;
    }

    if !rewrote {
        out.push(Event::Text(text));
    } else if cursor < s.len() {
        out.push(Event::Text(s[cursor..].to_string().into()));
    }
}

/// Finds the next bare URL at or after `from`.
///
/// Returns `(start, end, is_www)`. A match must begin at a word boundary and
/// trailing sentence punctuation is excluded.
fn next_bare_url(s: &str, from: usize) -> Option<(usize, usize, bool)> {
    let mut search = from;

    while search < s.len() {
        let rest = &s[search..];
        let candidates = [
            rest.find("https://").map(|i| (i, false)),
            rest.find("http://").map(|i| (i, false)),
            rest.find("www.").map(|i| (i, true)),
        ];
        let (offset, is_www) = candidates.into_iter().flatten().min()?;
        let start = search + offset;

        // Word boundary: not preceded by an alphanumeric character.
        let bounded = s[..start]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);

        let end = start
            + s[start..]
                .find(|c: char| c.is_whitespace() || c == '<' || c == '>' || c == '"')
                .unwrap_or(s.len() - start);
        let end = start + s[start..end].trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '\'']).len();

        // Require something after the scheme/prefix.
        let prefix_len = if is_www { 4 } else { s[start..end].find("//").map(|i| i + 2).unwrap_or(0) };
        if bounded && end - start > prefix_len {
            return Some((start, end, is_www));
        }

        search = start + prefix_len.max(1);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{MarkdownOptions, MarkdownRenderer};

    fn render(source: &str) -> String {
        let options = MarkdownOptions {
            linkify: true,
            ..Default::default()
        };
        MarkdownRenderer::new(options).render(source)
    }

    #[test]
    fn links_https_url() {
        let html = render("see https://example.com for details");
        assert!(html.contains(r#"<a href="https://example.com">https://example.com</a>"#));
    }

    #[test]
    fn links_www_url_with_http_scheme() {
        let html = render("visit www.example.com today");
        assert!(html.contains(r#"<a href="http://www.example.com">www.example.com</a>"#));
    }

    #[test]
    fn trailing_punctuation_stays_outside_the_link() {
        let html = render("go to https://example.com/docs.");
        assert!(html.contains(r#"href="https://example.com/docs""#));
        assert!(html.contains("</a>."));
    }

    #[test]
    fn multiple_urls_in_one_paragraph() {
        let html = render("both https://a.example and https://b.example work");
        assert!(html.contains(r#"href="https://a.example""#));
        assert!(html.contains(r#"href="https://b.example""#));
    }

    #[test]
    fn urls_in_code_spans_are_untouched() {
        let html = render("run `curl https://example.com` locally");
        assert!(html.contains("<code>curl https://example.com</code>"));
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn urls_in_code_blocks_are_untouched() {
        let html = render("```\nhttps://example.com\n```");
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn existing_link_text_is_not_double_linked() {
        let html = render("[already https://example.com linked](https://other.example)");
        assert_eq!(html.matches("<a href").count(), 1);
    }

    #[test]
    fn mid_word_scheme_is_not_linked() {
        let html = render("xhttps://example.com is not a url boundary");
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn plain_text_passes_through() {
        let html = render("no urls here at all");
        assert_eq!(html.trim(), "<p>no urls here at all</p>");
    }
}
