//! Fenced-code syntax highlighting via syntect.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;

use crate::markdown::CodeHighlighter;
use crate::plugins::Plugin;

const DEFAULT_THEME: &str = "InspiredGitHub";

/// Options passed through verbatim to the highlighting extension.
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    /// Template formats the extension applies to.
    pub template_formats: Vec<String>,
    /// Wrap every output line in a highlight span, markers or not.
    pub always_wrap_line_highlights: bool,
    /// Trim leading blank lines and trailing whitespace from the block.
    pub trim: bool,
    /// Sequence used to join output lines.
    pub line_separator: String,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            template_formats: vec!["njk".to_string(), "md".to_string()],
            always_wrap_line_highlights: false,
            trim: true,
            line_separator: "\n".to_string(),
        }
    }
}

/// Syntax-highlighting plugin.
///
/// Emits `<pre class="language-X"><code class="language-X">` blocks; lines
/// are highlighted independently and joined with the configured separator.
/// Unknown languages fall back to escaped plain text.
pub struct SyntaxHighlight {
    options: HighlightOptions,
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntaxHighlight {
    pub fn new(options: HighlightOptions) -> Self {
        // Non-newline syntaxes: lines are highlighted without their
        // terminators, matching the separator-join output model.
        let syntaxes = SyntaxSet::load_defaults_nonewlines();
        let theme = ThemeSet::load_defaults()
            .themes
            .get(DEFAULT_THEME)
            .cloned()
            .unwrap_or_default();
        Self {
            options,
            syntaxes,
            theme,
        }
    }

    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    fn highlight_lines(&self, language: &str, code: &str) -> Vec<String> {
        let syntax = self.syntaxes.find_syntax_by_token(language);

        match syntax {
            Some(syntax) => {
                let mut highlighter = HighlightLines::new(syntax, &self.theme);
                code.lines()
                    .map(|line| {
                        highlighter
                            .highlight_line(line, &self.syntaxes)
                            .ok()
                            .and_then(|ranges| {
                                styled_line_to_highlighted_html(&ranges, IncludeBackground::No)
                                    .ok()
                            })
                            .unwrap_or_else(|| escape_html(line))
                    })
                    .collect()
            }
            None => code.lines().map(escape_html).collect(),
        }
    }
}

impl CodeHighlighter for SyntaxHighlight {
    fn highlight(&self, language: Option<&str>, code: &str) -> String {
        let language = language.unwrap_or("");
        let code = if self.options.trim {
            code.trim_start_matches(['\n', '\r']).trim_end()
        } else {
            code
        };

        let mut lines = self.highlight_lines(language, code);
        if self.options.always_wrap_line_highlights {
            lines = lines
                .into_iter()
                .map(|line| format!("<span class=\"highlight-line\">{line}</span>"))
                .collect();
        }

        let class = if language.is_empty() {
            String::new()
        } else {
            format!(" class=\"language-{language}\"")
        };
        format!(
            "<pre{class}><code{class}>{}</code></pre>",
            lines.join(&self.options.line_separator)
        )
    }
}

impl Plugin for SyntaxHighlight {
    fn name(&self) -> &'static str {
        "syntax-highlight"
    }

    fn handles(&self, format: &str) -> bool {
        self.options.template_formats.iter().any(|f| f == format)
    }

    fn code_highlighter(&self) -> Option<&dyn CodeHighlighter> {
        Some(self)
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
