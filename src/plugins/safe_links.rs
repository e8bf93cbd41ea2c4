//! Outbound-link safety attributes.

use regex::{Captures, Regex};

use crate::plugins::Plugin;

/// Adds `target="_blank" rel="noopener noreferrer"` to external anchors in
/// rendered HTML.
///
/// Anchors that already carry a `target` or `rel` attribute are left alone,
/// as are relative and fragment links.
pub struct SafeLinks {
    anchor_re: Regex,
}

impl Default for SafeLinks {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeLinks {
    pub fn new() -> Self {
        Self {
            anchor_re: Regex::new(r"<a\s[^>]*>").unwrap(),
        }
    }
}

impl Plugin for SafeLinks {
    fn name(&self) -> &'static str {
        "safe-links"
    }

    fn postprocess(&self, html: String) -> String {
        self.anchor_re
            .replace_all(&html, |caps: &Captures<'_>| {
                let tag = &caps[0];
                let external =
                    tag.contains("href=\"http://") || tag.contains("href=\"https://");
                if !external || tag.contains("target=") || tag.contains("rel=") {
                    return tag.to_string();
                }
                format!(
                    "{} target=\"_blank\" rel=\"noopener noreferrer\">",
                    &tag[..tag.len() - 1]
                )
            })
            .into_owned()
    }
}
