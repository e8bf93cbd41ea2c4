//! Stylesheet minification filter.

use css_minify::optimizations::{Level, Minifier};
use minijinja::value::Value;
use minijinja::{Error, ErrorKind};

use crate::filters::TemplateFilter;

/// `cssmin`: string-to-string stylesheet minification.
///
/// Delegates to the minifier; malformed input propagates its failure as a
/// template error.
pub struct CssMin;

impl TemplateFilter for CssMin {
    fn apply(&self, value: &Value) -> Result<Value, Error> {
        let code = value.as_str().ok_or_else(|| {
            Error::new(ErrorKind::InvalidOperation, "cssmin expects a string")
        })?;

        let minified = Minifier::default()
            .minify(code, Level::Three)
            .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("cssmin: {e:?}")))?;

        Ok(Value::from(minified))
    }
}
