//! Debug-dump filter for template values.

use minijinja::value::Value;
use minijinja::{Error, ErrorKind};

use crate::filters::TemplateFilter;

/// `dump`: pretty-prints any template value for debugging.
pub struct Dump;

impl TemplateFilter for Dump {
    fn apply(&self, value: &Value) -> Result<Value, Error> {
        let dumped = serde_json::to_string_pretty(value).map_err(|e| {
            Error::new(ErrorKind::InvalidOperation, format!("dump: {e}"))
        })?;
        Ok(Value::from(dumped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn dumps_map_fields() {
        let value: Value = context! { name => "site", count => 3 };
        let out = Dump.apply(&value).unwrap();
        let text = out.as_str().unwrap();

        assert!(!text.is_empty());
        assert!(text.contains("name"));
        assert!(text.contains("site"));
        assert!(text.contains('3'));
    }

    #[test]
    fn dumps_scalars() {
        let out = Dump.apply(&Value::from(42)).unwrap();
        assert_eq!(out.as_str().unwrap(), "42");
    }

    #[test]
    fn dumps_sequences() {
        let value = Value::from_iter(["a", "b"]);
        let out = Dump.apply(&value).unwrap();
        let text = out.as_str().unwrap();
        assert!(text.contains("\"a\""));
        assert!(text.contains("\"b\""));
    }
}
