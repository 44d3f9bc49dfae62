//! Attribute expressions: literal values, traversals and raw expressions.

use std::fmt;

use serde_json::Map;
pub use serde_json::Value;

use crate::CodeFragment;

/// A symbolic reference such as `var.consul.auth.user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    root: String,
    attrs: Vec<String>,
}

impl Traversal {
    /// Create a traversal rooted at `var`.
    ///
    /// ```
    /// use tfsync_hcl::Traversal;
    ///
    /// let t = Traversal::variable(["consul", "address"]);
    /// assert_eq!(t.to_string(), "var.consul.address");
    /// ```
    pub fn variable<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: "var".to_string(),
            attrs: path.into_iter().map(Into::into).collect(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn attrs(&self) -> &[String] {
        &self.attrs
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for attr in &self.attrs {
            if is_identifier(attr) {
                write!(f, ".{}", attr)?;
            } else {
                write!(f, "[{}]", quote(attr))?;
            }
        }
        Ok(())
    }
}

/// The right hand side of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value, rendered with HCL syntax.
    Literal(Value),
    /// A reference to another object, e.g. `var.services`.
    Traversal(Traversal),
    /// Expression text emitted as-is, e.g. a type constraint.
    Raw(String),
}

impl Expression {
    /// Fragments for `name = <expression>`.
    pub(crate) fn attribute_fragments(&self, name: &str) -> Vec<CodeFragment> {
        match self {
            Expression::Literal(value) => literal_fragments(name, value),
            Expression::Traversal(traversal) => {
                vec![CodeFragment::line(format!("{} = {}", name, traversal))]
            }
            Expression::Raw(raw) => {
                let mut lines = raw.lines();
                let first = lines.next().unwrap_or_default();
                let mut fragments = vec![CodeFragment::line(format!("{} = {}", name, first))];
                fragments.extend(lines.map(CodeFragment::line));
                fragments
            }
        }
    }

    /// The traversal, if this expression is one.
    pub fn as_traversal(&self) -> Option<&Traversal> {
        match self {
            Expression::Traversal(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}

impl From<Traversal> for Expression {
    fn from(traversal: Traversal) -> Self {
        Expression::Traversal(traversal)
    }
}

/// Non-empty objects are expanded over several lines, everything else stays inline.
fn literal_fragments(name: &str, value: &Value) -> Vec<CodeFragment> {
    match value {
        Value::Object(map) if !map.is_empty() => {
            let body = sorted_entries(map)
                .flat_map(|(key, v)| literal_fragments(&object_key(key), v))
                .collect();
            vec![CodeFragment::block(format!("{} = {{", name), body)]
        }
        _ => vec![CodeFragment::line(format!(
            "{} = {}",
            name,
            inline_value(value)
        ))],
    }
}

fn inline_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(inline_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let entries: Vec<String> = sorted_entries(map)
                .map(|(k, v)| format!("{} = {}", object_key(k), inline_value(v)))
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

fn sorted_entries(map: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter()
}

fn object_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Whether `s` can be used as a bare HCL identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Quote a string as an HCL string literal.
///
/// Template sequences are escaped so the value is never interpolated.
///
/// ```
/// use tfsync_hcl::quote;
///
/// assert_eq!(quote("a \"b\""), r#""a \"b\"""#);
/// assert_eq!(quote("${x}"), r#""$${x}""#);
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn render(name: &str, expr: Expression) -> String {
        let mut builder = crate::CodeBuilder::hcl();
        for f in expr.attribute_fragments(name) {
            builder.apply_fragment(f);
        }
        builder.build()
    }

    #[test]
    fn test_traversal_display() {
        assert_eq!(Traversal::variable(["services"]).to_string(), "var.services");
        assert_eq!(
            Traversal::variable(["consul", "auth", "user"]).to_string(),
            "var.consul.auth.user"
        );
        assert_eq!(
            Traversal::variable(["p", "not an ident"]).to_string(),
            r#"var.p["not an ident"]"#
        );
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\\b"), r#""a\\b""#);
        assert_eq!(quote("line\nbreak\ttab"), r#""line\nbreak\ttab""#);
        assert_eq!(quote("100%{x} and $y"), r#""100%%{x} and $y""#);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("region"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("node-meta"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_scalar_literals() {
        assert_eq!(render("a", json!(null).into()), "a = null\n");
        assert_eq!(render("a", json!(true).into()), "a = true\n");
        assert_eq!(render("a", json!(8500).into()), "a = 8500\n");
        assert_eq!(render("a", json!(1.5).into()), "a = 1.5\n");
        assert_eq!(render("a", json!("x").into()), "a = \"x\"\n");
    }

    #[test]
    fn test_list_literal_inline() {
        assert_eq!(
            render("tags", json!(["a", 1, {"k": "v"}]).into()),
            "tags = [\"a\", 1, { k = \"v\" }]\n"
        );
    }

    #[test]
    fn test_object_literal_expanded_and_sorted() {
        let rendered = render(
            "consul",
            json!({"version": "2.5.0", "source": "hashicorp/consul", "odd key": {}}).into(),
        );
        assert_eq!(
            rendered,
            "consul = {\n  \"odd key\" = {}\n  source = \"hashicorp/consul\"\n  version = \"2.5.0\"\n}\n"
        );
    }

    #[test]
    fn test_raw_multiline() {
        let rendered = render("type", Expression::Raw("object({\na = string\n})".to_string()));
        assert_eq!(rendered, "type = object({\na = string\n})\n");
    }
}
